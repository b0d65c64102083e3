//! Settle delays.
//!
//! Routines pause between motions to let the robot stop oscillating. The
//! pause goes through [`Delay`] so it can be swapped out: on the V5 Brain
//! it yields to the vexide executor, on a desktop it blocks the thread, and
//! in tests it just records the request.

use std::time::Duration;

use async_trait::async_trait;

/// Something that can wait for a fixed amount of time.
#[async_trait(?Send)]
pub trait Delay {
    /// Waits for `duration` before resolving.
    async fn sleep(&mut self, duration: Duration);
}

/// Delay backed by the vexide runtime timer.
#[cfg(target_os = "vexos")]
#[derive(Debug, Default, Clone, Copy)]
pub struct VexDelay;

#[cfg(target_os = "vexos")]
#[async_trait(?Send)]
impl Delay for VexDelay {
    async fn sleep(&mut self, duration: Duration) { vexide::time::sleep(duration).await; }
}

/// Delay that blocks the current thread.
///
/// Meant for host-side simulation where no async timer is available.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadDelay;

#[async_trait(?Send)]
impl Delay for ThreadDelay {
    async fn sleep(&mut self, duration: Duration) { std::thread::sleep(duration); }
}
