//! The motion-control collaborator contract.
//!
//! Autonomous utilities in this crate never drive motors themselves. They
//! issue commands through a [`Chassis`], which wraps whatever PID and
//! odometry engine the robot uses. Each motion method resolves only once the
//! engine reports the motion as finished (settled, timed out, or stalled), so
//! awaiting it is the same as a blocking wait.
//!
//! # Example
//!
//! ```ignore
//! use autonkit::motion::chassis::{Chassis, TurnMode};
//!
//! async fn square_up<C: Chassis>(chassis: &mut C) {
//!     chassis.turn_to(0.0, 90.0, TurnMode::Raw).await;
//!     chassis.drive(-6.0, 60.0).await;
//!     if chassis.is_interfered() {
//!         // The drive stalled against something.
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::error::DeviceError;

/// Drivetrain motor behavior when no voltage is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrakeMode {
    /// Motors spin freely.
    Coast,
    /// Motors short their windings to slow down.
    Brake,
    /// Motors actively hold their current position.
    Hold,
}

/// How a turn is executed by the motion engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnMode {
    /// Turns along the shortest direction to the target.
    Shortest,
    /// Turns with no supplementary path correction.
    ///
    /// Used when measuring, so the sensor readings reflect a pure turn.
    Raw,
}

/// A 2D position with heading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// The x-coordinate in inches.
    pub x: f64,
    /// The y-coordinate in inches.
    pub y: f64,
    /// The heading in degrees.
    pub t: f64,
}

impl Pose {
    pub fn new(x: f64, y: f64, t: f64) -> Self { Self { x, y, t } }

    /// Creates a Pose at the origin (0, 0) with heading 0.
    pub fn origin() -> Self { Self::new(0.0, 0.0, 0.0) }
}

/// A drivetrain plus the motion engine controlling it.
///
/// Implementors own the heading sensor, drive encoders and the interference
/// flag. Callers only touch that state through these methods and never
/// while another motion is in flight.
#[async_trait(?Send)]
pub trait Chassis {
    /// Clears any pending PID targets so the next motion starts fresh.
    async fn reset_targets(&mut self);

    /// Zeros the heading sensor.
    async fn reset_heading(&mut self) -> Result<(), DeviceError>;

    /// Returns the current heading in degrees.
    async fn heading(&mut self) -> Result<f64, DeviceError>;

    /// Zeros the drivetrain motor encoders.
    async fn reset_drive_sensors(&mut self) -> Result<(), DeviceError>;

    /// Sets the brake mode of every drivetrain motor.
    async fn set_brake_mode(&mut self, mode: BrakeMode);

    /// Overwrites the odometry pose.
    async fn set_pose(&mut self, pose: Pose);

    /// Turns to an absolute heading in degrees and waits for the turn to end.
    async fn turn_to(&mut self, target: f64, power: f64, mode: TurnMode);

    /// Drives a relative distance in inches and waits for the motion to end.
    ///
    /// Negative distances drive backward.
    async fn drive(&mut self, distance: f64, power: f64);

    /// Whether the last motion ended because the drivetrain was blocked.
    fn is_interfered(&self) -> bool;
}
