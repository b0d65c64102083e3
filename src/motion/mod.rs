//! Motion-control seams.
//!
//! This module defines how autonomous utilities talk to the robot. It
//! includes:
//!
//! - **Chassis**: The motion engine contract (turns, drives, sensor resets,
//!   interference detection).
//! - **Delay**: Injectable settle delays.
//! - **Odometry hardware**: Tracking wheels and their offsets.
//! - **Angle helpers**: Heading wraparound and unit conversion.
//!
//! # Architecture
//!
//! Everything here is a trait or a plain value. The actual PID and odometry
//! loops belong to whatever motion library the robot runs; wrap it in a
//! [`Chassis`](chassis::Chassis) implementation and hand it to the routines
//! in [`auton`](crate::auton).

/// Heading wraparound and degree/radian helpers.
pub mod angle;

/// The motion engine contract.
///
/// Provides the [`Chassis`](chassis::Chassis) trait along with
/// [`BrakeMode`](chassis::BrakeMode), [`TurnMode`](chassis::TurnMode) and
/// [`Pose`](chassis::Pose).
pub mod chassis;

/// Settle delays.
pub mod delay;

/// Tracking wheel hardware for odometry.
pub mod odom;
