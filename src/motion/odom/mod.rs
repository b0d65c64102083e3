//! Odometry tracking hardware.
//!
//! This crate does not run odometry itself; the motion engine behind a
//! [`Chassis`](crate::motion::chassis::Chassis) does. What lives here is the
//! tracker hardware model that the engine consumes and that calibration
//! writes offsets back into.
//!
//! # Hardware
//!
//! Up to four tracking wheels may be mounted:
//!
//! - **Left / Right**: Parallel to the direction of travel, either side of center.
//! - **Back / Front**: Perpendicular to the direction of travel.
//!
//! Each wheel's distance to the turning center must be known for odometry
//! to resolve turns from translation. Measure it with
//! [`OffsetCalibrator`](crate::auton::calibration::OffsetCalibrator) rather
//! than a ruler.

/// Tracking devices and tracker sets.
pub mod devices;
