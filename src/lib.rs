//! # autonkit
//!
//! Autonomous-period utilities for VEX V5 robots running on
//! [Vexide](https://vexide.dev). The crate covers the parts of an autonomous
//! program that are more than choreography:
//!
//! - **Offset Calibration**: Measures each tracking wheel's distance to the
//!   turning center by turning in place and averaging arc length over angle.
//! - **Stall Recovery**: Retries a blocked drive a bounded number of times,
//!   nudging the robot free between attempts.
//! - **Logging**: A console and SD card logger for reviewing runs.
//!
//! The PID and odometry engine is not part of this crate. Wrap yours in a
//! [`Chassis`](motion::chassis::Chassis) implementation and pass it in.
//!
//! ## Quick Start
//!
//! ```ignore
//! use autonkit::auton::routines::measure_offsets;
//! use autonkit::motion::delay::VexDelay;
//! use autonkit::motion::odom::devices::{TrackerAxis, TrackerSet, TrackingSensor, TrackingWheel};
//! use vexide::prelude::*;
//!
//! #[vexide::main]
//! async fn main(peripherals: Peripherals) {
//!     let back = TrackingWheel::new(
//!         TrackingSensor::new_rotation_sensor(
//!             RotationSensor::new(peripherals.port_5, Direction::Forward),
//!         ),
//!         2.75, 1.0, 1.0, 0.0,
//!     );
//!     let mut trackers = TrackerSet::new().with_back(back);
//!     let mut chassis = MyChassis::new(/* ... */);
//!
//!     match measure_offsets(&mut chassis, &mut trackers, VexDelay).await {
//!         Ok(report) => println!("Back offset: {:?}", report.offset(TrackerAxis::Back)),
//!         Err(e) => println!("Calibration failed, offsets unchanged: {}", e),
//!     }
//! }
//! ```
//!
//! ## Modules
//!
//! - [`auton`]: Offset calibration, stall recovery and ready-made routines.
//! - [`motion`]: The chassis, delay and tracker traits the routines run on.
//! - [`config`]: Tunable constants.
//! - [`error`]: Error types.
//! - [`fs`]: Logging.

/// Autonomous utilities.
///
/// - [`calibration`](auton::calibration): Tracking wheel offset calibration.
/// - [`recovery`](auton::recovery): Bounded stall recovery.
/// - [`routines`](auton::routines): Routines built on the two.
pub mod auton;

/// Tunable constants for calibration and recovery.
pub mod config;

/// Error types.
pub mod error;

/// Filesystem utilities module.
///
/// Contains the logger that records runs to the V5 Brain's SD card.
pub mod fs;

/// Motion-control seams.
///
/// Traits for the motion engine, settle delays and tracking wheels, plus
/// angle helpers.
pub mod motion;

#[cfg(test)]
pub(crate) mod testing;
