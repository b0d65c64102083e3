//! Tunable constants for calibration and recovery.
//!
//! Both configs default to values that work on a typical 4-6 motor
//! drivetrain. Override individual fields with struct update syntax:
//!
//! ```ignore
//! use std::time::Duration;
//! use autonkit::config::RecoveryConfig;
//!
//! let config = RecoveryConfig {
//!     settle: Duration::from_millis(600),
//!     ..RecoveryConfig::default()
//! };
//! ```

use std::time::Duration;

use crate::motion::chassis::BrakeMode;

/// Default drive speed for routine motions, out of 127.
pub const DRIVE_SPEED: f64 = 110.0;

/// Default turn speed for routine motions, out of 127.
pub const TURN_SPEED: f64 = 90.0;

/// Number of calibration trials run by the preset routine.
pub const DEFAULT_TRIALS: u32 = 10;

/// Turn power used by the preset calibration routine (roughly half of 127).
pub const DEFAULT_TURN_POWER: f64 = 63.0;

/// Parameters for [`OffsetCalibrator`](crate::auton::calibration::OffsetCalibrator).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationConfig {
    /// Turn target in degrees for even-numbered trials.
    pub even_target:       f64,
    /// Turn target in degrees for odd-numbered trials.
    pub odd_target:        f64,
    /// Pause after each turn before sampling the sensors.
    pub settle:            Duration,
    /// Smallest angular delta in radians accepted from a trial.
    pub min_angular_delta: f64,
    /// Brake mode applied to the drivetrain before every trial.
    pub brake_mode:        BrakeMode,
}

impl CalibrationConfig {
    pub fn new(
        even_target: f64,
        odd_target: f64,
        settle: Duration,
        min_angular_delta: f64,
        brake_mode: BrakeMode,
    ) -> Self {
        Self {
            even_target,
            odd_target,
            settle,
            min_angular_delta,
            brake_mode,
        }
    }

    /// Returns the commanded turn target for trial `index`.
    pub fn target_for(&self, index: u32) -> f64 {
        if index % 2 == 0 { self.even_target } else { self.odd_target }
    }
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            even_target:       90.0,
            odd_target:        270.0,
            settle:            Duration::from_millis(250),
            min_angular_delta: 1.0_f64.to_radians(),
            brake_mode:        BrakeMode::Hold,
        }
    }
}

/// Parameters for [`StallRecoveryController`](crate::auton::recovery::StallRecoveryController).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecoveryConfig {
    /// Power for each primary attempt, out of 127.
    pub drive_power:    f64,
    /// Length of the corrective nudge in inches. Always positive; the sign
    /// is taken from the primary displacement.
    pub nudge_distance: f64,
    /// Power for the corrective nudge, out of 127.
    pub nudge_power:    f64,
    /// Pause after the nudge before the next attempt.
    pub settle:         Duration,
}

impl RecoveryConfig {
    pub fn new(drive_power: f64, nudge_distance: f64, nudge_power: f64, settle: Duration) -> Self {
        Self {
            drive_power,
            nudge_distance,
            nudge_power,
            settle,
        }
    }
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            drive_power:    127.0,
            nudge_distance: 2.0,
            nudge_power:    20.0,
            settle:         Duration::from_secs(1),
        }
    }
}
