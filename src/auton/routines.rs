//! Ready-made routines built on the calibration and recovery utilities.
//!
//! These are the leaf routines a competition program calls directly from its
//! autonomous selector.

use log::info;

use crate::{
    auton::{
        calibration::{CalibrationReport, OffsetCalibrator},
        recovery::{RecoveryOutcome, StallRecoveryController},
    },
    config::{
        CalibrationConfig, DEFAULT_TRIALS, DEFAULT_TURN_POWER, DRIVE_SPEED, RecoveryConfig,
        TURN_SPEED,
    },
    error::{CalibrationError, RecoveryError},
    motion::{
        chassis::{Chassis, TurnMode},
        delay::Delay,
        odom::devices::{Tracker, TrackerSet},
    },
};

/// Measures and writes the offsets of every installed tracking wheel.
///
/// Runs 10 trials at roughly half power. Run it with the robot on an open,
/// flat patch of field: it spins in place for several seconds.
pub async fn measure_offsets<C, T, D>(
    chassis: &mut C,
    trackers: &mut TrackerSet<T>,
    delay: D,
) -> Result<CalibrationReport, CalibrationError>
where
    C: Chassis,
    T: Tracker,
    D: Delay,
{
    OffsetCalibrator::new(CalibrationConfig::default(), delay)
        .calibrate(chassis, trackers, DEFAULT_TRIALS, DEFAULT_TURN_POWER)
        .await
}

/// What [`interference_example`] ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterferenceExampleOutcome {
    /// The forward drive was clear and the robot turned to 90 degrees.
    Turned,
    /// The forward drive was blocked and the robot tried to back out.
    Tugged(RecoveryOutcome),
}

/// Drives forward and either continues or backs out if it got blocked.
///
/// If the 24" forward drive is clear the robot turns to face 90 degrees.
/// If it is blocked the robot tries to back out 12" with up to 3 attempts
/// and the routine ends there.
pub async fn interference_example<C, D>(
    chassis: &mut C,
    delay: D,
) -> Result<InterferenceExampleOutcome, RecoveryError>
where
    C: Chassis,
    D: Delay,
{
    chassis.drive(24.0, DRIVE_SPEED).await;

    if chassis.is_interfered() {
        info!("Forward drive blocked, tugging back");
        let outcome = StallRecoveryController::new(RecoveryConfig::default(), delay)
            .run_with_recovery(chassis, -12.0, 3)
            .await?;
        return Ok(InterferenceExampleOutcome::Tugged(outcome));
    }

    chassis.turn_to(90.0, TURN_SPEED, TurnMode::Shortest).await;
    Ok(InterferenceExampleOutcome::Turned)
}
