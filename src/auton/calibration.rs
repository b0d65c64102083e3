//! Tracking wheel offset calibration.
//!
//! Turning in place makes every off-center tracking wheel sweep an arc
//! whose length is its distance to the turning center times the angle
//! turned. [`OffsetCalibrator`] turns the robot several times, divides
//! each wheel's travel by the angle swept, and averages the results into
//! the wheel's distance-to-center offset.
//!
//! Turns alternate between two targets so a bias in one turning direction
//! averages out.
//!
//! # Example
//!
//! ```ignore
//! use autonkit::auton::calibration::OffsetCalibrator;
//! use autonkit::motion::delay::VexDelay;
//!
//! let mut calibrator = OffsetCalibrator::new(CalibrationConfig::default(), VexDelay);
//! let report = calibrator.calibrate(&mut chassis, &mut trackers, 10, 63.0).await?;
//! ```

use log::{debug, info};

use crate::{
    config::CalibrationConfig,
    error::CalibrationError,
    motion::{
        angle::swept_angle,
        chassis::{Chassis, Pose, TurnMode},
        delay::Delay,
        odom::devices::{Tracker, TrackerAxis, TrackerSet},
    },
};

/// Running per-axis sums of travel over swept angle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalibrationAccumulator {
    sums:   [f64; 4],
    trials: u32,
}

impl CalibrationAccumulator {
    pub fn new() -> Self { Self::default() }

    /// Adds one trial's ratio for `axis`.
    pub fn add(&mut self, axis: TrackerAxis, ratio: f64) { self.sums[axis.index()] += ratio; }

    /// Marks a trial as finished.
    pub fn complete_trial(&mut self) { self.trials += 1; }

    /// Number of trials finished so far.
    pub fn trials(&self) -> u32 { self.trials }

    /// Mean ratio for `axis`, or `None` if no trial has finished.
    pub fn mean(&self, axis: TrackerAxis) -> Option<f64> {
        if self.trials == 0 {
            None
        } else {
            Some(self.sums[axis.index()] / self.trials as f64)
        }
    }
}

/// Offsets written by a successful calibration run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationReport {
    offsets: [Option<f64>; 4],
    trials:  u32,
}

impl CalibrationReport {
    /// The offset written to the tracker on `axis`, or `None` if no tracker
    /// is installed there.
    pub fn offset(&self, axis: TrackerAxis) -> Option<f64> { self.offsets[axis.index()] }

    /// Number of trials the offsets were averaged over.
    pub fn trials(&self) -> u32 { self.trials }
}

/// Measures tracking wheel offsets by turning in place.
pub struct OffsetCalibrator<D> {
    pub config: CalibrationConfig,
    delay:      D,
}

impl<D: Delay> OffsetCalibrator<D> {
    pub fn new(config: CalibrationConfig, delay: D) -> Self { Self { config, delay } }

    /// Gives back the delay, e.g. to inspect a test double.
    pub fn into_delay(self) -> D { self.delay }

    /// Runs `trials` turns and writes the averaged offset into every
    /// installed tracker.
    ///
    /// Offsets are written only after every trial has completed. If any
    /// trial fails, the trackers keep their previous offsets.
    ///
    /// # Errors
    ///
    /// - [`CalibrationError::NoTrials`] if `trials` is zero.
    /// - [`CalibrationError::DegenerateTrial`] if a turn swept no angle at
    ///   all, or less than [`CalibrationConfig::min_angular_delta`].
    /// - [`CalibrationError::Device`] if a sensor could not be reset or read.
    pub async fn calibrate<C, T>(
        &mut self,
        chassis: &mut C,
        trackers: &mut TrackerSet<T>,
        trials: u32,
        turn_power: f64,
    ) -> Result<CalibrationReport, CalibrationError>
    where
        C: Chassis,
        T: Tracker,
    {
        if trials == 0 {
            return Err(CalibrationError::NoTrials);
        }
        info!(
            "Offset calibration started: {} trials at power {} with {} trackers",
            trials,
            turn_power,
            trackers.len()
        );

        trackers.reset_all().await?;

        let mut accumulator = CalibrationAccumulator::new();
        for trial in 0..trials {
            let angular_delta = self.run_trial(chassis, trackers, trial, turn_power).await?;
            for (axis, tracker) in trackers.present() {
                accumulator.add(axis, tracker.distance().await / angular_delta);
            }
            accumulator.complete_trial();
        }

        let mut offsets = [None; 4];
        for (axis, tracker) in trackers.present_mut() {
            if let Some(offset) = accumulator.mean(axis) {
                tracker.set_distance_to_center(offset);
                offsets[axis.index()] = Some(offset);
                info!("Calibrated {} tracker offset: {:.4} in", axis, offset);
            }
        }

        Ok(CalibrationReport {
            offsets,
            trials: accumulator.trials(),
        })
    }

    /// Resets the robot, performs one turn, and returns the angle swept in
    /// radians.
    async fn run_trial<C, T>(
        &mut self,
        chassis: &mut C,
        trackers: &mut TrackerSet<T>,
        trial: u32,
        turn_power: f64,
    ) -> Result<f64, CalibrationError>
    where
        C: Chassis,
        T: Tracker,
    {
        chassis.reset_targets().await;
        chassis.reset_heading().await?;
        chassis.reset_drive_sensors().await?;
        trackers.reset_all().await?;
        chassis.set_brake_mode(self.config.brake_mode).await;
        chassis.set_pose(Pose::origin()).await;

        let start = chassis.heading().await?;
        let target = self.config.target_for(trial);

        chassis.turn_to(target, turn_power, TurnMode::Raw).await;
        self.delay.sleep(self.config.settle).await;

        let angular_delta = swept_angle(start, chassis.heading().await?);
        debug!(
            "Calibration trial {}: target {} deg, swept {:.2} deg",
            trial,
            target,
            angular_delta.to_degrees()
        );

        // A zero sweep is rejected even when the configured threshold is not positive.
        if angular_delta.is_nan() ||
            angular_delta <= 0.0 ||
            angular_delta < self.config.min_angular_delta
        {
            return Err(CalibrationError::DegenerateTrial {
                trial,
                angular_delta,
            });
        }
        Ok(angular_delta)
    }
}

#[cfg(test)]
mod tests {
    use std::{f64::consts::PI, time::Duration};

    use super::*;
    use crate::{
        error::DeviceError,
        motion::{angle::to_rad, chassis::BrakeMode},
        testing::{MockChassis, MockTracker, RecordingDelay},
    };

    const EPS: f64 = 1e-9;

    fn calibrator() -> OffsetCalibrator<RecordingDelay> {
        OffsetCalibrator::new(CalibrationConfig::default(), RecordingDelay::default())
    }

    #[tokio::test]
    async fn offset_is_mean_of_travel_over_angle() {
        let turns = [90.0, -88.0, 92.0];
        let left = [3.0, -2.9, 3.2];
        let back = [-1.5, 1.4, -1.6];
        let mut chassis = MockChassis::with_turns(turns);
        let mut trackers = TrackerSet::new()
            .with_left(MockTracker::new(left))
            .with_back(MockTracker::new(back));

        let report = calibrator()
            .calibrate(&mut chassis, &mut trackers, 3, 63.0)
            .await
            .unwrap();

        let mean = |readings: &[f64]| {
            readings
                .iter()
                .zip(turns.iter())
                .map(|(d, t)| d / to_rad(t.abs()))
                .sum::<f64>() /
                3.0
        };
        let left_offset = trackers.left.as_ref().unwrap().offset;
        let back_offset = trackers.back.as_ref().unwrap().offset;
        assert!((left_offset - mean(&left[..])).abs() < EPS);
        assert!((back_offset - mean(&back[..])).abs() < EPS);
        assert_eq!(report.offset(TrackerAxis::Left), Some(left_offset));
        assert_eq!(report.offset(TrackerAxis::Right), None);
        assert_eq!(report.trials(), 3);
    }

    #[tokio::test]
    async fn absent_trackers_are_never_touched() {
        let mut chassis = MockChassis::with_turns([90.0, -90.0]);
        let mut trackers = TrackerSet::new().with_front(MockTracker::new([1.0, -1.0]));

        calibrator()
            .calibrate(&mut chassis, &mut trackers, 2, 63.0)
            .await
            .unwrap();

        assert!(trackers.left.is_none());
        assert!(trackers.right.is_none());
        assert!(trackers.back.is_none());
        let front = trackers.front.as_ref().unwrap();
        assert_eq!(front.writes, 1);
        // Reset once up front, then once per trial.
        assert_eq!(front.resets, 3);
    }

    #[tokio::test]
    async fn targets_alternate_and_use_raw_mode() {
        let mut chassis = MockChassis::with_turns([90.0; 5]);
        let mut trackers = TrackerSet::new().with_right(MockTracker::new([2.0; 5]));

        calibrator()
            .calibrate(&mut chassis, &mut trackers, 5, 63.0)
            .await
            .unwrap();

        let targets: Vec<f64> = chassis.turns.iter().map(|t| t.target).collect();
        assert_eq!(targets, vec![90.0, 270.0, 90.0, 270.0, 90.0]);
        assert!(chassis.turns.iter().all(|t| t.mode == TurnMode::Raw && t.power == 63.0));
    }

    #[tokio::test]
    async fn every_trial_starts_from_a_clean_state() {
        let mut chassis = MockChassis::with_turns([90.0; 4]);
        let mut trackers = TrackerSet::<MockTracker>::new();
        let mut calibrator = calibrator();

        calibrator
            .calibrate(&mut chassis, &mut trackers, 4, 63.0)
            .await
            .unwrap();

        assert_eq!(chassis.target_resets, 4);
        assert_eq!(chassis.heading_resets, 4);
        assert_eq!(chassis.drive_sensor_resets, 4);
        assert_eq!(chassis.brake_modes, vec![BrakeMode::Hold; 4]);
        assert_eq!(chassis.poses, vec![Pose::origin(); 4]);
        assert_eq!(calibrator.into_delay().requested, vec![Duration::from_millis(250); 4]);
    }

    #[tokio::test]
    async fn heading_wraparound_is_measured_short_way() {
        let mut chassis = MockChassis::with_turns([20.0]);
        chassis.heading_after_reset = 350.0;
        let mut trackers = TrackerSet::new().with_left(MockTracker::new([to_rad(20.0) * 4.0]));

        calibrator()
            .calibrate(&mut chassis, &mut trackers, 1, 63.0)
            .await
            .unwrap();

        // 350 -> 10 is 20 degrees, so 4" of radius.
        assert!((trackers.left.as_ref().unwrap().offset - 4.0).abs() < EPS);
    }

    #[tokio::test]
    async fn degenerate_trial_aborts_without_writing() {
        let mut chassis = MockChassis::with_turns([90.0, 0.0, 90.0]);
        let mut trackers = TrackerSet::new()
            .with_left(MockTracker::new([PI; 3]).with_offset(1.25))
            .with_right(MockTracker::new([-PI; 3]).with_offset(-1.25));

        let err = calibrator()
            .calibrate(&mut chassis, &mut trackers, 3, 63.0)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            CalibrationError::DegenerateTrial {
                trial:         1,
                angular_delta: 0.0,
            }
        );
        for (_, tracker) in trackers.present() {
            assert_eq!(tracker.writes, 0);
        }
        assert_eq!(trackers.left.as_ref().unwrap().offset, 1.25);
        assert_eq!(trackers.right.as_ref().unwrap().offset, -1.25);
        // No turn is attempted after the failure.
        assert_eq!(chassis.turns.len(), 2);
    }

    #[tokio::test]
    async fn zero_sweep_aborts_even_without_threshold() {
        let config = CalibrationConfig {
            min_angular_delta: 0.0,
            ..CalibrationConfig::default()
        };
        let mut calibrator = OffsetCalibrator::new(config, RecordingDelay::default());
        let mut chassis = MockChassis::with_turns([0.0]);
        let mut trackers = TrackerSet::new().with_left(MockTracker::new([1.0]).with_offset(2.0));

        let err = calibrator
            .calibrate(&mut chassis, &mut trackers, 1, 63.0)
            .await
            .unwrap_err();

        assert!(matches!(err, CalibrationError::DegenerateTrial { trial: 0, .. }));
        let left = trackers.left.as_ref().unwrap();
        assert_eq!(left.writes, 0);
        assert_eq!(left.offset, 2.0);
    }

    #[tokio::test]
    async fn tracker_reset_failure_propagates_without_writing() {
        let mut chassis = MockChassis::with_turns([90.0]);
        let mut failing = MockTracker::new([1.0]);
        failing.reset_error = Some(DeviceError::Disconnected {
            device: "rotation sensor",
        });
        let mut trackers = TrackerSet::new()
            .with_left(MockTracker::new([1.0]))
            .with_right(failing);

        let err = calibrator()
            .calibrate(&mut chassis, &mut trackers, 1, 63.0)
            .await
            .unwrap_err();

        assert!(matches!(err, CalibrationError::Device(DeviceError::Disconnected { .. })));
        for (_, tracker) in trackers.present() {
            assert_eq!(tracker.writes, 0);
        }
        assert!(chassis.turns.is_empty());
    }

    #[tokio::test]
    async fn zero_trials_is_rejected() {
        let mut chassis = MockChassis::default();
        let mut trackers = TrackerSet::new().with_left(MockTracker::default());

        let err = calibrator()
            .calibrate(&mut chassis, &mut trackers, 0, 63.0)
            .await
            .unwrap_err();

        assert_eq!(err, CalibrationError::NoTrials);
        assert_eq!(trackers.left.as_ref().unwrap().resets, 0);
        assert!(chassis.turns.is_empty());
    }

    #[tokio::test]
    async fn heading_failure_propagates() {
        let mut chassis = MockChassis::with_turns([90.0]);
        chassis.heading_error = Some(DeviceError::Disconnected {
            device: "inertial sensor",
        });
        let mut trackers = TrackerSet::new().with_back(MockTracker::new([1.0]));

        let err = calibrator()
            .calibrate(&mut chassis, &mut trackers, 1, 63.0)
            .await
            .unwrap_err();

        assert!(matches!(err, CalibrationError::Device(DeviceError::Disconnected { .. })));
        assert_eq!(trackers.back.as_ref().unwrap().writes, 0);
    }

    #[tokio::test]
    async fn identical_data_gives_identical_offsets() {
        let mut results = Vec::new();
        for _ in 0..2 {
            let mut chassis = MockChassis::with_turns([87.0, -91.0, 90.5, -89.0]);
            let mut trackers =
                TrackerSet::new().with_left(MockTracker::new([2.1, -2.3, 2.2, -2.0]));
            let report = calibrator()
                .calibrate(&mut chassis, &mut trackers, 4, 63.0)
                .await
                .unwrap();
            results.push(report);
        }
        assert_eq!(results[0], results[1]);
    }

    #[test]
    fn accumulator_mean_needs_a_trial() {
        let mut acc = CalibrationAccumulator::new();
        acc.add(TrackerAxis::Right, 3.0);
        assert_eq!(acc.mean(TrackerAxis::Right), None);
        acc.complete_trial();
        acc.add(TrackerAxis::Right, 5.0);
        acc.complete_trial();
        assert_eq!(acc.mean(TrackerAxis::Right), Some(4.0));
        assert_eq!(acc.mean(TrackerAxis::Front), Some(0.0));
        assert_eq!(acc.trials(), 2);
    }
}
