//! Scriptable collaborators for unit tests.

use std::{cell::RefCell, collections::VecDeque, time::Duration};

use async_trait::async_trait;

use crate::{
    error::DeviceError,
    motion::{
        chassis::{BrakeMode, Chassis, Pose, TurnMode},
        delay::Delay,
        odom::devices::Tracker,
    },
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnCall {
    pub target: f64,
    pub power:  f64,
    pub mode:   TurnMode,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveCall {
    pub distance: f64,
    pub power:    f64,
}

/// A chassis whose turns and stalls are scripted ahead of time.
///
/// Each `turn_to` rotates the heading by the next value from `turn_deltas`
/// (zero once the script runs out). Each `drive` sets the interference
/// flag from the next value of `interference` (false once it runs out).
#[derive(Debug, Default)]
pub struct MockChassis {
    pub heading:             f64,
    /// Heading reported right after `reset_heading`.
    pub heading_after_reset: f64,
    pub turn_deltas:         VecDeque<f64>,
    pub interference:        VecDeque<bool>,
    pub interfered:          bool,
    pub turns:               Vec<TurnCall>,
    pub drives:              Vec<DriveCall>,
    pub brake_modes:         Vec<BrakeMode>,
    pub poses:               Vec<Pose>,
    pub target_resets:       u32,
    pub heading_resets:      u32,
    pub drive_sensor_resets: u32,
    /// When set, `heading` fails with this error.
    pub heading_error:       Option<DeviceError>,
    /// When set, `reset_drive_sensors` fails with this error.
    pub drive_sensor_error:  Option<DeviceError>,
}

impl MockChassis {
    pub fn with_turns(deltas: impl IntoIterator<Item = f64>) -> Self {
        Self {
            turn_deltas: deltas.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn with_interference(script: impl IntoIterator<Item = bool>) -> Self {
        Self {
            interference: script.into_iter().collect(),
            ..Self::default()
        }
    }
}

#[async_trait(?Send)]
impl Chassis for MockChassis {
    async fn reset_targets(&mut self) { self.target_resets += 1; }

    async fn reset_heading(&mut self) -> Result<(), DeviceError> {
        self.heading_resets += 1;
        self.heading = self.heading_after_reset;
        Ok(())
    }

    async fn heading(&mut self) -> Result<f64, DeviceError> {
        match &self.heading_error {
            Some(e) => Err(e.clone()),
            None => Ok(self.heading.rem_euclid(360.0)),
        }
    }

    async fn reset_drive_sensors(&mut self) -> Result<(), DeviceError> {
        self.drive_sensor_resets += 1;
        match &self.drive_sensor_error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    async fn set_brake_mode(&mut self, mode: BrakeMode) { self.brake_modes.push(mode); }

    async fn set_pose(&mut self, pose: Pose) { self.poses.push(pose); }

    async fn turn_to(&mut self, target: f64, power: f64, mode: TurnMode) {
        self.turns.push(TurnCall {
            target,
            power,
            mode,
        });
        self.heading += self.turn_deltas.pop_front().unwrap_or(0.0);
    }

    async fn drive(&mut self, distance: f64, power: f64) {
        self.drives.push(DriveCall { distance, power });
        self.interfered = self.interference.pop_front().unwrap_or(false);
    }

    fn is_interfered(&self) -> bool { self.interfered }
}

/// A tracker that returns one scripted reading per `distance` call.
#[derive(Debug, Default)]
pub struct MockTracker {
    pub readings:    RefCell<VecDeque<f64>>,
    pub offset:      f64,
    pub resets:      u32,
    pub writes:      u32,
    /// When set, `reset` fails with this error.
    pub reset_error: Option<DeviceError>,
}

impl MockTracker {
    pub fn new(readings: impl IntoIterator<Item = f64>) -> Self {
        Self {
            readings: RefCell::new(readings.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }
}

#[async_trait(?Send)]
impl Tracker for MockTracker {
    async fn reset(&mut self) -> Result<(), DeviceError> {
        self.resets += 1;
        match &self.reset_error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    async fn distance(&self) -> f64 { self.readings.borrow_mut().pop_front().unwrap_or(0.0) }

    fn distance_to_center(&self) -> f64 { self.offset }

    fn set_distance_to_center(&mut self, offset: f64) {
        self.writes += 1;
        self.offset = offset;
    }
}

/// A delay that returns immediately and remembers what was asked of it.
#[derive(Debug, Default)]
pub struct RecordingDelay {
    pub requested: Vec<Duration>,
}

#[async_trait(?Send)]
impl Delay for RecordingDelay {
    async fn sleep(&mut self, duration: Duration) { self.requested.push(duration); }
}
