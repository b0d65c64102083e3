//! Tracking devices for odometry.
//!
//! This module provides the sensor abstractions used by calibration:
//!
//! - **Encoder**: Anything that reports a shaft angle.
//! - **TrackingSensor**: The V5 encoders usable as an [`Encoder`].
//! - **Tracker**: A distance-measuring wheel with a distance-to-center offset.
//! - **TrackingWheel**: The standard [`Tracker`], an encoder on an unpowered wheel.
//! - **TrackerSet**: Up to four optional trackers (left, right, back, front).
//!
//! # Example
//!
//! ```ignore
//! use autonkit::motion::odom::devices::{TrackerSet, TrackingSensor, TrackingWheel};
//! use vexide::prelude::*;
//!
//! let sensor = TrackingSensor::new_rotation_sensor(
//!     RotationSensor::new(peripherals.port_5, Direction::Forward)
//! );
//!
//! // 2.75" wheel, 1:1 ratio, offset not yet calibrated
//! let back = TrackingWheel::new(sensor, 2.75, 1.0, 1.0, 0.0);
//! let trackers = TrackerSet::new().with_back(back);
//! ```

use std::fmt;

use async_trait::async_trait;
#[cfg(target_os = "vexos")]
use log::warn;
#[cfg(target_os = "vexos")]
use std::sync::Arc;
#[cfg(target_os = "vexos")]
use vexide::{
    adi::encoder::AdiOpticalEncoder,
    smart::rotation::RotationSensor,
    sync::Mutex,
};

use crate::error::DeviceError;

/// A rotary sensor reporting a cumulative shaft angle.
#[async_trait(?Send)]
pub trait Encoder {
    /// Cumulative rotation in radians since the last reset.
    async fn position(&self) -> f64;

    /// Zeros the rotation.
    async fn reset_position(&self) -> Result<(), DeviceError>;
}

/// The V5 encoders that can drive a tracking wheel.
///
/// Read errors are logged and read as zero so one flaky cable doesn't stop
/// a routine.
#[cfg(target_os = "vexos")]
#[derive(Clone)]
pub enum TrackingSensor {
    /// An ADI (3-wire) optical shaft encoder.
    AdiOpticalEncoder(Arc<Mutex<AdiOpticalEncoder>>),
    /// A V5 rotation sensor (high-resolution encoder).
    RotationSensor(Arc<Mutex<RotationSensor>>),
}

#[cfg(target_os = "vexos")]
impl TrackingSensor {
    pub fn new_adi_optical_encoder(encoder: AdiOpticalEncoder) -> Self {
        Self::AdiOpticalEncoder(Arc::new(Mutex::new(encoder)))
    }

    pub fn new_rotation_sensor(sensor: RotationSensor) -> Self {
        Self::RotationSensor(Arc::new(Mutex::new(sensor)))
    }
}

#[cfg(target_os = "vexos")]
#[async_trait(?Send)]
impl Encoder for TrackingSensor {
    async fn position(&self) -> f64 {
        let reading = match self {
            TrackingSensor::AdiOpticalEncoder(encoder) => encoder.lock().await.position(),
            TrackingSensor::RotationSensor(encoder) => encoder.lock().await.position(),
        };
        match reading {
            Ok(angle) => angle.as_radians(),
            Err(e) => {
                warn!("Tracking Sensor Position Error: {}", e);
                0.0
            }
        }
    }

    async fn reset_position(&self) -> Result<(), DeviceError> {
        match self {
            TrackingSensor::AdiOpticalEncoder(encoder) => encoder
                .lock()
                .await
                .reset_position()
                .map_err(|e| DeviceError::from_port("ADI optical encoder", e)),
            TrackingSensor::RotationSensor(encoder) => encoder
                .lock()
                .await
                .reset_position()
                .map_err(|e| DeviceError::from_port("rotation sensor", e)),
        }
    }
}

/// A single-axis distance sensor mounted off the turning center.
#[async_trait(?Send)]
pub trait Tracker {
    /// Zeros the cumulative distance.
    async fn reset(&mut self) -> Result<(), DeviceError>;

    /// Distance traveled in inches since the last reset.
    async fn distance(&self) -> f64;

    /// Signed distance from the turning center in inches.
    fn distance_to_center(&self) -> f64;

    /// Overwrites the distance-to-center offset.
    fn set_distance_to_center(&mut self, offset: f64);
}

/// An unpowered wheel with an encoder, used to measure travel.
///
/// # Example
///
/// ```ignore
/// // 3.25" wheel geared 3:4, sitting 1.5" left of center
/// let left = TrackingWheel::new(sensor, 3.25, 4.0, 3.0, -1.5);
/// ```
#[derive(Clone)]
pub struct TrackingWheel<E> {
    /// The sensor measuring wheel rotation.
    pub sensor:             E,
    /// The diameter of the tracking wheel in inches.
    pub wheel_diameter:     f64,
    /// The number of teeth on the driven (wheel-side) gear.
    pub driven_gear:        f64,
    /// The number of teeth on the driving (encoder-side) gear.
    pub driving_gear:       f64,
    /// The perpendicular distance from the tracking center in inches.
    pub distance_to_center: f64,
}

impl<E> TrackingWheel<E> {
    pub fn new(
        sensor: E,
        wheel_diameter: f64,
        driven_gear: f64,
        driving_gear: f64,
        distance_to_center: f64,
    ) -> Self {
        Self {
            sensor,
            wheel_diameter,
            driven_gear,
            driving_gear,
            distance_to_center,
        }
    }

    /// Converts an encoder angle in radians to wheel travel in inches.
    pub fn angle_to_distance(&self, radians: f64) -> f64 {
        let gear_ratio = self.driving_gear / self.driven_gear;
        radians * gear_ratio * (self.wheel_diameter / 2.0)
    }
}

#[async_trait(?Send)]
impl<E: Encoder> Tracker for TrackingWheel<E> {
    async fn reset(&mut self) -> Result<(), DeviceError> { self.sensor.reset_position().await }

    async fn distance(&self) -> f64 { self.angle_to_distance(self.sensor.position().await) }

    fn distance_to_center(&self) -> f64 { self.distance_to_center }

    fn set_distance_to_center(&mut self, offset: f64) { self.distance_to_center = offset; }
}

/// Mounting position of a tracker on the robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackerAxis {
    Left,
    Right,
    Back,
    Front,
}

impl TrackerAxis {
    /// Every axis, in storage order.
    pub const ALL: [TrackerAxis; 4] = [Self::Left, Self::Right, Self::Back, Self::Front];

    /// Position of this axis in [`ALL`](Self::ALL).
    pub fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
            Self::Back => 2,
            Self::Front => 3,
        }
    }
}

impl fmt::Display for TrackerAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Back => "back",
            Self::Front => "front",
        };
        f.write_str(name)
    }
}

/// The trackers installed on a robot.
///
/// Any of the four positions may be empty. Empty positions are skipped by
/// every operation, so nothing is ever read from or written to them.
#[derive(Clone)]
pub struct TrackerSet<T> {
    pub left:  Option<T>,
    pub right: Option<T>,
    pub back:  Option<T>,
    pub front: Option<T>,
}

impl<T> Default for TrackerSet<T> {
    fn default() -> Self {
        Self {
            left:  None,
            right: None,
            back:  None,
            front: None,
        }
    }
}

impl<T> TrackerSet<T> {
    /// Creates a set with no trackers installed.
    pub fn new() -> Self { Self::default() }

    pub fn with_left(mut self, tracker: T) -> Self {
        self.left = Some(tracker);
        self
    }

    pub fn with_right(mut self, tracker: T) -> Self {
        self.right = Some(tracker);
        self
    }

    pub fn with_back(mut self, tracker: T) -> Self {
        self.back = Some(tracker);
        self
    }

    pub fn with_front(mut self, tracker: T) -> Self {
        self.front = Some(tracker);
        self
    }

    pub fn get(&self, axis: TrackerAxis) -> Option<&T> {
        match axis {
            TrackerAxis::Left => self.left.as_ref(),
            TrackerAxis::Right => self.right.as_ref(),
            TrackerAxis::Back => self.back.as_ref(),
            TrackerAxis::Front => self.front.as_ref(),
        }
    }

    pub fn get_mut(&mut self, axis: TrackerAxis) -> Option<&mut T> {
        match axis {
            TrackerAxis::Left => self.left.as_mut(),
            TrackerAxis::Right => self.right.as_mut(),
            TrackerAxis::Back => self.back.as_mut(),
            TrackerAxis::Front => self.front.as_mut(),
        }
    }

    /// Iterates over installed trackers with their axis.
    pub fn present(&self) -> impl Iterator<Item = (TrackerAxis, &T)> {
        [
            (TrackerAxis::Left, self.left.as_ref()),
            (TrackerAxis::Right, self.right.as_ref()),
            (TrackerAxis::Back, self.back.as_ref()),
            (TrackerAxis::Front, self.front.as_ref()),
        ]
        .into_iter()
        .filter_map(|(axis, tracker)| tracker.map(|t| (axis, t)))
    }

    /// Iterates mutably over installed trackers with their axis.
    pub fn present_mut(&mut self) -> impl Iterator<Item = (TrackerAxis, &mut T)> {
        [
            (TrackerAxis::Left, self.left.as_mut()),
            (TrackerAxis::Right, self.right.as_mut()),
            (TrackerAxis::Back, self.back.as_mut()),
            (TrackerAxis::Front, self.front.as_mut()),
        ]
        .into_iter()
        .filter_map(|(axis, tracker)| tracker.map(|t| (axis, t)))
    }

    /// Number of installed trackers.
    pub fn len(&self) -> usize { self.present().count() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

impl<T: Tracker> TrackerSet<T> {
    /// Zeros every installed tracker.
    pub async fn reset_all(&mut self) -> Result<(), DeviceError> {
        for (_, tracker) in self.present_mut() {
            tracker.reset().await?;
        }
        Ok(())
    }
}
