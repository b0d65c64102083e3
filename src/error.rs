//! Error types for calibration and recovery.
//!
//! Interference on its own is never an error: the recovery state machine
//! handles it and reports exhaustion as a normal [`RecoveryOutcome`].
//! Only conditions the routine cannot resolve locally surface here.
//!
//! [`RecoveryOutcome`]: crate::auton::recovery::RecoveryOutcome

use thiserror::Error;

/// A failure reported by a sensor or motor behind a collaborator trait.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DeviceError {
    /// The device is not plugged in or has stopped responding.
    #[error("{device} is disconnected")]
    Disconnected { device: &'static str },

    /// The device responded with an error.
    #[error("{device} port error: {reason}")]
    Port {
        device: &'static str,
        reason: String,
    },
}

#[cfg(target_os = "vexos")]
impl DeviceError {
    /// Wraps a vexide [`PortError`](vexide::smart::PortError) for the named device.
    pub fn from_port(device: &'static str, err: vexide::smart::PortError) -> Self {
        Self::Port {
            device,
            reason: err.to_string(),
        }
    }
}

/// Reasons an offset calibration run is aborted.
///
/// When any of these is returned no tracker offset has been modified.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalibrationError {
    /// Calibration was asked to run zero trials.
    #[error("calibration needs at least one trial")]
    NoTrials,

    /// A trial turned through an angle too small to divide by.
    ///
    /// Usually means the heading sensor is unresponsive or the turn never
    /// happened.
    #[error("trial {trial} measured an angular delta of {angular_delta} rad, too small to use")]
    DegenerateTrial { trial: u32, angular_delta: f64 },

    #[error(transparent)]
    Device(#[from] DeviceError),
}

/// Reasons a recovery run could not be carried out at all.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecoveryError {
    /// `max_attempts` was zero, so no motion could be issued.
    #[error("recovery needs at least one attempt")]
    NoAttempts,

    #[error(transparent)]
    Device(#[from] DeviceError),
}
