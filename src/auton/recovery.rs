//! Bounded stall recovery.
//!
//! A drive that ends with the motion engine's interference flag set was
//! blocked, for example by a robot wedged against a wall or game element.
//! [`StallRecoveryController`] retries such a drive a bounded number of
//! times, nudging the robot gently in the same direction between
//! attempts to try to free it.
//!
//! Running out of attempts is not an error. The controller reports it as
//! [`RecoveryState::Exhausted`] and the calling routine decides what to do
//! next.
//!
//! # Example
//!
//! ```ignore
//! use autonkit::auton::recovery::StallRecoveryController;
//!
//! let mut tug = StallRecoveryController::new(RecoveryConfig::default(), VexDelay);
//! let outcome = tug.run_with_recovery(&mut chassis, -12.0, 3).await?;
//! if !outcome.succeeded() {
//!     // Fall back to a safer path.
//! }
//! ```

use log::{debug, info, warn};

use crate::{
    config::RecoveryConfig,
    error::RecoveryError,
    motion::{chassis::Chassis, delay::Delay},
};

/// States of the recovery state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryState {
    /// Issuing the primary drive.
    Attempting,
    /// The last primary drive ended blocked.
    Interfered,
    /// Nudging the robot before the next attempt.
    Recovering,
    /// A primary drive completed without interference.
    Succeeded,
    /// Every attempt ended blocked.
    Exhausted,
}

impl RecoveryState {
    /// Whether the machine stops in this state.
    pub fn is_terminal(self) -> bool { matches!(self, Self::Succeeded | Self::Exhausted) }
}

/// How a recovery run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoveryOutcome {
    /// [`RecoveryState::Succeeded`] or [`RecoveryState::Exhausted`].
    pub state:    RecoveryState,
    /// Primary drives issued.
    pub attempts: u32,
    /// Corrective nudges issued.
    pub nudges:   u32,
}

impl RecoveryOutcome {
    pub fn succeeded(&self) -> bool { self.state == RecoveryState::Succeeded }
}

/// Retries a blocked drive with a small nudge between attempts.
pub struct StallRecoveryController<D> {
    pub config: RecoveryConfig,
    delay:      D,
}

impl<D: Delay> StallRecoveryController<D> {
    pub fn new(config: RecoveryConfig, delay: D) -> Self { Self { config, delay } }

    /// Gives back the delay, e.g. to inspect a test double.
    pub fn into_delay(self) -> D { self.delay }

    /// Drives `displacement` inches, retrying up to `max_attempts` times in
    /// total while the chassis reports interference.
    ///
    /// Between attempts the drive sensors are reset and the robot is nudged
    /// [`RecoveryConfig::nudge_distance`] in the direction of
    /// `displacement`. No nudge follows the final attempt, so a run issues
    /// at most `max_attempts - 1` nudges.
    ///
    /// # Errors
    ///
    /// - [`RecoveryError::NoAttempts`] if `max_attempts` is zero.
    /// - [`RecoveryError::Device`] if the drive sensors could not be reset.
    pub async fn run_with_recovery<C: Chassis>(
        &mut self,
        chassis: &mut C,
        displacement: f64,
        max_attempts: u32,
    ) -> Result<RecoveryOutcome, RecoveryError> {
        if max_attempts == 0 {
            return Err(RecoveryError::NoAttempts);
        }

        let mut state = RecoveryState::Attempting;
        let mut attempts = 0;
        let mut nudges = 0;

        while !state.is_terminal() {
            let next = match state {
                RecoveryState::Attempting => {
                    chassis.drive(displacement, self.config.drive_power).await;
                    attempts += 1;
                    if chassis.is_interfered() {
                        RecoveryState::Interfered
                    } else {
                        RecoveryState::Succeeded
                    }
                }
                RecoveryState::Interfered => {
                    if attempts < max_attempts {
                        RecoveryState::Recovering
                    } else {
                        RecoveryState::Exhausted
                    }
                }
                RecoveryState::Recovering => {
                    self.nudge(chassis, displacement).await?;
                    nudges += 1;
                    RecoveryState::Attempting
                }
                RecoveryState::Succeeded | RecoveryState::Exhausted => state,
            };
            debug!("Recovery {:?} -> {:?} (attempt {}/{})", state, next, attempts, max_attempts);
            state = next;
        }

        let outcome = RecoveryOutcome {
            state,
            attempts,
            nudges,
        };
        if outcome.succeeded() {
            info!("Drive of {} in completed after {} attempts", displacement, attempts);
        } else {
            warn!(
                "Drive of {} in still blocked after {} attempts, giving up",
                displacement, attempts
            );
        }
        Ok(outcome)
    }

    async fn nudge<C: Chassis>(
        &mut self,
        chassis: &mut C,
        displacement: f64,
    ) -> Result<(), RecoveryError> {
        let distance = self.config.nudge_distance.abs().copysign(displacement);
        debug!("Nudging {} in at power {}", distance, self.config.nudge_power);
        chassis.reset_drive_sensors().await?;
        chassis.drive(distance, self.config.nudge_power).await;
        self.delay.sleep(self.config.settle).await;
        Ok(())
    }
}
