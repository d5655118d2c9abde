// AcquisitionSession - timed acquisition state machine
//
//   Stopped --start--> Running --pause--> Paused
//      ^                 |  ^               |
//      |                 |  +----resume-----+
//      +---stop/complete-+------stop--------+
//
// Elapsed time only advances through tick() while Running. Reaching the
// configured duration clamps elapsed time and stops the session with
// StopReason::Completed; stop() keeps the unclamped elapsed time and records
// StopReason::UserStopped so the two endings stay distinguishable.

use crate::error::AcquisitionError;

/// Acquisition session status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum AcquisitionStatus {
    #[default]
    Stopped,
    Running,
    Paused,
}

impl AcquisitionStatus {
    /// Get human-readable name for display
    pub fn display_name(&self) -> &'static str {
        match self {
            AcquisitionStatus::Stopped => "STOPPED",
            AcquisitionStatus::Running => "RUNNING",
            AcquisitionStatus::Paused => "PAUSED",
        }
    }
}

/// Why the last session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum StopReason {
    /// Elapsed time reached the configured duration
    Completed,
    /// stop() was called before the duration elapsed
    UserStopped,
}

/// Timing and status of one acquisition
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct AcquisitionSession {
    status: AcquisitionStatus,
    elapsed_seconds: f64,
    configured_duration_seconds: f64,
    /// elapsed / duration clamped to [0, 1]
    progress_fraction: f64,
    stop_reason: Option<StopReason>,
}

impl AcquisitionSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new session of `duration_seconds`
    ///
    /// # Errors
    /// - `InvalidTransition` unless Stopped
    /// - `InvalidDuration` for zero, negative or non-finite durations
    pub fn start(&mut self, duration_seconds: f64) -> Result<(), AcquisitionError> {
        self.require(AcquisitionStatus::Stopped, "start")?;
        if !(duration_seconds.is_finite() && duration_seconds > 0.0) {
            return Err(AcquisitionError::InvalidDuration {
                seconds: duration_seconds,
            });
        }

        self.status = AcquisitionStatus::Running;
        self.elapsed_seconds = 0.0;
        self.configured_duration_seconds = duration_seconds;
        self.progress_fraction = 0.0;
        self.stop_reason = None;
        Ok(())
    }

    /// Advance elapsed time by `delta_seconds`
    ///
    /// A tick while Paused is a no-op. Reaching the duration stops the
    /// session, which is a normal outcome rather than an error.
    ///
    /// Once Stopped, every further tick is rejected with `InvalidTransition`
    /// and elapsed time stays clamped at the duration. Drivers that keep a
    /// fixed tick cadence should stop ticking when this returns `Stopped`,
    /// or check `status()` first.
    ///
    /// # Returns
    /// The status after the tick
    ///
    /// # Errors
    /// - `InvalidTransition` while Stopped
    /// - `InvalidTick` for a negative or non-finite delta
    pub fn tick(&mut self, delta_seconds: f64) -> Result<AcquisitionStatus, AcquisitionError> {
        match self.status {
            AcquisitionStatus::Stopped => {
                return Err(AcquisitionError::InvalidTransition {
                    action: "tick",
                    status: self.status,
                })
            }
            AcquisitionStatus::Paused => return Ok(self.status),
            AcquisitionStatus::Running => {}
        }
        if !(delta_seconds.is_finite() && delta_seconds >= 0.0) {
            return Err(AcquisitionError::InvalidTick { delta_seconds });
        }

        self.elapsed_seconds += delta_seconds;
        if self.elapsed_seconds >= self.configured_duration_seconds {
            self.elapsed_seconds = self.configured_duration_seconds;
            self.status = AcquisitionStatus::Stopped;
            self.stop_reason = Some(StopReason::Completed);
        }
        self.update_progress();
        Ok(self.status)
    }

    pub fn pause(&mut self) -> Result<(), AcquisitionError> {
        self.require(AcquisitionStatus::Running, "pause")?;
        self.status = AcquisitionStatus::Paused;
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), AcquisitionError> {
        self.require(AcquisitionStatus::Paused, "resume")?;
        self.status = AcquisitionStatus::Running;
        Ok(())
    }

    /// Stop early; elapsed time is kept as is
    pub fn stop(&mut self) -> Result<(), AcquisitionError> {
        if self.status == AcquisitionStatus::Stopped {
            return Err(AcquisitionError::InvalidTransition {
                action: "stop",
                status: self.status,
            });
        }
        self.status = AcquisitionStatus::Stopped;
        self.stop_reason = Some(StopReason::UserStopped);
        Ok(())
    }

    pub fn status(&self) -> AcquisitionStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == AcquisitionStatus::Running
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_seconds
    }

    pub fn configured_duration_seconds(&self) -> f64 {
        self.configured_duration_seconds
    }

    pub fn progress_fraction(&self) -> f64 {
        self.progress_fraction
    }

    /// Get progress percentage (0-100)
    pub fn percentage(&self) -> u8 {
        (self.progress_fraction * 100.0).round() as u8
    }

    pub fn remaining_seconds(&self) -> f64 {
        (self.configured_duration_seconds - self.elapsed_seconds).max(0.0)
    }

    /// How the last session ended, `None` before the first stop
    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    fn update_progress(&mut self) {
        self.progress_fraction = if self.configured_duration_seconds > 0.0 {
            (self.elapsed_seconds / self.configured_duration_seconds).clamp(0.0, 1.0)
        } else {
            0.0
        };
    }

    fn require(
        &self,
        expected: AcquisitionStatus,
        action: &'static str,
    ) -> Result<(), AcquisitionError> {
        if self.status != expected {
            return Err(AcquisitionError::InvalidTransition {
                action,
                status: self.status,
            });
        }
        Ok(())
    }
}
