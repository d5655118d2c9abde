// AcquisitionManager: Focused manager for timed acquisitions
//
// Single Responsibility: session lifecycle plus the statistics engine it feeds
// Extracted from ConsoleContext to keep the session rules testable on their own

use crate::acquisition::{AcquisitionSession, AcquisitionSettings, AcquisitionStatus, StopReason};
use crate::analysis::{ChannelId, StatisticsEngine, WaveStatistics};
use crate::config::AcquisitionConfig;
use crate::error::{log_acquisition_error, AcquisitionError};

/// Manages the acquisition session and the per-channel sample windows
///
/// This manager handles:
/// - Starting/pausing/resuming/stopping the session
/// - Clearing channel buffers when a new session starts
/// - Gating samples on the session status
/// - Advancing elapsed time and detecting natural completion
///
/// # Example
/// ```ignore
/// let mut manager = AcquisitionManager::new();
/// manager.start(AcquisitionSettings::new(300, 10.0, 600.0)?)?;
/// let stats = manager.push_sample(0, 0.12)?;
/// manager.tick(0.1)?;
/// ```
pub struct AcquisitionManager {
    session: AcquisitionSession,
    engine: StatisticsEngine,
    settings: Option<AcquisitionSettings>,
}

impl AcquisitionManager {
    /// Create a stopped manager with no settings
    pub fn new() -> Self {
        Self {
            session: AcquisitionSession::new(),
            engine: StatisticsEngine::new(1),
            settings: None,
        }
    }

    /// Start an acquisition
    ///
    /// Resets elapsed time and empties every channel buffer.
    ///
    /// # Errors
    /// - `InvalidTransition` if a session is running or paused
    pub fn start(&mut self, settings: AcquisitionSettings) -> Result<(), AcquisitionError> {
        self.session
            .start(settings.duration_seconds())
            .inspect_err(|err| log_acquisition_error(err, "start_acquisition"))?;

        self.engine.reset(settings.window_size());
        self.settings = Some(settings);

        tracing::info!(
            "[AcquisitionManager] Started: window={} rate={}Hz duration={}s",
            settings.window_size(),
            settings.sampling_rate().hz(),
            settings.duration_seconds()
        );
        Ok(())
    }

    /// Validate a config section and start with it
    pub fn start_from_config(&mut self, config: &AcquisitionConfig) -> Result<(), AcquisitionError> {
        let settings = config
            .validate()
            .inspect_err(|err| log_acquisition_error(err, "start_acquisition"))?;
        self.start(settings)
    }

    /// Feed one elevation sample
    ///
    /// # Errors
    /// - `NotRunning` while paused or stopped
    /// - `NonFiniteSample` for NaN or infinite values
    pub fn push_sample(
        &mut self,
        channel: ChannelId,
        value: f64,
    ) -> Result<WaveStatistics, AcquisitionError> {
        let settings = match self.settings {
            Some(settings) if self.session.is_running() => settings,
            _ => {
                let err = AcquisitionError::NotRunning {
                    status: self.session.status(),
                };
                log_acquisition_error(&err, "push_sample");
                return Err(err);
            }
        };

        if !value.is_finite() {
            let err = AcquisitionError::NonFiniteSample { channel, value };
            log_acquisition_error(&err, "push_sample");
            return Err(err);
        }

        Ok(self
            .engine
            .push_sample(channel, value, settings.sampling_rate()))
    }

    /// Advance session time
    ///
    /// # Returns
    /// The status after the tick; `Stopped` means the duration was reached
    pub fn tick(&mut self, delta_seconds: f64) -> Result<AcquisitionStatus, AcquisitionError> {
        let status = self
            .session
            .tick(delta_seconds)
            .inspect_err(|err| log_acquisition_error(err, "tick"))?;

        if status == AcquisitionStatus::Stopped
            && self.session.stop_reason() == Some(StopReason::Completed)
        {
            tracing::info!(
                "[AcquisitionManager] Completed after {}s",
                self.session.elapsed_seconds()
            );
        }
        Ok(status)
    }

    pub fn pause(&mut self) -> Result<(), AcquisitionError> {
        self.session
            .pause()
            .inspect_err(|err| log_acquisition_error(err, "pause_acquisition"))?;
        tracing::info!(
            "[AcquisitionManager] Paused at {}s",
            self.session.elapsed_seconds()
        );
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), AcquisitionError> {
        self.session
            .resume()
            .inspect_err(|err| log_acquisition_error(err, "resume_acquisition"))?;
        tracing::info!("[AcquisitionManager] Resumed");
        Ok(())
    }

    /// Stop early; buffers and elapsed time stay readable until the next start
    pub fn stop(&mut self) -> Result<(), AcquisitionError> {
        self.session
            .stop()
            .inspect_err(|err| log_acquisition_error(err, "stop_acquisition"))?;
        tracing::info!(
            "[AcquisitionManager] Stopped by user at {}s",
            self.session.elapsed_seconds()
        );
        Ok(())
    }

    /// Copy of the session state
    pub fn session(&self) -> AcquisitionSession {
        self.session
    }

    pub fn status(&self) -> AcquisitionStatus {
        self.session.status()
    }

    pub fn settings(&self) -> Option<AcquisitionSettings> {
        self.settings
    }

    pub fn statistics(&self, channel: ChannelId) -> Option<WaveStatistics> {
        self.engine.statistics(channel)
    }

    pub fn snapshot_all(&self) -> Vec<(ChannelId, WaveStatistics)> {
        self.engine.snapshot_all()
    }

    pub fn channel_len(&self, channel: ChannelId) -> usize {
        self.engine.channel_len(channel)
    }
}

impl Default for AcquisitionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(window: usize, rate: f64, duration: f64) -> AcquisitionSettings {
        AcquisitionSettings::new(window, rate, duration).unwrap()
    }

    #[test]
    fn test_new() {
        let manager = AcquisitionManager::new();
        assert_eq!(manager.status(), AcquisitionStatus::Stopped);
        assert!(manager.settings().is_none());
        assert!(manager.snapshot_all().is_empty());
    }

    #[test]
    fn test_push_before_start_rejected() {
        let mut manager = AcquisitionManager::new();
        assert_eq!(
            manager.push_sample(0, 1.0),
            Err(AcquisitionError::NotRunning {
                status: AcquisitionStatus::Stopped
            })
        );
    }

    #[test]
    fn test_push_while_running() {
        let mut manager = AcquisitionManager::new();
        manager.start(settings(4, 1.0, 60.0)).unwrap();

        manager.push_sample(0, 1.0).unwrap();
        let stats = manager.push_sample(0, -1.0).unwrap();
        assert_eq!(stats.sample_count, 2);
        assert_eq!(stats.mean_period, 4.0);
        assert_eq!(manager.statistics(0), Some(stats));
    }

    #[test]
    fn test_push_while_paused_rejected() {
        let mut manager = AcquisitionManager::new();
        manager.start(settings(4, 1.0, 60.0)).unwrap();
        manager.push_sample(0, 1.0).unwrap();
        manager.pause().unwrap();

        assert!(matches!(
            manager.push_sample(0, 2.0),
            Err(AcquisitionError::NotRunning {
                status: AcquisitionStatus::Paused
            })
        ));
        assert_eq!(manager.channel_len(0), 1);

        manager.resume().unwrap();
        assert!(manager.push_sample(0, 2.0).is_ok());
    }

    #[test]
    fn test_non_finite_sample_rejected() {
        let mut manager = AcquisitionManager::new();
        manager.start(settings(4, 1.0, 60.0)).unwrap();
        assert!(matches!(
            manager.push_sample(2, f64::NAN),
            Err(AcquisitionError::NonFiniteSample { channel: 2, .. })
        ));
        assert_eq!(manager.channel_len(2), 0);
    }

    #[test]
    fn test_start_clears_buffers() {
        let mut manager = AcquisitionManager::new();
        manager.start(settings(10, 1.0, 60.0)).unwrap();
        manager.push_sample(0, 1.0).unwrap();
        manager.push_sample(1, 1.0).unwrap();
        manager.stop().unwrap();

        // Stopped session keeps its data readable
        assert_eq!(manager.channel_len(0), 1);

        manager.start(settings(5, 2.0, 30.0)).unwrap();
        assert_eq!(manager.channel_len(0), 0);
        assert!(manager.snapshot_all().is_empty());
        assert_eq!(manager.session().elapsed_seconds(), 0.0);
        assert_eq!(manager.settings().unwrap().window_size(), 5);
    }

    #[test]
    fn test_start_while_running_rejected() {
        let mut manager = AcquisitionManager::new();
        manager.start(settings(10, 1.0, 60.0)).unwrap();
        manager.push_sample(0, 1.0).unwrap();

        assert!(manager.start(settings(10, 1.0, 60.0)).is_err());
        // The running session's data is untouched
        assert_eq!(manager.channel_len(0), 1);
    }

    #[test]
    fn test_natural_completion_blocks_samples() {
        let mut manager = AcquisitionManager::new();
        manager.start(settings(10, 1.0, 60.0)).unwrap();
        for _ in 0..4 {
            manager.tick(12.0).unwrap();
        }
        assert_eq!(manager.tick(12.0).unwrap(), AcquisitionStatus::Stopped);
        assert_eq!(manager.session().elapsed_seconds(), 60.0);
        assert_eq!(
            manager.session().stop_reason(),
            Some(StopReason::Completed)
        );
        assert!(manager.push_sample(0, 1.0).is_err());
    }

    #[test]
    fn test_start_from_config_validates() {
        let mut manager = AcquisitionManager::new();
        let mut config = AcquisitionConfig::default();
        config.window_size = 0;
        assert!(matches!(
            manager.start_from_config(&config),
            Err(AcquisitionError::InvalidWindowSize { size: 0 })
        ));
        assert_eq!(manager.status(), AcquisitionStatus::Stopped);

        config.window_size = 200;
        manager.start_from_config(&config).unwrap();
        assert_eq!(manager.status(), AcquisitionStatus::Running);
    }
}
