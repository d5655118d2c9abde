// StatisticsEngine - per-channel sliding windows and running statistics
//
// Owns one ChannelBuffer per acquisition channel. Each pushed sample mutates
// exactly one buffer and triggers a full recompute of that channel's
// statistics. The latest snapshot per channel is cached so readers can fetch
// it without pushing; it is always derived from the current buffer contents.

use std::collections::BTreeMap;

use super::buffer::ChannelBuffer;
use super::statistics::{SamplingRate, WaveStatistics};
use super::ChannelId;

#[derive(Debug, Clone)]
struct ChannelState {
    buffer: ChannelBuffer,
    latest: WaveStatistics,
}

/// Acquisition statistics engine
///
/// # Example
/// ```ignore
/// let mut engine = StatisticsEngine::new(300);
/// let rate = SamplingRate::new(10.0)?;
/// let stats = engine.push_sample(0, 0.12, rate);
/// println!("H1/3 = {:.3} m", stats.significant_height);
/// ```
#[derive(Debug, Clone)]
pub struct StatisticsEngine {
    window_size: usize,
    channels: BTreeMap<ChannelId, ChannelState>,
}

impl StatisticsEngine {
    /// Create an engine whose channel windows hold `window_size` samples
    pub fn new(window_size: usize) -> Self {
        Self {
            window_size: window_size.max(1),
            channels: BTreeMap::new(),
        }
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Append a sample to a channel and recompute its statistics
    ///
    /// Channels are created on first use. The returned snapshot is a copy;
    /// later pushes never modify it.
    pub fn push_sample(
        &mut self,
        channel: ChannelId,
        value: f64,
        rate: SamplingRate,
    ) -> WaveStatistics {
        let window_size = self.window_size;
        let state = self.channels.entry(channel).or_insert_with(|| ChannelState {
            buffer: ChannelBuffer::new(window_size),
            latest: WaveStatistics::default(),
        });

        state.buffer.push(value);
        let window = state.buffer.to_vec();
        state.latest = WaveStatistics::from_window(&window, rate);
        state.latest
    }

    /// Latest snapshot for a channel, `None` if it never received a sample
    pub fn statistics(&self, channel: ChannelId) -> Option<WaveStatistics> {
        self.channels.get(&channel).map(|state| state.latest)
    }

    /// Latest snapshot of every channel, ordered by channel id
    pub fn snapshot_all(&self) -> Vec<(ChannelId, WaveStatistics)> {
        self.channels
            .iter()
            .map(|(&channel, state)| (channel, state.latest))
            .collect()
    }

    /// Number of samples currently held for a channel
    pub fn channel_len(&self, channel: ChannelId) -> usize {
        self.channels
            .get(&channel)
            .map_or(0, |state| state.buffer.len())
    }

    /// Copy of a channel window in arrival order
    pub fn window(&self, channel: ChannelId) -> Vec<f64> {
        self.channels
            .get(&channel)
            .map(|state| state.buffer.to_vec())
            .unwrap_or_default()
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Drop every channel buffer and cached snapshot
    pub fn clear(&mut self) {
        self.channels.clear();
    }

    /// Drop all channels and change the window size for future pushes
    pub fn reset(&mut self, window_size: usize) {
        self.window_size = window_size.max(1);
        self.channels.clear();
    }
}
