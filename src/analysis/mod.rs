// Analysis module - acquisition statistics engine
//
// This module turns a stream of elevation samples into running wave
// statistics. It is a leaf: it knows nothing about sessions, timing or
// calibration, and never fails once given a validated sampling rate.
//
// Architecture:
// - ChannelBuffer: bounded FIFO window per channel
// - WaveStatistics: pure snapshot computed from one window
// - StatisticsEngine: channel map, push_sample -> snapshot

pub mod buffer;
pub mod engine;
pub mod statistics;

pub use buffer::ChannelBuffer;
pub use engine::StatisticsEngine;
pub use statistics::{SamplingRate, WaveStatistics};

/// Acquisition channel identifier (wave gauge input index)
pub type ChannelId = u16;
