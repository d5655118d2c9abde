// ChannelBuffer - bounded sliding window of elevation samples
//
// Holds the most recent N samples of one acquisition channel in arrival
// order. Pushing into a full buffer evicts the oldest sample (FIFO), so the
// buffer never grows beyond its capacity.

use std::collections::VecDeque;

/// Sliding window over the most recent samples of a channel
#[derive(Debug, Clone)]
pub struct ChannelBuffer {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl ChannelBuffer {
    /// Create an empty buffer holding at most `capacity` samples
    ///
    /// A zero capacity is raised to 1; callers validate the window size
    /// before it reaches the engine.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, evicting the oldest one when full
    ///
    /// # Returns
    /// The evicted sample, if any
    pub fn push(&mut self, value: f64) -> Option<f64> {
        let evicted = if self.samples.len() == self.capacity {
            self.samples.pop_front()
        } else {
            None
        };
        self.samples.push_back(value);
        evicted
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Samples in arrival order (oldest first)
    pub fn iter(&self) -> impl Iterator<Item = &f64> + '_ {
        self.samples.iter()
    }

    /// Copy of the window in arrival order
    pub fn to_vec(&self) -> Vec<f64> {
        self.samples.iter().copied().collect()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}
