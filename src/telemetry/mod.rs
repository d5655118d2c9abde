//! Console event feed.
//!
//! The collector fans snapshot events out to any number of display
//! subscribers through a broadcast channel and keeps a bounded history for
//! subscribers that attach late. It is owned by the single writer (the
//! console context); readers only ever hold receivers.

use std::collections::VecDeque;

use tokio::sync::broadcast;

use crate::error::ErrorCode;

pub mod events;

pub use events::ConsoleEvent;

/// Snapshot of collector state for CLI reporting.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TelemetrySnapshot {
    pub recent: Vec<ConsoleEvent>,
    pub total_events: u64,
    pub dropped_events: u64,
}

/// Broadcast-based collector retaining a bounded history of events.
pub struct TelemetryCollector {
    tx: broadcast::Sender<ConsoleEvent>,
    history: VecDeque<ConsoleEvent>,
    history_capacity: usize,
    total_events: u64,
    dropped_history: u64,
}

impl TelemetryCollector {
    pub fn new(buffer: usize, history_capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(buffer.max(1));
        Self {
            tx,
            history: VecDeque::with_capacity(history_capacity),
            history_capacity,
            total_events: 0,
            dropped_history: 0,
        }
    }

    pub fn publish(&mut self, event: ConsoleEvent) {
        self.total_events += 1;
        if self.history_capacity > 0 {
            if self.history.len() == self.history_capacity {
                self.history.pop_front();
                self.dropped_history += 1;
            }
            self.history.push_back(event.clone());
        }

        // No subscribers is fine; the history still holds the event
        let _ = self.tx.send(event);
    }

    /// Publish a rejected call so displays can surface it
    pub fn record_error(&mut self, err: &dyn ErrorCode, context: impl Into<String>) {
        self.publish(ConsoleEvent::Error {
            code: err.code(),
            kind: err.kind(),
            message: err.message(),
            context: context.into(),
        });
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ConsoleEvent> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot {
            recent: self.history.iter().cloned().collect(),
            total_events: self.total_events,
            dropped_events: self.dropped_history,
        }
    }
}

impl Default for TelemetryCollector {
    fn default() -> Self {
        Self::new(256, 64)
    }
}
