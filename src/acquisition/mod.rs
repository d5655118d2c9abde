// Acquisition module - timed session state machine and its settings
//
// The session only tracks status and time. Sample buffers live in the
// statistics engine; AcquisitionManager ties the two together.

pub mod session;
pub mod settings;

pub use session::{AcquisitionSession, AcquisitionStatus, StopReason};
pub use settings::AcquisitionSettings;
