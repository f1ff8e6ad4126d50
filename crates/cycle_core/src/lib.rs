pub mod calendar;
pub mod cycle;
pub mod dates;
pub mod error;
pub mod phase;
pub mod pregnancy;
pub mod reminders;
pub mod service;
pub mod store;
pub mod symptom;
pub mod tips;

pub use crate::cycle::{CycleConfig, FertileWindow};
pub use crate::error::CycleConfigError;
pub use crate::phase::{CyclePhase, PhaseInfo, PhaseSegment};
pub use crate::service::{CycleService, CycleServiceBuilder, Dashboard};
