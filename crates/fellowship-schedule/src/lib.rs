//! Program scheduling core.
//!
//! - [`datetime`]: strict parsing, timezone anchoring and calendar arithmetic
//! - [`status`]: classification of an occurrence against the current time
//! - [`recurrence`]: recurrence rule building, labelling and projection
//! - [`wire`]: JSON payloads exchanged with the church-management backend

pub mod datetime;
pub mod error;
pub mod occurrence;
pub mod recurrence;
pub mod status;
pub mod wire;

pub use error::{ScheduleError, ScheduleResult, ValidationError};
pub use occurrence::Occurrence;
pub use status::{OccurrenceStatus, StatusInput, resolve_status};
