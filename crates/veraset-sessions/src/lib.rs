//! Veraset calculation sessions
//!
//! A session owns one relative collection and allows at most one calculation
//! request in flight. Results that arrive after a reset are discarded.

pub mod error;
pub mod session;
pub mod shared;

// Re-export commonly used types
pub use error::{SessionError, SessionResult};
pub use session::{CalculationOutcome, CalculationSession, CompletionStatus, Submission, Ticket};
pub use shared::{SharedSession, SubmitOutcome};
