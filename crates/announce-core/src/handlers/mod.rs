/// Request orchestration
pub mod state;
pub mod submission;

pub use state::SubmissionState;
pub use submission::{Delivery, SubmissionHandler, SubmissionOutcome};
