/// Announce Core - submission pipeline for timed announcements
///
/// This crate contains the models, form and slide validation, recipient
/// routing, notification composition and the persistence/email service
/// traits used by the Announce API.
pub mod config;
pub mod constants;
pub mod email;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod models;
pub mod routing;
pub mod services;
pub mod slides;
pub mod utils;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AnnounceError, SlideValidationError};
pub use handlers::{SubmissionHandler, SubmissionOutcome};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
