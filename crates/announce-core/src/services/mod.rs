/// Service traits and their implementations
pub mod mailer;
pub mod media;
pub mod ses;
pub mod store;

pub use mailer::{EmailSender, LogEmailSender};
pub use media::{LocalMediaStorage, MediaStorage};
pub use ses::SesEmailSender;
pub use store::{SqliteStore, SubmissionStore};
