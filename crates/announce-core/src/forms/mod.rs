/// Form cleaning and validation
pub mod contact;
pub mod errors;
pub mod submission;

pub use contact::ContactForm;
pub use errors::FormValidationError;
pub use submission::SubmissionForm;
