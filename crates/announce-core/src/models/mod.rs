/// Data models for the announcement system
pub mod contact;
pub mod notification;
pub mod submission;
pub mod upload;

// Re-export commonly used types
pub use contact::*;
pub use notification::*;
pub use submission::*;
pub use upload::*;
