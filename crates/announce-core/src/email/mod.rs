/// Notification composition modules
pub mod composer;
pub mod mime;

pub use composer::NotificationComposer;
