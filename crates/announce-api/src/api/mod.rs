/// API endpoint modules
pub mod contacts;
pub mod faq;
pub mod health;
pub mod submission;
pub mod submissions;
