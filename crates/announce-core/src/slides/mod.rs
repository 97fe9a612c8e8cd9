/// Slide validation and persistence
pub mod processor;
pub mod validator;

pub use processor::{SlideBatch, SlideProcessor};
pub use validator::{SlideDimensions, validate_slide};
