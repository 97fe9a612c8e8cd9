/// Slide image validation: extension, decodability and 16:9 aspect ratio
use crate::constants::{SLIDE_ASPECT_RATIO, SLIDE_ASPECT_TOLERANCE, SLIDE_EXTENSIONS};
use crate::error::SlideValidationError;
use crate::models::RewindableSource;
use image::ImageReader;

/// Pixel dimensions of an accepted slide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideDimensions {
    pub width: u32,
    pub height: u32,
}

impl SlideDimensions {
    pub fn ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

/// Check if filename ends with an accepted slide extension (case-insensitive)
pub fn has_slide_extension(filename: &str) -> bool {
    let lower = filename.to_lowercase();
    SLIDE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// True when width/height is within the tolerance of 16:9
///
/// The tolerance applies to the ratio itself, not to either side.
pub fn is_widescreen(width: u32, height: u32) -> bool {
    if height == 0 {
        return false;
    }
    let ratio = f64::from(width) / f64::from(height);
    (ratio - SLIDE_ASPECT_RATIO).abs() < SLIDE_ASPECT_TOLERANCE
}

/// Read image dimensions from the header without decoding pixels
fn read_dimensions<S: RewindableSource>(source: &S) -> Result<SlideDimensions, SlideValidationError> {
    let (width, height) = ImageReader::new(source.open())
        .with_guessed_format()
        .map_err(|_| SlideValidationError::CorruptImage)?
        .into_dimensions()
        .map_err(|_| SlideValidationError::CorruptImage)?;

    if width == 0 || height == 0 {
        return Err(SlideValidationError::CorruptImage);
    }

    Ok(SlideDimensions { width, height })
}

/// Validate one uploaded slide
///
/// Checks run in order (extension, decode, aspect ratio) and stop at the
/// first failure.
pub fn validate_slide<S: RewindableSource>(
    source: &S,
) -> Result<SlideDimensions, SlideValidationError> {
    if !has_slide_extension(source.name()) {
        return Err(SlideValidationError::InvalidExtension);
    }

    let dimensions = read_dimensions(source)?;

    if !is_widescreen(dimensions.width, dimensions.height) {
        return Err(SlideValidationError::AspectRatioMismatch {
            width: dimensions.width,
            height: dimensions.height,
        });
    }

    tracing::debug!(
        filename = %source.name(),
        width = dimensions.width,
        height = dimensions.height,
        "Slide validated"
    );

    Ok(dimensions)
}
