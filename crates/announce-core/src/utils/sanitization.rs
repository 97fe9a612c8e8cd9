/// Filename and media path sanitization
use crate::constants::{FILENAME_SAFE_CHARS, MAX_FILENAME_LENGTH};

/// Filename sanitization with whitelist approach
///
/// Uses a strict whitelist of allowed characters to prevent:
/// - Path traversal (../, ..\)
/// - Shell metacharacters (;, |, &, $, `, etc.)
/// - Null byte injection
///
/// # Examples
/// ```
/// use announce_core::utils::sanitization::sanitize_filename_strict;
///
/// assert_eq!(sanitize_filename_strict("slide.png"), "slide.png");
/// assert_eq!(sanitize_filename_strict("my slide;rm.png"), "mysliderm.png");
/// ```
pub fn sanitize_filename_strict(filename: &str) -> String {
    // Browsers on some platforms send the full client path
    let basename = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);

    let filtered: String = basename
        .chars()
        .filter(|c| FILENAME_SAFE_CHARS.contains(*c))
        .take(MAX_FILENAME_LENGTH)
        .collect();

    let sanitized = filtered.trim_matches('.').replace("..", "_");
    let trimmed = sanitized.trim_matches('.');

    if trimmed.is_empty() {
        format!("file_{}", uuid::Uuid::new_v4())
    } else {
        trimmed.to_string()
    }
}

/// Validates that a relative media path stays inside the media root
pub fn validate_media_path(path: &str) -> Result<(), String> {
    if path.is_empty() {
        return Err("Media path cannot be empty".to_string());
    }

    if path.contains("..") {
        return Err("Media path cannot contain '..'".to_string());
    }

    if path.starts_with('/') || path.starts_with('\\') || path.contains('\0') {
        return Err("Media path must be relative".to_string());
    }

    Ok(())
}
