/// Application constants
///
/// This module contains all hardcoded values used throughout the application.
/// Constants are organized by category for easy maintenance.
// ============================================================================
// Notification Constants
// ============================================================================
/// Subject line of every announcement notification
pub const NOTIFICATION_SUBJECT: &str = "New Announcement";

/// First line of the notification body
pub const NOTIFICATION_INTRO: &str = "A new announcement has been submitted:";

/// Date format used in notification bodies ("July 16, 2025")
pub const NOTIFICATION_DATE_FORMAT: &str = "%B %d, %Y";

/// Default sender address when EMAIL_FROM is not set
pub const DEFAULT_EMAIL_FROM: &str = "announcements@example.com";

// ============================================================================
// Slide Constants
// ============================================================================

/// Accepted slide file extensions (lowercase, with leading dot)
pub const SLIDE_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg"];

/// Expected slide aspect ratio (16:9)
pub const SLIDE_ASPECT_RATIO: f64 = 16.0 / 9.0;

/// Absolute tolerance on the width/height ratio
pub const SLIDE_ASPECT_TOLERANCE: f64 = 0.05;

/// Media subdirectory for stored slides
pub const SLIDE_UPLOAD_DIR: &str = "announcements";

/// Multipart field name carrying slide files
pub const SLIDES_FIELD: &str = "slides";

// ============================================================================
// Size Limits
// ============================================================================

/// Maximum submission title length
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum email address length
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum contact name length
pub const MAX_CONTACT_NAME_LENGTH: usize = 100;

/// Maximum filename length
pub const MAX_FILENAME_LENGTH: usize = 255;

/// Default request body limit for uploads (25 MB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

// ============================================================================
// Validation Constants
// ============================================================================

/// Allowed characters in sanitized filenames
pub const FILENAME_SAFE_CHARS: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Email validation regex
pub const EMAIL_REGEX_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

/// Accepted date/time input formats, tried in order
pub const DATETIME_INPUT_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// Accepted date-only input format
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// Form Messages
// ============================================================================

pub const MSG_REQUIRED: &str = "This field is required.";

pub const MSG_INVALID_EMAIL: &str = "Enter a valid email address.";

pub const MSG_INVALID_DATETIME: &str = "Enter a valid date/time.";

pub const MSG_NO_AUDIENCE: &str = "At least one of 'chapel' or 'praise' must be selected.";

pub const MSG_END_BEFORE_START: &str = "End date must be on or after the start date.";

// ============================================================================
// Defaults
// ============================================================================

/// Default listen address
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Default database location
pub const DEFAULT_DATABASE_URL: &str = "sqlite://announcements.db";

/// Default media root
pub const DEFAULT_MEDIA_ROOT: &str = "media";

/// Where the browser is sent after a successful submission
pub const SUCCESS_REDIRECT: &str = "/";

// ============================================================================
// Testing Constants
// ============================================================================
