//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Student levels
// =============================================================================

/// Lowest academic level a student can be enrolled in
pub const MIN_LEVEL: i32 = 1;

/// Highest academic level a student can be enrolled in
pub const MAX_LEVEL: i32 = 4;

/// Check if a level value is valid
pub fn is_valid_level(level: i32) -> bool {
    (MIN_LEVEL..=MAX_LEVEL).contains(&level)
}

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

// =============================================================================
// Search
// =============================================================================

/// Upper bound on the number of words used by the fallback search phase
pub const MAX_SEARCH_WORDS: usize = 10;

/// Number of product names returned as search suggestions
pub const SUGGESTION_LIMIT: u64 = 5;

// =============================================================================
// Uploads
// =============================================================================

/// Public URL prefix under which uploaded files are served
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

/// Default maximum size of an uploaded profile picture (5 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
