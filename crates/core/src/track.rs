//! Track metadata constraints and validation helpers.
//!
//! Create and update DTOs in [`crate::models`] delegate to these functions
//! so the HTTP layer and the repositories share one definition of a valid
//! track.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Lowest accepted tempo in beats per minute.
pub const MIN_BPM: f64 = 20.0;

/// Highest accepted tempo in beats per minute.
pub const MAX_BPM: f64 = 999.0;

/// Maximum length of title, artist, and set name fields.
pub const MAX_NAME_LENGTH: usize = 200;

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Validate a required text field: non-empty after trimming and no longer
/// than [`MAX_NAME_LENGTH`] characters.
pub fn validate_required_text(field: &str, value: &str) -> Result<(), CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate that a tempo is finite and between [`MIN_BPM`] and [`MAX_BPM`]
/// inclusive.
pub fn validate_bpm(bpm: f64) -> Result<(), CoreError> {
    if !bpm.is_finite() {
        return Err(CoreError::Validation(
            "bpm must be a finite number".to_string(),
        ));
    }
    if !(MIN_BPM..=MAX_BPM).contains(&bpm) {
        return Err(CoreError::Validation(format!(
            "bpm must be between {MIN_BPM} and {MAX_BPM}, got {bpm}"
        )));
    }
    Ok(())
}

/// Parse display duration text into whole seconds.
///
/// Accepts `M:SS` (minutes may have any number of digits) and `H:MM:SS`.
/// Returns `None` for anything else.
pub fn parse_duration_secs(text: &str) -> Option<u32> {
    fn digits(part: &str) -> Option<u32> {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        part.parse().ok()
    }

    fn sexagesimal(part: &str) -> Option<u32> {
        if part.len() != 2 {
            return None;
        }
        digits(part).filter(|v| *v < 60)
    }

    let parts: Vec<&str> = text.trim().split(':').collect();
    match parts.as_slice() {
        [minutes, seconds] => {
            let minutes = digits(minutes)?;
            let seconds = sexagesimal(seconds)?;
            minutes.checked_mul(60)?.checked_add(seconds)
        }
        [hours, minutes, seconds] => {
            let hours = digits(hours)?;
            let minutes = sexagesimal(minutes)?;
            let seconds = sexagesimal(seconds)?;
            hours
                .checked_mul(3600)?
                .checked_add(minutes * 60 + seconds)
        }
        _ => None,
    }
}

/// Validate duration display text (`M:SS` or `H:MM:SS`).
pub fn validate_duration(duration: &str) -> Result<(), CoreError> {
    match parse_duration_secs(duration) {
        Some(_) => Ok(()),
        None => Err(CoreError::Validation(format!(
            "duration must look like M:SS, got '{duration}'"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Trim optional free text, mapping blank input to `None`.
///
/// Patches use this to let callers clear an optional field by sending `""`.
pub fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Case-fold text for substring search.
pub fn fold_for_search(text: &str) -> String {
    text.to_lowercase()
}
