//! The genre vocabulary offered to users.
//!
//! The list is closed for validation purposes, but `"Other"` is always
//! accepted as an escape value; finer distinctions go in `subgenre`.

use crate::error::CoreError;

/// Escape value for genres outside the list.
pub const OTHER: &str = "Other";

/// All accepted genre names, in picker order.
pub const GENRES: &[&str] = &[
    "House",
    "Tech House",
    "Deep House",
    "Progressive House",
    "Techno",
    "Melodic Techno",
    "Trance",
    "Progressive Trance",
    "Drum & Bass",
    "Dubstep",
    "Trap",
    "Hip Hop",
    "R&B",
    "Pop",
    "Ambient",
    "Downtempo",
    "Electronica",
    "Experimental",
    OTHER,
];

/// Validate that `genre` is one of [`GENRES`]. Matching is exact.
pub fn validate_genre(genre: &str) -> Result<(), CoreError> {
    if GENRES.contains(&genre) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid genre '{genre}'. Use one of the listed genres or '{OTHER}'"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listed_genres_are_valid() {
        assert!(validate_genre("Progressive House").is_ok());
        assert!(validate_genre("Drum & Bass").is_ok());
        assert!(validate_genre(OTHER).is_ok());
    }

    #[test]
    fn unlisted_or_differently_cased_genres_are_rejected() {
        assert!(validate_genre("Polka").is_err());
        assert!(validate_genre("techno").is_err());
        assert!(validate_genre("").is_err());
    }

    #[test]
    fn other_is_last() {
        assert_eq!(GENRES.last(), Some(&OTHER));
    }
}
