//! Musical keys in Camelot notation.
//!
//! DJs label harmonic keys with the Camelot wheel: a number 1-12 plus `A`
//! (minor) or `B` (major). Tracks store the code (e.g. `8A`); the label
//! (`8A - A# Minor`) is only used for display.

use serde::Serialize;

use crate::error::CoreError;

/// One of the 24 Camelot key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MusicKey {
    A1,
    A2,
    A3,
    A4,
    A5,
    A6,
    A7,
    A8,
    A9,
    A10,
    A11,
    A12,
    B1,
    B2,
    B3,
    B4,
    B5,
    B6,
    B7,
    B8,
    B9,
    B10,
    B11,
    B12,
}

/// Every key in wheel order, minor ring first.
pub const ALL_KEYS: [MusicKey; 24] = [
    MusicKey::A1,
    MusicKey::A2,
    MusicKey::A3,
    MusicKey::A4,
    MusicKey::A5,
    MusicKey::A6,
    MusicKey::A7,
    MusicKey::A8,
    MusicKey::A9,
    MusicKey::A10,
    MusicKey::A11,
    MusicKey::A12,
    MusicKey::B1,
    MusicKey::B2,
    MusicKey::B3,
    MusicKey::B4,
    MusicKey::B5,
    MusicKey::B6,
    MusicKey::B7,
    MusicKey::B8,
    MusicKey::B9,
    MusicKey::B10,
    MusicKey::B11,
    MusicKey::B12,
];

impl MusicKey {
    /// Return the Camelot code, e.g. `"8A"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A1 => "1A",
            Self::A2 => "2A",
            Self::A3 => "3A",
            Self::A4 => "4A",
            Self::A5 => "5A",
            Self::A6 => "6A",
            Self::A7 => "7A",
            Self::A8 => "8A",
            Self::A9 => "9A",
            Self::A10 => "10A",
            Self::A11 => "11A",
            Self::A12 => "12A",
            Self::B1 => "1B",
            Self::B2 => "2B",
            Self::B3 => "3B",
            Self::B4 => "4B",
            Self::B5 => "5B",
            Self::B6 => "6B",
            Self::B7 => "7B",
            Self::B8 => "8B",
            Self::B9 => "9B",
            Self::B10 => "10B",
            Self::B11 => "11B",
            Self::B12 => "12B",
        }
    }

    /// Return the traditional key name, e.g. `"A# Minor"`.
    pub fn tonality(&self) -> &'static str {
        match self {
            Self::A1 => "A Minor",
            Self::A2 => "E Minor",
            Self::A3 => "B Minor",
            Self::A4 => "F# Minor",
            Self::A5 => "C# Minor",
            Self::A6 => "G# Minor",
            Self::A7 => "D# Minor",
            Self::A8 => "A# Minor",
            Self::A9 => "F Minor",
            Self::A10 => "C Minor",
            Self::A11 => "G Minor",
            Self::A12 => "D Minor",
            Self::B1 => "C Major",
            Self::B2 => "G Major",
            Self::B3 => "D Major",
            Self::B4 => "A Major",
            Self::B5 => "E Major",
            Self::B6 => "B Major",
            Self::B7 => "F# Major",
            Self::B8 => "C# Major",
            Self::B9 => "G# Major",
            Self::B10 => "D# Major",
            Self::B11 => "A# Major",
            Self::B12 => "F Major",
        }
    }

    /// Display label combining code and tonality, e.g. `"8A - A# Minor"`.
    pub fn label(&self) -> String {
        format!("{} - {}", self.as_str(), self.tonality())
    }

    /// Parse a Camelot code. Matching is exact (`"8a"` is rejected).
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        ALL_KEYS
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid key '{s}'. Must be a Camelot code from 1A-12A or 1B-12B"
                ))
            })
    }
}

/// A `{ value, label }` pair for key pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyOption {
    pub value: &'static str,
    pub label: String,
}

/// All keys as picker options, in wheel order.
pub fn key_options() -> Vec<KeyOption> {
    ALL_KEYS
        .iter()
        .map(|key| KeyOption {
            value: key.as_str(),
            label: key.label(),
        })
        .collect()
}

/// Validate that `key` is one of the 24 Camelot codes.
pub fn validate_key(key: &str) -> Result<(), CoreError> {
    MusicKey::parse(key).map(|_| ())
}
