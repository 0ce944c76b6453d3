//! Track filter criteria and the predicate built from them.
//!
//! [`TrackFilter`] is the sparse, user-facing criteria set. [`TrackFilter::build`]
//! turns it into a [`TrackPredicate`]: an AND of typed [`FilterClause`]s. The
//! track repository renders the clauses into SQL; [`TrackPredicate::matches`]
//! evaluates the same clauses in memory.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::track::fold_for_search;

/// Optional filter criteria for listing tracks. All supplied criteria must
/// hold for a track to match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackFilter {
    /// Case-insensitive substring of title or artist.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bpm_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bpm_max: Option<f64>,
    /// Exact Camelot key code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Exact genre name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
}

/// A single condition on a track.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterClause {
    /// Folded needle that must occur in the folded title or artist.
    Search(String),
    BpmAtLeast(f64),
    BpmAtMost(f64),
    KeyIs(String),
    GenreIs(String),
}

/// Read access to the track fields the filter inspects.
pub trait TrackAttributes {
    fn title(&self) -> &str;
    fn artist(&self) -> &str;
    fn bpm(&self) -> f64;
    fn key(&self) -> &str;
    fn genre(&self) -> &str;
}

/// Conjunction of clauses. An empty predicate matches every track.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackPredicate {
    clauses: Vec<FilterClause>,
}

impl TrackFilter {
    /// `true` if no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.build().map(|p| p.is_empty()).unwrap_or(false)
    }

    /// Check that the criteria are coherent.
    ///
    /// Bounds must be finite and `bpm_min` must not exceed `bpm_max`.
    /// Unknown keys and genres are not errors; they simply match nothing.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (name, bound) in [("bpmMin", self.bpm_min), ("bpmMax", self.bpm_max)] {
            if let Some(value) = bound {
                if !value.is_finite() {
                    return Err(CoreError::Validation(format!(
                        "{name} must be a finite number"
                    )));
                }
            }
        }
        if let (Some(min), Some(max)) = (self.bpm_min, self.bpm_max) {
            if min > max {
                return Err(CoreError::Validation(format!(
                    "bpmMin ({min}) must not exceed bpmMax ({max})"
                )));
            }
        }
        Ok(())
    }

    /// Build the predicate for these criteria.
    ///
    /// Blank text criteria are ignored rather than matching only blank
    /// fields, so an emptied search box lists everything.
    pub fn build(&self) -> Result<TrackPredicate, CoreError> {
        self.validate()?;

        let mut clauses = Vec::new();

        if let Some(search) = non_blank(self.search.as_deref()) {
            clauses.push(FilterClause::Search(fold_for_search(search)));
        }
        if let Some(min) = self.bpm_min {
            clauses.push(FilterClause::BpmAtLeast(min));
        }
        if let Some(max) = self.bpm_max {
            clauses.push(FilterClause::BpmAtMost(max));
        }
        if let Some(key) = non_blank(self.key.as_deref()) {
            clauses.push(FilterClause::KeyIs(key.to_string()));
        }
        if let Some(genre) = non_blank(self.genre.as_deref()) {
            clauses.push(FilterClause::GenreIs(genre.to_string()));
        }

        Ok(TrackPredicate { clauses })
    }
}

impl TrackPredicate {
    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Evaluate the predicate against a single track.
    pub fn matches<T: TrackAttributes + ?Sized>(&self, track: &T) -> bool {
        self.clauses.iter().all(|clause| match clause {
            FilterClause::Search(needle) => {
                fold_for_search(track.title()).contains(needle.as_str())
                    || fold_for_search(track.artist()).contains(needle.as_str())
            }
            FilterClause::BpmAtLeast(min) => track.bpm() >= *min,
            FilterClause::BpmAtMost(max) => track.bpm() <= *max,
            FilterClause::KeyIs(key) => track.key() == key,
            FilterClause::GenreIs(genre) => track.genre() == genre,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
