//! Set entity model and DTOs.
//!
//! A set is a named, ordered list of track references. Membership lives in
//! the `set_tracks` junction table; `position` gives the order.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::membership::TrackRef;
use crate::track::validate_required_text;
use crate::types::{DbId, Timestamp};

use super::track::Track;

/// A set's reference to one of its tracks.
pub type SetTrackRef = TrackRef<Track>;

/// A row from the `sets` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Set {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A set together with its ordered track references.
///
/// List endpoints return `Unresolved` references; detail endpoints return
/// `Resolved` or `Missing` ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetWithTracks {
    #[serde(flatten)]
    pub set: Set,
    pub tracks: Vec<SetTrackRef>,
}

impl SetWithTracks {
    /// Referenced track ids in set order.
    pub fn track_ids(&self) -> Vec<DbId> {
        self.tracks.iter().map(TrackRef::id).collect()
    }
}

/// DTO for creating a new set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSet {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Initial track ids in order. Repeats are collapsed.
    #[serde(default)]
    pub tracks: Vec<DbId>,
}

impl CreateSet {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_required_text("name", &self.name)
    }
}

/// DTO for updating a set. All fields optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// An empty string clears the description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// If `Some`, replaces the membership wholesale (as a reorder does).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracks: Option<Vec<DbId>>,
}

impl UpdateSet {
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(ref name) = self.name {
            validate_required_text("name", name)?;
        }
        Ok(())
    }
}

/// Body of `POST /sets/{id}/tracks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSetTrack {
    pub track_id: DbId,
}

/// Body of `PUT /sets/{id}/reorder`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderSetTracks {
    pub track_ids: Vec<DbId>,
}
