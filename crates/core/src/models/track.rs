//! Track entity model and DTOs.
//!
//! A track is one recording in the library with the metadata a DJ needs to
//! plan a set: tempo, Camelot key, genre, and links to where it can be
//! bought or streamed.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::filter::TrackAttributes;
use crate::genre::validate_genre;
use crate::membership::HasId;
use crate::music_key::validate_key;
use crate::track::{
    normalize_optional_text, validate_bpm, validate_duration, validate_required_text,
};
use crate::types::{DbId, Timestamp};

/// Per-platform links. Each platform is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct TrackLinks {
    #[cfg_attr(feature = "sqlx", sqlx(rename = "link_spotify"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spotify: Option<String>,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "link_soundcloud"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soundcloud: Option<String>,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "link_beatport"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beatport: Option<String>,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "link_youtube"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
}

impl TrackLinks {
    /// Trim every link, dropping blank ones.
    pub fn normalized(&self) -> Self {
        Self {
            spotify: normalize_optional_text(self.spotify.as_deref()),
            soundcloud: normalize_optional_text(self.soundcloud.as_deref()),
            beatport: normalize_optional_text(self.beatport.as_deref()),
            youtube: normalize_optional_text(self.youtube.as_deref()),
        }
    }
}

/// A row from the `tracks` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: DbId,
    pub title: String,
    pub artist: String,
    pub bpm: f64,
    /// Camelot key code, e.g. `8A`.
    #[cfg_attr(feature = "sqlx", sqlx(rename = "camelot_key"))]
    pub key: String,
    pub genre: String,
    pub subgenre: Option<String>,
    /// Display duration, e.g. `10:33`.
    pub duration: String,
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    #[serde(default)]
    pub links: TrackLinks,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl HasId for Track {
    fn id(&self) -> DbId {
        self.id
    }
}

impl TrackAttributes for Track {
    fn title(&self) -> &str {
        &self.title
    }

    fn artist(&self) -> &str {
        &self.artist
    }

    fn bpm(&self) -> f64 {
        self.bpm
    }

    fn key(&self) -> &str {
        &self.key
    }

    fn genre(&self) -> &str {
        &self.genre
    }
}

/// DTO for creating a new track.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTrack {
    pub title: String,
    pub artist: String,
    pub bpm: f64,
    pub key: String,
    pub genre: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subgenre: Option<String>,
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<TrackLinks>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CreateTrack {
    /// Check every required field against its constraint.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_required_text("title", &self.title)?;
        validate_required_text("artist", &self.artist)?;
        validate_bpm(self.bpm)?;
        validate_key(self.key.trim())?;
        validate_genre(self.genre.trim())?;
        validate_duration(&self.duration)?;
        Ok(())
    }
}

/// DTO for a partial track update. Omitted fields keep their value.
///
/// `subgenre` and `notes` are cleared by sending an empty string. A supplied
/// `links` object replaces all four platform links; omit it to keep them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTrack {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bpm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subgenre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<TrackLinks>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl UpdateTrack {
    /// Validate only the supplied fields.
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(ref title) = self.title {
            validate_required_text("title", title)?;
        }
        if let Some(ref artist) = self.artist {
            validate_required_text("artist", artist)?;
        }
        if let Some(bpm) = self.bpm {
            validate_bpm(bpm)?;
        }
        if let Some(ref key) = self.key {
            validate_key(key.trim())?;
        }
        if let Some(ref genre) = self.genre {
            validate_genre(genre.trim())?;
        }
        if let Some(ref duration) = self.duration {
            validate_duration(duration)?;
        }
        Ok(())
    }

    /// Merge the supplied fields onto `current`, field by field.
    ///
    /// Timestamps are left for the repository to set.
    pub fn apply_to(&self, current: &Track) -> Track {
        let mut next = current.clone();

        if let Some(ref title) = self.title {
            next.title = title.trim().to_string();
        }
        if let Some(ref artist) = self.artist {
            next.artist = artist.trim().to_string();
        }
        if let Some(bpm) = self.bpm {
            next.bpm = bpm;
        }
        if let Some(ref key) = self.key {
            next.key = key.trim().to_string();
        }
        if let Some(ref genre) = self.genre {
            next.genre = genre.trim().to_string();
        }
        if let Some(ref subgenre) = self.subgenre {
            next.subgenre = normalize_optional_text(Some(subgenre));
        }
        if let Some(ref duration) = self.duration {
            next.duration = duration.trim().to_string();
        }
        if let Some(ref links) = self.links {
            next.links = links.normalized();
        }
        if let Some(ref notes) = self.notes {
            next.notes = normalize_optional_text(Some(notes));
        }

        next
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::types::new_id;

    fn strobe() -> CreateTrack {
        CreateTrack {
            title: "Strobe".to_string(),
            artist: "deadmau5".to_string(),
            bpm: 128.0,
            key: "8A".to_string(),
            genre: "Progressive House".to_string(),
            subgenre: None,
            duration: "10:33".to_string(),
            links: None,
            notes: None,
        }
    }

    fn stored() -> Track {
        let now = Utc::now();
        Track {
            id: new_id(),
            title: "Strobe".to_string(),
            artist: "deadmau5".to_string(),
            bpm: 128.0,
            key: "8A".to_string(),
            genre: "Progressive House".to_string(),
            subgenre: Some("Melodic".to_string()),
            duration: "10:33".to_string(),
            links: TrackLinks {
                spotify: Some("https://open.spotify.com/track/x".to_string()),
                beatport: Some("https://beatport.com/track/y".to_string()),
                ..Default::default()
            },
            notes: Some("Peak time".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn create_validation_accepts_complete_track() {
        assert!(strobe().validate().is_ok());
    }

    #[test]
    fn create_validation_rejects_each_bad_field() {
        let cases: [fn(&mut CreateTrack); 6] = [
            |t: &mut CreateTrack| t.title = " ".to_string(),
            |t: &mut CreateTrack| t.artist = String::new(),
            |t: &mut CreateTrack| t.bpm = 5.0,
            |t: &mut CreateTrack| t.key = "8C".to_string(),
            |t: &mut CreateTrack| t.genre = "Polka".to_string(),
            |t: &mut CreateTrack| t.duration = "ten minutes".to_string(),
        ];
        for mutate in cases {
            let mut input = strobe();
            mutate(&mut input);
            assert!(input.validate().is_err(), "expected rejection for {input:?}");
        }
    }

    #[test]
    fn update_validation_checks_only_supplied_fields() {
        assert!(UpdateTrack::default().validate().is_ok());
        let bad = UpdateTrack {
            bpm: Some(2000.0),
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn apply_keeps_omitted_fields() {
        let current = stored();
        let patch = UpdateTrack {
            bpm: Some(126.0),
            ..Default::default()
        };
        let next = patch.apply_to(&current);
        assert_eq!(next.bpm, 126.0);
        assert_eq!(next.title, current.title);
        assert_eq!(next.subgenre, current.subgenre);
        assert_eq!(next.links, current.links);
        assert_eq!(next.notes, current.notes);
    }

    #[test]
    fn apply_clears_optional_text_with_empty_string() {
        let patch = UpdateTrack {
            subgenre: Some(String::new()),
            notes: Some("  ".to_string()),
            ..Default::default()
        };
        let next = patch.apply_to(&stored());
        assert_eq!(next.subgenre, None);
        assert_eq!(next.notes, None);
    }

    #[test]
    fn apply_replaces_links_wholesale() {
        let patch = UpdateTrack {
            links: Some(TrackLinks {
                youtube: Some(" https://youtu.be/z ".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let next = patch.apply_to(&stored());
        assert_eq!(next.links.youtube.as_deref(), Some("https://youtu.be/z"));
        assert_eq!(next.links.spotify, None);
        assert_eq!(next.links.beatport, None);
    }

    #[test]
    fn track_serializes_camel_case() {
        let json = serde_json::to_value(stored()).unwrap();
        assert!(json["createdAt"].is_string());
        assert_eq!(json["key"], "8A");
        assert_eq!(json["links"]["spotify"], "https://open.spotify.com/track/x");
        assert!(json["links"].get("soundcloud").is_none());
    }
}
