//! Set membership: ordered track references and their resolution.
//!
//! A set stores only track ids. Listing endpoints hand those ids out as
//! [`TrackRef::Unresolved`]; detail endpoints run [`resolve_refs`] to swap
//! each id for the full track, or for a [`TrackRef::Missing`] placeholder
//! when the track no longer exists.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// A reference from a set to a track.
///
/// Serialized with a `kind` tag: `{"kind":"unresolved","id":...}`,
/// `{"kind":"resolved", ...track fields}`, `{"kind":"missing","id":...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TrackRef<T> {
    /// Only the id is known; no lookup has been made.
    Unresolved { id: DbId },
    /// The id resolved to a stored track.
    Resolved(T),
    /// The id did not resolve. The track was deleted or never existed.
    Missing { id: DbId },
}

/// Anything that carries its own record id.
pub trait HasId {
    fn id(&self) -> DbId;
}

impl<T: HasId> TrackRef<T> {
    /// The referenced track id, whatever the resolution state.
    pub fn id(&self) -> DbId {
        match self {
            Self::Unresolved { id } | Self::Missing { id } => *id,
            Self::Resolved(track) => track.id(),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing { .. })
    }

    /// The resolved track, if any.
    pub fn track(&self) -> Option<&T> {
        match self {
            Self::Resolved(track) => Some(track),
            _ => None,
        }
    }
}

/// Wrap bare ids without looking anything up.
pub fn unresolved_refs<T>(ids: &[DbId]) -> Vec<TrackRef<T>> {
    ids.iter().map(|&id| TrackRef::Unresolved { id }).collect()
}

/// Resolve `ids` in order against `tracks`.
///
/// Ids with no matching track become [`TrackRef::Missing`]; the order of
/// `ids` is kept and `tracks` may arrive in any order.
pub fn resolve_refs<T: HasId>(ids: &[DbId], tracks: Vec<T>) -> Vec<TrackRef<T>> {
    let mut by_id: HashMap<DbId, T> = tracks.into_iter().map(|t| (t.id(), t)).collect();
    ids.iter()
        .map(|&id| match by_id.remove(&id) {
            Some(track) => TrackRef::Resolved(track),
            None => TrackRef::Missing { id },
        })
        .collect()
}

/// Collapse repeated ids to their first occurrence, keeping order.
pub fn dedupe_ids(ids: &[DbId]) -> Vec<DbId> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::types::new_id;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Stub {
        id: DbId,
        title: String,
    }

    impl HasId for Stub {
        fn id(&self) -> DbId {
            self.id
        }
    }

    fn stub(title: &str) -> Stub {
        Stub {
            id: new_id(),
            title: title.to_string(),
        }
    }

    #[test]
    fn resolve_keeps_id_order_not_track_order() {
        let a = stub("A");
        let b = stub("B");
        let ids = vec![b.id, a.id];
        let refs = resolve_refs(&ids, vec![a.clone(), b.clone()]);
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].track().map(|t| t.title.as_str()), Some("B"));
        assert_eq!(refs[1].track().map(|t| t.title.as_str()), Some("A"));
    }

    #[test]
    fn resolve_marks_dangling_ids_missing() {
        let a = stub("A");
        let gone = new_id();
        let refs = resolve_refs(&[gone, a.id], vec![a.clone()]);
        assert_matches!(refs[0], TrackRef::Missing { id } if id == gone);
        assert!(refs[0].is_missing());
        assert_eq!(refs[1].id(), a.id);
    }

    #[test]
    fn unresolved_refs_wrap_ids() {
        let id = new_id();
        let refs: Vec<TrackRef<Stub>> = unresolved_refs(&[id]);
        assert_matches!(refs[0], TrackRef::Unresolved { id: got } if got == id);
        assert!(refs[0].track().is_none());
    }

    #[test]
    fn dedupe_keeps_first_occurrence() {
        let (a, b, c) = (new_id(), new_id(), new_id());
        assert_eq!(dedupe_ids(&[a, b, a, c, b]), vec![a, b, c]);
        assert!(dedupe_ids(&[]).is_empty());
    }

    #[test]
    fn refs_serialize_with_kind_tag() {
        let a = stub("A");
        let missing = new_id();
        let refs = vec![
            TrackRef::Resolved(a.clone()),
            TrackRef::Missing { id: missing },
        ];
        let json = serde_json::to_value(&refs).unwrap();
        assert_eq!(json[0]["kind"], "resolved");
        assert_eq!(json[0]["title"], "A");
        assert_eq!(json[1]["kind"], "missing");
        assert_eq!(json[1]["id"], missing.to_string());

        let back: Vec<TrackRef<Stub>> = serde_json::from_value(json).unwrap();
        assert_eq!(back, refs);
    }
}
