//! Client-side library state and its reducer.
//!
//! Every change to [`LibraryState`] is an [`Action`] passed through
//! [`reduce`]. The reducer is pure: it takes the current state by value and
//! returns the next one, so it can be tested without a server.

use setlist_core::filter::TrackFilter;
use setlist_core::membership::TrackRef;
use setlist_core::models::set::SetWithTracks;
use setlist_core::models::track::Track;
use setlist_core::types::DbId;

/// Request status of one collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Status {
    pub loading: bool,
    pub error: Option<String>,
}

/// Which collection an in-flight request or failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Tracks,
    Sets,
}

/// Locally cached view of the library.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LibraryState {
    pub tracks: Vec<Track>,
    pub sets: Vec<SetWithTracks>,
    pub current_track: Option<Track>,
    pub current_set: Option<SetWithTracks>,
    /// Criteria used by the next track fetch.
    pub filters: TrackFilter,
    pub track_status: Status,
    pub set_status: Status,
}

impl LibraryState {
    pub fn status(&self, collection: Collection) -> &Status {
        match collection {
            Collection::Tracks => &self.track_status,
            Collection::Sets => &self.set_status,
        }
    }

    fn status_mut(&mut self, collection: Collection) -> &mut Status {
        match collection {
            Collection::Tracks => &mut self.track_status,
            Collection::Sets => &mut self.set_status,
        }
    }

    fn settle(&mut self, collection: Collection) {
        *self.status_mut(collection) = Status::default();
    }
}

/// A state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A request for `Collection` started. Clears its previous error.
    Started(Collection),
    /// A request for `Collection` failed. Data is left untouched.
    Failed(Collection, String),

    TracksLoaded(Vec<Track>),
    TrackLoaded(Track),
    TrackCreated(Track),
    TrackUpdated(Track),
    /// The server deleted the track and removed it from every set.
    TrackDeleted(DbId),

    SetsLoaded(Vec<SetWithTracks>),
    SetLoaded(SetWithTracks),
    SetCreated(SetWithTracks),
    /// A set was updated, including membership changes.
    SetUpdated(SetWithTracks),
    SetDeleted(DbId),

    /// Merge criteria into the current filters. `Some` fields overwrite.
    FiltersChanged(TrackFilter),
    FiltersCleared,
}

/// Apply `action` to `state`, returning the next state.
pub fn reduce(mut state: LibraryState, action: Action) -> LibraryState {
    match action {
        Action::Started(collection) => {
            *state.status_mut(collection) = Status {
                loading: true,
                error: None,
            };
        }
        Action::Failed(collection, message) => {
            *state.status_mut(collection) = Status {
                loading: false,
                error: Some(message),
            };
        }

        // --- Tracks ---
        Action::TracksLoaded(tracks) => {
            state.tracks = tracks;
            state.settle(Collection::Tracks);
        }
        Action::TrackLoaded(track) => {
            state.current_track = Some(track);
            state.settle(Collection::Tracks);
        }
        Action::TrackCreated(track) => {
            state.tracks.push(track);
            state.settle(Collection::Tracks);
        }
        Action::TrackUpdated(track) => {
            replace_by_id(&mut state.tracks, track.clone(), |t| t.id);
            if state.current_track.as_ref().is_some_and(|t| t.id == track.id) {
                state.current_track = Some(track.clone());
            }
            if let Some(set) = state.current_set.as_mut() {
                refresh_resolved(set, &track);
            }
            state.settle(Collection::Tracks);
        }
        Action::TrackDeleted(id) => {
            state.tracks.retain(|t| t.id != id);
            if state.current_track.as_ref().is_some_and(|t| t.id == id) {
                state.current_track = None;
            }
            for set in state.sets.iter_mut().chain(state.current_set.as_mut()) {
                set.tracks.retain(|r| r.id() != id);
            }
            state.settle(Collection::Tracks);
        }

        // --- Sets ---
        Action::SetsLoaded(sets) => {
            state.sets = sets;
            state.settle(Collection::Sets);
        }
        Action::SetLoaded(set) => {
            state.current_set = Some(set);
            state.settle(Collection::Sets);
        }
        Action::SetCreated(set) => {
            state.sets.push(set);
            state.settle(Collection::Sets);
        }
        Action::SetUpdated(set) => {
            replace_by_id(&mut state.sets, set.clone(), |s| s.set.id);
            if state
                .current_set
                .as_ref()
                .is_some_and(|s| s.set.id == set.set.id)
            {
                state.current_set = Some(set);
            }
            state.settle(Collection::Sets);
        }
        Action::SetDeleted(id) => {
            state.sets.retain(|s| s.set.id != id);
            if state.current_set.as_ref().is_some_and(|s| s.set.id == id) {
                state.current_set = None;
            }
            state.settle(Collection::Sets);
        }

        // --- Filters ---
        Action::FiltersChanged(changes) => {
            let filters = &mut state.filters;
            if changes.search.is_some() {
                filters.search = changes.search;
            }
            if changes.bpm_min.is_some() {
                filters.bpm_min = changes.bpm_min;
            }
            if changes.bpm_max.is_some() {
                filters.bpm_max = changes.bpm_max;
            }
            if changes.key.is_some() {
                filters.key = changes.key;
            }
            if changes.genre.is_some() {
                filters.genre = changes.genre;
            }
        }
        Action::FiltersCleared => state.filters = TrackFilter::default(),
    }
    state
}

/// Replace the item with the same id, leaving the list unchanged if absent.
fn replace_by_id<T>(items: &mut [T], item: T, id_of: impl Fn(&T) -> DbId) {
    let id = id_of(&item);
    if let Some(slot) = items.iter_mut().find(|existing| id_of(existing) == id) {
        *slot = item;
    }
}

/// Swap in the updated copy of `track` wherever `set` holds it resolved.
fn refresh_resolved(set: &mut SetWithTracks, track: &Track) {
    for entry in &mut set.tracks {
        if let TrackRef::Resolved(existing) = entry {
            if existing.id == track.id {
                *existing = track.clone();
            }
        }
    }
}
