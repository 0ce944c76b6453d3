//! Observable library store.
//!
//! [`Store`] owns the [`LibraryState`] behind a `tokio::sync::watch`
//! channel. Operations call the API, then dispatch the matching [`Action`];
//! subscribers see each resulting snapshot.

use std::mem;

use setlist_core::filter::TrackFilter;
use setlist_core::models::set::{CreateSet, SetWithTracks, UpdateSet};
use setlist_core::models::track::{CreateTrack, Track, UpdateTrack};
use setlist_core::types::DbId;
use tokio::sync::watch;

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::state::{reduce, Action, Collection, LibraryState};

/// Library cache backed by an [`ApiClient`].
pub struct Store {
    api: ApiClient,
    state: watch::Sender<LibraryState>,
}

impl Store {
    pub fn new(api: ApiClient) -> Self {
        let (state, _) = watch::channel(LibraryState::default());
        Self { api, state }
    }

    /// Receive a snapshot after every dispatched action.
    pub fn subscribe(&self) -> watch::Receiver<LibraryState> {
        self.state.subscribe()
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> LibraryState {
        self.state.borrow().clone()
    }

    /// Apply an action to the state and notify subscribers.
    pub fn dispatch(&self, action: Action) {
        tracing::trace!(?action, "Dispatching action");
        self.state
            .send_modify(|state| *state = reduce(mem::take(state), action));
    }

    // -----------------------------------------------------------------------
    // Tracks
    // -----------------------------------------------------------------------

    /// Load tracks matching the current filters.
    pub async fn fetch_tracks(&self) -> Result<Vec<Track>, ClientError> {
        self.dispatch(Action::Started(Collection::Tracks));
        let filters = self.state.borrow().filters.clone();
        let result = self.api.list_tracks(&filters).await;
        self.settle(Collection::Tracks, "fetch tracks", result, Action::TracksLoaded)
    }

    /// Load one track into `current_track`.
    pub async fn fetch_track(&self, id: DbId) -> Result<Track, ClientError> {
        self.dispatch(Action::Started(Collection::Tracks));
        let result = self.api.get_track(id).await;
        self.settle(Collection::Tracks, "fetch track", result, Action::TrackLoaded)
    }

    pub async fn create_track(&self, input: &CreateTrack) -> Result<Track, ClientError> {
        self.dispatch(Action::Started(Collection::Tracks));
        let result = self.api.create_track(input).await;
        self.settle(Collection::Tracks, "create track", result, Action::TrackCreated)
    }

    pub async fn update_track(&self, id: DbId, input: &UpdateTrack) -> Result<Track, ClientError> {
        self.dispatch(Action::Started(Collection::Tracks));
        let result = self.api.update_track(id, input).await;
        self.settle(Collection::Tracks, "update track", result, Action::TrackUpdated)
    }

    /// Delete a track. Locally held sets drop the id too.
    pub async fn delete_track(&self, id: DbId) -> Result<(), ClientError> {
        self.dispatch(Action::Started(Collection::Tracks));
        let result = self.api.delete_track(id).await.map(|_| ());
        self.settle(Collection::Tracks, "delete track", result, |()| {
            Action::TrackDeleted(id)
        })
    }

    /// Merge `changes` into the filters and reload tracks.
    pub async fn set_filters(&self, changes: TrackFilter) -> Result<Vec<Track>, ClientError> {
        self.dispatch(Action::FiltersChanged(changes));
        self.fetch_tracks().await
    }

    /// Reset the filters and reload tracks.
    pub async fn clear_filters(&self) -> Result<Vec<Track>, ClientError> {
        self.dispatch(Action::FiltersCleared);
        self.fetch_tracks().await
    }

    // -----------------------------------------------------------------------
    // Sets
    // -----------------------------------------------------------------------

    pub async fn fetch_sets(&self) -> Result<Vec<SetWithTracks>, ClientError> {
        self.dispatch(Action::Started(Collection::Sets));
        let result = self.api.list_sets().await;
        self.settle(Collection::Sets, "fetch sets", result, Action::SetsLoaded)
    }

    /// Load one set, with resolved tracks, into `current_set`.
    pub async fn fetch_set(&self, id: DbId) -> Result<SetWithTracks, ClientError> {
        self.dispatch(Action::Started(Collection::Sets));
        let result = self.api.get_set(id).await;
        self.settle(Collection::Sets, "fetch set", result, Action::SetLoaded)
    }

    pub async fn create_set(&self, input: &CreateSet) -> Result<SetWithTracks, ClientError> {
        self.dispatch(Action::Started(Collection::Sets));
        let result = self.api.create_set(input).await;
        self.settle(Collection::Sets, "create set", result, Action::SetCreated)
    }

    pub async fn update_set(
        &self,
        id: DbId,
        input: &UpdateSet,
    ) -> Result<SetWithTracks, ClientError> {
        self.dispatch(Action::Started(Collection::Sets));
        let result = self.api.update_set(id, input).await;
        self.settle(Collection::Sets, "update set", result, Action::SetUpdated)
    }

    pub async fn delete_set(&self, id: DbId) -> Result<(), ClientError> {
        self.dispatch(Action::Started(Collection::Sets));
        let result = self.api.delete_set(id).await.map(|_| ());
        self.settle(Collection::Sets, "delete set", result, |()| {
            Action::SetDeleted(id)
        })
    }

    pub async fn add_track_to_set(
        &self,
        set_id: DbId,
        track_id: DbId,
    ) -> Result<SetWithTracks, ClientError> {
        self.dispatch(Action::Started(Collection::Sets));
        let result = self.api.add_track_to_set(set_id, track_id).await;
        self.settle(Collection::Sets, "add track to set", result, Action::SetUpdated)
    }

    pub async fn remove_track_from_set(
        &self,
        set_id: DbId,
        track_id: DbId,
    ) -> Result<SetWithTracks, ClientError> {
        self.dispatch(Action::Started(Collection::Sets));
        let result = self.api.remove_track_from_set(set_id, track_id).await;
        self.settle(Collection::Sets, "remove track from set", result, Action::SetUpdated)
    }

    /// Replace a set's track order.
    pub async fn reorder_tracks(
        &self,
        set_id: DbId,
        track_ids: Vec<DbId>,
    ) -> Result<SetWithTracks, ClientError> {
        self.dispatch(Action::Started(Collection::Sets));
        let result = self.api.reorder_set_tracks(set_id, track_ids).await;
        self.settle(Collection::Sets, "reorder tracks", result, Action::SetUpdated)
    }

    // ---- private helpers ----

    /// Dispatch the success or failure action for a finished request and
    /// hand the result back to the caller.
    fn settle<T: Clone>(
        &self,
        collection: Collection,
        operation: &str,
        result: Result<T, ClientError>,
        on_success: impl FnOnce(T) -> Action,
    ) -> Result<T, ClientError> {
        match result {
            Ok(value) => {
                self.dispatch(on_success(value.clone()));
                Ok(value)
            }
            Err(err) => {
                tracing::warn!(error = %err, operation, "Library request failed");
                self.dispatch(Action::Failed(
                    collection,
                    format!("Failed to {operation}: {err}"),
                ));
                Err(err)
            }
        }
    }
}
