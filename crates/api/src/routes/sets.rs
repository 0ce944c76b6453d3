use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::sets;
use crate::state::AppState;

/// Routes mounted at `/sets`.
///
/// ```text
/// GET    /                        -> list
/// POST   /                        -> create
/// GET    /{id}                    -> get_by_id
/// PUT    /{id}                    -> update
/// DELETE /{id}                    -> delete
/// POST   /{id}/tracks             -> add_track
/// DELETE /{id}/tracks/{track_id}  -> remove_track
/// PUT    /{id}/reorder            -> reorder
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(sets::list).post(sets::create))
        .route(
            "/{id}",
            get(sets::get_by_id).put(sets::update).delete(sets::delete),
        )
        .route("/{id}/tracks", post(sets::add_track))
        .route("/{id}/tracks/{track_id}", delete(sets::remove_track))
        .route("/{id}/reorder", put(sets::reorder))
}
