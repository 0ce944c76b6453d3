pub mod health;
pub mod meta;
pub mod sets;
pub mod tracks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /tracks                          list (filtered), create
/// /tracks/{id}                     get, update, delete (cascades to sets)
///
/// /sets                            list, create
/// /sets/{id}                       get (resolved), update, delete
/// /sets/{id}/tracks                add track
/// /sets/{id}/tracks/{track_id}     remove track
/// /sets/{id}/reorder               reorder tracks
///
/// /meta/keys                       Camelot key options
/// /meta/genres                     genre options
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/tracks", tracks::router())
        .nest("/sets", sets::router())
        .nest("/meta", meta::router())
}
