//! Handlers for the fixed option lists used by track forms.

use axum::response::IntoResponse;
use axum::Json;
use setlist_core::genre::GENRES;
use setlist_core::music_key::key_options;

use crate::response::DataResponse;

/// GET /api/v1/meta/keys
///
/// All 24 Camelot keys with display labels, in wheel order.
pub async fn keys() -> impl IntoResponse {
    Json(DataResponse {
        data: key_options(),
    })
}

/// GET /api/v1/meta/genres
pub async fn genres() -> impl IntoResponse {
    Json(DataResponse { data: GENRES })
}
