use axum::routing::get;
use axum::Router;

use crate::handlers::meta;
use crate::state::AppState;

/// Routes mounted at `/meta`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/keys", get(meta::keys))
        .route("/genres", get(meta::genres))
}
