//! Handlers for the `/tracks` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use setlist_core::error::CoreError;
use setlist_core::filter::TrackFilter;
use setlist_core::types::DbId;
use setlist_db::models::track::{CreateTrack, UpdateTrack};
use setlist_db::repositories::TrackRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::query::TrackListParams;
use crate::response::{DataResponse, DeleteConfirmation};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Track",
        id,
    })
}

/// GET /api/v1/tracks?search=&bpmMin=&bpmMax=&key=&genre=
///
/// List tracks matching every supplied criterion, newest first.
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<TrackListParams>,
) -> AppResult<impl IntoResponse> {
    let predicate = TrackFilter::from(params).build()?;
    let tracks = TrackRepo::list(&state.pool, &predicate).await?;
    Ok(Json(DataResponse { data: tracks }))
}

/// GET /api/v1/tracks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let track = TrackRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: track }))
}

/// POST /api/v1/tracks
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateTrack>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let track = TrackRepo::create(&state.pool, &input).await?;

    tracing::info!(track_id = %track.id, title = %track.title, "Track created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: track })))
}

/// PUT /api/v1/tracks/{id}
///
/// Merge the supplied fields onto the stored track.
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateTrack>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let track = TrackRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(track_id = %id, "Track updated");

    Ok(Json(DataResponse { data: track }))
}

/// DELETE /api/v1/tracks/{id}
///
/// Delete a track and remove it from every set that references it.
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !TrackRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(track_id = %id, "Track deleted");

    Ok(Json(DataResponse {
        data: DeleteConfirmation {
            id,
            message: "Track deleted",
        },
    }))
}
