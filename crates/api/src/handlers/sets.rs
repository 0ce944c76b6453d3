//! Handlers for the `/sets` resource and its track membership.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use setlist_core::error::CoreError;
use setlist_core::types::DbId;
use setlist_db::models::set::{AddSetTrack, CreateSet, ReorderSetTracks, UpdateSet};
use setlist_db::repositories::{SetRepo, TrackRepo};
use setlist_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::response::{DataResponse, DeleteConfirmation};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Set", id })
}

/// Verify that a track exists, returning 404 if not.
async fn ensure_track_exists(pool: &DbPool, id: DbId) -> AppResult<()> {
    TrackRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Track",
            id,
        }))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Set CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/sets
///
/// List all sets, newest first. Track references are returned as ids only.
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let sets = SetRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: sets }))
}

/// GET /api/v1/sets/{id}
///
/// Get a set with its tracks resolved. Deleted tracks appear as `missing`.
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let set = SetRepo::find_by_id_with_tracks(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: set }))
}

/// POST /api/v1/sets
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateSet>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let set = SetRepo::create(&state.pool, &input).await?;

    tracing::info!(set_id = %set.set.id, name = %set.set.name, tracks = set.tracks.len(), "Set created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: set })))
}

/// PUT /api/v1/sets/{id}
///
/// Update a set. If `tracks` is present, replaces the membership.
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateSet>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let set = SetRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(set_id = %id, "Set updated");

    Ok(Json(DataResponse { data: set }))
}

/// DELETE /api/v1/sets/{id}
///
/// Delete a set. Its tracks are untouched.
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !SetRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(set_id = %id, "Set deleted");

    Ok(Json(DataResponse {
        data: DeleteConfirmation {
            id,
            message: "Set deleted",
        },
    }))
}

// ---------------------------------------------------------------------------
// Membership
// ---------------------------------------------------------------------------

/// POST /api/v1/sets/{id}/tracks
///
/// Append a track to a set. Adding a track that is already present is a
/// no-op.
pub async fn add_track(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(body): AppJson<AddSetTrack>,
) -> AppResult<impl IntoResponse> {
    SetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    ensure_track_exists(&state.pool, body.track_id).await?;

    let set = SetRepo::add_track(&state.pool, id, body.track_id)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(set_id = %id, track_id = %body.track_id, "Track added to set");

    Ok(Json(DataResponse { data: set }))
}

/// DELETE /api/v1/sets/{id}/tracks/{track_id}
///
/// Remove a track from a set. Removing an absent track is a no-op.
pub async fn remove_track(
    State(state): State<AppState>,
    AppPath((id, track_id)): AppPath<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let set = SetRepo::remove_track(&state.pool, id, track_id)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(set_id = %id, track_id = %track_id, "Track removed from set");

    Ok(Json(DataResponse { data: set }))
}

/// PUT /api/v1/sets/{id}/reorder
///
/// Replace the set's track order with `trackIds`.
pub async fn reorder(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(body): AppJson<ReorderSetTracks>,
) -> AppResult<impl IntoResponse> {
    let set = SetRepo::reorder(&state.pool, id, &body.track_ids)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(set_id = %id, tracks = set.tracks.len(), "Set reordered");

    Ok(Json(DataResponse { data: set }))
}
