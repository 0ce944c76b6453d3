//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Use [`DataResponse`]
//! instead of ad-hoc `serde_json::json!({ "data": ... })` for consistent
//! serialization.

use serde::Serialize;
use setlist_core::types::DbId;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: tracks }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Payload returned by delete endpoints.
#[derive(Debug, Serialize)]
pub struct DeleteConfirmation {
    pub id: DbId,
    pub message: &'static str,
}
