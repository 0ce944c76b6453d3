//! Query parameter types for API handlers.

use serde::Deserialize;
use setlist_core::filter::TrackFilter;

/// Query parameters for `GET /tracks`
/// (`?search=&bpmMin=&bpmMax=&key=&genre=`).
///
/// Empty values are treated as absent by [`TrackFilter::build`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackListParams {
    pub search: Option<String>,
    pub bpm_min: Option<f64>,
    pub bpm_max: Option<f64>,
    pub key: Option<String>,
    pub genre: Option<String>,
}

impl From<TrackListParams> for TrackFilter {
    fn from(params: TrackListParams) -> Self {
        TrackFilter {
            search: params.search,
            bpm_min: params.bpm_min,
            bpm_max: params.bpm_max,
            key: params.key,
            genre: params.genre,
        }
    }
}
