use axum::{extract::State, response::IntoResponse, Extension, Json};
use tweetfan_reader::summarize_timelines;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;

/// Reads every configured account and returns the aggregated summary.
///
/// Accounts that fail are listed in `failed_sources`; the rest of the
/// result is still returned with `200`.
pub(super) async fn read_timeline(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<impl IntoResponse, ApiError> {
    let screen_names = state.screen_names.as_ref().clone();

    let summary = summarize_timelines(&state.client, &state.config, screen_names)
        .await
        .map_err(|e| {
            tracing::error!(request_id = %req_id.0, error = %e, "timeline read misconfigured");
            ApiError::new(req_id.0.clone(), "internal_error", "timeline reader is misconfigured")
        })?;

    if summary.is_partial() {
        tracing::warn!(
            request_id = %req_id.0,
            failed = summary.failed_sources.len(),
            "returning partial timeline"
        );
    }

    Ok(Json(ApiResponse {
        data: summary,
        meta: ResponseMeta::new(req_id.0),
    }))
}
