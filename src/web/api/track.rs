use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::track::{AnimatorStatus, ObserverPosition, SatelliteSelection};
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::state::AppState;

/// Host application inputs. Every accepted request counts as a change of
/// selection and starts a new cycle.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TrackRequest {
    #[serde(rename = "satData")]
    pub sat_data: Vec<SatelliteSelection>,
    #[serde(rename = "observerData")]
    pub observer_data: ObserverPosition,
}

#[utoipa::path(
    post,
    path = "/api/track",
    request_body = TrackRequest,
    responses(
        (status = 202, description = "Positions are being fetched", body = AnimatorStatus),
        (status = 400, description = "Empty selection", body = ErrorResponse),
        (status = 409, description = "An animation is still running", body = ErrorResponse)
    ),
    tag = "track"
)]
pub async fn request(
    State(state): State<AppState>,
    Json(request): Json<TrackRequest>,
) -> ApiResult<(StatusCode, Json<AnimatorStatus>)> {
    state
        .animator
        .request(request.sat_data, request.observer_data)?;
    Ok((StatusCode::ACCEPTED, Json(state.animator.status())))
}

#[utoipa::path(
    get,
    path = "/api/track/status",
    responses(
        (status = 200, description = "Animator state and hint text", body = AnimatorStatus)
    ),
    tag = "track"
)]
pub async fn status(State(state): State<AppState>) -> Json<AnimatorStatus> {
    Json(state.animator.status())
}
