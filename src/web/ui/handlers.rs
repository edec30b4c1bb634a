use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};

use crate::track::AnimatorState;
use crate::web::state::AppState;

use super::templates::WidgetTemplate;

const SVG_HEADERS: [(header::HeaderName, &str); 2] = [
    (header::CONTENT_TYPE, "image/svg+xml"),
    (header::CACHE_CONTROL, "no-store"),
];

pub async fn widget(State(state): State<AppState>) -> impl IntoResponse {
    let status = state.animator.status();
    WidgetTemplate {
        width: state.config.map.width,
        height: state.config.map.height,
        loading: matches!(status.state, AnimatorState::Loading { .. }),
        hint: status.hint.unwrap_or_default(),
    }
}

#[utoipa::path(
    get,
    path = "/map.svg",
    responses(
        (status = 200, description = "Static world map surface", content_type = "image/svg+xml", body = String)
    ),
    tag = "surfaces"
)]
pub async fn map_surface(State(state): State<AppState>) -> impl IntoResponse {
    let svg = state.map.read().await.surface().to_svg();
    (SVG_HEADERS, svg)
}

#[utoipa::path(
    get,
    path = "/track.svg",
    responses(
        (status = 200, description = "Transparent track surface", content_type = "image/svg+xml", body = String)
    ),
    tag = "surfaces"
)]
pub async fn track_surface(State(state): State<AppState>) -> impl IntoResponse {
    (SVG_HEADERS, state.animator.track_svg())
}
