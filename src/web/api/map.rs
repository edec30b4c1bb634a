use axum::{extract::State, Json};

use crate::map::MapState;
use crate::web::state::AppState;

#[utoipa::path(
    get,
    path = "/api/map/status",
    responses(
        (status = 200, description = "Whether the world map has been drawn", body = MapState)
    ),
    tag = "map"
)]
pub async fn status(State(state): State<AppState>) -> Json<MapState> {
    Json(state.map.read().await.state())
}
