use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use super::api::track::TrackRequest;
use crate::map::MapState;
use crate::track::{AnimatorState, AnimatorStatus, ObserverPosition, SatelliteSelection};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::track::request,
        super::api::track::status,
        super::api::map::status,
        super::ui::handlers::map_surface,
        super::ui::handlers::track_surface,
    ),
    components(
        schemas(
            TrackRequest,
            SatelliteSelection,
            ObserverPosition,
            AnimatorState,
            AnimatorStatus,
            MapState,
            ErrorResponse,
        )
    ),
    info(
        title = "Sat-O-Map API",
        description = "World map with animated satellite ground-tracks",
        version = "0.1.0"
    ),
    tags(
        (name = "track", description = "Satellite track animation"),
        (name = "map", description = "World map surface"),
        (name = "surfaces", description = "Rendered SVG surfaces")
    )
)]
pub struct ApiDoc;
