use axum::{routing::get, routing::post, Router};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::fetch::{Fetch, HttpFetcher};
use crate::map::{load_land, MapRenderer};
use crate::track::TrackAnimator;

use super::api::map as map_handlers;
use super::api::track as track_handlers;
use super::api_doc::ApiDoc;
use super::state::AppState;
use super::ui::handlers as ui_handlers;

/// Builds the widget state and starts the one-time world map load in the background.
pub fn mount(config: Config, fetcher: Arc<dyn Fetch>) -> AppState {
    let renderer = MapRenderer::new(config.map.clone());
    let animator = TrackAnimator::new(
        config.satellites.clone(),
        renderer.projection(),
        config.map.width,
        config.map.height,
        fetcher.clone(),
    );
    let map = Arc::new(RwLock::new(renderer));

    {
        let map = map.clone();
        let map_config = config.map.clone();
        tokio::spawn(async move {
            if !map.write().await.begin_mount() {
                return;
            }
            let land = load_land(fetcher.as_ref(), &map_config).await;
            map.write().await.finish_mount(land);
        });
    }

    AppState {
        config: Arc::new(config),
        map,
        animator: Arc::new(animator),
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // UI routes
        .route("/", get(ui_handlers::widget))
        .route("/map.svg", get(ui_handlers::map_surface))
        .route("/track.svg", get(ui_handlers::track_surface))
        // Track API endpoints
        .route("/api/track", post(track_handlers::request))
        .route("/api/track/status", get(track_handlers::status))
        // Map API endpoints
        .route("/api/map/status", get(map_handlers::status))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let bind_addr = config.web.bind.clone();
    if config.satellites.api_key.is_empty() {
        log::warn!("No satellite API key configured, position requests will be rejected upstream");
    }

    let fetcher = HttpFetcher::new(config.http.timeout).map_err(std::io::Error::other)?;
    let state = mount(config, Arc::new(fetcher));
    let app = router(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await
}
