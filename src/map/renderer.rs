use serde::Serialize;

use super::error::MapError;
use super::graticule::Graticule;
use super::projection::Projection;
use super::topology::{LandFeature, Topology};
use crate::config::MapConfig;
use crate::fetch::Fetch;
use crate::surface::Surface;

const LAND_FILL: &str = "#B3DDEF";
const LAND_STROKE: &str = "#000";
const GRID_STROKE: &str = "#dcdcdc";
const GLOBAL_ALPHA: f64 = 0.7;
const GRID_ALPHA: f64 = 0.1;
const GRID_WIDTH: f64 = 0.1;
const OUTLINE_WIDTH: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MapState {
    /// Nothing drawn yet, or the topology could not be loaded.
    Blank,
    Drawn { features: usize },
}

/// Owns the static map surface. The map is drawn at most once.
pub struct MapRenderer {
    config: MapConfig,
    projection: Projection,
    graticule: Graticule,
    surface: Surface,
    state: MapState,
    mounted: bool,
}

impl MapRenderer {
    pub fn new(config: MapConfig) -> Self {
        let projection = Projection::kavrayskiy7(config.scale, config.width, config.height);
        let surface = Surface::new(config.width, config.height);
        Self {
            config,
            projection,
            graticule: Graticule::default(),
            surface,
            state: MapState::Blank,
            mounted: false,
        }
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn state(&self) -> MapState {
        self.state
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Marks the renderer as mounted. Returns false if it already was, in
    /// which case the caller must not fetch again.
    pub fn begin_mount(&mut self) -> bool {
        if self.mounted {
            return false;
        }
        self.mounted = true;
        true
    }

    /// Draws the loaded land, or logs the failure and leaves the map blank.
    pub fn finish_mount(&mut self, land: Result<Vec<LandFeature>, MapError>) {
        match land {
            Ok(land) => {
                self.draw(&land);
            }
            Err(e) => log::error!("Failed to load world map: {}", e),
        }
    }

    /// Fetches the world topology and draws it. Only the first call does anything.
    pub async fn mount(&mut self, fetcher: &dyn Fetch) {
        if !self.begin_mount() {
            return;
        }
        let land = load_land(fetcher, &self.config).await;
        self.finish_mount(land);
    }

    /// One fill+stroke pass per feature, then the graticule and its outline.
    /// Returns false without touching the surface if the map is already drawn.
    pub fn draw(&mut self, land: &[LandFeature]) -> bool {
        if matches!(self.state, MapState::Drawn { .. }) {
            log::debug!("World map already drawn, ignoring redraw");
            return false;
        }

        let surface = &mut self.surface;
        for feature in land {
            surface.begin_path();
            self.projection.trace_multi_polygon(surface, &feature.shape);
            surface.fill(LAND_FILL, GLOBAL_ALPHA);
            surface.stroke(LAND_STROKE, 1.0, GLOBAL_ALPHA);
        }

        surface.begin_path();
        for line in self.graticule.lines() {
            self.projection.trace_line(surface, &line);
        }
        surface.stroke(GRID_STROKE, GRID_WIDTH, GRID_ALPHA * GLOBAL_ALPHA);

        surface.begin_path();
        self.projection.trace_line(surface, &self.graticule.outline());
        surface.stroke(GRID_STROKE, OUTLINE_WIDTH, GRID_ALPHA * GLOBAL_ALPHA);

        self.state = MapState::Drawn {
            features: land.len(),
        };
        log::info!("World map drawn with {} land features", land.len());
        true
    }
}

pub async fn load_land(fetcher: &dyn Fetch, config: &MapConfig) -> Result<Vec<LandFeature>, MapError> {
    let body = fetcher.get(&config.topology_url).await?;
    let topology = Topology::from_json(&body)?;
    topology.features(&config.object)
}
