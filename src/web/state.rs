use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::map::MapRenderer;
use crate::track::TrackAnimator;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub map: Arc<RwLock<MapRenderer>>,
    pub animator: Arc<TrackAnimator>,
}
