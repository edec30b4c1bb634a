use serde::Serialize;
use std::sync::{Arc, Mutex as StdMutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::client::fetch_batch;
use super::error::TrackError;
use super::frame::TrackSurface;
use super::palette::Palette;
use super::types::{ObserverPosition, PositionSeries, SatelliteSelection};
use crate::config::SatelliteConfig;
use crate::fetch::Fetch;
use crate::map::Projection;
use crate::surface::Surface;

pub const WAIT_HINT: &str =
    "Please wait for these satellite animation to finish before selection new ones!";

const MIN_FRAME_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AnimatorState {
    Idle,
    Loading { satellites: usize },
    /// `frame` is the next sample index to draw, `total` the longest series length.
    Drawing { frame: usize, total: usize },
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct AnimatorStatus {
    pub state: AnimatorState,
    pub hint: Option<String>,
    pub cycle: Option<Uuid>,
    pub frames_drawn: usize,
}

struct Shared {
    state: AnimatorState,
    hint: Option<String>,
    cycle: Option<Uuid>,
    palette: Palette,
    surface: TrackSurface,
}

/// Fetches position series for a satellite selection and animates them onto
/// the track surface. One cycle at a time; requests made while a cycle is in
/// flight are refused.
pub struct TrackAnimator {
    config: SatelliteConfig,
    projection: Projection,
    fetcher: Arc<dyn Fetch>,
    shared: Arc<StdMutex<Shared>>,
}

impl TrackAnimator {
    pub fn new(
        config: SatelliteConfig,
        projection: Projection,
        width: u32,
        height: u32,
        fetcher: Arc<dyn Fetch>,
    ) -> Self {
        Self {
            config,
            projection,
            fetcher,
            shared: Arc::new(StdMutex::new(Shared {
                state: AnimatorState::Idle,
                hint: None,
                cycle: None,
                palette: Palette::default(),
                surface: TrackSurface::new(width, height),
            })),
        }
    }

    pub fn status(&self) -> AnimatorStatus {
        let locked = lock(&self.shared);
        AnimatorStatus {
            state: locked.state.clone(),
            hint: locked.hint.clone(),
            cycle: locked.cycle,
            frames_drawn: locked.surface.frames_drawn(),
        }
    }

    pub fn track_svg(&self) -> String {
        lock(&self.shared).surface.to_svg()
    }

    /// Composes the track layers over another surface, usually the map.
    pub fn render_over(&self, base: &Surface) -> String {
        let locked = lock(&self.shared);
        Surface::compose(&[base, locked.surface.trails(), locked.surface.overlay()]).to_string()
    }

    /// Color already given to a satellite, if it has been drawn.
    pub fn color_of(&self, satid: u32) -> Option<&'static str> {
        lock(&self.shared).palette.assigned(satid)
    }

    /// Starts a fetch-and-animate cycle. While another cycle is loading or
    /// drawing, nothing is fetched: the hint is set and the request refused.
    pub fn request(
        &self,
        satellites: Vec<SatelliteSelection>,
        observer: ObserverPosition,
    ) -> Result<JoinHandle<()>, TrackError> {
        if satellites.is_empty() {
            return Err(TrackError::EmptySelection);
        }

        let cycle = Uuid::new_v4();
        {
            let mut locked = lock(&self.shared);
            if locked.state != AnimatorState::Idle {
                log::warn!("Refusing track request, cycle {:?} still running", locked.cycle);
                locked.hint = Some(WAIT_HINT.to_string());
                return Err(TrackError::AnimationInProgress);
            }
            locked.state = AnimatorState::Loading {
                satellites: satellites.len(),
            };
            locked.hint = None;
            locked.cycle = Some(cycle);
        }

        log::info!(
            "Cycle {}: fetching {} minutes of positions for {} satellites",
            cycle,
            observer.duration,
            satellites.len()
        );

        let cycle = Cycle {
            id: cycle,
            shared: self.shared.clone(),
            fetcher: self.fetcher.clone(),
            config: self.config.clone(),
            projection: self.projection,
        };
        Ok(tokio::spawn(cycle.run(satellites, observer)))
    }
}

struct Cycle {
    id: Uuid,
    shared: Arc<StdMutex<Shared>>,
    fetcher: Arc<dyn Fetch>,
    config: SatelliteConfig,
    projection: Projection,
}

impl Cycle {
    async fn run(self, satellites: Vec<SatelliteSelection>, observer: ObserverPosition) {
        let series =
            match fetch_batch(self.fetcher.as_ref(), &self.config, &satellites, &observer).await {
                Ok(series) => series,
                Err(e) => {
                    log::error!("Cycle {}: failed to fetch satellite positions: {}", self.id, e);
                    lock(&self.shared).state = AnimatorState::Idle;
                    return;
                }
            };

        self.animate(&series).await;
        log::info!("Cycle {}: animation finished", self.id);
    }

    async fn animate(&self, series: &[PositionSeries]) {
        let total = series.iter().map(|s| s.positions.len()).max().unwrap_or(0);
        let stride = self.config.samples_per_frame.max(1);
        {
            let mut locked = lock(&self.shared);
            if self.config.clear_between_cycles {
                locked.surface.clear();
            }
            locked.state = AnimatorState::Drawing { frame: 0, total };
        }

        let mut ticker = tokio::time::interval(self.config.frame_interval.max(MIN_FRAME_INTERVAL));
        let mut previous = None;
        let mut next = (total > 0).then_some(0);
        while let Some(frame) = next {
            ticker.tick().await;
            next = next_frame(frame, stride, total);
            let mut locked = lock(&self.shared);
            let Shared {
                surface,
                palette,
                state,
                ..
            } = &mut *locked;
            surface.draw_frame(&self.projection, palette, series, previous, frame);
            previous = Some(frame);
            *state = AnimatorState::Drawing {
                frame: next.unwrap_or(total),
                total,
            };
        }

        let mut locked = lock(&self.shared);
        locked.state = AnimatorState::Idle;
        locked.hint = None;
    }
}

/// Frames advance by `stride`; the last sample always gets a frame of its own.
fn next_frame(frame: usize, stride: usize, total: usize) -> Option<usize> {
    let last = total.checked_sub(1)?;
    if frame >= last {
        None
    } else {
        Some((frame + stride).min(last))
    }
}

fn lock(shared: &StdMutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}
