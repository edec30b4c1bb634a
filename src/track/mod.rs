mod animator;
mod client;
mod error;
mod frame;
mod palette;
mod types;

pub use animator::{AnimatorState, AnimatorStatus, TrackAnimator, WAIT_HINT};
pub use client::{fetch_batch, fetch_series, parse_series, position_url};
pub use error::TrackError;
pub use frame::TrackSurface;
pub use palette::{Palette, CATEGORY10};
pub use types::{ObserverPosition, PositionSample, PositionSeries, SatelliteSelection, SeriesInfo};
