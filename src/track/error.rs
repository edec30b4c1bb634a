use thiserror::Error;

use crate::fetch::FetchError;

#[derive(Debug, Error)]
pub enum TrackError {
    #[error("animation in progress")]
    AnimationInProgress,
    #[error("no satellites selected")]
    EmptySelection,
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("satellite {satid}: API error: {message}")]
    Api { satid: u32, message: String },
    #[error("satellite {satid}: invalid position payload: {message}")]
    InvalidPayload { satid: u32, message: String },
}
