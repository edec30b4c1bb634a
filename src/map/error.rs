use thiserror::Error;

use crate::fetch::FetchError;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("invalid topology: {0}")]
    InvalidTopology(#[from] serde_json::Error),
    #[error("topology has no object named {0:?}")]
    MissingObject(String),
    #[error("arc index {0} out of range")]
    ArcIndex(i64),
}
