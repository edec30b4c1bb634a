use futures::future::try_join_all;

use super::error::TrackError;
use super::types::{ObserverPosition, PositionSeries, SatelliteSelection};
use crate::config::SatelliteConfig;
use crate::fetch::Fetch;

/// `{base}/positions/{satid}/{lat}/{lng}/{elevation}/{seconds}/&apiKey={key}`
pub fn position_url(config: &SatelliteConfig, satid: u32, observer: &ObserverPosition) -> String {
    format!(
        "{}/positions/{}/{}/{}/{}/{}/&apiKey={}",
        config.base_url.trim_end_matches('/'),
        satid,
        observer.latitude,
        observer.longitude,
        observer.elevation,
        observer.duration_seconds(),
        config.api_key,
    )
}

/// The API reports failures such as a bad key as `{"error": "..."}` with a
/// success status, so the body is checked before it is decoded.
pub fn parse_series(satid: u32, body: &str) -> Result<PositionSeries, TrackError> {
    let invalid = |message: String| TrackError::InvalidPayload { satid, message };

    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| invalid(e.to_string()))?;
    if let Some(error) = value.get("error") {
        return Err(TrackError::Api {
            satid,
            message: error.as_str().map(String::from).unwrap_or_else(|| error.to_string()),
        });
    }
    serde_json::from_value(value).map_err(|e| invalid(e.to_string()))
}

pub async fn fetch_series(
    fetcher: &dyn Fetch,
    config: &SatelliteConfig,
    satellite: &SatelliteSelection,
    observer: &ObserverPosition,
) -> Result<PositionSeries, TrackError> {
    let url = position_url(config, satellite.satid, observer);
    let body = fetcher.get(&url).await?;
    let series = parse_series(satellite.satid, &body)?;
    log::debug!(
        "Fetched {} positions for {} ({})",
        series.positions.len(),
        satellite.satname,
        satellite.satid
    );
    Ok(series)
}

/// Fetches every satellite concurrently. All or nothing: the first failure
/// fails the batch and the other results are dropped.
pub async fn fetch_batch(
    fetcher: &dyn Fetch,
    config: &SatelliteConfig,
    satellites: &[SatelliteSelection],
    observer: &ObserverPosition,
) -> Result<Vec<PositionSeries>, TrackError> {
    try_join_all(
        satellites
            .iter()
            .map(|satellite| fetch_series(fetcher, config, satellite, observer)),
    )
    .await
}
