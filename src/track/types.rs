use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A satellite picked by the host application.
#[derive(Debug, Clone, Deserialize, PartialEq, Serialize, ToSchema)]
pub struct SatelliteSelection {
    pub satid: u32,
    #[serde(default)]
    pub satname: String,
    #[serde(
        default,
        rename = "intDesignator",
        skip_serializing_if = "Option::is_none"
    )]
    pub int_designator: Option<String>,
    #[serde(default, rename = "launchDate", skip_serializing_if = "Option::is_none")]
    pub launch_date: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Serialize, ToSchema)]
pub struct ObserverPosition {
    pub latitude: f64,
    pub longitude: f64,
    /// Meters above sea level.
    #[serde(default)]
    pub elevation: f64,
    /// Minimum elevation angle in degrees. Not part of the position query.
    #[serde(default)]
    pub altitude: f64,
    /// Minutes of track to request.
    pub duration: u32,
}

impl ObserverPosition {
    pub fn duration_seconds(&self) -> u64 {
        u64::from(self.duration) * 60
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Serialize, ToSchema)]
pub struct PositionSample {
    pub satlatitude: f64,
    pub satlongitude: f64,
    #[serde(default)]
    pub sataltitude: f64,
    #[serde(default)]
    pub azimuth: f64,
    #[serde(default)]
    pub elevation: f64,
    #[serde(default)]
    pub ra: f64,
    #[serde(default)]
    pub dec: f64,
    /// Unix seconds.
    pub timestamp: i64,
    #[serde(default)]
    pub eclipsed: bool,
}

impl PositionSample {
    pub fn time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }

    pub fn is_plottable(&self) -> bool {
        self.satlatitude.is_finite() && self.satlongitude.is_finite()
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Serialize, ToSchema)]
pub struct SeriesInfo {
    pub satid: u32,
    #[serde(default)]
    pub satname: String,
    #[serde(default)]
    pub transactionscount: u32,
}

/// Position payload for one satellite.
#[derive(Debug, Clone, Deserialize, PartialEq, Serialize, ToSchema)]
pub struct PositionSeries {
    pub info: SeriesInfo,
    #[serde(default)]
    pub positions: Vec<PositionSample>,
}
