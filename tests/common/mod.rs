#![allow(dead_code)]

use async_trait::async_trait;
use sat_o_map::config::{Config, MapConfig, SatelliteConfig};
use sat_o_map::fetch::{Fetch, FetchError};
use serde_json::json;
use std::sync::Mutex;
use std::time::Duration;

pub const TOPOLOGY_URL: &str = "http://fixtures.local/world.json";
pub const POSITIONS_BASE: &str = "http://fixtures.local/rest/v1/satellite";
pub const TWO_COUNTRIES: &str = include_str!("../fixtures/two_countries.json");

/// Serves the map fixture and synthetic position series, recording every URL.
pub struct RecordingFetcher {
    urls: Mutex<Vec<String>>,
    positions: usize,
    fail_satid: Option<u32>,
    map_available: bool,
}

impl RecordingFetcher {
    pub fn new(positions: usize) -> Self {
        Self {
            urls: Mutex::new(Vec::new()),
            positions,
            fail_satid: None,
            map_available: true,
        }
    }

    pub fn failing_on(mut self, satid: u32) -> Self {
        self.fail_satid = Some(satid);
        self
    }

    pub fn without_map(mut self) -> Self {
        self.map_available = false;
        self
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }

    pub fn position_urls(&self) -> Vec<String> {
        self.urls()
            .into_iter()
            .filter(|u| u.contains("/positions/"))
            .collect()
    }
}

fn satid_of(url: &str) -> Option<u32> {
    url.split("/positions/").nth(1)?.split('/').next()?.parse().ok()
}

#[async_trait]
impl Fetch for RecordingFetcher {
    async fn get(&self, url: &str) -> Result<String, FetchError> {
        self.urls.lock().unwrap().push(url.to_string());

        if url == TOPOLOGY_URL {
            if !self.map_available {
                return Err(FetchError::Request {
                    url: url.to_string(),
                    message: "connection refused".into(),
                });
            }
            return Ok(TWO_COUNTRIES.to_string());
        }

        let Some(satid) = satid_of(url) else {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            });
        };
        if self.fail_satid == Some(satid) {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: 503,
            });
        }

        let positions: Vec<_> = (0..self.positions)
            .map(|i| {
                json!({
                    "satlatitude": sample_latitude(i),
                    "satlongitude": sample_longitude(i),
                    "sataltitude": 420.0,
                    "azimuth": 0.0,
                    "elevation": -10.0,
                    "ra": 0.0,
                    "dec": 0.0,
                    "timestamp": 1_700_000_000 + i as i64,
                    "eclipsed": false
                })
            })
            .collect();
        Ok(json!({
            "info": {"satname": format!("SAT-{}", satid), "satid": satid, "transactionscount": 0},
            "positions": positions
        })
        .to_string())
    }
}

/// Synthetic ground-track position of sample `i`, within range up to 600 samples.
pub fn sample_latitude(i: usize) -> f64 {
    -30.0 + 0.1 * i as f64
}

pub fn sample_longitude(i: usize) -> f64 {
    -170.0 + 0.5 * i as f64
}

pub fn test_config(frame_interval: Duration, samples_per_frame: usize) -> Config {
    Config {
        map: MapConfig {
            topology_url: TOPOLOGY_URL.to_string(),
            ..MapConfig::default()
        },
        satellites: SatelliteConfig {
            base_url: POSITIONS_BASE.to_string(),
            api_key: "TESTKEY".to_string(),
            frame_interval,
            samples_per_frame,
            clear_between_cycles: false,
        },
        ..Config::default()
    }
}
