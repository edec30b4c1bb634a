use serde::{Deserialize, Deserializer};
use std::time::Duration;
use thiserror::Error;

use crate::track::ObserverPosition;

pub const API_KEY_ENV: &str = "N2YO_API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub satellites: SatelliteConfig,
    #[serde(default)]
    pub http: HttpConfig,
    /// Observer used by the headless `track` command.
    #[serde(default)]
    pub observer: Option<ObserverPosition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_topology_url")]
    pub topology_url: String,
    /// Name of the topology object holding the land shapes.
    #[serde(default = "default_object")]
    pub object: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_scale")]
    pub scale: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            topology_url: default_topology_url(),
            object: default_object(),
            width: default_width(),
            height: default_height(),
            scale: default_scale(),
        }
    }
}

fn default_topology_url() -> String {
    "https://unpkg.com/world-atlas@1/world/110m.json".to_string()
}

fn default_object() -> String {
    "countries".to_string()
}

fn default_width() -> u32 {
    960
}

fn default_height() -> u32 {
    600
}

fn default_scale() -> f64 {
    170.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct SatelliteConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(
        default = "default_frame_interval",
        deserialize_with = "deserialize_duration"
    )]
    pub frame_interval: Duration,
    /// Position samples the shared frame index advances by on each tick.
    #[serde(default = "default_samples_per_frame")]
    pub samples_per_frame: usize,
    #[serde(default)]
    pub clear_between_cycles: bool,
}

impl Default for SatelliteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            frame_interval: default_frame_interval(),
            samples_per_frame: default_samples_per_frame(),
            clear_between_cycles: false,
        }
    }
}

fn default_base_url() -> String {
    "https://api.n2yo.com/rest/v1/satellite".to_string()
}

fn default_frame_interval() -> Duration {
    Duration::from_secs(1)
}

fn default_samples_per_frame() -> usize {
    60
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout", deserialize_with = "deserialize_duration")]
    pub timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
        }
    }
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom)
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&content)?;
        config.apply_env();
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// The API key from the environment wins over the one in the file.
    pub fn apply_env(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                self.satellites.api_key = key;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::from_yaml("").unwrap();
        assert_eq!(config.web.bind, "0.0.0.0:8080");
        assert_eq!(config.map.width, 960);
        assert_eq!(config.map.height, 600);
        assert_eq!(config.map.object, "countries");
        assert_eq!(config.satellites.samples_per_frame, 60);
        assert_eq!(config.satellites.frame_interval, Duration::from_secs(1));
        assert!(!config.satellites.clear_between_cycles);
        assert!(config.observer.is_none());
    }

    #[test]
    fn parses_sections() {
        let yaml = r#"
web:
  bind: 127.0.0.1:9000
satellites:
  api_key: secret
  frame_interval: 250ms
  samples_per_frame: 30
http:
  timeout: 5s
observer:
  latitude: 37.7
  longitude: -122.4
  elevation: 10
  altitude: 90
  duration: 10
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.web.bind, "127.0.0.1:9000");
        assert_eq!(config.satellites.api_key, "secret");
        assert_eq!(config.satellites.frame_interval, Duration::from_millis(250));
        assert_eq!(config.satellites.samples_per_frame, 30);
        assert_eq!(config.http.timeout, Duration::from_secs(5));
        let observer = config.observer.unwrap();
        assert_eq!(observer.duration, 10);
        assert_eq!(config.map.scale, 170.0);
    }

    #[test]
    fn bad_duration_is_rejected() {
        let yaml = "satellites:\n  frame_interval: soon\n";
        assert!(matches!(Config::from_yaml(yaml), Err(ConfigError::Yaml(_))));
    }
}
