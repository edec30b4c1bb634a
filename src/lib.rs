//! World map with animated satellite ground-tracks.
//!
//! [`map`] draws the static world map once; [`track`] fetches satellite
//! position series and animates them on a transparent surface above it.
//! [`web`] serves both surfaces and the animator status.

pub mod config;
pub mod fetch;
pub mod map;
pub mod surface;
pub mod track;
pub mod web;

pub use config::Config;
