//! Viewer configuration
//!
//! Defaults describe a radius 2 scene with a 2 s click ring. An
//! optional `globe.json` in the platform config directory overrides any subset
//! of fields:
//! - macOS: ~/Library/Application Support/weatherglobe/globe.json
//! - Linux: ~/.config/weatherglobe/globe.json
//! - Windows: %APPDATA%\weatherglobe\config\globe.json

use anyhow::{Context, Result, anyhow, ensure};
use bevy::prelude::*;
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::GeoCoordinate;
use crate::weather::TemperatureUnit;

pub const CONFIG_FILE: &str = "globe.json";

/// Where the location marker starts before a forecast or pick moves it (London).
pub const DEFAULT_LOCATION: GeoCoordinate = GeoCoordinate {
    lat: 51.5074,
    lon: -0.1278,
};

#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    pub globe_radius: f32,
    pub click_marker_radius: f32,
    pub location_marker_radius: f32,
    /// Radians per second
    pub auto_rotate_speed: f32,
    /// Radians per pixel of horizontal drag
    pub drag_sensitivity: f32,
    pub click_max_duration_ms: u64,
    pub click_max_distance_px: f32,
    pub click_marker_lifetime_secs: f32,
    pub texture: String,
    pub forecast_snapshot: Option<PathBuf>,
    pub default_location: GeoCoordinate,
    pub unit: TemperatureUnit,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            globe_radius: 2.0,
            click_marker_radius: 2.05,
            location_marker_radius: 2.08,
            // 0.002 rad per frame at 60 fps
            auto_rotate_speed: 0.12,
            drag_sensitivity: 0.01,
            click_max_duration_ms: 200,
            click_max_distance_px: 5.0,
            click_marker_lifetime_secs: 2.0,
            texture: "earth_atmos_2048.jpg".to_string(),
            forecast_snapshot: None,
            default_location: DEFAULT_LOCATION,
            unit: TemperatureUnit::Celsius,
        }
    }
}

impl GlobeConfig {
    /// Load from the platform config directory, falling back to defaults when
    /// no file exists.
    pub fn load() -> Result<Self> {
        let proj_dirs = ProjectDirs::from("", "", "weatherglobe")
            .ok_or_else(|| anyhow!("Failed to resolve config directory"))?;
        Self::load_from(&proj_dirs.config_dir().join(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("config: failed to read {}", path.display()))?;
        let config: GlobeConfig = serde_json::from_str(&contents)
            .with_context(|| format!("config: failed to parse {}", path.display()))?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.globe_radius.is_finite() && self.globe_radius > 0.0,
            "config: globe_radius must be positive, got {}",
            self.globe_radius
        );
        ensure!(
            self.click_marker_radius >= self.globe_radius,
            "config: click_marker_radius {} is inside the globe",
            self.click_marker_radius
        );
        ensure!(
            self.location_marker_radius >= self.globe_radius,
            "config: location_marker_radius {} is inside the globe",
            self.location_marker_radius
        );
        ensure!(
            self.click_marker_lifetime_secs > 0.0,
            "config: click_marker_lifetime_secs must be positive"
        );
        self.default_location
            .validate()
            .context("config: default_location")?;
        Ok(())
    }

    pub fn click_max_duration(&self) -> Duration {
        Duration::from_millis(self.click_max_duration_ms)
    }
}

/// Resolve the config for this run. A bad file is reported and replaced by
/// defaults; `snapshot_arg` (first CLI argument) wins over the file.
pub fn resolve_config(snapshot_arg: Option<PathBuf>) -> GlobeConfig {
    let mut config = match GlobeConfig::load() {
        Ok(config) => config,
        Err(err) => {
            warn!("Using default configuration: {err:#}");
            GlobeConfig::default()
        }
    };

    if let Some(path) = snapshot_arg {
        config.forecast_snapshot = Some(path);
    }

    config
}
