//! Weather data (weatherapi.com forecast snapshots + display helpers).

use bevy::prelude::*;

pub mod air_quality;
pub mod condition;
pub mod snapshot;
pub mod timeline;
pub mod types;
pub mod units;

pub use air_quality::AqiCategory;
pub use condition::ConditionKind;
pub use types::ForecastResponse;
pub use units::TemperatureUnit;

use crate::config::GlobeConfig;
use snapshot::load_snapshot;

/// The loaded forecast, if any.
#[derive(Resource, Debug, Default)]
pub struct ForecastData {
    pub forecast: Option<ForecastResponse>,
}

/// Unit the HUD currently shows.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayUnit(pub TemperatureUnit);

pub struct WeatherPlugin;

impl Plugin for WeatherPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ForecastData>()
            .init_resource::<DisplayUnit>()
            .add_systems(Startup, (init_display_unit, load_forecast_snapshot));
    }
}

fn init_display_unit(config: Res<GlobeConfig>, mut unit: ResMut<DisplayUnit>) {
    unit.0 = config.unit;
}

fn load_forecast_snapshot(config: Res<GlobeConfig>, mut data: ResMut<ForecastData>) {
    let Some(path) = config.forecast_snapshot.clone() else {
        info!("No forecast snapshot configured");
        return;
    };

    match load_snapshot(&path) {
        Ok(forecast) => {
            info!(
                "Loaded forecast for {} ({} days) from {}",
                forecast.location.title(),
                forecast.forecast.forecastday.len(),
                path.display()
            );
            data.forecast = Some(forecast);
        }
        Err(err) => {
            error!("Failed to load forecast snapshot: {err:#}");
        }
    }
}
