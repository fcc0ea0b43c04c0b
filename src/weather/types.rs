//! Forecast payload types (weatherapi.com `forecast.json` / `history.json`).
//!
//! Unknown fields are ignored. Numeric fields the API occasionally drops default
//! to zero so a partial snapshot still loads.

use serde::Deserialize;

use crate::core::{GeoCoordinate, GeoError};

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub location: Location,
    #[serde(default)]
    pub current: Option<Current>,
    #[serde(default)]
    pub forecast: Forecast,
    #[serde(default)]
    pub alerts: Option<Alerts>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Location {
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    /// Local wall-clock time, `YYYY-MM-DD H:MM`
    #[serde(default)]
    pub localtime: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Current {
    pub temp_c: f64,
    pub temp_f: f64,
    pub feelslike_c: f64,
    pub feelslike_f: f64,
    pub condition: Condition,
    pub is_day: u8,
    pub humidity: f64,
    pub wind_kph: f64,
    pub wind_mph: f64,
    pub vis_km: f64,
    pub vis_miles: f64,
    pub pressure_mb: f64,
    pub uv: f64,
    pub air_quality: Option<AirQuality>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AirQuality {
    #[serde(rename = "us-epa-index")]
    pub us_epa_index: Option<u32>,
    pub pm2_5: Option<f64>,
    pub pm10: Option<f64>,
    pub o3: Option<f64>,
    pub no2: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Forecast {
    #[serde(default)]
    pub forecastday: Vec<ForecastDay>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastDay {
    /// `YYYY-MM-DD`
    pub date: String,
    #[serde(default)]
    pub day: Day,
    #[serde(default)]
    pub astro: Option<Astro>,
    #[serde(default)]
    pub hour: Vec<Hour>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Day {
    pub maxtemp_c: f64,
    pub maxtemp_f: f64,
    pub mintemp_c: f64,
    pub mintemp_f: f64,
    pub avgtemp_c: f64,
    pub avgtemp_f: f64,
    pub maxwind_kph: f64,
    pub maxwind_mph: f64,
    pub totalprecip_mm: f64,
    pub avghumidity: f64,
    pub daily_chance_of_rain: u32,
    pub condition: Condition,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Astro {
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Hour {
    /// `YYYY-MM-DD HH:MM`
    pub time: String,
    pub temp_c: f64,
    pub temp_f: f64,
    pub feelslike_c: f64,
    pub feelslike_f: f64,
    pub chance_of_rain: u32,
    pub precip_mm: f64,
    pub wind_kph: f64,
    pub wind_mph: f64,
    pub gust_kph: Option<f64>,
    pub gust_mph: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Alerts {
    #[serde(default)]
    pub alert: Vec<Alert>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Alert {
    pub headline: Option<String>,
    pub msgtype: Option<String>,
    pub severity: Option<String>,
    pub event: Option<String>,
    pub desc: Option<String>,
}

/// Title and body of the alert banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertNotice {
    pub title: String,
    pub message: String,
    pub severity: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

impl ForecastResponse {
    pub fn geo(&self) -> Result<GeoCoordinate, GeoError> {
        GeoCoordinate::new(self.location.lat, self.location.lon)
    }

    pub fn today(&self) -> Option<&ForecastDay> {
        self.forecast.forecastday.first()
    }

    /// The first active alert, if the feed carries any.
    pub fn active_alert(&self) -> Option<AlertNotice> {
        let alert = self.alerts.as_ref()?.alert.first()?;
        let title = non_empty(&alert.headline)
            .or_else(|| non_empty(&alert.event))
            .unwrap_or("Severe Weather Alert")
            .to_string();
        let message = non_empty(&alert.desc)
            .or_else(|| non_empty(&alert.msgtype))
            .unwrap_or("Active weather alert")
            .to_string();
        Some(AlertNotice {
            title,
            message,
            severity: non_empty(&alert.severity).map(str::to_string),
        })
    }
}

impl Location {
    /// `name, region`, falling back to the country when the region is blank.
    pub fn title(&self) -> String {
        if self.region.trim().is_empty() {
            format!("{}, {}", self.name, self.country)
        } else {
            format!("{}, {}", self.name, self.region)
        }
    }
}

impl Current {
    pub fn is_day(&self) -> bool {
        self.is_day != 0
    }
}
