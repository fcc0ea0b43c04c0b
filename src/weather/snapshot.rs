//! Forecast snapshots read from disk.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::weather::types::ForecastResponse;

pub fn parse_forecast(json: &str) -> Result<ForecastResponse> {
    serde_json::from_str(json).context("forecast snapshot: invalid payload")
}

pub fn load_snapshot(path: &Path) -> Result<ForecastResponse> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("forecast snapshot: failed to read {}", path.display()))?;
    let forecast = parse_forecast(&contents)
        .with_context(|| format!("forecast snapshot: {}", path.display()))?;
    forecast
        .geo()
        .with_context(|| format!("forecast snapshot: bad location in {}", path.display()))?;
    Ok(forecast)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::air_quality::{AqiCategory, AqiReading};
    use crate::weather::timeline::{DaySummary, next_hours};
    use crate::weather::units::TemperatureUnit;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    const SAMPLE: &str = include_str!("../../assets/forecast_sample.json");

    const HISTORY: &str = r#"{
        "location": { "name": "Paris", "region": "Ile-de-France", "country": "France",
                      "lat": 48.87, "lon": 2.33, "localtime": "2025-10-21 14:05" },
        "forecast": { "forecastday": [ {
            "date": "2025-10-01",
            "day": { "maxtemp_c": 18.3, "mintemp_c": 9.8, "avgtemp_c": 13.9,
                     "maxwind_kph": 17.6, "totalprecip_mm": 0.0,
                     "condition": { "text": "Sunny" } },
            "hour": []
        } ] }
    }"#;

    fn unique_temp_file(test_name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        std::env::temp_dir().join(format!(
            "weatherglobe-snapshot-{}-{}-{}.json",
            test_name,
            std::process::id(),
            nanos
        ))
    }

    #[test]
    fn test_parse_sample_forecast() {
        let forecast = parse_forecast(SAMPLE).unwrap();
        assert_eq!(forecast.location.name, "London");
        assert_eq!(forecast.location.title(), "London, City of London, Greater London");
        assert_eq!(forecast.forecast.forecastday.len(), 3);

        let geo = forecast.geo().unwrap();
        assert_eq!(geo.lat, 51.52);
        assert_eq!(geo.lon, -0.11);

        let current = forecast.current.as_ref().unwrap();
        assert!(current.is_day());
        assert_eq!(current.humidity, 72.0);
        let aq = current.air_quality.as_ref().unwrap();
        assert_eq!(aq.us_epa_index, Some(2));
        assert_eq!(
            AqiReading::from_air_quality(aq).category,
            AqiCategory::Moderate
        );
    }

    #[test]
    fn test_sample_alert_and_window() {
        let forecast = parse_forecast(SAMPLE).unwrap();
        let alert = forecast.active_alert().unwrap();
        assert_eq!(alert.title, "Yellow warning for wind");
        assert_eq!(alert.severity.as_deref(), Some("Moderate"));
        assert!(alert.message.starts_with("Strong south-westerly"));

        let hours = next_hours(&forecast, 24);
        assert_eq!(hours.len(), 24);
        assert_eq!(hours[0].time, "2025-10-21 14:00");
        assert_eq!(hours[23].time, "2025-10-22 13:00");
    }

    #[test]
    fn test_parse_history_without_current() {
        let forecast = parse_forecast(HISTORY).unwrap();
        assert!(forecast.current.is_none());
        assert!(forecast.active_alert().is_none());

        let day = &forecast.today().unwrap().day;
        let summary = DaySummary::from_day(day, TemperatureUnit::Celsius);
        assert_eq!(summary.high, 18);
        assert_eq!(summary.low, 10);
        assert_eq!(summary.avg, 14);
        assert_eq!(summary.condition, "Sunny");
        // Imperial fields are absent; the metric readings are converted
        let imperial = DaySummary::from_day(day, TemperatureUnit::Fahrenheit);
        assert_eq!(imperial.high, 65);
        assert_eq!(imperial.low, 50);
        assert_eq!(imperial.wind_label, "mph");
    }

    #[test]
    fn test_alert_fallback_text() {
        let json = r#"{
            "location": { "name": "X", "lat": 0.0, "lon": 0.0 },
            "alerts": { "alert": [ { "headline": "  ", "msgtype": "Update" } ] }
        }"#;
        let alert = parse_forecast(json).unwrap().active_alert().unwrap();
        assert_eq!(alert.title, "Severe Weather Alert");
        assert_eq!(alert.message, "Update");
        assert_eq!(alert.severity, None);

        let json = r#"{
            "location": { "name": "X", "lat": 0.0, "lon": 0.0 },
            "alerts": { "alert": [ { "event": "Flood Warning", "severity": " " } ] }
        }"#;
        let alert = parse_forecast(json).unwrap().active_alert().unwrap();
        assert_eq!(alert.title, "Flood Warning");
        assert_eq!(alert.severity, None);

        let json = r#"{
            "location": { "name": "X", "lat": 0.0, "lon": 0.0 },
            "alerts": { "alert": [ {} ] }
        }"#;
        let alert = parse_forecast(json).unwrap().active_alert().unwrap();
        assert_eq!(alert.message, "Active weather alert");
    }

    #[test]
    fn test_empty_alert_list() {
        let json = r#"{
            "location": { "name": "X", "lat": 0.0, "lon": 0.0 },
            "alerts": { "alert": [] }
        }"#;
        assert!(parse_forecast(json).unwrap().active_alert().is_none());
    }

    #[test]
    fn test_invalid_payload() {
        let err = parse_forecast("{\"current\": {}}").unwrap_err();
        assert!(format!("{err:#}").contains("forecast snapshot"));
    }

    #[test]
    fn test_load_snapshot_from_disk() {
        let path = unique_temp_file("load");
        fs::write(&path, SAMPLE).unwrap();
        let forecast = load_snapshot(&path).unwrap();
        assert_eq!(forecast.location.country, "United Kingdom");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_snapshot_rejects_bad_location() {
        let path = unique_temp_file("badloc");
        fs::write(&path, r#"{ "location": { "name": "X", "lat": 95.0, "lon": 0.0 } }"#).unwrap();
        let err = load_snapshot(&path).unwrap_err();
        assert!(format!("{err:#}").contains("bad location"));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_snapshot_missing_file() {
        let path = unique_temp_file("missing");
        let err = load_snapshot(&path).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read"));
    }
}
