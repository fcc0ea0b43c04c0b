//! Hourly window, chart series, and day summaries.

use chrono::{NaiveDate, NaiveDateTime, Timelike};

use crate::weather::types::{Day, ForecastResponse, Hour};
use crate::weather::units::{TemperatureUnit, round_display};

const API_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";
const API_DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_api_time(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), API_TIME_FORMAT).ok()
}

/// Upcoming hours starting at the location's current local hour, spilling into
/// the next day until `count` entries are collected.
pub fn next_hours(forecast: &ForecastResponse, count: usize) -> Vec<&Hour> {
    let days = &forecast.forecast.forecastday;
    let Some(today) = days.first() else {
        return Vec::new();
    };
    let current_hour = parse_api_time(&forecast.location.localtime)
        .map(|t| t.hour())
        .unwrap_or(0);

    let mut hours: Vec<&Hour> = today
        .hour
        .iter()
        .filter(|h| parse_api_time(&h.time).is_some_and(|t| t.hour() >= current_hour))
        .collect();

    if let Some(tomorrow) = days.get(1) {
        let remaining = count.saturating_sub(hours.len());
        hours.extend(
            tomorrow
                .hour
                .iter()
                .filter(|h| parse_api_time(&h.time).is_some())
                .take(remaining),
        );
    }

    hours.truncate(count);
    hours
}

/// `3PM`, `12AM`; raw text when the time does not parse.
pub fn hour_label(time: &str) -> String {
    parse_api_time(time)
        .map(|t| t.format("%-I%p").to_string())
        .unwrap_or_else(|| time.to_string())
}

/// `Today`, `Tomorrow`, then the weekday name.
pub fn day_label(index: usize, date: &str) -> String {
    match index {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => NaiveDate::parse_from_str(date.trim(), API_DATE_FORMAT)
            .map(|d| d.format("%A").to_string())
            .unwrap_or_else(|_| date.to_string()),
    }
}

/// `Wednesday, October 1, 2025`; raw text when the date does not parse.
pub fn long_date(date: &str) -> String {
    NaiveDate::parse_from_str(date.trim(), API_DATE_FORMAT)
        .map(|d| d.format("%A, %B %-d, %Y").to_string())
        .unwrap_or_else(|_| date.to_string())
}

/// Per-hour series backing the temperature, precipitation and wind charts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HourlySeries {
    pub labels: Vec<String>,
    pub temps: Vec<i64>,
    pub feels_like: Vec<i64>,
    pub precip_mm: Vec<f64>,
    pub chance_of_rain: Vec<u32>,
    pub wind: Vec<i64>,
    pub gusts: Vec<i64>,
    pub wind_label: &'static str,
}

impl HourlySeries {
    pub fn from_hours(hours: &[&Hour], unit: TemperatureUnit) -> Self {
        let mut series = HourlySeries {
            wind_label: unit.speed_label(),
            ..HourlySeries::default()
        };
        for hour in hours {
            series.labels.push(hour_label(&hour.time));
            series.temps.push(round_display(unit.hour_temp(hour)));
            series
                .feels_like
                .push(round_display(unit.hour_feels_like(hour)));
            series.precip_mm.push(hour.precip_mm);
            series.chance_of_rain.push(hour.chance_of_rain);
            series.wind.push(round_display(unit.hour_wind(hour)));
            series.gusts.push(round_display(unit.hour_gust(hour)));
        }
        series
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Coldest and warmest feels-like reading.
    pub fn feels_like_range(&self) -> Option<(i64, i64)> {
        let min = self.feels_like.iter().copied().min()?;
        let max = self.feels_like.iter().copied().max()?;
        Some((min, max))
    }

    pub fn total_precip_mm(&self) -> f64 {
        self.precip_mm.iter().sum()
    }

    pub fn max_gust(&self) -> Option<i64> {
        self.gusts.iter().copied().max()
    }
}

/// A day reduced to what the daily and historical cards show.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySummary {
    pub high: i64,
    pub low: i64,
    pub avg: i64,
    pub condition: String,
    pub precip_mm: f64,
    pub chance_of_rain: u32,
    pub max_wind: f64,
    pub wind_label: &'static str,
    pub humidity: f64,
}

impl DaySummary {
    pub fn from_day(day: &Day, unit: TemperatureUnit) -> Self {
        let condition = if day.condition.text.trim().is_empty() {
            "N/A".to_string()
        } else {
            day.condition.text.clone()
        };
        DaySummary {
            high: round_display(unit.day_high(day)),
            low: round_display(unit.day_low(day)),
            avg: round_display(unit.day_avg(day)),
            condition,
            precip_mm: day.totalprecip_mm,
            chance_of_rain: day.daily_chance_of_rain,
            max_wind: unit.day_max_wind(day),
            wind_label: unit.speed_label(),
            humidity: day.avghumidity,
        }
    }

    /// `H: 14° L: 8°`
    pub fn high_low(&self) -> String {
        format!("H: {}° L: {}°", self.high, self.low)
    }
}
