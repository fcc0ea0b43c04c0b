//! Text overlay with the current forecast for the selected location.

use bevy::prelude::*;

use crate::globe::{SelectedLocation, SelectionSource};
use crate::weather::air_quality::{AqiReading, format_pollutant};
use crate::weather::timeline::{DaySummary, HourlySeries, day_label, long_date, next_hours};
use crate::weather::types::{AirQuality, Current, ForecastDay, ForecastResponse};
use crate::weather::units::round_display;
use crate::weather::{AqiCategory, ConditionKind, DisplayUnit, ForecastData, TemperatureUnit};

const HUD_FONT_SIZE: f32 = 15.0;
const TITLE_FONT_SIZE: f32 = 22.0;
const HOURS_SHOWN: usize = 6;
const TREND_HOURS: usize = 24;
const AQI_BAR_CELLS: usize = 6;
const ALERT_COLOR: Color = Color::srgb(1.0, 0.45, 0.35);
const DIM_COLOR: Color = Color::srgb(0.65, 0.68, 0.72);

const HELP_TEXT: &str =
    "Left-drag: spin | Click: pick | Right-drag: orbit | Scroll: zoom | Space: auto-rotate | C/F/U: units";

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudLine {
    Title,
    Coordinates,
    Conditions,
    History,
    Details,
    AirQuality,
    Alert,
    Hourly,
    Trend,
    Daily,
    Help,
}

impl HudLine {
    const ALL: [HudLine; 11] = [
        HudLine::Title,
        HudLine::Coordinates,
        HudLine::Conditions,
        HudLine::History,
        HudLine::Details,
        HudLine::AirQuality,
        HudLine::Alert,
        HudLine::Hourly,
        HudLine::Trend,
        HudLine::Daily,
        HudLine::Help,
    ];
}

/// Everything the HUD shows, as plain strings.
#[derive(Debug, Clone, PartialEq)]
pub struct HudContent {
    pub title: String,
    pub coordinates: String,
    pub conditions: Option<String>,
    /// Condition class and day flag, used for the conditions tint
    pub condition_kind: Option<(ConditionKind, bool)>,
    /// Summary of a past day, for snapshots without current conditions
    pub history: Option<String>,
    pub details: Option<String>,
    pub air_quality: Option<(String, AqiCategory)>,
    pub alert: Option<String>,
    pub hourly: Option<String>,
    pub trend: Option<String>,
    pub daily: Option<String>,
}

impl HudContent {
    pub fn build(
        forecast: Option<&ForecastResponse>,
        selection: &SelectedLocation,
        unit: TemperatureUnit,
    ) -> Self {
        let mut content = HudContent {
            title: String::new(),
            coordinates: selection.geo.to_string(),
            conditions: None,
            condition_kind: None,
            history: None,
            details: None,
            air_quality: None,
            alert: None,
            hourly: None,
            trend: None,
            daily: None,
        };

        let forecast = match (selection.source, forecast) {
            (SelectionSource::Picked, _) => {
                content.title = "Selected location".to_string();
                content.details = Some("No forecast snapshot for this point".to_string());
                return content;
            }
            (_, None) => {
                content.title = "Default location".to_string();
                content.details = Some("No forecast loaded".to_string());
                return content;
            }
            (_, Some(forecast)) => forecast,
        };

        content.title = forecast.location.title();

        content.alert = forecast.active_alert().map(|alert| match alert.severity {
            Some(severity) => format!("Alert ({severity}): {} - {}", alert.title, alert.message),
            None => format!("Alert: {} - {}", alert.title, alert.message),
        });

        let Some(current) = forecast.current.as_ref() else {
            // History payloads carry a single past day and no live conditions
            content.history = forecast.today().map(|day| history_line(day, unit));
            return content;
        };

        let today = forecast.today().map(|d| DaySummary::from_day(&d.day, unit));
        content.conditions = Some(conditions_line(current, today.as_ref(), unit));
        content.condition_kind = Some((
            ConditionKind::classify(&current.condition.text),
            current.is_day(),
        ));
        content.details = Some(details_line(current, unit));
        content.air_quality = current.air_quality.as_ref().map(air_quality_line);

        let series = HourlySeries::from_hours(&next_hours(forecast, TREND_HOURS), unit);
        if !series.is_empty() {
            content.hourly = Some(hourly_line(&series, HOURS_SHOWN));
            content.trend = Some(trend_line(&series));
        }

        let days: Vec<String> = forecast
            .forecast
            .forecastday
            .iter()
            .enumerate()
            .map(|(i, day)| {
                daily_entry(&day_label(i, &day.date), &DaySummary::from_day(&day.day, unit))
            })
            .collect();
        if !days.is_empty() {
            content.daily = Some(days.join(" | "));
        }

        content
    }

    fn text(&self, line: HudLine) -> Option<String> {
        match line {
            HudLine::Title => Some(self.title.clone()),
            HudLine::Coordinates => Some(self.coordinates.clone()),
            HudLine::Conditions => self.conditions.clone(),
            HudLine::History => self.history.clone(),
            HudLine::Details => self.details.clone(),
            HudLine::AirQuality => self.air_quality.as_ref().map(|(text, _)| text.clone()),
            HudLine::Alert => self.alert.clone(),
            HudLine::Hourly => self.hourly.clone(),
            HudLine::Trend => self.trend.clone(),
            HudLine::Daily => self.daily.clone(),
            HudLine::Help => Some(HELP_TEXT.to_string()),
        }
    }

    fn color(&self, line: HudLine) -> Color {
        match line {
            HudLine::Conditions => self
                .condition_kind
                .map(|(kind, is_day)| kind.tint(is_day))
                .unwrap_or(Color::WHITE),
            HudLine::AirQuality => self
                .air_quality
                .as_ref()
                .map(|(_, category)| category.color())
                .unwrap_or(Color::WHITE),
            HudLine::Alert => ALERT_COLOR,
            HudLine::Coordinates | HudLine::Help => DIM_COLOR,
            _ => Color::WHITE,
        }
    }
}

/// `13°C Partly cloudy  H: 15° L: 8°`
pub fn conditions_line(current: &Current, today: Option<&DaySummary>, unit: TemperatureUnit) -> String {
    let mut line = format!(
        "{}{} {}",
        round_display(unit.current_temp(current)),
        unit.symbol(),
        current.condition.text
    );
    if let Some(today) = today {
        line.push_str("  ");
        line.push_str(&today.high_low());
    }
    line
}

pub fn details_line(current: &Current, unit: TemperatureUnit) -> String {
    format!(
        "Humidity {}%  Wind {} {}  Visibility {} {}  Feels like {}{}  Pressure {} mb  UV {}",
        current.humidity,
        round_display(unit.wind(current)),
        unit.speed_label(),
        unit.visibility(current),
        unit.distance_label(),
        round_display(unit.feels_like(current)),
        unit.symbol(),
        current.pressure_mb,
        current.uv
    )
}

pub fn air_quality_line(aq: &AirQuality) -> (String, AqiCategory) {
    let reading = AqiReading::from_air_quality(aq);
    let filled = (reading.bar_fraction() * AQI_BAR_CELLS as f32).round() as usize;
    let bar = format!("{}{}", "#".repeat(filled), "-".repeat(AQI_BAR_CELLS - filled));
    let text = format!(
        "AQI {} {} [{}]  PM2.5 {}  PM10 {}  O3 {}  NO2 {}",
        reading.index,
        reading.category.label(),
        bar,
        format_pollutant(aq.pm2_5),
        format_pollutant(aq.pm10),
        format_pollutant(aq.o3),
        format_pollutant(aq.no2)
    );
    (text, reading.category)
}

/// `6PM 12° 14 km/h  7PM 12° 70% rain 14 km/h  ...` for the first `count` hours
pub fn hourly_line(series: &HourlySeries, count: usize) -> String {
    (0..series.len().min(count))
        .map(|i| {
            let mut entry = format!("{} {}°", series.labels[i], series.temps[i]);
            let rain = series.chance_of_rain[i];
            if rain > 0 {
                entry.push_str(&format!(" {rain}% rain"));
            }
            entry.push_str(&format!(" {} {}", series.wind[i], series.wind_label));
            entry
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Feels-like spread, total rain and strongest gust over the whole series.
pub fn trend_line(series: &HourlySeries) -> String {
    let mut line = format!("Next {}h:", series.len());
    if let Some((low, high)) = series.feels_like_range() {
        line.push_str(&format!(" feels like {low}° to {high}°"));
    }
    line.push_str(&format!("  Rain {:.1} mm", series.total_precip_mm()));
    if let Some(gust) = series.max_gust() {
        line.push_str(&format!("  Gusts up to {gust} {}", series.wind_label));
    }
    line
}

/// `Today H: 15° L: 8° Patchy rain nearby 70% rain`
pub fn daily_entry(label: &str, summary: &DaySummary) -> String {
    let mut entry = format!("{label} {} {}", summary.high_low(), summary.condition);
    if summary.chance_of_rain > 0 {
        entry.push_str(&format!(" {}% rain", summary.chance_of_rain));
    }
    entry
}

pub fn history_line(day: &ForecastDay, unit: TemperatureUnit) -> String {
    let summary = DaySummary::from_day(&day.day, unit);
    let astro = day.astro.as_ref();
    let sunrise = astro.and_then(|a| a.sunrise.as_deref()).unwrap_or("N/A");
    let sunset = astro.and_then(|a| a.sunset.as_deref()).unwrap_or("N/A");
    format!(
        "{}  {} Avg: {}°  {}  Precip {:.1} mm  Max wind {} {}  Humidity {}%  Sunrise {}  Sunset {}",
        long_date(&day.date),
        summary.high_low(),
        summary.avg,
        summary.condition,
        summary.precip_mm,
        round_display(summary.max_wind),
        summary.wind_label,
        summary.humidity,
        sunrise,
        sunset
    )
}

pub fn spawn_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(12.0),
                left: Val::Px(12.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                ..default()
            },
            Name::new("HUD"),
        ))
        .with_children(|parent| {
            for line in HudLine::ALL {
                let font_size = if line == HudLine::Title {
                    TITLE_FONT_SIZE
                } else {
                    HUD_FONT_SIZE
                };
                parent.spawn((
                    Text::new(""),
                    TextFont {
                        font_size,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                    Node::default(),
                    line,
                ));
            }
        });
}

pub fn handle_unit_keys(keys: Res<ButtonInput<KeyCode>>, mut unit: ResMut<DisplayUnit>) {
    let next = if keys.just_pressed(KeyCode::KeyC) {
        TemperatureUnit::Celsius
    } else if keys.just_pressed(KeyCode::KeyF) {
        TemperatureUnit::Fahrenheit
    } else if keys.just_pressed(KeyCode::KeyU) {
        unit.0.toggle()
    } else {
        return;
    };
    if unit.set_if_neq(DisplayUnit(next)) {
        info!("Display unit {}", next.symbol());
    }
}

/// Rewrite the overlay when the forecast, unit or selection changes.
pub fn update_hud(
    data: Res<ForecastData>,
    selection: Res<SelectedLocation>,
    unit: Res<DisplayUnit>,
    mut lines: Query<(&HudLine, &mut Text, &mut TextColor, &mut Node)>,
) {
    if !data.is_changed() && !selection.is_changed() && !unit.is_changed() {
        return;
    }

    let content = HudContent::build(data.forecast.as_ref(), &selection, unit.0);
    for (line, mut text, mut color, mut node) in lines.iter_mut() {
        match content.text(*line) {
            Some(value) => {
                text.0 = value;
                color.0 = content.color(*line);
                node.display = Display::Flex;
            }
            None => {
                text.0.clear();
                node.display = Display::None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GeoCoordinate;
    use crate::weather::snapshot::parse_forecast;

    const SAMPLE: &str = include_str!("../../assets/forecast_sample.json");

    fn selection(source: SelectionSource) -> SelectedLocation {
        SelectedLocation {
            geo: GeoCoordinate {
                lat: 51.52,
                lon: -0.11,
            },
            source,
        }
    }

    #[test]
    fn test_hud_from_sample_celsius() {
        let forecast = parse_forecast(SAMPLE).unwrap();
        let content = HudContent::build(
            Some(&forecast),
            &selection(SelectionSource::Forecast),
            TemperatureUnit::Celsius,
        );
        assert_eq!(content.title, "London, City of London, Greater London");
        assert_eq!(content.coordinates, "Lat: 51.52, Lon: -0.11");
        assert_eq!(
            content.conditions.as_deref(),
            Some("13°C Partly cloudy  H: 15° L: 8°")
        );
        assert_eq!(
            content.condition_kind,
            Some((ConditionKind::PartlyCloudy, true))
        );
        assert_eq!(
            content.details.as_deref(),
            Some(
                "Humidity 72%  Wind 14 km/h  Visibility 10 km  Feels like 12°C  Pressure 1012 mb  UV 2.4"
            )
        );
        let (aqi, category) = content.air_quality.clone().unwrap();
        assert_eq!(aqi, "AQI 2 Moderate [##----]  PM2.5 7.8  PM10 11.1  O3 44.3  NO2 28.5");
        assert_eq!(category, AqiCategory::Moderate);
        assert!(
            content
                .alert
                .as_deref()
                .unwrap()
                .starts_with("Alert (Moderate): Yellow warning for wind - ")
        );
        assert_eq!(
            content.hourly.as_deref(),
            Some(
                "2PM 13° 14 km/h  3PM 13° 14 km/h  4PM 12° 14 km/h  5PM 12° 14 km/h  \
                 6PM 12° 14 km/h  7PM 12° 70% rain 14 km/h"
            )
        );
        assert_eq!(
            content.trend.as_deref(),
            Some("Next 24h: feels like 6° to 12°  Rain 2.7 mm  Gusts up to 21 km/h")
        );
        assert_eq!(
            content.daily.as_deref(),
            Some(
                "Today H: 15° L: 8° Patchy rain nearby 70% rain | \
                 Tomorrow H: 12° L: 7° Moderate rain 89% rain | \
                 Thursday H: 11° L: 5° Sunny"
            )
        );
        assert!(content.history.is_none());
    }

    #[test]
    fn test_hud_from_sample_fahrenheit() {
        let forecast = parse_forecast(SAMPLE).unwrap();
        let content = HudContent::build(
            Some(&forecast),
            &selection(SelectionSource::Forecast),
            TemperatureUnit::Fahrenheit,
        );
        assert_eq!(
            content.conditions.as_deref(),
            Some("56°F Partly cloudy  H: 58° L: 47°")
        );
        assert!(content.details.as_deref().unwrap().contains("Wind 9 mph"));
        assert!(content.details.as_deref().unwrap().contains("Visibility 6 mi"));
        let hourly = content.hourly.as_deref().unwrap();
        assert!(hourly.starts_with("2PM 55° "));
        assert!(hourly.ends_with(" mph"));
        assert!(content.trend.as_deref().unwrap().ends_with(" mph"));
    }

    #[test]
    fn test_hud_from_history_snapshot() {
        let json = r#"{
            "location": { "name": "Paris", "region": "Ile-de-France", "country": "France",
                          "lat": 48.87, "lon": 2.33, "localtime": "2025-10-21 14:05" },
            "forecast": { "forecastday": [ {
                "date": "2025-10-01",
                "day": { "maxtemp_c": 18.3, "mintemp_c": 9.8, "avgtemp_c": 13.9,
                         "maxwind_kph": 17.6, "totalprecip_mm": 0.0, "avghumidity": 61.0,
                         "condition": { "text": "Sunny" } },
                "astro": { "sunrise": "07:52 AM", "sunset": "07:24 PM" },
                "hour": []
            } ] }
        }"#;
        let forecast = parse_forecast(json).unwrap();
        let content = HudContent::build(
            Some(&forecast),
            &selection(SelectionSource::Forecast),
            TemperatureUnit::Celsius,
        );
        assert_eq!(content.title, "Paris, Ile-de-France");
        assert!(content.conditions.is_none());
        assert!(content.hourly.is_none());
        assert!(content.daily.is_none());
        assert_eq!(
            content.history.as_deref(),
            Some(
                "Wednesday, October 1, 2025  H: 18° L: 10° Avg: 14°  Sunny  Precip 0.0 mm  \
                 Max wind 18 km/h  Humidity 61%  Sunrise 07:52 AM  Sunset 07:24 PM"
            )
        );

        let imperial = HudContent::build(
            Some(&forecast),
            &selection(SelectionSource::Forecast),
            TemperatureUnit::Fahrenheit,
        );
        let history = imperial.history.unwrap();
        assert!(history.contains("H: 65° L: 50° Avg: 57°"));
        assert!(history.contains("Max wind 11 mph"));
    }

    #[test]
    fn test_history_line_without_astro() {
        let day = ForecastDay {
            date: "2025-10-01".to_string(),
            ..ForecastDay::default()
        };
        let line = history_line(&day, TemperatureUnit::Celsius);
        assert!(line.contains("H: 0° L: 0° Avg: 0°  N/A"));
        assert!(line.ends_with("Sunrise N/A  Sunset N/A"));
    }

    #[test]
    fn test_hud_after_pick() {
        let forecast = parse_forecast(SAMPLE).unwrap();
        let picked = SelectedLocation {
            geo: GeoCoordinate {
                lat: -33.87,
                lon: 151.21,
            },
            source: SelectionSource::Picked,
        };
        let content = HudContent::build(Some(&forecast), &picked, TemperatureUnit::Celsius);
        assert_eq!(content.title, "Selected location");
        assert_eq!(content.coordinates, "Lat: -33.87, Lon: 151.21");
        assert!(content.conditions.is_none());
        assert!(content.alert.is_none());
        assert_eq!(content.text(HudLine::Hourly), None);
        assert_eq!(content.text(HudLine::Help).as_deref(), Some(HELP_TEXT));
    }

    #[test]
    fn test_hud_without_forecast() {
        let content = HudContent::build(
            None,
            &selection(SelectionSource::Default),
            TemperatureUnit::Celsius,
        );
        assert_eq!(content.title, "Default location");
        assert_eq!(content.details.as_deref(), Some("No forecast loaded"));
        assert!(content.daily.is_none());
    }

    #[test]
    fn test_air_quality_line_missing_values() {
        let (text, category) = air_quality_line(&AirQuality::default());
        assert_eq!(text, "AQI 0 Good [------]  PM2.5 N/A  PM10 N/A  O3 N/A  NO2 N/A");
        assert_eq!(category, AqiCategory::Good);
    }

    #[test]
    fn test_conditions_line_without_day() {
        let current = Current {
            temp_c: -0.4,
            ..Current::default()
        };
        assert_eq!(conditions_line(&current, None, TemperatureUnit::Celsius), "0°C ");
    }
}
