//! US-EPA air quality bands.

use bevy::prelude::*;

use crate::weather::types::AirQuality;

/// Top of the US-EPA index scale.
const EPA_INDEX_MAX: f32 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AqiCategory {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiCategory {
    pub fn classify(index: u32) -> Self {
        match index {
            0..=1 => AqiCategory::Good,
            2 => AqiCategory::Moderate,
            3 => AqiCategory::UnhealthyForSensitiveGroups,
            4 => AqiCategory::Unhealthy,
            5 => AqiCategory::VeryUnhealthy,
            _ => AqiCategory::Hazardous,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            AqiCategory::Unhealthy => "Unhealthy",
            AqiCategory::VeryUnhealthy => "Very Unhealthy",
            AqiCategory::Hazardous => "Hazardous",
        }
    }

    pub fn rgb(self) -> [u8; 3] {
        match self {
            AqiCategory::Good => [0x00, 0xff, 0x88],
            AqiCategory::Moderate => [0xff, 0xaa, 0x00],
            AqiCategory::UnhealthyForSensitiveGroups => [0xff, 0x88, 0x00],
            AqiCategory::Unhealthy => [0xff, 0x44, 0x44],
            AqiCategory::VeryUnhealthy => [0xcc, 0x00, 0x00],
            AqiCategory::Hazardous => [0x99, 0x00, 0x00],
        }
    }

    pub fn color(self) -> Color {
        let [r, g, b] = self.rgb();
        Color::srgb_u8(r, g, b)
    }
}

/// Air quality reading as shown on the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct AqiReading {
    pub index: u32,
    pub category: AqiCategory,
}

impl AqiReading {
    /// A missing index reads as 0.
    pub fn from_air_quality(aq: &AirQuality) -> Self {
        let index = aq.us_epa_index.unwrap_or(0);
        AqiReading {
            index,
            category: AqiCategory::classify(index),
        }
    }

    /// Fill fraction of the AQI bar, capped at 1.
    pub fn bar_fraction(&self) -> f32 {
        (self.index as f32 / EPA_INDEX_MAX).min(1.0)
    }
}

/// One decimal, or `N/A` when the pollutant is absent or zero.
pub fn format_pollutant(value: Option<f64>) -> String {
    match value {
        Some(v) if v != 0.0 && v.is_finite() => format!("{v:.1}"),
        _ => "N/A".to_string(),
    }
}
