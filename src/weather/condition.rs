//! Condition text classification.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionKind {
    Clear,
    PartlyCloudy,
    Cloudy,
    Fog,
    Drizzle,
    Rain,
    Thunderstorm,
    Snow,
    Wind,
}

impl ConditionKind {
    /// Case-insensitive keyword match; first rule wins, unknown text is clear.
    pub fn classify(text: &str) -> Self {
        let text = text.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| text.contains(w));

        if has(&["clear", "sunny"]) {
            ConditionKind::Clear
        } else if has(&["partly cloudy"]) {
            ConditionKind::PartlyCloudy
        } else if has(&["cloudy", "overcast"]) {
            ConditionKind::Cloudy
        } else if has(&["mist", "fog", "haze"]) {
            ConditionKind::Fog
        } else if has(&["patchy rain", "light rain", "drizzle"]) {
            ConditionKind::Drizzle
        } else if has(&["rain"]) {
            ConditionKind::Rain
        } else if has(&["thunderstorm", "storm"]) {
            ConditionKind::Thunderstorm
        } else if has(&["snow", "sleet", "ice pellets"]) {
            ConditionKind::Snow
        } else if has(&["wind"]) {
            ConditionKind::Wind
        } else {
            ConditionKind::Clear
        }
    }

    /// Accent colour for the HUD condition line.
    pub fn tint(self, is_day: bool) -> Color {
        match (self, is_day) {
            (ConditionKind::Clear, true) => Color::srgb(1.0, 0.85, 0.3),
            (ConditionKind::Clear, false) | (ConditionKind::PartlyCloudy, false) => {
                Color::srgb(0.7, 0.75, 1.0)
            }
            (ConditionKind::PartlyCloudy, true) => Color::srgb(0.9, 0.9, 0.75),
            (ConditionKind::Cloudy, _) | (ConditionKind::Fog, _) => Color::srgb(0.75, 0.78, 0.8),
            (ConditionKind::Drizzle, _) | (ConditionKind::Rain, _) => Color::srgb(0.4, 0.7, 1.0),
            (ConditionKind::Thunderstorm, _) => Color::srgb(0.8, 0.5, 1.0),
            (ConditionKind::Snow, _) => Color::WHITE,
            (ConditionKind::Wind, _) => Color::srgb(0.6, 0.95, 0.9),
        }
    }
}
