//! Display units and per-unit field selection.

use serde::{Deserialize, Serialize};

use crate::weather::types::{Current, Day, Hour};

/// Gusts are estimated from sustained wind when the feed omits them.
const GUST_FALLBACK_FACTOR: f64 = 1.2;
const KPH_PER_MPH: f64 = 1.609344;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn toggle(self) -> Self {
        match self {
            TemperatureUnit::Celsius => TemperatureUnit::Fahrenheit,
            TemperatureUnit::Fahrenheit => TemperatureUnit::Celsius,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }

    pub fn speed_label(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "km/h",
            TemperatureUnit::Fahrenheit => "mph",
        }
    }

    pub fn distance_label(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "km",
            TemperatureUnit::Fahrenheit => "mi",
        }
    }

    fn pick(self, metric: f64, imperial: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => metric,
            TemperatureUnit::Fahrenheit => imperial,
        }
    }

    /// Like `pick`, but a zero in the selected unit is treated as missing and
    /// the other unit's reading is converted instead. History payloads often
    /// carry only the metric fields.
    fn pick_or_convert(
        self,
        metric: f64,
        imperial: f64,
        to_imperial: fn(f64) -> f64,
        to_metric: fn(f64) -> f64,
    ) -> f64 {
        match self {
            TemperatureUnit::Celsius if metric == 0.0 && imperial != 0.0 => to_metric(imperial),
            TemperatureUnit::Fahrenheit if imperial == 0.0 && metric != 0.0 => to_imperial(metric),
            _ => self.pick(metric, imperial),
        }
    }

    fn day_temp(self, celsius: f64, fahrenheit: f64) -> f64 {
        self.pick_or_convert(celsius, fahrenheit, celsius_to_fahrenheit, fahrenheit_to_celsius)
    }

    pub fn current_temp(self, current: &Current) -> f64 {
        self.pick(current.temp_c, current.temp_f)
    }

    pub fn feels_like(self, current: &Current) -> f64 {
        self.pick(current.feelslike_c, current.feelslike_f)
    }

    pub fn wind(self, current: &Current) -> f64 {
        self.pick(current.wind_kph, current.wind_mph)
    }

    pub fn visibility(self, current: &Current) -> f64 {
        self.pick(current.vis_km, current.vis_miles)
    }

    pub fn day_high(self, day: &Day) -> f64 {
        self.day_temp(day.maxtemp_c, day.maxtemp_f)
    }

    pub fn day_low(self, day: &Day) -> f64 {
        self.day_temp(day.mintemp_c, day.mintemp_f)
    }

    pub fn day_avg(self, day: &Day) -> f64 {
        self.day_temp(day.avgtemp_c, day.avgtemp_f)
    }

    pub fn day_max_wind(self, day: &Day) -> f64 {
        self.pick_or_convert(
            day.maxwind_kph,
            day.maxwind_mph,
            |kph| kph / KPH_PER_MPH,
            |mph| mph * KPH_PER_MPH,
        )
    }

    pub fn hour_temp(self, hour: &Hour) -> f64 {
        self.pick(hour.temp_c, hour.temp_f)
    }

    pub fn hour_feels_like(self, hour: &Hour) -> f64 {
        self.pick(hour.feelslike_c, hour.feelslike_f)
    }

    pub fn hour_wind(self, hour: &Hour) -> f64 {
        self.pick(hour.wind_kph, hour.wind_mph)
    }

    pub fn hour_gust(self, hour: &Hour) -> f64 {
        let gust = match self {
            TemperatureUnit::Celsius => hour.gust_kph,
            TemperatureUnit::Fahrenheit => hour.gust_mph,
        };
        match gust {
            Some(g) if g > 0.0 => g,
            _ => self.hour_wind(hour) * GUST_FALLBACK_FACTOR,
        }
    }
}

fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 1.8 + 32.0
}

fn fahrenheit_to_celsius(f: f64) -> f64 {
    (f - 32.0) / 1.8
}

/// Round half up.
pub fn round_display(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
