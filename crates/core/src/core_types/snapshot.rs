//! Hourly weather snapshot produced by the simulation
//!
//! Snapshots are value types: once a simulation hands one out it never
//! changes. Consumers (dashboards, canvas renderers, GM notes) read them only.

use crate::celestial::CelestialReading;
use crate::core_types::system::WeatherSystem;
use crate::core_types::units::{Degrees, Fahrenheit, Hectopascals, Inches, MilesPerHour, Percent};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Form of falling precipitation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrecipitationType {
    None,
    Rain,
    Snow,
    Hail,
}

impl PrecipitationType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Rain => "rain",
            Self::Snow => "snow",
            Self::Hail => "hail",
        }
    }

    /// Resolve the precipitation form from temperature and instability.
    ///
    /// - no amount → `None`
    /// - below 32°F → `Snow`
    /// - instability at or above `hail_instability` with 32-45°F → `Hail`
    /// - otherwise `Rain`
    #[must_use]
    pub fn resolve(
        amount: Inches,
        temperature: Fahrenheit,
        instability: f64,
        hail_instability: f64,
    ) -> Self {
        if *amount <= 0.0 {
            Self::None
        } else if temperature.is_freezing() {
            Self::Snow
        } else if instability >= hail_instability && *temperature <= 45.0 {
            Self::Hail
        } else {
            Self::Rain
        }
    }
}

/// Precipitation for one hour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Precipitation {
    /// Combined chance/strength of precipitation (0-1)
    pub potential: f64,
    /// Liquid-equivalent amount this hour
    pub amount: Inches,
    pub kind: PrecipitationType,
}

/// Classification of the hourly pressure change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PressureTendency {
    Rising,
    Stable,
    Falling,
}

impl PressureTendency {
    /// Classify a trend in hPa/hr against a symmetric threshold
    #[must_use]
    pub fn classify(trend: f64, threshold: f64) -> Self {
        if trend > threshold {
            Self::Rising
        } else if trend < -threshold {
            Self::Falling
        } else {
            Self::Stable
        }
    }
}

/// One-word summary for GM display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeatherCondition {
    Clear,
    PartlyCloudy,
    Overcast,
    Fog,
    Windy,
    Drizzle,
    Rain,
    HeavyRain,
    Thunderstorm,
    Snow,
    Blizzard,
    Hail,
}

impl WeatherCondition {
    /// Summarize the hour's fields.
    ///
    /// Precipitation dominates, then fog (very humid, little wind, low sun),
    /// then wind, then cloud cover.
    #[must_use]
    pub fn classify(
        precipitation: &Precipitation,
        cloud_cover: Percent,
        humidity: Percent,
        wind_speed: MilesPerHour,
        instability: f64,
    ) -> Self {
        let amount = *precipitation.amount;
        match precipitation.kind {
            PrecipitationType::Hail => return Self::Hail,
            PrecipitationType::Snow => {
                return if *wind_speed >= 30.0 {
                    Self::Blizzard
                } else {
                    Self::Snow
                };
            }
            PrecipitationType::Rain => {
                return if instability >= 6.0 {
                    Self::Thunderstorm
                } else if amount >= 0.3 {
                    Self::HeavyRain
                } else if amount < 0.05 {
                    Self::Drizzle
                } else {
                    Self::Rain
                };
            }
            PrecipitationType::None => {}
        }

        if *humidity >= 95.0 && *wind_speed < 6.0 {
            Self::Fog
        } else if *wind_speed >= 25.0 {
            Self::Windy
        } else if *cloud_cover >= 75.0 {
            Self::Overcast
        } else if *cloud_cover >= 30.0 {
            Self::PartlyCloudy
        } else {
            Self::Clear
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::PartlyCloudy => "Partly Cloudy",
            Self::Overcast => "Overcast",
            Self::Fog => "Fog",
            Self::Windy => "Windy",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::HeavyRain => "Heavy Rain",
            Self::Thunderstorm => "Thunderstorm",
            Self::Snow => "Snow",
            Self::Blizzard => "Blizzard",
            Self::Hail => "Hail",
        }
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Complete weather for one simulated hour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub timestamp: NaiveDateTime,
    pub temperature: Fahrenheit,
    pub feels_like: Fahrenheit,
    pub humidity: Percent,
    pub pressure: Hectopascals,
    /// Change since the previous hour (hPa/hr)
    pub pressure_trend: f64,
    pub pressure_tendency: PressureTendency,
    pub cloud_cover: Percent,
    pub precipitation: Precipitation,
    /// Sustained wind
    pub wind_speed: MilesPerHour,
    pub wind_gust: MilesPerHour,
    pub wind_direction: Degrees,
    /// Convective potential (0-10)
    pub instability: f64,
    /// Decayed rolling precipitation total over the trend window
    pub recent_precipitation: Inches,
    pub condition: WeatherCondition,
    pub celestial: CelestialReading,
    /// Systems active when this hour was synthesized
    pub systems: Vec<WeatherSystem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precipitation_type_resolution() {
        let wet = Inches::new(0.1);
        assert_eq!(
            PrecipitationType::resolve(Inches::ZERO, Fahrenheit::new(20.0), 9.0, 7.0),
            PrecipitationType::None
        );
        assert_eq!(
            PrecipitationType::resolve(wet, Fahrenheit::new(28.0), 9.0, 7.0),
            PrecipitationType::Snow
        );
        assert_eq!(
            PrecipitationType::resolve(wet, Fahrenheit::new(38.0), 7.5, 7.0),
            PrecipitationType::Hail
        );
        assert_eq!(
            PrecipitationType::resolve(wet, Fahrenheit::new(70.0), 9.0, 7.0),
            PrecipitationType::Rain
        );
        assert_eq!(
            PrecipitationType::resolve(wet, Fahrenheit::new(38.0), 3.0, 7.0),
            PrecipitationType::Rain
        );
    }

    #[test]
    fn tendency_thresholds_are_exclusive() {
        assert_eq!(PressureTendency::classify(0.6, 0.5), PressureTendency::Rising);
        assert_eq!(PressureTendency::classify(0.5, 0.5), PressureTendency::Stable);
        assert_eq!(PressureTendency::classify(-0.5, 0.5), PressureTendency::Stable);
        assert_eq!(PressureTendency::classify(-0.51, 0.5), PressureTendency::Falling);
    }

    #[test]
    fn condition_prefers_precipitation_over_cloud() {
        let snow = Precipitation {
            potential: 0.8,
            amount: Inches::new(0.2),
            kind: PrecipitationType::Snow,
        };
        assert_eq!(
            WeatherCondition::classify(
                &snow,
                Percent::new(100.0),
                Percent::new(90.0),
                MilesPerHour::new(35.0),
                2.0
            ),
            WeatherCondition::Blizzard
        );

        let dry = Precipitation {
            potential: 0.1,
            amount: Inches::ZERO,
            kind: PrecipitationType::None,
        };
        assert_eq!(
            WeatherCondition::classify(
                &dry,
                Percent::new(10.0),
                Percent::new(40.0),
                MilesPerHour::new(5.0),
                1.0
            ),
            WeatherCondition::Clear
        );
        assert_eq!(
            WeatherCondition::classify(
                &dry,
                Percent::new(50.0),
                Percent::new(97.0),
                MilesPerHour::new(2.0),
                1.0
            ),
            WeatherCondition::Fog
        );
    }
}
