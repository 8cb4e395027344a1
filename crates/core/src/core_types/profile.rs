//! Per-region climate configuration
//!
//! A [`ClimateProfile`] is the static baseline a region's weather perturbs
//! around. It is immutable once built; edits go back through
//! [`crate::climate::resolve_profile`] and produce a new profile.

use crate::core_types::units::Fahrenheit;
use crate::error::ProfileError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Biome tag selecting a climate template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Biome {
    TropicalRainforest,
    TropicalSavanna,
    Desert,
    Mediterranean,
    TemperateGrassland,
    TemperateForest,
    BorealForest,
    Tundra,
    PolarIce,
    Mountain,
    Coastal,
    Swamp,
}

impl Biome {
    /// Every biome, in template order
    pub const ALL: [Biome; 12] = [
        Biome::TropicalRainforest,
        Biome::TropicalSavanna,
        Biome::Desert,
        Biome::Mediterranean,
        Biome::TemperateGrassland,
        Biome::TemperateForest,
        Biome::BorealForest,
        Biome::Tundra,
        Biome::PolarIce,
        Biome::Mountain,
        Biome::Coastal,
        Biome::Swamp,
    ];

    /// Kebab-case tag used in region data
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TropicalRainforest => "tropical-rainforest",
            Self::TropicalSavanna => "tropical-savanna",
            Self::Desert => "desert",
            Self::Mediterranean => "mediterranean",
            Self::TemperateGrassland => "temperate-grassland",
            Self::TemperateForest => "temperate-forest",
            Self::BorealForest => "boreal-forest",
            Self::Tundra => "tundra",
            Self::PolarIce => "polar-ice",
            Self::Mountain => "mountain",
            Self::Coastal => "coastal",
            Self::Swamp => "swamp",
        }
    }
}

impl fmt::Display for Biome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Biome {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Biome::ALL
            .into_iter()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| ProfileError::UnknownBiome(s.to_string()))
    }
}

/// Coarse latitude classification used by the celestial tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LatitudeBand {
    /// 0-10°
    Equatorial,
    /// 10-23.5°
    Tropical,
    /// 23.5-55°
    Temperate,
    /// 55-66.5°
    Subarctic,
    /// 66.5-90°
    Polar,
}

impl LatitudeBand {
    /// Classify an absolute latitude in degrees
    #[must_use]
    pub fn from_latitude(latitude: f64) -> Self {
        let lat = latitude.abs();
        if lat < 10.0 {
            Self::Equatorial
        } else if lat < 23.5 {
            Self::Tropical
        } else if lat < 55.0 {
            Self::Temperate
        } else if lat < 66.5 {
            Self::Subarctic
        } else {
            Self::Polar
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Equatorial => "equatorial",
            Self::Tropical => "tropical",
            Self::Temperate => "temperate",
            Self::Subarctic => "subarctic",
            Self::Polar => "polar",
        }
    }
}

impl fmt::Display for LatitudeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LatitudeBand {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "equatorial" => Ok(Self::Equatorial),
            "tropical" => Ok(Self::Tropical),
            "temperate" => Ok(Self::Temperate),
            "subarctic" => Ok(Self::Subarctic),
            "polar" => Ok(Self::Polar),
            other => Err(ProfileError::UnknownLatitudeBand(other.to_string())),
        }
    }
}

/// Fixed set of boolean climate modifiers.
///
/// Unknown keys are rejected both by serde (`deny_unknown_fields`) and by
/// [`SpecialFactors::set`], so a misspelled factor never goes unnoticed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpecialFactors {
    /// Wet summer season (June-September)
    pub monsoon: bool,
    /// Dry winter half-year (November-April)
    #[serde(alias = "drySeason")]
    pub dry_season: bool,
    #[serde(alias = "highRainfall")]
    pub high_rainfall: bool,
    /// Midnight sun through the summer half-year
    #[serde(alias = "polarDay")]
    pub polar_day: bool,
    /// Sun stays down through the winter half-year
    #[serde(alias = "polarNight")]
    pub polar_night: bool,
    /// Morning fog and low cloud
    pub fog: bool,
    #[serde(alias = "highDiurnalVariation")]
    pub high_diurnal_variation: bool,
    /// Wind channeling and cold-air pooling
    pub valley: bool,
    /// Forced uplift over terrain
    pub orographic: bool,
    /// Recorded for region flavour; no weather effect
    pub tectonic: bool,
    /// Adds convective instability
    pub volcanic: bool,
}

impl SpecialFactors {
    /// Canonical factor names
    pub const NAMES: [&'static str; 11] = [
        "monsoon",
        "dry_season",
        "high_rainfall",
        "polar_day",
        "polar_night",
        "fog",
        "high_diurnal_variation",
        "valley",
        "orographic",
        "tectonic",
        "volcanic",
    ];

    /// Set a factor by name; accepts snake_case or camelCase spellings.
    pub fn set(&mut self, name: &str, value: bool) -> Result<(), ProfileError> {
        let slot = match canonical_factor_name(name).as_str() {
            "monsoon" => &mut self.monsoon,
            "dry_season" => &mut self.dry_season,
            "high_rainfall" => &mut self.high_rainfall,
            "polar_day" => &mut self.polar_day,
            "polar_night" => &mut self.polar_night,
            "fog" => &mut self.fog,
            "high_diurnal_variation" => &mut self.high_diurnal_variation,
            "valley" => &mut self.valley,
            "orographic" => &mut self.orographic,
            "tectonic" => &mut self.tectonic,
            "volcanic" => &mut self.volcanic,
            _ => return Err(ProfileError::UnknownSpecialFactor(name.to_string())),
        };
        *slot = value;
        Ok(())
    }
}

fn canonical_factor_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Static per-region climate parameters.
///
/// All "influence" factors are normalized to [0, 1]. Temperatures are °F,
/// elevation is feet above sea level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateProfile {
    pub biome: Biome,

    /// Annual mean temperature
    pub base_temp: Fahrenheit,

    /// Typical swing around the mean (°F)
    pub temp_variation: f64,

    pub precipitation: f64,
    pub humidity: f64,
    pub windiness: f64,

    /// Absolute latitude in degrees (0-90)
    pub latitude: f64,

    /// Feet above sea level
    pub elevation: f64,

    pub maritime_influence: f64,
    pub terrain_roughness: f64,
    pub storm_frequency: f64,
    pub storm_intensity: f64,
    pub seasonal_extremes: f64,

    #[serde(default)]
    pub special_factors: SpecialFactors,
}

impl ClimateProfile {
    /// Latitude band for celestial lookups
    #[must_use]
    pub fn latitude_band(&self) -> LatitudeBand {
        LatitudeBand::from_latitude(self.latitude)
    }

    /// Check every numeric field for finiteness and range.
    pub fn validate(&self) -> Result<(), ProfileError> {
        check_range("base_temp", *self.base_temp, -80.0, 130.0)?;
        check_range("temp_variation", self.temp_variation, 0.0, 60.0)?;
        check_range("precipitation", self.precipitation, 0.0, 1.0)?;
        check_range("humidity", self.humidity, 0.0, 1.0)?;
        check_range("windiness", self.windiness, 0.0, 1.0)?;
        check_range("latitude", self.latitude, 0.0, 90.0)?;
        check_range("elevation", self.elevation, 0.0, 30_000.0)?;
        check_range("maritime_influence", self.maritime_influence, 0.0, 1.0)?;
        check_range("terrain_roughness", self.terrain_roughness, 0.0, 1.0)?;
        check_range("storm_frequency", self.storm_frequency, 0.0, 1.0)?;
        check_range("storm_intensity", self.storm_intensity, 0.0, 1.0)?;
        check_range("seasonal_extremes", self.seasonal_extremes, 0.0, 1.0)?;
        Ok(())
    }
}

pub(crate) fn check_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), ProfileError> {
    if !value.is_finite() {
        return Err(ProfileError::NonFinite(field));
    }
    if value < min || value > max {
        return Err(ProfileError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}
