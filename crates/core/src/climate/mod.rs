//! Region parameters → validated climate profile
//!
//! [`resolve_profile`] is the only place region data is completed with
//! fallbacks. Call it once per region create or edit and hand the result to
//! the simulation.
//!
//! # Fallback policy
//! 1. `biome` is required and selects a [`presets::template`].
//! 2. Each numeric field left unset takes the template's value.
//! 3. `special_factors` entries are applied over the template's factors;
//!    any unknown key is an error.
//! 4. The merged profile is validated before it is returned.

pub mod presets;

use crate::core_types::profile::{Biome, ClimateProfile};
use crate::core_types::units::Fahrenheit;
use crate::error::ProfileError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Loosely specified region climate, as stored by the region layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionParameters {
    pub biome: Option<String>,
    pub base_temp: Option<f64>,
    pub temp_variation: Option<f64>,
    pub precipitation: Option<f64>,
    pub humidity: Option<f64>,
    pub windiness: Option<f64>,
    pub latitude: Option<f64>,
    pub elevation: Option<f64>,
    pub maritime_influence: Option<f64>,
    pub terrain_roughness: Option<f64>,
    pub storm_frequency: Option<f64>,
    pub storm_intensity: Option<f64>,
    pub seasonal_extremes: Option<f64>,
    pub special_factors: BTreeMap<String, bool>,
}

impl RegionParameters {
    /// Parameters naming only a biome
    #[must_use]
    pub fn for_biome(biome: Biome) -> Self {
        RegionParameters {
            biome: Some(biome.as_str().to_string()),
            ..RegionParameters::default()
        }
    }
}

/// Complete region parameters against their biome template and validate.
pub fn resolve_profile(params: &RegionParameters) -> Result<ClimateProfile, ProfileError> {
    let biome: Biome = params
        .biome
        .as_deref()
        .ok_or(ProfileError::MissingField("biome"))?
        .parse()?;
    let template = presets::template(biome);

    let mut special_factors = template.special_factors;
    for (name, &value) in &params.special_factors {
        special_factors.set(name, value)?;
    }

    let profile = ClimateProfile {
        biome,
        base_temp: params
            .base_temp
            .map_or(template.base_temp, Fahrenheit::new),
        temp_variation: params.temp_variation.unwrap_or(template.temp_variation),
        precipitation: params.precipitation.unwrap_or(template.precipitation),
        humidity: params.humidity.unwrap_or(template.humidity),
        windiness: params.windiness.unwrap_or(template.windiness),
        latitude: params.latitude.unwrap_or(template.latitude),
        elevation: params.elevation.unwrap_or(template.elevation),
        maritime_influence: params
            .maritime_influence
            .unwrap_or(template.maritime_influence),
        terrain_roughness: params
            .terrain_roughness
            .unwrap_or(template.terrain_roughness),
        storm_frequency: params.storm_frequency.unwrap_or(template.storm_frequency),
        storm_intensity: params.storm_intensity.unwrap_or(template.storm_intensity),
        seasonal_extremes: params
            .seasonal_extremes
            .unwrap_or(template.seasonal_extremes),
        special_factors,
    };

    profile.validate()?;
    debug!(biome = %biome, "resolved climate profile");
    Ok(profile)
}
