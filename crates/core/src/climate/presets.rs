//! Biome climate templates
//!
//! Each template is a complete, valid [`ClimateProfile`] that region data
//! falls back to for any field it leaves unset.
//!
//! # Example
//! ```
//! use weather_sim_core::climate::presets::template;
//! use weather_sim_core::Biome;
//!
//! let desert = template(Biome::Desert);
//! assert!(desert.precipitation < 0.2);
//! assert!(desert.special_factors.high_diurnal_variation);
//! ```

use crate::core_types::profile::{Biome, ClimateProfile, SpecialFactors};
use crate::core_types::units::Fahrenheit;

/// Template profile for a biome
#[must_use]
pub fn template(biome: Biome) -> ClimateProfile {
    match biome {
        Biome::TropicalRainforest => ClimateProfile {
            biome,
            base_temp: Fahrenheit::new(80.0),
            temp_variation: 8.0,
            precipitation: 0.9,
            humidity: 0.85,
            windiness: 0.2,
            latitude: 5.0,
            elevation: 300.0,
            maritime_influence: 0.5,
            terrain_roughness: 0.4,
            storm_frequency: 0.7,
            storm_intensity: 0.6,
            seasonal_extremes: 0.1,
            special_factors: SpecialFactors {
                high_rainfall: true,
                ..SpecialFactors::default()
            },
        },
        Biome::TropicalSavanna => ClimateProfile {
            biome,
            base_temp: Fahrenheit::new(78.0),
            temp_variation: 14.0,
            precipitation: 0.45,
            humidity: 0.5,
            windiness: 0.4,
            latitude: 15.0,
            elevation: 1200.0,
            maritime_influence: 0.2,
            terrain_roughness: 0.2,
            storm_frequency: 0.5,
            storm_intensity: 0.6,
            seasonal_extremes: 0.3,
            special_factors: SpecialFactors {
                monsoon: true,
                dry_season: true,
                ..SpecialFactors::default()
            },
        },
        Biome::Desert => ClimateProfile {
            biome,
            base_temp: Fahrenheit::new(75.0),
            temp_variation: 25.0,
            precipitation: 0.08,
            humidity: 0.15,
            windiness: 0.5,
            latitude: 25.0,
            elevation: 1500.0,
            maritime_influence: 0.05,
            terrain_roughness: 0.3,
            storm_frequency: 0.15,
            storm_intensity: 0.5,
            seasonal_extremes: 0.6,
            special_factors: SpecialFactors {
                high_diurnal_variation: true,
                dry_season: true,
                ..SpecialFactors::default()
            },
        },
        Biome::Mediterranean => ClimateProfile {
            biome,
            base_temp: Fahrenheit::new(62.0),
            temp_variation: 15.0,
            precipitation: 0.35,
            humidity: 0.5,
            windiness: 0.35,
            latitude: 38.0,
            elevation: 400.0,
            maritime_influence: 0.7,
            terrain_roughness: 0.4,
            storm_frequency: 0.3,
            storm_intensity: 0.3,
            seasonal_extremes: 0.4,
            special_factors: SpecialFactors {
                dry_season: true,
                ..SpecialFactors::default()
            },
        },
        Biome::TemperateGrassland => ClimateProfile {
            biome,
            base_temp: Fahrenheit::new(52.0),
            temp_variation: 22.0,
            precipitation: 0.35,
            humidity: 0.45,
            windiness: 0.7,
            latitude: 42.0,
            elevation: 2000.0,
            maritime_influence: 0.1,
            terrain_roughness: 0.1,
            storm_frequency: 0.5,
            storm_intensity: 0.7,
            seasonal_extremes: 0.8,
            special_factors: SpecialFactors::default(),
        },
        Biome::TemperateForest => ClimateProfile {
            biome,
            base_temp: Fahrenheit::new(52.0),
            temp_variation: 18.0,
            precipitation: 0.55,
            humidity: 0.65,
            windiness: 0.35,
            latitude: 45.0,
            elevation: 900.0,
            maritime_influence: 0.35,
            terrain_roughness: 0.45,
            storm_frequency: 0.45,
            storm_intensity: 0.4,
            seasonal_extremes: 0.55,
            special_factors: SpecialFactors::default(),
        },
        Biome::BorealForest => ClimateProfile {
            biome,
            base_temp: Fahrenheit::new(32.0),
            temp_variation: 25.0,
            precipitation: 0.4,
            humidity: 0.6,
            windiness: 0.3,
            latitude: 60.0,
            elevation: 1000.0,
            maritime_influence: 0.15,
            terrain_roughness: 0.4,
            storm_frequency: 0.35,
            storm_intensity: 0.35,
            seasonal_extremes: 0.9,
            special_factors: SpecialFactors::default(),
        },
        Biome::Tundra => ClimateProfile {
            biome,
            base_temp: Fahrenheit::new(15.0),
            temp_variation: 20.0,
            precipitation: 0.2,
            humidity: 0.55,
            windiness: 0.65,
            latitude: 70.0,
            elevation: 600.0,
            maritime_influence: 0.25,
            terrain_roughness: 0.15,
            storm_frequency: 0.35,
            storm_intensity: 0.4,
            seasonal_extremes: 0.8,
            special_factors: SpecialFactors {
                polar_day: true,
                polar_night: true,
                ..SpecialFactors::default()
            },
        },
        Biome::PolarIce => ClimateProfile {
            biome,
            base_temp: Fahrenheit::new(-10.0),
            temp_variation: 18.0,
            precipitation: 0.1,
            humidity: 0.4,
            windiness: 0.8,
            latitude: 80.0,
            elevation: 2500.0,
            maritime_influence: 0.1,
            terrain_roughness: 0.1,
            storm_frequency: 0.3,
            storm_intensity: 0.5,
            seasonal_extremes: 0.9,
            special_factors: SpecialFactors {
                polar_day: true,
                polar_night: true,
                ..SpecialFactors::default()
            },
        },
        Biome::Mountain => ClimateProfile {
            biome,
            base_temp: Fahrenheit::new(45.0),
            temp_variation: 20.0,
            precipitation: 0.55,
            humidity: 0.5,
            windiness: 0.6,
            latitude: 40.0,
            elevation: 8000.0,
            maritime_influence: 0.1,
            terrain_roughness: 0.9,
            storm_frequency: 0.5,
            storm_intensity: 0.55,
            seasonal_extremes: 0.6,
            special_factors: SpecialFactors {
                orographic: true,
                high_diurnal_variation: true,
                ..SpecialFactors::default()
            },
        },
        Biome::Coastal => ClimateProfile {
            biome,
            base_temp: Fahrenheit::new(60.0),
            temp_variation: 12.0,
            precipitation: 0.5,
            humidity: 0.75,
            windiness: 0.55,
            latitude: 40.0,
            elevation: 50.0,
            maritime_influence: 0.95,
            terrain_roughness: 0.15,
            storm_frequency: 0.45,
            storm_intensity: 0.5,
            seasonal_extremes: 0.3,
            special_factors: SpecialFactors {
                fog: true,
                ..SpecialFactors::default()
            },
        },
        Biome::Swamp => ClimateProfile {
            biome,
            base_temp: Fahrenheit::new(70.0),
            temp_variation: 12.0,
            precipitation: 0.7,
            humidity: 0.9,
            windiness: 0.15,
            latitude: 30.0,
            elevation: 20.0,
            maritime_influence: 0.5,
            terrain_roughness: 0.1,
            storm_frequency: 0.55,
            storm_intensity: 0.5,
            seasonal_extremes: 0.35,
            special_factors: SpecialFactors {
                fog: true,
                high_rainfall: true,
                ..SpecialFactors::default()
            },
        },
    }
}
