//! Shared helpers for the integration tests
#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use tracing_subscriber::EnvFilter;
use weather_sim_core::{Biome, ClimateProfile, Fahrenheit, SpecialFactors};

/// Honour `RUST_LOG` while tests run
#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Mild maritime region: base 70°F, ±15°F, 30°N, sea level
pub fn maritime_profile() -> ClimateProfile {
    ClimateProfile {
        biome: Biome::Coastal,
        base_temp: Fahrenheit::new(70.0),
        temp_variation: 15.0,
        precipitation: 0.4,
        humidity: 0.6,
        windiness: 0.4,
        latitude: 30.0,
        elevation: 0.0,
        maritime_influence: 0.8,
        terrain_roughness: 0.3,
        storm_frequency: 0.5,
        storm_intensity: 0.5,
        seasonal_extremes: 0.5,
        special_factors: SpecialFactors::default(),
    }
}

pub fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}
