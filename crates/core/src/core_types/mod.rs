//! Core types and utilities

pub mod profile;
pub mod snapshot;
pub mod system;
pub mod units;

pub use profile::{Biome, ClimateProfile, LatitudeBand, SpecialFactors};
pub use snapshot::{
    Precipitation, PrecipitationType, PressureTendency, WeatherCondition, WeatherSnapshot,
};
pub use system::{WeatherSystem, WeatherSystemKind};
pub use units::*;
