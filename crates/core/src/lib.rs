//! Regional Weather Simulation Core
//!
//! Deterministic hour-by-hour weather for fictional game regions. A region's
//! static [`ClimateProfile`] is perturbed by a population of moving, aging
//! pressure cells and fronts; their combined influence yields the hour's
//! temperature, humidity, pressure, cloud, precipitation and wind, plus the
//! pressure trend, an instability index and sun/moon timing.
//!
//! ## Pipeline (per hour)
//!
//! - [`weather::SystemScheduler`] advances and spawns systems (the only random
//!   source, seeded per region)
//! - [`weather::synthesize`] turns profile + systems + time into fields
//! - [`weather::TrendTracker`] derives trend, instability and saturation
//! - [`celestial::CelestialCalculator`] adds sun and moon timing
//!
//! ## Example
//!
//! ```
//! use weather_sim_core::{resolve_profile, Biome, RegionParameters, Simulation};
//!
//! let profile = resolve_profile(&RegionParameters::for_biome(Biome::Coastal)).unwrap();
//! let mut sim = Simulation::create(profile, 42).unwrap();
//! let day = sim.advance_hours(24).unwrap();
//! assert_eq!(day.len(), 24);
//! ```

// Core types and utilities
pub mod core_types;

pub mod celestial;
pub mod climate;
pub mod config;
pub mod error;
pub mod simulation;
pub mod weather;

// Re-export core types
pub use core_types::{
    Biome, ClimateProfile, LatitudeBand, Precipitation, PrecipitationType, PressureTendency,
    SpecialFactors, WeatherCondition, WeatherSnapshot, WeatherSystem, WeatherSystemKind,
};
pub use core_types::{Degrees, Fahrenheit, Hectopascals, Inches, MilesPerHour, Percent};

pub use celestial::{CelestialCalculator, CelestialReading, MoonPhase, TwilightLevel};
pub use climate::{resolve_profile, RegionParameters};
pub use config::{EngineConfig, SchedulerConfig, SynthesisConfig, TrendConfig};
pub use error::{ProfileError, SimulationError};
pub use simulation::{
    DiceTable, Simulation, SimulationHandle, SimulationOptions, SimulationState, WeatherEngine,
    WeatherMode, WeatherService,
};
