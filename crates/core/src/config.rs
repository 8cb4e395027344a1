//! Tunable engine constants
//!
//! Every threshold the scheduler, synthesizer and tracker use lives here with
//! its default. Configs are plain serde data so a GM tool can ship its own
//! tuning as JSON:
//!
//! ```
//! use weather_sim_core::EngineConfig;
//!
//! let config = EngineConfig::from_json_str(r#"{"scheduler": {"max_concurrent": 2}}"#).unwrap();
//! assert_eq!(config.scheduler.max_concurrent, 2);
//! assert_eq!(config.trend.window, 24);
//! ```

use crate::error::SimulationError;
use serde::{Deserialize, Serialize};

/// Spawn, movement and decay of weather systems
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Maximum simultaneously active systems
    pub max_concurrent: usize,
    /// Hourly spawn probability at `storm_frequency = 1` with no active systems
    pub base_spawn_rate: f64,
    /// Age (hours) after which intensity starts to decay
    pub lifetime_hours: u32,
    /// Fractional intensity loss per hour past the lifetime
    pub decay_per_hour: f64,
    /// Systems at or below this intensity are retired
    pub min_intensity: f64,
    /// Front crossing speed on flat terrain (region fraction per hour)
    pub front_speed: f64,
    /// Pressure cell crossing speed on flat terrain
    pub cell_speed: f64,
    /// Fraction of speed lost at `terrain_roughness = 1`
    pub roughness_drag: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig {
            max_concurrent: 4,
            base_spawn_rate: 0.12,
            lifetime_hours: 24,
            decay_per_hour: 0.02,
            min_intensity: 0.05,
            front_speed: 0.04,
            cell_speed: 0.02,
            roughness_drag: 0.5,
        }
    }
}

/// Field synthesis constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Where along the crossing axis the region's weather is observed
    pub observation_point: f64,
    /// Inverse-distance weight `1 / (1 + falloff * d)`
    pub distance_falloff: f64,
    /// Peak pressure rise of a full-intensity high (hPa)
    pub high_pressure_delta: f64,
    /// Peak pressure drop of a full-intensity low (hPa)
    pub low_pressure_delta: f64,
    /// Transient pressure dip as a front crosses the observation point (hPa)
    pub front_dip: f64,
    /// Half-width of the front passage zone
    pub front_width: f64,
    /// Distance within which a system counts as overhead for wind
    pub overlap_radius: f64,
    /// Temperature lapse (°F per 1000 ft)
    pub lapse_rate: f64,
    /// Potential above which precipitation actually falls
    pub precipitation_threshold: f64,
    /// Precipitation rate at potential 1 (in/hr)
    pub max_precipitation_rate: f64,
    /// Potential damping per inch of recent precipitation
    pub saturation_damping: f64,
    /// Instability at or above which near-freezing precipitation falls as hail
    pub hail_instability: f64,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        SynthesisConfig {
            observation_point: 0.5,
            distance_falloff: 8.0,
            high_pressure_delta: 18.0,
            low_pressure_delta: 22.0,
            front_dip: 6.0,
            front_width: 0.05,
            overlap_radius: 0.15,
            lapse_rate: 3.5,
            precipitation_threshold: 0.5,
            max_precipitation_rate: 0.35,
            saturation_damping: 0.5,
            hail_instability: 7.0,
        }
    }
}

/// Rolling trend window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    /// Hours retained
    pub window: usize,
    /// |trend| above this is Rising/Falling (hPa/hr)
    pub tendency_threshold: f64,
    /// Per-hour retention of the precipitation history
    pub precipitation_decay: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        TrendConfig {
            window: 24,
            tendency_threshold: 0.5,
            precipitation_decay: 0.9,
        }
    }
}

/// Full engine configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub scheduler: SchedulerConfig,
    pub synthesis: SynthesisConfig,
    pub trend: TrendConfig,
}

impl EngineConfig {
    /// Parse a (possibly partial) JSON config; unset keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, SimulationError> {
        let config: EngineConfig = serde_json::from_str(json)
            .map_err(|e| SimulationError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the engine cannot run with.
    pub fn validate(&self) -> Result<(), SimulationError> {
        let s = &self.scheduler;
        let y = &self.synthesis;
        let t = &self.trend;

        let unit_checks = [
            ("scheduler.base_spawn_rate", s.base_spawn_rate),
            ("scheduler.decay_per_hour", s.decay_per_hour),
            ("scheduler.min_intensity", s.min_intensity),
            ("scheduler.front_speed", s.front_speed),
            ("scheduler.cell_speed", s.cell_speed),
            ("scheduler.roughness_drag", s.roughness_drag),
            ("synthesis.observation_point", y.observation_point),
            ("synthesis.front_width", y.front_width),
            ("synthesis.overlap_radius", y.overlap_radius),
            ("synthesis.precipitation_threshold", y.precipitation_threshold),
            ("trend.precipitation_decay", t.precipitation_decay),
        ];
        for (name, value) in unit_checks {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(SimulationError::InvalidConfig(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }

        let non_negative = [
            ("synthesis.distance_falloff", y.distance_falloff),
            ("synthesis.high_pressure_delta", y.high_pressure_delta),
            ("synthesis.low_pressure_delta", y.low_pressure_delta),
            ("synthesis.front_dip", y.front_dip),
            ("synthesis.lapse_rate", y.lapse_rate),
            ("synthesis.max_precipitation_rate", y.max_precipitation_rate),
            ("synthesis.saturation_damping", y.saturation_damping),
            ("synthesis.hail_instability", y.hail_instability),
            ("trend.tendency_threshold", t.tendency_threshold),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(SimulationError::InvalidConfig(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }

        if s.max_concurrent == 0 {
            return Err(SimulationError::InvalidConfig(
                "scheduler.max_concurrent must be at least 1".to_string(),
            ));
        }
        if y.front_width == 0.0 {
            return Err(SimulationError::InvalidConfig(
                "synthesis.front_width must be positive".to_string(),
            ));
        }
        if y.precipitation_threshold >= 1.0 {
            return Err(SimulationError::InvalidConfig(
                "synthesis.precipitation_threshold must be below 1".to_string(),
            ));
        }
        if t.window < 2 {
            return Err(SimulationError::InvalidConfig(format!(
                "trend.window must hold at least 2 hours, got {}",
                t.window
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(EngineConfig::default().validate(), Ok(()));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config =
            EngineConfig::from_json_str(r#"{"synthesis": {"precipitation_threshold": 0.6}}"#)
                .unwrap();
        assert_eq!(config.synthesis.precipitation_threshold, 0.6);
        assert_eq!(config.synthesis.lapse_rate, 3.5);
        assert_eq!(config.scheduler, SchedulerConfig::default());
    }

    #[test]
    fn rejects_bad_values() {
        let mut config = EngineConfig::default();
        config.scheduler.max_concurrent = 0;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.trend.window = 1;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.scheduler.decay_per_hour = 1.5;
        assert!(config.validate().is_err());

        assert!(EngineConfig::from_json_str("{not json").is_err());
    }
}
