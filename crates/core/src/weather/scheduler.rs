//! Weather system lifecycle
//!
//! The scheduler owns a region's active pressure cells and fronts. Each
//! simulated hour it ages and moves every system, decays old ones, retires
//! those that have crossed the region or faded out, and may spawn a new one.
//!
//! All randomness in the engine is confined to this module: one draw per hour
//! for the spawn check, plus two more (kind, intensity) when a system spawns.

use crate::config::SchedulerConfig;
use crate::core_types::profile::ClimateProfile;
use crate::core_types::system::{WeatherSystem, WeatherSystemKind};
use crate::error::SimulationError;
use crate::weather::rng::SeededRng;
use tracing::{debug, trace};

/// Active system set for one region
#[derive(Debug, Clone)]
pub struct SystemScheduler {
    config: SchedulerConfig,
    rng: SeededRng,
    systems: Vec<WeatherSystem>,
    next_id: u32,
    spawned: u64,
}

impl SystemScheduler {
    /// Create an empty scheduler.
    ///
    /// The profile is validated first so no system is ever built from
    /// malformed input.
    pub fn new(
        profile: &ClimateProfile,
        seed: u64,
        config: SchedulerConfig,
    ) -> Result<Self, SimulationError> {
        profile.validate()?;
        Ok(SystemScheduler {
            config,
            rng: SeededRng::new(seed),
            systems: Vec::new(),
            next_id: 1,
            spawned: 0,
        })
    }

    /// Rebuild a scheduler from checkpointed parts
    pub(crate) fn resume(
        config: SchedulerConfig,
        seed: u64,
        draws: u64,
        systems: Vec<WeatherSystem>,
        next_id: u32,
        spawned: u64,
    ) -> Self {
        SystemScheduler {
            config,
            rng: SeededRng::resume(seed, draws),
            systems,
            next_id,
            spawned,
        }
    }

    /// Active systems in spawn order
    #[must_use]
    pub fn systems(&self) -> &[WeatherSystem] {
        &self.systems
    }

    #[cfg(test)]
    pub(crate) fn systems_mut(&mut self) -> &mut Vec<WeatherSystem> {
        &mut self.systems
    }

    /// Total systems spawned since creation
    #[must_use]
    pub fn spawned_total(&self) -> u64 {
        self.spawned
    }

    pub(crate) fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub(crate) fn draws(&self) -> u64 {
        self.rng.draws()
    }

    pub(crate) fn next_id(&self) -> u32 {
        self.next_id
    }

    /// Advance then maybe spawn; the full per-hour lifecycle step.
    pub fn step(&mut self, hour: u64, profile: &ClimateProfile) -> Option<u32> {
        self.advance(hour, profile);
        self.maybe_spawn(hour, profile)
    }

    /// Age, move and decay every system, then retire finished ones.
    ///
    /// Returns the ids retired this hour.
    pub fn advance(&mut self, hour: u64, profile: &ClimateProfile) -> Vec<u32> {
        let config = &self.config;
        for system in &mut self.systems {
            system.age += 1;
            system.position += crossing_speed(config, system.kind, profile.terrain_roughness);
            if system.age > config.lifetime_hours {
                system.intensity *= 1.0 - config.decay_per_hour;
            }
        }

        let min_intensity = config.min_intensity;
        let mut retired = Vec::new();
        self.systems.retain(|system| {
            let done = system.position >= 1.0 || system.intensity <= min_intensity;
            if done {
                debug!(
                    hour,
                    id = system.id,
                    kind = %system.kind,
                    age = system.age,
                    "weather system retired"
                );
                retired.push(system.id);
            }
            !done
        });

        trace!(hour, active = self.systems.len(), "systems advanced");
        retired
    }

    /// Hourly spawn probability for the current active count
    #[must_use]
    pub fn spawn_probability(&self, profile: &ClimateProfile) -> f64 {
        let max = self.config.max_concurrent;
        let active = self.systems.len();
        if active >= max {
            return 0.0;
        }
        let headroom = 1.0 - active as f64 / max as f64;
        self.config.base_spawn_rate * profile.storm_frequency * headroom
    }

    /// Draw against the spawn probability; spawn a new system at the
    /// region edge on success and return its id.
    pub fn maybe_spawn(&mut self, hour: u64, profile: &ClimateProfile) -> Option<u32> {
        let probability = self.spawn_probability(profile);
        let draw = self.rng.next_unit();
        if draw >= probability {
            return None;
        }

        let kind = choose_kind(profile.storm_intensity, self.rng.next_unit());
        let intensity_draw = self.rng.next_unit();
        let intensity =
            (0.25 + intensity_draw * (0.35 + 0.4 * profile.storm_intensity)).min(1.0);

        let id = self.next_id;
        self.next_id += 1;
        self.spawned += 1;
        self.systems.push(WeatherSystem::new(id, kind, intensity));

        debug!(hour, id, kind = %kind, intensity, "weather system spawned");
        Some(id)
    }
}

/// Region-fraction moved per hour.
///
/// Fronts are quick on open ground and lose the most speed to rough terrain;
/// pressure cells drift slower and feel terrain half as much.
fn crossing_speed(config: &SchedulerConfig, kind: WeatherSystemKind, roughness: f64) -> f64 {
    match kind {
        WeatherSystemKind::ColdFront => {
            config.front_speed * (1.0 - config.roughness_drag * roughness)
        }
        WeatherSystemKind::WarmFront => {
            0.75 * config.front_speed * (1.0 - config.roughness_drag * roughness)
        }
        WeatherSystemKind::LowPressure => {
            1.2 * config.cell_speed * (1.0 - 0.5 * config.roughness_drag * roughness)
        }
        WeatherSystemKind::HighPressure => {
            config.cell_speed * (1.0 - 0.5 * config.roughness_drag * roughness)
        }
    }
}

/// Relative spawn weights: calm climates favour pressure cells, stormy
/// ones favour fronts.
fn kind_weights(storm_intensity: f64) -> [(WeatherSystemKind, f64); 4] {
    let calm = 1.0 - storm_intensity;
    [
        (WeatherSystemKind::HighPressure, 0.15 + 0.45 * calm),
        (WeatherSystemKind::LowPressure, 0.2 + 0.2 * storm_intensity),
        (WeatherSystemKind::ColdFront, 0.05 + 0.35 * storm_intensity),
        (WeatherSystemKind::WarmFront, 0.05 + 0.25 * storm_intensity),
    ]
}

fn choose_kind(storm_intensity: f64, draw: f64) -> WeatherSystemKind {
    let weights = kind_weights(storm_intensity);
    let total: f64 = weights.iter().map(|(_, w)| w).sum();
    let mut target = draw * total;
    for (kind, weight) in weights {
        if target < weight {
            return kind;
        }
        target -= weight;
    }
    WeatherSystemKind::WarmFront
}
