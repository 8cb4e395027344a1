//! Per-region meteorological simulation
//!
//! [`Simulation`] ties the scheduler, synthesizer, trend tracker and
//! celestial calculator into one hour-by-hour pipeline:
//!
//! 1. scheduler ages, moves and retires systems, then may spawn one
//! 2. fields are synthesized from the updated system list
//! 3. the trend tracker folds the new hour into its window
//! 4. the celestial reading is computed for the timestamp
//! 5. the snapshot is assembled and stored as current
//!
//! A simulation is strictly sequential. Separate simulations share nothing
//! and can be advanced on different threads (see [`engine::WeatherEngine`]).

pub mod engine;
pub mod persistence;
pub mod service;

pub use engine::{SimulationHandle, WeatherEngine};
pub use persistence::{SimulationState, STATE_VERSION};
pub use service::{DiceTable, WeatherMode, WeatherService};

use crate::celestial::{CelestialCalculator, CelestialReading};
use crate::config::EngineConfig;
use crate::core_types::profile::{ClimateProfile, LatitudeBand};
use crate::core_types::snapshot::{
    Precipitation, PrecipitationType, WeatherCondition, WeatherSnapshot,
};
use crate::core_types::system::WeatherSystem;
use crate::core_types::units::Inches;
use crate::error::{Result, SimulationError};
use crate::weather::{synthesize, FieldSample, SystemScheduler, TrendReading, TrendTracker};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::{debug, info, trace};

/// Creation options beyond profile and seed
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOptions {
    /// Simulated time of the initial snapshot
    pub start: NaiveDateTime,
    pub config: EngineConfig,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        SimulationOptions {
            start: default_start(),
            config: EngineConfig::default(),
        }
    }
}

/// 2024-01-01 00:00
fn default_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Deterministic hourly weather for one region
#[derive(Debug, Clone)]
pub struct Simulation {
    profile: ClimateProfile,
    config: EngineConfig,
    scheduler: SystemScheduler,
    tracker: TrendTracker,
    hour: u64,
    current: WeatherSnapshot,
    poisoned: bool,
}

impl Simulation {
    /// Create with default options (start 2024-01-01 00:00, default config).
    pub fn create(profile: ClimateProfile, seed: u64) -> Result<Self> {
        Self::with_options(profile, seed, SimulationOptions::default())
    }

    /// Validate inputs, build the pipeline and synthesize the initial hour.
    ///
    /// The initial snapshot has no systems and a zero pressure trend.
    pub fn with_options(
        profile: ClimateProfile,
        seed: u64,
        options: SimulationOptions,
    ) -> Result<Self> {
        let SimulationOptions { start, config } = options;
        config.validate()?;
        let scheduler = SystemScheduler::new(&profile, seed, config.scheduler.clone())?;
        let mut tracker = TrendTracker::new(config.trend.clone());

        let sample = synthesize(&profile, &[], start, Inches::ZERO, &config.synthesis);
        sample.ensure_finite(0)?;
        let reading = tracker.observe(&sample, profile.special_factors.volcanic);
        let current = assemble(&profile, &config, &sample, reading, Vec::new());

        info!(
            biome = %profile.biome,
            seed,
            start = %start,
            "weather simulation created"
        );

        Ok(Simulation {
            profile,
            config,
            scheduler,
            tracker,
            hour: 0,
            current,
            poisoned: false,
        })
    }

    /// Continue from a checkpoint.
    ///
    /// The profile and config are re-validated; the random stream is
    /// re-seeded and fast-forwarded to the recorded draw count, so the
    /// restored simulation produces exactly what the original would have.
    pub fn restore(state: SimulationState) -> Result<Self> {
        if state.version != STATE_VERSION {
            return Err(SimulationError::State(format!(
                "unsupported checkpoint version {}",
                state.version
            )));
        }
        state.profile.validate()?;
        state.config.validate()?;

        let SimulationState {
            profile,
            config,
            seed,
            draws,
            next_id,
            spawned,
            hour,
            clock,
            systems,
            history,
            current,
            ..
        } = state;
        if current.timestamp != clock {
            return Err(SimulationError::State(format!(
                "snapshot time {} does not match clock {clock}",
                current.timestamp
            )));
        }

        let scheduler = SystemScheduler::resume(
            config.scheduler.clone(),
            seed,
            draws,
            systems,
            next_id,
            spawned,
        );
        let tracker = TrendTracker::resume(config.trend.clone(), history);

        info!(biome = %profile.biome, seed, hour, "weather simulation restored");

        Ok(Simulation {
            profile,
            config,
            scheduler,
            tracker,
            hour,
            current,
            poisoned: false,
        })
    }

    /// Capture the current state
    pub fn checkpoint(&self) -> Result<SimulationState> {
        self.ensure_healthy()?;
        Ok(SimulationState {
            version: STATE_VERSION,
            profile: self.profile.clone(),
            config: self.config.clone(),
            seed: self.scheduler.seed(),
            draws: self.scheduler.draws(),
            next_id: self.scheduler.next_id(),
            spawned: self.scheduler.spawned_total(),
            hour: self.hour,
            clock: self.current.timestamp,
            systems: self.scheduler.systems().to_vec(),
            history: self.tracker.history().cloned().collect(),
            current: self.current.clone(),
        })
    }

    /// Simulate `hours` more hours and return their snapshots in order.
    ///
    /// `hours == 0` is rejected without touching state. A non-finite field
    /// poisons the simulation: the error is returned and every later call
    /// fails with [`SimulationError::Poisoned`].
    pub fn advance_hours(&mut self, hours: u32) -> Result<Vec<WeatherSnapshot>> {
        self.ensure_healthy()?;
        if hours == 0 {
            return Err(SimulationError::InvalidArgument(
                "advance_hours requires at least one hour".to_string(),
            ));
        }

        let mut snapshots = Vec::with_capacity(hours as usize);
        for _ in 0..hours {
            match self.step() {
                Ok(snapshot) => snapshots.push(snapshot),
                Err(err) => {
                    self.poisoned = true;
                    debug!(hour = self.hour, error = %err, "weather simulation poisoned");
                    return Err(err);
                }
            }
        }
        Ok(snapshots)
    }

    fn step(&mut self) -> Result<WeatherSnapshot> {
        self.hour += 1;
        let timestamp = self.current.timestamp + Duration::hours(1);

        self.scheduler.step(self.hour, &self.profile);
        let sample = synthesize(
            &self.profile,
            self.scheduler.systems(),
            timestamp,
            self.tracker.recent_precipitation(),
            &self.config.synthesis,
        );
        sample.ensure_finite(self.hour)?;

        let reading = self
            .tracker
            .observe(&sample, self.profile.special_factors.volcanic);
        let snapshot = assemble(
            &self.profile,
            &self.config,
            &sample,
            reading,
            self.scheduler.systems().to_vec(),
        );

        trace!(
            hour = self.hour,
            temperature = %snapshot.temperature,
            pressure = %snapshot.pressure,
            condition = %snapshot.condition,
            "hour simulated"
        );
        self.current = snapshot.clone();
        Ok(snapshot)
    }

    /// Most recent snapshot
    pub fn current_snapshot(&self) -> Result<&WeatherSnapshot> {
        self.ensure_healthy()?;
        Ok(&self.current)
    }

    /// Systems active after the most recent hour
    pub fn active_systems(&self) -> Result<&[WeatherSystem]> {
        self.ensure_healthy()?;
        Ok(self.scheduler.systems())
    }

    /// Sun and moon timing for any moment; independent of simulation state
    #[must_use]
    pub fn celestial(at: NaiveDateTime, band: LatitudeBand) -> CelestialReading {
        CelestialCalculator::reading(at, band)
    }

    #[must_use]
    pub fn profile(&self) -> &ClimateProfile {
        &self.profile
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.scheduler.seed()
    }

    /// Hours simulated since creation
    #[must_use]
    pub fn hour(&self) -> u64 {
        self.hour
    }

    /// Systems spawned since creation
    #[must_use]
    pub fn spawned_total(&self) -> u64 {
        self.scheduler.spawned_total()
    }

    #[must_use]
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    fn ensure_healthy(&self) -> Result<()> {
        if self.poisoned {
            Err(SimulationError::Poisoned)
        } else {
            Ok(())
        }
    }
}

/// Build the snapshot for one hour from its fields and trend reading
fn assemble(
    profile: &ClimateProfile,
    config: &EngineConfig,
    sample: &FieldSample,
    reading: TrendReading,
    systems: Vec<WeatherSystem>,
) -> WeatherSnapshot {
    let kind = PrecipitationType::resolve(
        sample.precipitation_amount,
        sample.temperature,
        reading.instability,
        config.synthesis.hail_instability,
    );
    let precipitation = Precipitation {
        potential: sample.precipitation_potential,
        amount: sample.precipitation_amount,
        kind,
    };
    let condition = WeatherCondition::classify(
        &precipitation,
        sample.cloud_cover,
        sample.humidity,
        sample.wind_speed,
        reading.instability,
    );
    let celestial = CelestialCalculator::reading_with_factors(
        sample.timestamp,
        profile.latitude_band(),
        &profile.special_factors,
    );

    WeatherSnapshot {
        timestamp: sample.timestamp,
        temperature: sample.temperature,
        feels_like: sample.feels_like,
        humidity: sample.humidity,
        pressure: sample.pressure,
        pressure_trend: reading.pressure_trend,
        pressure_tendency: reading.tendency,
        cloud_cover: sample.cloud_cover,
        precipitation,
        wind_speed: sample.wind_speed,
        wind_gust: sample.wind_gust,
        wind_direction: sample.wind_direction,
        instability: reading.instability,
        recent_precipitation: reading.recent_precipitation,
        condition,
        celestial,
        systems,
    }
}
