//! Multi-region registry
//!
//! [`WeatherEngine`] owns one [`WeatherService`] per region, keyed by an
//! opaque [`SimulationHandle`]. Regions are independent, so
//! [`WeatherEngine::advance_all`] advances them in parallel with rayon while
//! each region still steps strictly hour by hour.

use crate::celestial::{CelestialCalculator, CelestialReading};
use crate::core_types::profile::{ClimateProfile, LatitudeBand};
use crate::core_types::snapshot::WeatherSnapshot;
use crate::core_types::system::WeatherSystem;
use crate::error::{Result, SimulationError};
use crate::simulation::persistence::SimulationState;
use crate::simulation::service::{DiceTable, WeatherMode, WeatherService};
use crate::simulation::{Simulation, SimulationOptions};
use chrono::NaiveDateTime;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Opaque id of a registered region
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimulationHandle(u64);

impl SimulationHandle {
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SimulationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Results of one parallel advance, ordered by handle
pub type BatchAdvance = Vec<(SimulationHandle, Result<Vec<WeatherSnapshot>>)>;

/// Registry of region weather services
#[derive(Debug)]
pub struct WeatherEngine {
    services: FxHashMap<SimulationHandle, WeatherService>,
    options: SimulationOptions,
    next_handle: u64,
}

impl Default for WeatherEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherEngine {
    /// Engine whose simulations use default options
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(SimulationOptions::default())
    }

    /// Engine whose simulations start at `options.start` with `options.config`
    #[must_use]
    pub fn with_options(options: SimulationOptions) -> Self {
        WeatherEngine {
            services: FxHashMap::default(),
            options,
            next_handle: 1,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Registered handles in ascending order
    #[must_use]
    pub fn handles(&self) -> Vec<SimulationHandle> {
        let mut handles: Vec<_> = self.services.keys().copied().collect();
        handles.sort_unstable();
        handles
    }

    fn register(&mut self, service: WeatherService) -> SimulationHandle {
        let handle = SimulationHandle(self.next_handle);
        self.next_handle += 1;
        debug!(%handle, mode = %service.mode(), "region registered");
        self.services.insert(handle, service);
        handle
    }

    /// Build and register a meteorological simulation.
    ///
    /// A malformed profile is rejected and nothing is registered.
    pub fn create_simulation(
        &mut self,
        profile: ClimateProfile,
        seed: u64,
    ) -> Result<SimulationHandle> {
        let simulation = Simulation::with_options(profile, seed, self.options.clone())?;
        Ok(self.register(simulation.into()))
    }

    /// Register a region driven by an external dice table
    pub fn attach_dice_table(&mut self, table: Box<dyn DiceTable>) -> SimulationHandle {
        self.register(WeatherService::DiceTable(table))
    }

    /// Register a simulation continued from a checkpoint
    pub fn restore(&mut self, state: SimulationState) -> Result<SimulationHandle> {
        let simulation = Simulation::restore(state)?;
        Ok(self.register(simulation.into()))
    }

    /// Checkpoint a meteorological region
    pub fn checkpoint(&self, handle: SimulationHandle) -> Result<SimulationState> {
        match self.service(handle)?.as_simulation() {
            Some(simulation) => simulation.checkpoint(),
            None => Err(SimulationError::InvalidArgument(format!(
                "region {handle} is driven by a dice table and has no checkpoint"
            ))),
        }
    }

    /// Unregister a region and hand back its service
    pub fn remove(&mut self, handle: SimulationHandle) -> Result<WeatherService> {
        self.services
            .remove(&handle)
            .ok_or(SimulationError::UnknownHandle(handle.0))
    }

    pub fn mode(&self, handle: SimulationHandle) -> Result<WeatherMode> {
        Ok(self.service(handle)?.mode())
    }

    pub fn service(&self, handle: SimulationHandle) -> Result<&WeatherService> {
        self.services
            .get(&handle)
            .ok_or(SimulationError::UnknownHandle(handle.0))
    }

    fn service_mut(&mut self, handle: SimulationHandle) -> Result<&mut WeatherService> {
        self.services
            .get_mut(&handle)
            .ok_or(SimulationError::UnknownHandle(handle.0))
    }

    /// Advance one region by `hours` hours
    pub fn advance_hours(
        &mut self,
        handle: SimulationHandle,
        hours: u32,
    ) -> Result<Vec<WeatherSnapshot>> {
        self.service_mut(handle)?.advance_hours(hours)
    }

    /// Advance every region by `hours` hours in parallel.
    ///
    /// A failure in one region does not stop the others; each region's
    /// outcome is reported next to its handle.
    pub fn advance_all(&mut self, hours: u32) -> Result<BatchAdvance> {
        if hours == 0 {
            return Err(SimulationError::InvalidArgument(
                "advance_all requires at least one hour".to_string(),
            ));
        }
        let mut results: BatchAdvance = self
            .services
            .par_iter_mut()
            .map(|(handle, service)| (*handle, service.advance_hours(hours)))
            .collect();
        results.sort_unstable_by_key(|(handle, _)| *handle);
        Ok(results)
    }

    /// Latest snapshot of a region
    pub fn current_snapshot(&self, handle: SimulationHandle) -> Result<Option<&WeatherSnapshot>> {
        self.service(handle)?.current_snapshot()
    }

    /// Systems currently crossing a region
    pub fn active_systems(&self, handle: SimulationHandle) -> Result<&[WeatherSystem]> {
        self.service(handle)?.active_systems()
    }

    /// Sun and moon timing; needs no region
    #[must_use]
    pub fn celestial(at: NaiveDateTime, band: LatitudeBand) -> CelestialReading {
        CelestialCalculator::reading(at, band)
    }
}
