//! Weather source selection
//!
//! A region gets its weather either from the meteorological [`Simulation`]
//! or from an external dice-table generator. [`WeatherService`] holds one of
//! the two and dispatches every call with an explicit `match`.

use crate::core_types::snapshot::WeatherSnapshot;
use crate::core_types::system::WeatherSystem;
use crate::error::{Result, SimulationError};
use crate::simulation::Simulation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which generator drives a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeatherMode {
    DiceTable,
    Meteorological,
}

impl fmt::Display for WeatherMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WeatherMode::DiceTable => "dice-table",
            WeatherMode::Meteorological => "meteorological",
        })
    }
}

/// Table-driven weather generator supplied by the host application.
///
/// Implementations produce snapshots without weather systems; the engine
/// never inspects how they roll.
pub trait DiceTable: Send {
    /// Produce the next `hours` snapshots in order
    fn roll_hours(&mut self, hours: u32) -> Vec<WeatherSnapshot>;

    /// Most recent snapshot, if any hour has been rolled
    fn current(&self) -> Option<&WeatherSnapshot>;
}

/// A region's weather source
pub enum WeatherService {
    DiceTable(Box<dyn DiceTable>),
    Meteorological(Box<Simulation>),
}

impl fmt::Debug for WeatherService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherService::DiceTable(_) => f.write_str("WeatherService::DiceTable(..)"),
            WeatherService::Meteorological(sim) => f
                .debug_tuple("WeatherService::Meteorological")
                .field(sim)
                .finish(),
        }
    }
}

impl From<Simulation> for WeatherService {
    fn from(simulation: Simulation) -> Self {
        WeatherService::Meteorological(Box::new(simulation))
    }
}

impl WeatherService {
    #[must_use]
    pub fn mode(&self) -> WeatherMode {
        match self {
            WeatherService::DiceTable(_) => WeatherMode::DiceTable,
            WeatherService::Meteorological(_) => WeatherMode::Meteorological,
        }
    }

    /// Advance `hours` hours; zero is rejected for both modes and a dice
    /// table must roll exactly `hours` snapshots
    pub fn advance_hours(&mut self, hours: u32) -> Result<Vec<WeatherSnapshot>> {
        match self {
            WeatherService::DiceTable(table) => {
                if hours == 0 {
                    return Err(SimulationError::InvalidArgument(
                        "advance_hours requires at least one hour".to_string(),
                    ));
                }
                let rolled = table.roll_hours(hours);
                if rolled.len() != hours as usize {
                    return Err(SimulationError::State(format!(
                        "dice table rolled {} snapshots for {hours} hours",
                        rolled.len()
                    )));
                }
                Ok(rolled)
            }
            WeatherService::Meteorological(sim) => sim.advance_hours(hours),
        }
    }

    /// Latest snapshot; `None` only for a dice table that has not rolled yet
    pub fn current_snapshot(&self) -> Result<Option<&WeatherSnapshot>> {
        match self {
            WeatherService::DiceTable(table) => Ok(table.current()),
            WeatherService::Meteorological(sim) => sim.current_snapshot().map(Some),
        }
    }

    /// Active systems; always empty for a dice table
    pub fn active_systems(&self) -> Result<&[WeatherSystem]> {
        match self {
            WeatherService::DiceTable(_) => Ok(&[]),
            WeatherService::Meteorological(sim) => sim.active_systems(),
        }
    }

    #[must_use]
    pub fn as_simulation(&self) -> Option<&Simulation> {
        match self {
            WeatherService::DiceTable(_) => None,
            WeatherService::Meteorological(sim) => Some(sim.as_ref()),
        }
    }
}
