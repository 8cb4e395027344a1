//! Simulation checkpoints
//!
//! A [`SimulationState`] captures everything needed to continue a region's
//! weather exactly where it stopped: the random stream position, the active
//! systems, the trend window and the last snapshot. Every completed hour is a
//! valid checkpoint. Storage is up to the caller; this module only encodes
//! and decodes JSON.

use crate::config::EngineConfig;
use crate::core_types::profile::ClimateProfile;
use crate::core_types::snapshot::WeatherSnapshot;
use crate::core_types::system::WeatherSystem;
use crate::error::SimulationError;
use crate::weather::trend::TrendEntry;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Checkpoint format version written by this build
pub const STATE_VERSION: u32 = 1;

/// Serializable simulation checkpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Format version
    pub version: u32,
    pub profile: ClimateProfile,
    pub config: EngineConfig,
    pub seed: u64,
    /// Random values consumed so far
    pub draws: u64,
    /// Id the next spawned system will get
    pub next_id: u32,
    /// Systems spawned since creation
    pub spawned: u64,
    /// Hours simulated since creation
    pub hour: u64,
    /// Simulated time of the current snapshot
    pub clock: NaiveDateTime,
    pub systems: Vec<WeatherSystem>,
    /// Trend window, oldest first
    pub history: Vec<TrendEntry>,
    pub current: WeatherSnapshot,
}

impl SimulationState {
    /// Encode as JSON
    pub fn to_json(&self) -> Result<String, SimulationError> {
        serde_json::to_string(self).map_err(|e| SimulationError::State(e.to_string()))
    }

    /// Encode as indented JSON
    pub fn to_json_pretty(&self) -> Result<String, SimulationError> {
        serde_json::to_string_pretty(self).map_err(|e| SimulationError::State(e.to_string()))
    }

    /// Decode a checkpoint, rejecting other format versions
    pub fn from_json(json: &str) -> Result<Self, SimulationError> {
        let state: SimulationState =
            serde_json::from_str(json).map_err(|e| SimulationError::State(e.to_string()))?;
        if state.version != STATE_VERSION {
            return Err(SimulationError::State(format!(
                "unsupported checkpoint version {} (expected {STATE_VERSION})",
                state.version
            )));
        }
        Ok(state)
    }
}
