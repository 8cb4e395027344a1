//! Rolling trend state
//!
//! Keeps the last `window` hours of pressure and precipitation for one region
//! and derives the hourly pressure trend, the instability index and the
//! decayed precipitation history that feeds back into synthesis as
//! saturation.

use crate::config::TrendConfig;
use crate::core_types::snapshot::PressureTendency;
use crate::core_types::units::{Fahrenheit, Hectopascals, Inches, Percent};
use crate::weather::synthesizer::FieldSample;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One hour of retained history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendEntry {
    pub timestamp: NaiveDateTime,
    pub pressure: Hectopascals,
    pub temperature: Fahrenheit,
    pub precipitation: Inches,
}

/// Trend values derived for the newest hour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendReading {
    /// pressure[t] - pressure[t-1] (hPa/hr); 0 for the first hour
    pub pressure_trend: f64,
    pub tendency: PressureTendency,
    /// Convective potential (0-10)
    pub instability: f64,
    /// Decayed sum of the window's precipitation
    pub recent_precipitation: Inches,
}

/// Convective instability on a 0-10 scale.
///
/// Rises with pressure below standard, with temperature above the climate
/// baseline, with falling pressure and with humidity. Volcanic regions get a
/// flat +1.
#[must_use]
pub fn instability_index(
    pressure: Hectopascals,
    pressure_trend: f64,
    temperature: Fahrenheit,
    baseline: Fahrenheit,
    humidity: Percent,
    volcanic: bool,
) -> f64 {
    let low_pressure = (-pressure.anomaly()).clamp(0.0, 40.0) / 4.0;
    let warm_anomaly = (*temperature - *baseline).clamp(0.0, 20.0) / 2.5;
    let falling = (-pressure_trend).clamp(0.0, 5.0) * 0.6;
    let moisture = humidity.clamped().to_fraction() * 1.5;
    let volcanic = if volcanic { 1.0 } else { 0.0 };
    (low_pressure + warm_anomaly + falling + moisture + volcanic).clamp(0.0, 10.0)
}

/// Bounded history for one region
#[derive(Debug, Clone, PartialEq)]
pub struct TrendTracker {
    config: TrendConfig,
    window: VecDeque<TrendEntry>,
}

impl TrendTracker {
    #[must_use]
    pub fn new(config: TrendConfig) -> Self {
        let capacity = config.window;
        TrendTracker {
            config,
            window: VecDeque::with_capacity(capacity + 1),
        }
    }

    /// Rebuild from checkpointed history, trimming to the window size
    #[must_use]
    pub fn resume(config: TrendConfig, history: Vec<TrendEntry>) -> Self {
        let mut tracker = Self::new(config);
        for entry in history {
            tracker.push(entry);
        }
        tracker
    }

    /// Retained history, oldest first
    pub fn history(&self) -> impl Iterator<Item = &TrendEntry> {
        self.window.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.window.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Most recent pressure, if any hour has been observed
    #[must_use]
    pub fn last_pressure(&self) -> Option<Hectopascals> {
        self.window.back().map(|e| e.pressure)
    }

    /// Decayed precipitation sum over the window (newest weighted 1)
    #[must_use]
    pub fn recent_precipitation(&self) -> Inches {
        let decay = self.config.precipitation_decay;
        let total = self
            .window
            .iter()
            .rev()
            .fold((0.0, 1.0), |(sum, weight), entry| {
                (sum + *entry.precipitation * weight, weight * decay)
            })
            .0;
        Inches::new(total)
    }

    /// Record a new hour and derive its trend values.
    pub fn observe(&mut self, sample: &FieldSample, volcanic: bool) -> TrendReading {
        let pressure_trend = self
            .last_pressure()
            .map_or(0.0, |previous| *sample.pressure - *previous);
        let tendency = PressureTendency::classify(pressure_trend, self.config.tendency_threshold);
        let instability = instability_index(
            sample.pressure,
            pressure_trend,
            sample.temperature,
            sample.baseline_temperature,
            sample.humidity,
            volcanic,
        );

        self.push(TrendEntry {
            timestamp: sample.timestamp,
            pressure: sample.pressure,
            temperature: sample.temperature,
            precipitation: sample.precipitation_amount,
        });

        TrendReading {
            pressure_trend,
            tendency,
            instability,
            recent_precipitation: self.recent_precipitation(),
        }
    }

    fn push(&mut self, entry: TrendEntry) {
        self.window.push_back(entry);
        while self.window.len() > self.config.window {
            self.window.pop_front();
        }
    }
}
