//! Moving pressure cells and fronts

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of weather system, determining movement speed and field influence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeatherSystemKind {
    /// Anticyclone: raises pressure, clears skies
    HighPressure,
    /// Cyclone: lowers pressure, brings cloud and rain
    LowPressure,
    /// Sharp cooling, gusty showers on passage
    ColdFront,
    /// Gradual warming, steady rain ahead of passage
    WarmFront,
}

impl WeatherSystemKind {
    #[must_use]
    pub const fn is_front(&self) -> bool {
        matches!(self, Self::ColdFront | Self::WarmFront)
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::HighPressure => "high-pressure",
            Self::LowPressure => "low-pressure",
            Self::ColdFront => "cold-front",
            Self::WarmFront => "warm-front",
        }
    }
}

impl fmt::Display for WeatherSystemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One active pressure cell or front crossing a region.
///
/// Created and mutated only by [`crate::weather::SystemScheduler`]; consumers
/// see it through shared borrows or cloned snapshot lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSystem {
    pub(crate) id: u32,
    pub(crate) kind: WeatherSystemKind,
    /// Strength (0-1)
    pub(crate) intensity: f64,
    /// Hours since spawn
    pub(crate) age: u32,
    /// Progress across the region (0 = entering, 1 = gone)
    pub(crate) position: f64,
}

impl WeatherSystem {
    pub(crate) fn new(id: u32, kind: WeatherSystemKind, intensity: f64) -> Self {
        WeatherSystem {
            id,
            kind,
            intensity,
            age: 0,
            position: 0.0,
        }
    }

    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> WeatherSystemKind {
        self.kind
    }

    #[must_use]
    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    #[must_use]
    pub fn age(&self) -> u32 {
        self.age
    }

    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Distance from an observation point along the crossing axis
    #[must_use]
    pub fn distance_to(&self, point: f64) -> f64 {
        (self.position - point).abs()
    }

    /// True once the system's leading edge has passed `point`
    #[must_use]
    pub fn has_passed(&self, point: f64) -> bool {
        self.position > point
    }
}
