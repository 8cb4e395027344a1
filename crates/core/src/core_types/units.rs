//! Semantic unit types for the hourly weather fields
//!
//! Newtype wrappers keep temperatures, pressures, wind speeds and percentages
//! from being mixed up as they flow from the synthesizer into snapshots.
//!
//! # Design Philosophy
//! - All quantities are f64; snapshots must be bit-for-bit reproducible
//! - `Deref` to the raw value for arithmetic (`*snapshot.humidity`)
//! - Total ordering via `Ord` (NaN ordered after all values)
//! - Serde transparent, so persisted snapshots read as plain numbers
//!
//! # Usage
//! ```
//! use weather_sim_core::core_types::units::{Fahrenheit, Percent};
//!
//! let t = Fahrenheit::new(68.0);
//! assert!((t.to_celsius() - 20.0).abs() < 1e-9);
//!
//! let humidity = Percent::new(140.0).clamped();
//! assert_eq!(*humidity, 100.0);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Deref, Sub};

/// Shared trait impls for every f64 unit newtype.
macro_rules! unit_newtype {
    ($name:ident, $suffix:literal) => {
        impl Eq for $name {}

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.0.total_cmp(&other.0)
            }
        }

        impl Deref for $name {
            type Target = f64;
            #[inline]
            fn deref(&self) -> &f64 {
                &self.0
            }
        }

        impl From<f64> for $name {
            fn from(v: f64) -> Self {
                $name(v)
            }
        }

        impl From<$name> for f64 {
            fn from(v: $name) -> f64 {
                v.0
            }
        }

        impl Add for $name {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                $name(self.0 + rhs.0)
            }
        }

        impl Sub for $name {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                $name(self.0 - rhs.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if let Some(precision) = f.precision() {
                    write!(f, "{:.*}{}", precision, self.0, $suffix)
                } else {
                    write!(f, "{}{}", self.0, $suffix)
                }
            }
        }
    };
}

// ============================================================================
// TEMPERATURE
// ============================================================================

/// Air temperature in degrees Fahrenheit
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Fahrenheit(f64);

unit_newtype!(Fahrenheit, "°F");

impl Fahrenheit {
    /// Water freezing point
    pub const FREEZING: Fahrenheit = Fahrenheit(32.0);

    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Fahrenheit(value)
    }

    /// Convert to degrees Celsius
    #[inline]
    #[must_use]
    pub fn to_celsius(self) -> f64 {
        (self.0 - 32.0) * 5.0 / 9.0
    }

    /// True below the freezing point
    #[inline]
    #[must_use]
    pub fn is_freezing(self) -> bool {
        self.0 < Self::FREEZING.0
    }
}

// ============================================================================
// PRESSURE
// ============================================================================

/// Sea-level pressure in hectopascals (millibars)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Hectopascals(f64);

unit_newtype!(Hectopascals, " hPa");

impl Hectopascals {
    /// ICAO standard sea-level pressure
    pub const STANDARD: Hectopascals = Hectopascals(1013.25);

    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Hectopascals(value)
    }

    /// Signed departure from standard pressure
    #[inline]
    #[must_use]
    pub fn anomaly(self) -> f64 {
        self.0 - Self::STANDARD.0
    }
}

// ============================================================================
// SPEED / ANGLE / DEPTH
// ============================================================================

/// Wind speed in miles per hour
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct MilesPerHour(f64);

unit_newtype!(MilesPerHour, " mph");

impl MilesPerHour {
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        MilesPerHour(value)
    }
}

/// Compass bearing in degrees (0 = North, 90 = East), wind blowing *from*
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Degrees(f64);

unit_newtype!(Degrees, "°");

impl Degrees {
    /// Create a bearing, normalized into [0, 360)
    #[inline]
    #[must_use]
    pub fn new(value: f64) -> Self {
        // rem_euclid rounds tiny negatives up to exactly 360
        let wrapped = value.rem_euclid(360.0);
        Degrees(if wrapped >= 360.0 { 0.0 } else { wrapped })
    }

    /// Convert to radians
    #[inline]
    #[must_use]
    pub fn to_radians(self) -> f64 {
        self.0.to_radians()
    }

    /// 16-point compass label
    #[must_use]
    pub fn cardinal(self) -> &'static str {
        const POINTS: [&str; 16] = [
            "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W",
            "WNW", "NW", "NNW",
        ];
        let index = ((self.0 / 22.5) + 0.5).floor() as usize % POINTS.len();
        POINTS[index]
    }
}

/// Liquid-equivalent precipitation depth in inches
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Inches(f64);

unit_newtype!(Inches, " in");

impl Inches {
    pub const ZERO: Inches = Inches(0.0);

    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Inches(value)
    }
}

// ============================================================================
// PERCENT
// ============================================================================

/// Percentage (0-100 for humidity and cloud cover)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Percent(f64);

unit_newtype!(Percent, "%");

impl Percent {
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Percent(value)
    }

    /// Build from a 0-1 fraction
    #[inline]
    #[must_use]
    pub fn from_fraction(fraction: f64) -> Self {
        Percent(fraction * 100.0)
    }

    /// Convert to a 0-1 fraction
    #[inline]
    #[must_use]
    pub fn to_fraction(self) -> f64 {
        self.0 / 100.0
    }

    /// Clamp into [0, 100]
    #[inline]
    #[must_use]
    pub fn clamped(self) -> Self {
        Percent(self.0.clamp(0.0, 100.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degrees_normalize_and_label() {
        assert_eq!(*Degrees::new(-90.0), 270.0);
        assert_eq!(*Degrees::new(720.0), 0.0);
        assert_eq!(Degrees::new(0.0).cardinal(), "N");
        assert_eq!(Degrees::new(350.0).cardinal(), "N");
        assert_eq!(Degrees::new(225.0).cardinal(), "SW");
        assert_eq!(Degrees::new(100.0).cardinal(), "E");
    }

    #[test]
    fn degrees_to_radians_wraps_first() {
        assert!((Degrees::new(90.0).to_radians() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!((Degrees::new(450.0).to_radians() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn pressure_anomaly_is_signed() {
        assert!(Hectopascals::new(1000.0).anomaly() < 0.0);
        assert_eq!(Hectopascals::STANDARD.anomaly(), 0.0);
    }

    #[test]
    fn percent_clamps_and_converts() {
        assert_eq!(*Percent::new(-3.0).clamped(), 0.0);
        assert_eq!(Percent::from_fraction(0.25), Percent::new(25.0));
        assert!((Percent::new(40.0).to_fraction() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn display_honours_precision() {
        assert_eq!(format!("{:.1}", Fahrenheit::new(71.26)), "71.3°F");
        assert_eq!(format!("{:.0}", MilesPerHour::new(12.4)), "12 mph");
    }

    #[test]
    fn freezing_threshold() {
        assert!(Fahrenheit::new(31.9).is_freezing());
        assert!(!Fahrenheit::new(32.0).is_freezing());
    }
}
