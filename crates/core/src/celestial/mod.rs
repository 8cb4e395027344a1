//! Sun and moon timing
//!
//! Everything here is a pure function of the date/time and the latitude band.
//! Sun times come from a monthly reference table for mid-temperate latitudes;
//! other bands stretch or shrink the day length around solar noon. The moon is
//! an idealized synodic cycle counted from a fixed reference new moon.

use crate::core_types::profile::{LatitudeBand, SpecialFactors};
use crate::core_types::units::Percent;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fmt;

/// Mean synodic month in days
pub const SYNODIC_MONTH_DAYS: f64 = 29.530588853;

/// Shift of moonrise/moonset per day of moon age
const MOON_DELAY_MINUTES_PER_DAY: f64 = 50.0;

const MINUTES_PER_DAY: f64 = 1440.0;

/// Sunrise and sunset (minutes after midnight) on the 15th of each month at
/// the temperate reference latitude.
const REFERENCE_SUN_TABLE: [(f64, f64); 12] = [
    (440.0, 1010.0), // Jan 07:20 - 16:50
    (415.0, 1045.0), // Feb 06:55 - 17:25
    (375.0, 1075.0), // Mar 06:15 - 17:55
    (330.0, 1105.0), // Apr 05:30 - 18:25
    (295.0, 1135.0), // May 04:55 - 18:55
    (275.0, 1155.0), // Jun 04:35 - 19:15
    (285.0, 1150.0), // Jul 04:45 - 19:10
    (315.0, 1120.0), // Aug 05:15 - 18:40
    (345.0, 1075.0), // Sep 05:45 - 17:55
    (375.0, 1030.0), // Oct 06:15 - 17:10
    (410.0, 995.0),  // Nov 06:50 - 16:35
    (435.0, 990.0),  // Dec 07:15 - 16:30
];

/// Reference new moon, 2000-01-06 18:14
fn reference_new_moon() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2000, 1, 6)
        .and_then(|d| d.and_hms_opt(18, 14, 0))
        .unwrap_or_default()
}

/// How far the sun is below the horizon at a given moment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TwilightLevel {
    Daylight,
    /// Within 30 minutes of sunrise or sunset
    Civil,
    /// Within 60 minutes
    Nautical,
    /// Within 90 minutes
    Astronomical,
    Night,
}

/// The eight named lunar phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MoonPhase {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    pub const ALL: [MoonPhase; 8] = [
        MoonPhase::NewMoon,
        MoonPhase::WaxingCrescent,
        MoonPhase::FirstQuarter,
        MoonPhase::WaxingGibbous,
        MoonPhase::FullMoon,
        MoonPhase::WaningGibbous,
        MoonPhase::LastQuarter,
        MoonPhase::WaningCrescent,
    ];

    /// Phase for a cycle fraction in [0, 1).
    ///
    /// Buckets are centred on the canonical points (0, 1/8, 2/8, ...), so
    /// New Moon covers both the very start and the very end of a cycle.
    #[must_use]
    pub fn from_fraction(fraction: f64) -> Self {
        let index = (fraction * 8.0 + 0.5).floor() as usize % 8;
        Self::ALL[index]
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            MoonPhase::NewMoon => "New Moon",
            MoonPhase::WaxingCrescent => "Waxing Crescent",
            MoonPhase::FirstQuarter => "First Quarter",
            MoonPhase::WaxingGibbous => "Waxing Gibbous",
            MoonPhase::FullMoon => "Full Moon",
            MoonPhase::WaningGibbous => "Waning Gibbous",
            MoonPhase::LastQuarter => "Last Quarter",
            MoonPhase::WaningCrescent => "Waning Crescent",
        }
    }
}

impl fmt::Display for MoonPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sun and moon state for one moment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialReading {
    /// `None` when the sun does not rise (permanent night or day)
    pub sunrise: Option<NaiveTime>,
    pub sunset: Option<NaiveTime>,
    pub day_length_minutes: u32,
    pub twilight: TwilightLevel,
    pub moon_phase: MoonPhase,
    pub moon_illumination: Percent,
    /// Days since the last new moon
    pub moon_age_days: f64,
    pub moonrise: NaiveTime,
    pub moonset: NaiveTime,
    pub is_permanent_night: bool,
    pub is_permanent_day: bool,
}

impl CelestialReading {
    /// Sunrise as `HH:MM`, or `--` when the sun does not rise
    #[must_use]
    pub fn sunrise_label(&self) -> String {
        time_label(self.sunrise)
    }

    /// Sunset as `HH:MM`, or `--` when the sun does not set
    #[must_use]
    pub fn sunset_label(&self) -> String {
        time_label(self.sunset)
    }
}

fn time_label(time: Option<NaiveTime>) -> String {
    time.map_or_else(|| "--".to_string(), |t| t.format("%H:%M").to_string())
}

/// Stateless sun/moon calculator
pub struct CelestialCalculator;

impl CelestialCalculator {
    /// Reading for a moment in a latitude band
    #[must_use]
    pub fn reading(at: NaiveDateTime, band: LatitudeBand) -> CelestialReading {
        Self::reading_with_factors(at, band, &SpecialFactors::default())
    }

    /// Reading that also honours the `polar_day` / `polar_night` factors,
    /// which force the polar regime in their half of the year regardless of
    /// band.
    #[must_use]
    pub fn reading_with_factors(
        at: NaiveDateTime,
        band: LatitudeBand,
        factors: &SpecialFactors,
    ) -> CelestialReading {
        let month = at.month();
        let dark_months = matches!(month, 11 | 12 | 1);
        let light_months = (5..=7).contains(&month);
        let polar = band == LatitudeBand::Polar;

        let mut day_length = day_length_minutes(at.date(), band);
        let mut permanent_night = day_length <= 0.0;
        let mut permanent_day = day_length >= MINUTES_PER_DAY;
        if dark_months && (polar || factors.polar_night) {
            permanent_night = true;
            permanent_day = false;
        }
        if light_months && (polar || factors.polar_day) {
            permanent_day = true;
            permanent_night = false;
        }
        if permanent_night {
            day_length = 0.0;
        } else if permanent_day {
            day_length = MINUTES_PER_DAY;
        }

        let noon = solar_noon_minutes(at.date());
        let (sunrise, sunset) = if permanent_night || permanent_day {
            (None, None)
        } else {
            let rise = (noon - day_length / 2.0).round();
            (Some(rise), Some(rise + day_length))
        };

        let now = f64::from(at.hour() * 60 + at.minute());
        let twilight = match (sunrise, sunset) {
            _ if permanent_day => TwilightLevel::Daylight,
            (Some(rise), Some(set)) => twilight_level(now, rise, set),
            _ => TwilightLevel::Night,
        };

        let moon_age = moon_age_days(at);
        let fraction = moon_age / SYNODIC_MONTH_DAYS;
        let delay = moon_age * MOON_DELAY_MINUTES_PER_DAY;

        CelestialReading {
            sunrise: sunrise.map(clock),
            sunset: sunset.map(clock),
            day_length_minutes: day_length as u32,
            twilight,
            moon_phase: MoonPhase::from_fraction(fraction),
            moon_illumination: Percent::new((1.0 - (TAU * fraction).cos()) / 2.0 * 100.0),
            moon_age_days: moon_age,
            moonrise: clock(sunrise.unwrap_or(360.0) + delay),
            moonset: clock(sunset.unwrap_or(1080.0) + delay),
            is_permanent_night: permanent_night,
            is_permanent_day: permanent_day,
        }
    }
}

/// Days since the most recent new moon, in [0, synodic month)
#[must_use]
pub fn moon_age_days(at: NaiveDateTime) -> f64 {
    let elapsed = (at - reference_new_moon()).num_seconds() as f64 / 86_400.0;
    elapsed.rem_euclid(SYNODIC_MONTH_DAYS)
}

/// Position in the reference table as a fractional month index, where
/// integer values fall on the 15th.
fn table_position(date: NaiveDate) -> (usize, usize, f64) {
    let i = date.month0() as usize;
    let offset = (f64::from(date.day()) - 15.0) / 30.44;
    if offset >= 0.0 {
        (i, (i + 1) % 12, offset)
    } else {
        ((i + 11) % 12, i, 1.0 + offset)
    }
}

fn interpolate(date: NaiveDate, pick: impl Fn((f64, f64)) -> f64) -> f64 {
    let (a, b, t) = table_position(date);
    let from = pick(REFERENCE_SUN_TABLE[a]);
    let to = pick(REFERENCE_SUN_TABLE[b]);
    from + (to - from) * t
}

fn solar_noon_minutes(date: NaiveDate) -> f64 {
    interpolate(date, |(rise, set)| (rise + set) / 2.0)
}

/// How strongly a band amplifies the seasonal swing in day length
fn band_stretch(band: LatitudeBand) -> f64 {
    match band {
        LatitudeBand::Equatorial => 0.1,
        LatitudeBand::Tropical => 0.45,
        LatitudeBand::Temperate => 1.0,
        LatitudeBand::Subarctic => 1.8,
        LatitudeBand::Polar => 2.6,
    }
}

/// Whole minutes of daylight, clamped to a single day
fn day_length_minutes(date: NaiveDate, band: LatitudeBand) -> f64 {
    let reference = interpolate(date, |(rise, set)| set - rise);
    let half_day = MINUTES_PER_DAY / 2.0;
    (half_day + (reference - half_day) * band_stretch(band))
        .round()
        .clamp(0.0, MINUTES_PER_DAY)
}

fn twilight_level(now: f64, sunrise: f64, sunset: f64) -> TwilightLevel {
    if (sunrise..=sunset).contains(&now) {
        return TwilightLevel::Daylight;
    }
    let gap = if now < sunrise {
        sunrise - now
    } else {
        now - sunset
    };
    if gap <= 30.0 {
        TwilightLevel::Civil
    } else if gap <= 60.0 {
        TwilightLevel::Nautical
    } else if gap <= 90.0 {
        TwilightLevel::Astronomical
    } else {
        TwilightLevel::Night
    }
}

/// Clock time for minutes after midnight, wrapping past 24h
fn clock(minutes: f64) -> NaiveTime {
    let seconds = (minutes.rem_euclid(MINUTES_PER_DAY) * 60.0).round() as u32 % 86_400;
    NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::Duration;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn polar_december_is_permanent_night() {
        let r = CelestialCalculator::reading(at(2024, 12, 21, 12), LatitudeBand::Polar);
        assert!(r.is_permanent_night);
        assert!(!r.is_permanent_day);
        assert_eq!(r.sunrise, None);
        assert_eq!(r.sunrise_label(), "--");
        assert_eq!(r.sunset_label(), "--");
        assert_eq!(r.day_length_minutes, 0);
        assert_eq!(r.twilight, TwilightLevel::Night);
    }

    #[test]
    fn polar_june_is_permanent_day() {
        let r = CelestialCalculator::reading(at(2024, 6, 21, 2), LatitudeBand::Polar);
        assert!(r.is_permanent_day);
        assert_eq!(r.day_length_minutes, 1440);
        assert_eq!(r.twilight, TwilightLevel::Daylight);
    }

    #[test]
    fn polar_factors_force_regime_outside_polar_band() {
        let factors = SpecialFactors {
            polar_night: true,
            ..SpecialFactors::default()
        };
        let dark = CelestialCalculator::reading_with_factors(
            at(2024, 1, 10, 12),
            LatitudeBand::Subarctic,
            &factors,
        );
        assert!(dark.is_permanent_night);
        // outside its half-year the factor has no effect
        let march = CelestialCalculator::reading_with_factors(
            at(2024, 3, 10, 12),
            LatitudeBand::Subarctic,
            &factors,
        );
        assert!(!march.is_permanent_night);
        assert!(march.sunrise.is_some());
    }

    #[test]
    fn polar_day_factor_forces_midnight_sun_in_summer_only() {
        let factors = SpecialFactors {
            polar_day: true,
            ..SpecialFactors::default()
        };
        let june = at(2024, 6, 15, 1);
        let plain = CelestialCalculator::reading(june, LatitudeBand::Temperate);
        let forced =
            CelestialCalculator::reading_with_factors(june, LatitudeBand::Temperate, &factors);
        assert!(!plain.is_permanent_day);
        assert!(forced.is_permanent_day);
        assert_eq!(forced.sunrise, None);
        assert_eq!(forced.day_length_minutes, 1440);
        assert_eq!(forced.twilight, TwilightLevel::Daylight);
        assert_eq!(forced.sunrise_label(), "--");

        let december = at(2024, 12, 15, 12);
        assert_eq!(
            CelestialCalculator::reading_with_factors(december, LatitudeBand::Temperate, &factors),
            CelestialCalculator::reading(december, LatitudeBand::Temperate)
        );
    }

    #[test]
    fn day_length_matches_sun_times() {
        for band in [
            LatitudeBand::Equatorial,
            LatitudeBand::Tropical,
            LatitudeBand::Temperate,
            LatitudeBand::Subarctic,
        ] {
            for month in 1..=12 {
                let r = CelestialCalculator::reading(at(2024, month, 3, 12), band);
                let rise = r.sunrise.unwrap();
                let set = r.sunset.unwrap();
                assert_eq!(
                    (set - rise).num_minutes(),
                    i64::from(r.day_length_minutes),
                    "{band} month {month}"
                );
            }
        }
    }

    #[test]
    fn higher_latitudes_have_longer_summer_days() {
        let june = at(2024, 6, 15, 12);
        let equatorial = CelestialCalculator::reading(june, LatitudeBand::Equatorial);
        let temperate = CelestialCalculator::reading(june, LatitudeBand::Temperate);
        let subarctic = CelestialCalculator::reading(june, LatitudeBand::Subarctic);
        assert!(equatorial.day_length_minutes < temperate.day_length_minutes);
        assert!(temperate.day_length_minutes < subarctic.day_length_minutes);
        assert!((700..=740).contains(&equatorial.day_length_minutes));
    }

    #[test]
    fn twilight_levels_follow_distance_from_sun_events() {
        assert_eq!(twilight_level(720.0, 360.0, 1080.0), TwilightLevel::Daylight);
        assert_eq!(twilight_level(340.0, 360.0, 1080.0), TwilightLevel::Civil);
        assert_eq!(twilight_level(1130.0, 360.0, 1080.0), TwilightLevel::Nautical);
        assert_eq!(twilight_level(280.0, 360.0, 1080.0), TwilightLevel::Astronomical);
        assert_eq!(twilight_level(0.0, 360.0, 1080.0), TwilightLevel::Night);
    }

    #[test]
    fn reference_moment_is_new_moon() {
        let r = CelestialCalculator::reading(reference_new_moon(), LatitudeBand::Temperate);
        assert_eq!(r.moon_phase, MoonPhase::NewMoon);
        assert_relative_eq!(*r.moon_illumination, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn full_moon_halfway_through_cycle() {
        let half = reference_new_moon() + Duration::seconds((SYNODIC_MONTH_DAYS * 43_200.0) as i64);
        let r = CelestialCalculator::reading(half, LatitudeBand::Temperate);
        assert_eq!(r.moon_phase, MoonPhase::FullMoon);
        assert!(*r.moon_illumination > 99.9);
    }

    #[test]
    fn phase_buckets_are_centred() {
        assert_eq!(MoonPhase::from_fraction(0.0), MoonPhase::NewMoon);
        assert_eq!(MoonPhase::from_fraction(0.06), MoonPhase::NewMoon);
        assert_eq!(MoonPhase::from_fraction(0.07), MoonPhase::WaxingCrescent);
        assert_eq!(MoonPhase::from_fraction(0.25), MoonPhase::FirstQuarter);
        assert_eq!(MoonPhase::from_fraction(0.5), MoonPhase::FullMoon);
        assert_eq!(MoonPhase::from_fraction(0.75), MoonPhase::LastQuarter);
        assert_eq!(MoonPhase::from_fraction(0.97), MoonPhase::NewMoon);
    }

    #[test]
    fn moonrise_trails_sunrise_with_moon_age() {
        let start = reference_new_moon() + Duration::days(1);
        let r = CelestialCalculator::reading(start, LatitudeBand::Temperate);
        let sunrise = r.sunrise.unwrap();
        let lag = (r.moonrise - sunrise).num_minutes();
        assert!((45..=60).contains(&lag), "lag {lag}");
    }

    #[test]
    fn clock_wraps_past_midnight() {
        assert_eq!(clock(1500.0), NaiveTime::from_hms_opt(1, 0, 0).unwrap());
        assert_eq!(clock(-60.0), NaiveTime::from_hms_opt(23, 0, 0).unwrap());
    }
}
