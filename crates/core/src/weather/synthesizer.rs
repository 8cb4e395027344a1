//! Field synthesis
//!
//! Combines a region's climate profile with its active weather systems into
//! the hour's temperature, humidity, pressure, cloud, precipitation and wind
//! fields. [`synthesize`] is a pure function: the same inputs always give the
//! same [`FieldSample`], and nothing here draws random numbers.
//!
//! # Model
//!
//! Each system acts on a fixed observation point on its crossing axis. Two
//! weights describe that influence:
//!
//! ```text
//! w = 1 / (1 + falloff × d)          broad inverse-distance weight
//! g = exp(-(d / front_width)²)       sharp front-passage weight
//! ```
//!
//! where `d = |position - observation_point|`. Pressure cells act through `w`,
//! fronts add a transient pressure dip through `g` and their cloud/rain band
//! through a three-times-wider version of `g`.

use crate::config::SynthesisConfig;
use crate::core_types::profile::ClimateProfile;
use crate::core_types::system::{WeatherSystem, WeatherSystemKind};
use crate::core_types::units::{Degrees, Fahrenheit, Hectopascals, Inches, MilesPerHour, Percent};
use crate::error::SimulationError;
use chrono::{Datelike, NaiveDateTime, Timelike};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Raw fields for one hour, before trend tracking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSample {
    pub timestamp: NaiveDateTime,
    pub temperature: Fahrenheit,
    /// Temperature the climate alone would give at this hour (no systems)
    pub baseline_temperature: Fahrenheit,
    pub feels_like: Fahrenheit,
    pub humidity: Percent,
    pub pressure: Hectopascals,
    pub cloud_cover: Percent,
    /// Combined precipitation potential (0-1)
    pub precipitation_potential: f64,
    pub precipitation_amount: Inches,
    pub wind_speed: MilesPerHour,
    pub wind_gust: MilesPerHour,
    pub wind_direction: Degrees,
}

impl FieldSample {
    /// Fail on the first NaN/infinite field.
    ///
    /// A non-finite field means a system or profile value was corrupted; the
    /// caller treats this as fatal for the simulation instance.
    pub fn ensure_finite(&self, hour: u64) -> Result<(), SimulationError> {
        let fields = [
            ("temperature", *self.temperature),
            ("baseline_temperature", *self.baseline_temperature),
            ("feels_like", *self.feels_like),
            ("humidity", *self.humidity),
            ("pressure", *self.pressure),
            ("cloud_cover", *self.cloud_cover),
            ("precipitation_potential", self.precipitation_potential),
            ("precipitation_amount", *self.precipitation_amount),
            ("wind_speed", *self.wind_speed),
            ("wind_gust", *self.wind_gust),
            ("wind_direction", *self.wind_direction),
        ];
        match fields.iter().find(|(_, v)| !v.is_finite()) {
            Some(&(field, _)) => Err(SimulationError::NonFinite { field, hour }),
            None => Ok(()),
        }
    }
}

/// Per-system influence at the observation point
struct Influence<'a> {
    system: &'a WeatherSystem,
    /// Broad inverse-distance weight, scaled by intensity
    broad: f64,
    /// Front passage weight, scaled by intensity
    passage: f64,
    /// Wide front band weight, scaled by intensity
    band: f64,
    passed: bool,
    distance: f64,
}

impl<'a> Influence<'a> {
    fn new(system: &'a WeatherSystem, config: &SynthesisConfig) -> Self {
        let d = system.distance_to(config.observation_point);
        let i = system.intensity();
        Influence {
            system,
            broad: i / (1.0 + config.distance_falloff * d),
            passage: i * (-(d / config.front_width).powi(2)).exp(),
            band: i * (-(d / (3.0 * config.front_width)).powi(2)).exp(),
            passed: system.has_passed(config.observation_point),
            distance: d,
        }
    }
}

/// Synthesize the hour's fields.
///
/// # Arguments
/// * `profile` - Region climate
/// * `systems` - Active systems after this hour's scheduler step
/// * `timestamp` - Simulated local time
/// * `recent_precipitation` - Decayed precipitation history (saturation)
/// * `config` - Synthesis constants
#[must_use]
pub fn synthesize(
    profile: &ClimateProfile,
    systems: &[WeatherSystem],
    timestamp: NaiveDateTime,
    recent_precipitation: Inches,
    config: &SynthesisConfig,
) -> FieldSample {
    let factors = &profile.special_factors;
    let hour = f64::from(timestamp.hour()) + f64::from(timestamp.minute()) / 60.0;
    let month = timestamp.month();
    let maritime = profile.maritime_influence;
    let roughness = profile.terrain_roughness;

    let wet_season = factors.monsoon && (6..=9).contains(&month);
    let dry_season = factors.dry_season && !(5..=10).contains(&month);
    let foggy_morning = factors.fog && hour < 10.0;

    let influences: Vec<Influence<'_>> = systems.iter().map(|s| Influence::new(s, config)).collect();

    // --- Temperature -------------------------------------------------------
    let diurnal_shape = diurnal_curve(hour);
    let mut diurnal_amp = 0.5 * profile.temp_variation * (1.0 - 0.5 * maritime);
    if factors.high_diurnal_variation {
        diurnal_amp *= 1.5;
    }
    let mut diurnal = diurnal_amp * diurnal_shape;
    if factors.valley && diurnal < 0.0 {
        // cold-air pooling overnight
        diurnal *= 1.3;
    }

    let latitude_factor = (profile.latitude / 60.0).clamp(0.1, 1.2);
    let seasonal_amp = profile.temp_variation
        * (0.5 + profile.seasonal_extremes)
        * (1.0 - 0.6 * maritime)
        * latitude_factor;
    let seasonal = seasonal_amp * seasonal_curve(f64::from(timestamp.ordinal()));
    let lapse = -config.lapse_rate * profile.elevation / 1000.0;
    let baseline = *profile.base_temp + diurnal + seasonal + lapse;

    let system_temp: f64 = influences
        .iter()
        .map(|inf| match (inf.system.kind(), inf.passed) {
            (WeatherSystemKind::ColdFront, true) => -10.0 * inf.broad,
            (WeatherSystemKind::ColdFront, false) => inf.broad,
            (WeatherSystemKind::WarmFront, true) => 6.0 * inf.broad,
            (WeatherSystemKind::WarmFront, false) => -inf.broad,
            (WeatherSystemKind::HighPressure, _) => 2.0 * inf.broad,
            (WeatherSystemKind::LowPressure, _) => -3.0 * inf.broad,
        })
        .sum();
    let system_cap = 0.4 * profile.temp_variation * (1.0 - 0.5 * maritime);
    let system_temp = (system_temp * (1.0 - 0.5 * maritime)).clamp(-system_cap, system_cap);
    let temperature = baseline + system_temp;

    // --- Pressure ----------------------------------------------------------
    let pressure_delta: f64 = influences
        .iter()
        .map(|inf| match inf.system.kind() {
            WeatherSystemKind::HighPressure => config.high_pressure_delta * inf.broad,
            WeatherSystemKind::LowPressure => -config.low_pressure_delta * inf.broad,
            WeatherSystemKind::ColdFront => {
                let ridge = if inf.passed {
                    0.3 * config.high_pressure_delta * inf.broad
                } else {
                    0.0
                };
                ridge - config.front_dip * inf.passage
            }
            WeatherSystemKind::WarmFront => -config.front_dip * inf.passage,
        })
        .sum();
    let pressure = *Hectopascals::STANDARD + pressure_delta;

    // --- Moisture ----------------------------------------------------------
    let (system_humidity, system_cloud, system_potential) = influences.iter().fold(
        (0.0, 0.0, 0.0),
        |(h, c, p), inf| match inf.system.kind() {
            WeatherSystemKind::LowPressure => {
                (h + 20.0 * inf.broad, c + 45.0 * inf.broad, p + 0.55 * inf.broad)
            }
            WeatherSystemKind::ColdFront | WeatherSystemKind::WarmFront => {
                (h + 25.0 * inf.band, c + 55.0 * inf.band, p + 0.8 * inf.band)
            }
            WeatherSystemKind::HighPressure => {
                (h - 15.0 * inf.broad, c - 35.0 * inf.broad, p - 0.3 * inf.broad)
            }
        },
    );
    let maritime_scale = 0.75 + 0.5 * maritime;

    let mut humidity = profile.humidity * 100.0 + 10.0 * maritime - 10.0 * diurnal_shape;
    humidity += system_humidity * maritime_scale;
    if wet_season {
        humidity += 15.0;
    }
    if factors.high_rainfall {
        humidity += 8.0;
    }
    if dry_season {
        humidity -= 15.0;
    }
    if foggy_morning {
        humidity += 15.0;
    }
    let humidity = humidity.clamp(0.0, 100.0);

    let mut cloud = 15.0 + 45.0 * profile.precipitation + 20.0 * (profile.humidity - 0.5);
    cloud += system_cloud * maritime_scale;
    if wet_season {
        cloud += 15.0;
    }
    if factors.high_rainfall {
        cloud += 10.0;
    }
    if dry_season {
        cloud -= 15.0;
    }
    if foggy_morning {
        cloud += 25.0;
    }
    if factors.orographic {
        cloud += 15.0 * roughness;
    }

    let mut potential = 0.3 * profile.precipitation + system_potential;
    if wet_season {
        potential += 0.25;
    }
    if factors.high_rainfall {
        potential += 0.1;
    }
    if dry_season {
        potential -= 0.2;
    }
    if factors.orographic {
        potential += 0.15 * roughness;
    }
    potential *= maritime_scale;
    potential /= 1.0 + config.saturation_damping * *recent_precipitation;
    let potential = potential.clamp(0.0, 1.0);

    let threshold = config.precipitation_threshold;
    let amount = if potential > threshold {
        config.max_precipitation_rate * (potential - threshold) / (1.0 - threshold)
            * (0.5 + profile.precipitation)
    } else {
        0.0
    };
    if amount > 0.0 && cloud < 60.0 {
        cloud = 60.0;
    }
    let cloud = cloud.clamp(0.0, 100.0);

    // --- Wind --------------------------------------------------------------
    let mut sustained = (4.0 + 20.0 * profile.windiness) * (1.0 - 0.35 * roughness);
    sustained *= 1.0 + 0.15 * diurnal_shape;
    if factors.valley {
        sustained *= 0.85;
    }
    for inf in &influences {
        if inf.distance < config.overlap_radius {
            let overlap = 1.0 - inf.distance / config.overlap_radius;
            let boost = match inf.system.kind() {
                WeatherSystemKind::ColdFront => 14.0,
                WeatherSystemKind::WarmFront => 8.0,
                WeatherSystemKind::LowPressure => 10.0,
                WeatherSystemKind::HighPressure => 2.0,
            };
            sustained += boost * inf.system.intensity() * overlap;
        }
    }
    let gust_factor = 1.25 + 0.6 * roughness + if factors.valley { 0.2 } else { 0.0 };
    let gust = sustained * gust_factor;
    let direction = wind_direction(profile.latitude, &influences);

    let temperature = Fahrenheit::new(temperature);
    let humidity = Percent::new(humidity);
    let wind_speed = MilesPerHour::new(sustained);

    FieldSample {
        timestamp,
        temperature,
        baseline_temperature: Fahrenheit::new(baseline),
        feels_like: feels_like(temperature, humidity, wind_speed),
        humidity,
        pressure: Hectopascals::new(pressure),
        cloud_cover: Percent::new(cloud),
        precipitation_potential: potential,
        precipitation_amount: Inches::new(amount),
        wind_speed,
        wind_gust: MilesPerHour::new(gust),
        wind_direction: direction,
    }
}

/// Daily temperature shape in [-1, 1]: trough at 05:00, peak at 15:00.
#[must_use]
pub fn diurnal_curve(hour: f64) -> f64 {
    if (5.0..15.0).contains(&hour) {
        -(PI * (hour - 5.0) / 10.0).cos()
    } else {
        let since_peak = (hour - 15.0).rem_euclid(24.0);
        (PI * since_peak / 14.0).cos()
    }
}

/// Annual temperature shape in [-1, 1]: coldest mid-January, warmest mid-July.
#[must_use]
pub fn seasonal_curve(day_of_year: f64) -> f64 {
    -(2.0 * PI * (day_of_year - 15.0) / 365.25).cos()
}

/// Blend the prevailing wind with the systems' own circulation.
fn wind_direction(latitude: f64, influences: &[Influence<'_>]) -> Degrees {
    let prevailing = if latitude < 30.0 {
        90.0 // trade easterlies
    } else if latitude < 60.0 {
        270.0 // westerlies
    } else {
        45.0 // polar easterlies
    };

    let bearing = |deg: f64| {
        let rad = Degrees::new(deg).to_radians();
        Vector2::new(rad.sin(), rad.cos())
    };

    let blended = influences
        .iter()
        .fold(bearing(prevailing), |acc, inf| {
            let (from, weight) = match (inf.system.kind(), inf.passed) {
                (WeatherSystemKind::ColdFront, true) => (315.0, 3.0 * inf.broad),
                (WeatherSystemKind::ColdFront, false) => (200.0, 2.0 * inf.broad),
                (WeatherSystemKind::WarmFront, _) => (180.0, 2.0 * inf.broad),
                (WeatherSystemKind::LowPressure, _) => (135.0, 2.0 * inf.broad),
                (WeatherSystemKind::HighPressure, _) => (330.0, inf.broad),
            };
            acc + bearing(from) * weight
        });

    Degrees::new(blended.x.atan2(blended.y).to_degrees())
}

/// Apparent temperature: NWS heat index when hot and humid, wind chill when
/// cold and breezy, otherwise the air temperature.
#[must_use]
pub fn feels_like(temperature: Fahrenheit, humidity: Percent, wind: MilesPerHour) -> Fahrenheit {
    let t = *temperature;
    let rh = *humidity;
    let v = *wind;

    if t >= 80.0 && rh >= 40.0 {
        let hi = -42.379 + 2.04901523 * t + 10.14333127 * rh
            - 0.22475541 * t * rh
            - 0.00683783 * t * t
            - 0.05481717 * rh * rh
            + 0.00122874 * t * t * rh
            + 0.00085282 * t * rh * rh
            - 0.00000199 * t * t * rh * rh;
        Fahrenheit::new(hi)
    } else if t <= 50.0 && v > 3.0 {
        let vp = v.powf(0.16);
        Fahrenheit::new(35.74 + 0.6215 * t - 35.75 * vp + 0.4275 * t * vp)
    } else {
        temperature
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::climate::presets::template;
    use crate::core_types::profile::Biome;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn at(month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, month, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn system(kind: WeatherSystemKind, intensity: f64, position: f64) -> WeatherSystem {
        let mut s = WeatherSystem::new(1, kind, intensity);
        s.position = position;
        s
    }

    fn sample(profile: &ClimateProfile, systems: &[WeatherSystem], when: NaiveDateTime) -> FieldSample {
        synthesize(profile, systems, when, Inches::ZERO, &SynthesisConfig::default())
    }

    #[test]
    fn diurnal_curve_peaks_afternoon_troughs_predawn() {
        assert_relative_eq!(diurnal_curve(15.0), 1.0);
        assert_relative_eq!(diurnal_curve(5.0), -1.0);
        assert!(diurnal_curve(12.0) > diurnal_curve(9.0));
        assert!(diurnal_curve(22.0) > diurnal_curve(3.0));
        // continuous across the trough
        assert!((diurnal_curve(4.999) - diurnal_curve(5.0)).abs() < 1e-3);
    }

    #[test]
    fn identical_inputs_identical_output() {
        let profile = template(Biome::TemperateForest);
        let systems = vec![
            system(WeatherSystemKind::LowPressure, 0.7, 0.45),
            system(WeatherSystemKind::ColdFront, 0.6, 0.52),
        ];
        let when = at(4, 10, 13);
        assert_eq!(sample(&profile, &systems, when), sample(&profile, &systems, when));
    }

    #[test]
    fn no_systems_gives_standard_pressure_and_baseline_temperature() {
        let profile = template(Biome::Mediterranean);
        let s = sample(&profile, &[], at(6, 1, 12));
        assert_relative_eq!(*s.pressure, 1013.25);
        assert_relative_eq!(*s.temperature, *s.baseline_temperature);
    }

    #[test]
    fn highs_raise_and_lows_lower_pressure() {
        let profile = template(Biome::TemperateForest);
        let when = at(3, 1, 12);
        let high = sample(&profile, &[system(WeatherSystemKind::HighPressure, 0.8, 0.5)], when);
        let low = sample(&profile, &[system(WeatherSystemKind::LowPressure, 0.8, 0.5)], when);
        assert!(*high.pressure > 1025.0);
        assert!(*low.pressure < 1000.0);

        let far_low = sample(&profile, &[system(WeatherSystemKind::LowPressure, 0.8, 0.05)], when);
        assert!(*far_low.pressure > *low.pressure);
    }

    #[test]
    fn front_passage_produces_sharp_dip() {
        let profile = template(Biome::TemperateGrassland);
        let when = at(3, 1, 12);
        let overhead = sample(&profile, &[system(WeatherSystemKind::WarmFront, 1.0, 0.5)], when);
        let away = sample(&profile, &[system(WeatherSystemKind::WarmFront, 1.0, 0.7)], when);
        assert_relative_eq!(*overhead.pressure, 1013.25 - 6.0);
        assert!(*away.pressure > 1013.0);
    }

    #[test]
    fn elevation_lapse_is_three_and_a_half_per_thousand_feet() {
        let mut low = template(Biome::TemperateForest);
        low.elevation = 0.0;
        let mut high = low.clone();
        high.elevation = 4000.0;
        let when = at(5, 5, 9);
        let dt = *sample(&low, &[], when).temperature - *sample(&high, &[], when).temperature;
        assert_relative_eq!(dt, 14.0, epsilon = 1e-9);
    }

    #[test]
    fn maritime_influence_dampens_daily_swing() {
        let mut inland = template(Biome::TemperateGrassland);
        inland.maritime_influence = 0.0;
        let mut coast = inland.clone();
        coast.maritime_influence = 1.0;
        let swing = |p: &ClimateProfile| {
            *sample(p, &[], at(7, 1, 15)).temperature - *sample(p, &[], at(7, 1, 5)).temperature
        };
        assert!(swing(&inland) > swing(&coast));
        assert!(swing(&coast) > 0.0);
    }

    #[test]
    fn summer_is_warmer_than_winter() {
        let profile = template(Biome::BorealForest);
        let july = sample(&profile, &[], at(7, 15, 12));
        let january = sample(&profile, &[], at(1, 15, 12));
        assert!(*july.temperature > *january.temperature + 20.0);
    }

    #[test]
    fn precipitation_needs_threshold() {
        let profile = template(Biome::Desert);
        let dry = sample(&profile, &[], at(8, 1, 12));
        assert_eq!(*dry.precipitation_amount, 0.0);
        assert!(dry.precipitation_potential <= 0.5);

        let profile = template(Biome::TemperateForest);
        let storm = sample(
            &profile,
            &[
                system(WeatherSystemKind::LowPressure, 1.0, 0.5),
                system(WeatherSystemKind::ColdFront, 1.0, 0.5),
            ],
            at(4, 1, 12),
        );
        assert!(storm.precipitation_potential > 0.5);
        assert!(*storm.precipitation_amount > 0.0);
        assert!(*storm.cloud_cover >= 60.0);
    }

    #[test]
    fn recent_rain_damps_potential() {
        let profile = template(Biome::TemperateForest);
        let systems = [system(WeatherSystemKind::LowPressure, 0.9, 0.5)];
        let config = SynthesisConfig::default();
        let when = at(4, 1, 12);
        let fresh = synthesize(&profile, &systems, when, Inches::ZERO, &config);
        let soaked = synthesize(&profile, &systems, when, Inches::new(2.0), &config);
        assert!(soaked.precipitation_potential < fresh.precipitation_potential);
    }

    #[test]
    fn seasonal_special_factors_shift_moisture() {
        let mut base = template(Biome::TropicalSavanna);
        base.special_factors = crate::core_types::profile::SpecialFactors::default();
        let mut monsoon = base.clone();
        monsoon.special_factors.monsoon = true;
        let mut dry = base.clone();
        dry.special_factors.dry_season = true;

        let august = at(8, 1, 12);
        let january = at(1, 10, 12);
        assert!(*sample(&monsoon, &[], august).humidity > *sample(&base, &[], august).humidity);
        // monsoon is seasonal
        assert_eq!(sample(&monsoon, &[], january), sample(&base, &[], january));
        assert!(
            sample(&dry, &[], january).precipitation_potential
                < sample(&base, &[], january).precipitation_potential
        );
    }

    #[test]
    fn fog_raises_morning_humidity_only() {
        let mut clear = template(Biome::Coastal);
        clear.special_factors.fog = false;
        let mut foggy = clear.clone();
        foggy.special_factors.fog = true;
        assert!(*sample(&foggy, &[], at(5, 1, 6)).cloud_cover > *sample(&clear, &[], at(5, 1, 6)).cloud_cover);
        assert_eq!(sample(&foggy, &[], at(5, 1, 16)), sample(&clear, &[], at(5, 1, 16)));
    }

    fn plain_grassland() -> ClimateProfile {
        let mut profile = template(Biome::TemperateGrassland);
        profile.special_factors = crate::core_types::profile::SpecialFactors::default();
        profile
    }

    #[test]
    fn high_diurnal_variation_widens_daily_swing() {
        let plain = plain_grassland();
        let mut wide = plain.clone();
        wide.special_factors.high_diurnal_variation = true;
        let swing = |p: &ClimateProfile| {
            *sample(p, &[], at(7, 1, 15)).temperature - *sample(p, &[], at(7, 1, 5)).temperature
        };
        assert_relative_eq!(swing(&wide), 1.5 * swing(&plain), epsilon = 1e-9);
    }

    #[test]
    fn valley_pools_cold_air_and_channels_gusts() {
        let plain = plain_grassland();
        let mut valley = plain.clone();
        valley.special_factors.valley = true;

        let dawn = at(4, 1, 5);
        assert!(*sample(&valley, &[], dawn).temperature < *sample(&plain, &[], dawn).temperature);
        let afternoon = at(4, 1, 15);
        let v = sample(&valley, &[], afternoon);
        let p = sample(&plain, &[], afternoon);
        assert_eq!(v.temperature, p.temperature);
        assert!(*v.wind_speed < *p.wind_speed);
        assert!(*v.wind_gust / *v.wind_speed > *p.wind_gust / *p.wind_speed);
    }

    #[test]
    fn orographic_lift_scales_with_roughness() {
        let mut plain = plain_grassland();
        plain.terrain_roughness = 0.8;
        let mut lifted = plain.clone();
        lifted.special_factors.orographic = true;
        let when = at(4, 1, 12);
        let p = sample(&plain, &[], when);
        let l = sample(&lifted, &[], when);
        assert!(*l.cloud_cover > *p.cloud_cover);
        assert!(l.precipitation_potential > p.precipitation_potential);

        // no relief, no lift
        plain.terrain_roughness = 0.0;
        lifted.terrain_roughness = 0.0;
        assert_eq!(sample(&lifted, &[], when), sample(&plain, &[], when));
    }

    #[test]
    fn high_rainfall_raises_moisture_baselines() {
        let plain = plain_grassland();
        let mut wet = plain.clone();
        wet.special_factors.high_rainfall = true;
        let when = at(4, 1, 12);
        let p = sample(&plain, &[], when);
        let w = sample(&wet, &[], when);
        assert!(*w.humidity > *p.humidity);
        assert!(*w.cloud_cover > *p.cloud_cover);
        assert!(w.precipitation_potential > p.precipitation_potential);
        assert_eq!(w.temperature, p.temperature);
    }

    #[test]
    fn rough_terrain_lowers_sustained_raises_gust_spread() {
        let mut flat = template(Biome::TemperateGrassland);
        flat.terrain_roughness = 0.0;
        let mut rough = flat.clone();
        rough.terrain_roughness = 1.0;
        let when = at(3, 1, 12);
        let f = sample(&flat, &[], when);
        let r = sample(&rough, &[], when);
        assert!(*r.wind_speed < *f.wind_speed);
        assert!(*r.wind_gust / *r.wind_speed > *f.wind_gust / *f.wind_speed);
    }

    #[test]
    fn overhead_front_boosts_wind() {
        let profile = template(Biome::TemperateForest);
        let when = at(3, 1, 12);
        let calm = sample(&profile, &[], when);
        let front = sample(&profile, &[system(WeatherSystemKind::ColdFront, 1.0, 0.5)], when);
        assert!(*front.wind_speed > *calm.wind_speed + 10.0);
    }

    #[test]
    fn corrupted_system_surfaces_as_non_finite() {
        let profile = template(Biome::TemperateForest);
        let broken = system(WeatherSystemKind::LowPressure, f64::NAN, 0.5);
        let s = sample(&profile, &[broken], at(3, 1, 12));
        assert!(matches!(
            s.ensure_finite(7),
            Err(SimulationError::NonFinite { hour: 7, .. })
        ));
        assert!(sample(&profile, &[], at(3, 1, 12)).ensure_finite(7).is_ok());
    }

    #[test]
    fn feels_like_branches() {
        let hot = feels_like(Fahrenheit::new(95.0), Percent::new(60.0), MilesPerHour::new(5.0));
        assert!(*hot > 105.0);
        let cold = feels_like(Fahrenheit::new(20.0), Percent::new(60.0), MilesPerHour::new(20.0));
        assert!(*cold < 10.0);
        let mild = feels_like(Fahrenheit::new(65.0), Percent::new(60.0), MilesPerHour::new(20.0));
        assert_eq!(*mild, 65.0);
    }
}
