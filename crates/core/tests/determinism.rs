//! Replayability: identical seeds replay identically, checkpoints resume exactly

mod common;

use common::{at, maritime_profile};
use weather_sim_core::climate::presets::template;
use weather_sim_core::{Biome, Simulation, SimulationOptions, SimulationState};

fn run(seed: u64, hours: u32) -> Vec<weather_sim_core::WeatherSnapshot> {
    let mut sim = Simulation::create(maritime_profile(), seed).unwrap();
    sim.advance_hours(hours).unwrap()
}

#[test]
fn identical_seed_and_profile_replay_identically() {
    let a = run(42, 500);
    let b = run(42, 500);
    assert_eq!(a, b);
}

#[test]
fn different_seeds_diverge() {
    assert_ne!(run(1, 500), run(2, 500));
}

#[test]
fn split_advances_match_one_long_advance() {
    let mut whole = Simulation::create(template(Biome::TemperateForest), 7).unwrap();
    let expected = whole.advance_hours(120).unwrap();

    let mut split = Simulation::create(template(Biome::TemperateForest), 7).unwrap();
    let mut got = Vec::new();
    for chunk in [1, 23, 48, 48] {
        got.extend(split.advance_hours(chunk).unwrap());
    }
    assert_eq!(got, expected);
}

#[test]
fn json_checkpoint_resumes_like_an_uninterrupted_run() {
    let options = SimulationOptions {
        start: at(2023, 6, 1, 6),
        ..SimulationOptions::default()
    };
    let mut profile = template(Biome::TemperateGrassland);
    profile.storm_frequency = 1.0;

    let mut uninterrupted = Simulation::with_options(profile.clone(), 99, options.clone()).unwrap();
    let mut expected = uninterrupted.advance_hours(72).unwrap();
    expected.extend(uninterrupted.advance_hours(200).unwrap());

    let mut first = Simulation::with_options(profile, 99, options).unwrap();
    let mut got = first.advance_hours(72).unwrap();
    let json = first.checkpoint().unwrap().to_json().unwrap();
    drop(first);

    let state = SimulationState::from_json(&json).unwrap();
    assert_eq!(state.hour, 72);
    let mut resumed = Simulation::restore(state).unwrap();
    got.extend(resumed.advance_hours(200).unwrap());

    assert_eq!(got, expected);
    assert_eq!(resumed.spawned_total(), uninterrupted.spawned_total());
    assert_eq!(
        resumed.active_systems().unwrap(),
        uninterrupted.active_systems().unwrap()
    );
}
