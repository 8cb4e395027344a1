use chrono::{NaiveDate, NaiveDateTime};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use weather_sim_core::{
    resolve_profile, Biome, EngineConfig, RegionParameters, Simulation, SimulationOptions,
    WeatherSnapshot,
};

/// Hourly forecast for a biome template
#[derive(Parser, Debug)]
#[command(name = "weather-sim-demo")]
#[command(about = "Deterministic regional weather forecast", long_about = None)]
struct Args {
    /// Biome template (e.g. temperate-forest, desert, polar-ice)
    #[arg(short, long, default_value = "temperate-forest")]
    biome: Biome,

    /// Random seed; the same seed replays the same weather
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Hours to simulate
    #[arg(short = 'n', long, default_value_t = 48)]
    hours: u32,

    /// Start date (YYYY-MM-DD) or date-time (YYYY-MM-DDTHH:MM)
    #[arg(long, default_value = "2024-01-01")]
    start: String,

    /// Override the template latitude (0-90)
    #[arg(long)]
    latitude: Option<f64>,

    /// Override the template storm frequency (0-1)
    #[arg(long)]
    storm_frequency: Option<f64>,

    /// Toggle special factors, e.g. --factor fog=true --factor volcanic
    #[arg(short, long = "factor")]
    factors: Vec<String>,

    /// Engine configuration JSON (partial files keep defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print every Nth hour
    #[arg(short, long, default_value_t = 1)]
    every: u32,

    /// Write a checkpoint JSON here after the run
    #[arg(long)]
    checkpoint: Option<PathBuf>,
}

fn parse_start(value: &str) -> Result<NaiveDateTime, String> {
    if let Ok(at) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M") {
        return Ok(at);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| format!("cannot parse start '{value}'"))
}

fn parse_factor(spec: &str) -> Result<(String, bool), String> {
    match spec.split_once('=') {
        None => Ok((spec.to_string(), true)),
        Some((name, value)) => value
            .parse::<bool>()
            .map(|v| (name.to_string(), v))
            .map_err(|_| format!("factor '{name}' needs true or false, got '{value}'")),
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig, String> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let text = fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    EngineConfig::from_json_str(&text).map_err(|e| e.to_string())
}

fn row(s: &WeatherSnapshot) -> String {
    format!(
        "{:<16} {:>7} {:>7} {:>6} {:>9} {:>+6.2} {:>6} {:>6.2}\" {:<5} {:>3} {:>5.1} {:<3} {:<14} {:>5} {:>5} {}",
        s.timestamp.format("%Y-%m-%d %H:%M"),
        s.temperature,
        s.feels_like,
        s.humidity,
        s.pressure,
        s.pressure_trend,
        s.cloud_cover,
        *s.precipitation.amount,
        s.precipitation.kind.as_str(),
        s.systems.len(),
        *s.wind_speed,
        s.wind_direction.cardinal(),
        s.condition,
        s.celestial.sunrise_label(),
        s.celestial.sunset_label(),
        s.celestial.moon_phase,
    )
}

fn run(args: &Args) -> Result<(), String> {
    let mut params = RegionParameters::for_biome(args.biome);
    params.latitude = args.latitude;
    params.storm_frequency = args.storm_frequency;
    for spec in &args.factors {
        let (name, value) = parse_factor(spec)?;
        params.special_factors.insert(name, value);
    }
    let profile = resolve_profile(&params).map_err(|e| e.to_string())?;

    let options = SimulationOptions {
        start: parse_start(&args.start)?,
        config: load_config(args.config.as_ref())?,
    };
    let band = profile.latitude_band();
    let mut sim =
        Simulation::with_options(profile, args.seed, options).map_err(|e| e.to_string())?;

    println!("=== Weather Forecast ===");
    println!(
        "Biome: {}  Seed: {}  Band: {}  Hours: {}\n",
        args.biome, args.seed, band, args.hours
    );
    println!(
        "{:<16} {:>7} {:>7} {:>6} {:>9} {:>6} {:>6} {:>7} {:<5} {:>3} {:>5} {:<3} {:<14} {:>5} {:>5} moon",
        "time", "temp", "feels", "hum", "pressure", "trend", "cloud", "precip", "kind", "sys",
        "wind", "dir", "condition", "rise", "set"
    );
    println!("{}", row(sim.current_snapshot().map_err(|e| e.to_string())?));

    let hours = sim.advance_hours(args.hours).map_err(|e| e.to_string())?;
    let every = args.every.max(1) as usize;
    for snapshot in hours.iter().skip(every - 1).step_by(every) {
        println!("{}", row(snapshot));
    }

    info!(
        hours = sim.hour(),
        spawned = sim.spawned_total(),
        active = sim.active_systems().map_or(0, <[_]>::len),
        "forecast complete"
    );

    if let Some(path) = &args.checkpoint {
        let json = sim
            .checkpoint()
            .and_then(|state| state.to_json_pretty())
            .map_err(|e| e.to_string())?;
        fs::write(path, json).map_err(|e| format!("failed to write {}: {e}", path.display()))?;
        println!("\nCheckpoint written to {}", path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("{message}");
            ExitCode::FAILURE
        }
    }
}
