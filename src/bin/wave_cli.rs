use std::f64::consts::TAU;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use wave_acquisition::{
    AcquisitionSession, AcquisitionSettings, AcquisitionStatus, AppConfig, ChannelId,
    ConsoleContext, SensorCalibration, WaveStatistics,
};

const CLI_SENSOR: &str = "cli";

#[derive(Parser, Debug)]
#[command(
    name = "wave_cli",
    about = "Deterministic harness for wave statistics and gauge calibration"
)]
struct Cli {
    /// Config file (defaults to assets/wave_config.json, falling back to built-in defaults)
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a JSON array of samples and print the final statistics
    Stats {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        rate: Option<f64>,
        #[arg(long)]
        window: Option<usize>,
        #[arg(long, default_value_t = 0)]
        channel: ChannelId,
    },
    /// Run a calibration over paired targets and measurements
    Fit {
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        targets: Vec<f64>,
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        measured: Vec<f64>,
    },
    /// Drive a timed acquisition from a seeded synthetic wave
    Simulate {
        #[arg(long, default_value_t = 60.0)]
        duration: f64,
        #[arg(long)]
        rate: Option<f64>,
        #[arg(long, default_value_t = 1.0)]
        amplitude: f64,
        #[arg(long, default_value_t = 8.0)]
        period: f64,
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::WARN)
        .init();

    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = cli
        .config
        .map(AppConfig::load_from_file)
        .unwrap_or_else(AppConfig::load);

    match cli.command {
        Commands::Stats {
            input,
            rate,
            window,
            channel,
        } => run_stats(config, &input, rate, window, channel),
        Commands::Fit { targets, measured } => run_fit(config, &targets, &measured),
        Commands::Simulate {
            duration,
            rate,
            amplitude,
            period,
            seed,
        } => run_simulate(config, duration, rate, amplitude, period, seed),
    }
}

fn run_stats(
    config: AppConfig,
    input: &Path,
    rate: Option<f64>,
    window: Option<usize>,
    channel: ChannelId,
) -> Result<ExitCode> {
    let contents =
        fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?;
    let samples: Vec<f64> = serde_json::from_str(&contents)
        .with_context(|| format!("parsing {} as a JSON array of numbers", input.display()))?;

    let rate_hz = rate.unwrap_or(config.acquisition.sampling_rate_hz);
    let window_size = window.unwrap_or(config.acquisition.window_size);
    // Replay never ticks, so the duration only has to be valid
    let settings = AcquisitionSettings::new(window_size, rate_hz, config.acquisition.duration_seconds)?;

    let mut context = ConsoleContext::new(config);
    context.start_acquisition_with(settings)?;
    for (index, &value) in samples.iter().enumerate() {
        context
            .push_sample(channel, value)
            .with_context(|| format!("sample {index}"))?;
    }

    let report = StatsReport {
        channel,
        rate_hz,
        window_size,
        samples_read: samples.len(),
        statistics: context.statistics(channel).unwrap_or_default(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(ExitCode::from(0))
}

fn run_fit(config: AppConfig, targets: &[f64], measured: &[f64]) -> Result<ExitCode> {
    if targets.len() != measured.len() {
        bail!(
            "got {} targets but {} measurements",
            targets.len(),
            measured.len()
        );
    }

    let mut context = ConsoleContext::new(config);
    context.start_calibration_with(CLI_SENSOR, targets)?;
    for &value in measured {
        context.confirm_calibration_point(CLI_SENSOR, value)?;
    }

    let calibration: SensorCalibration = context
        .sensor_calibration(CLI_SENSOR)
        .context("calibration snapshot missing after run")?;
    println!("{}", serde_json::to_string_pretty(&calibration)?);
    Ok(ExitCode::from(0))
}

fn run_simulate(
    config: AppConfig,
    duration: f64,
    rate: Option<f64>,
    amplitude: f64,
    period: f64,
    seed: u64,
) -> Result<ExitCode> {
    if !(period.is_finite() && period > 0.0) {
        bail!("period must be greater than 0 s (got {period})");
    }

    let rate_hz = rate.unwrap_or(config.acquisition.sampling_rate_hz);
    let settings = AcquisitionSettings::new(config.acquisition.window_size, rate_hz, duration)?;
    let dt = 1.0 / rate_hz;

    let mut rng = StdRng::seed_from_u64(seed);
    let mut context = ConsoleContext::new(config);
    context.start_acquisition_with(settings)?;

    let mut t = 0.0;
    loop {
        let noise = rng.gen_range(-0.05_f64..0.05) * amplitude;
        let value = amplitude * (TAU * t / period).sin() + noise;
        context.push_sample(0, value)?;
        t += dt;
        if context.tick(dt)? == AcquisitionStatus::Stopped {
            break;
        }
    }

    let report = SimulationReport {
        seed,
        session: context.acquisition_session(),
        channels: context
            .all_statistics()
            .into_iter()
            .map(|(channel, statistics)| ChannelReport {
                channel,
                statistics,
            })
            .collect(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(ExitCode::from(0))
}

#[derive(Serialize)]
struct StatsReport {
    channel: ChannelId,
    rate_hz: f64,
    window_size: usize,
    samples_read: usize,
    statistics: WaveStatistics,
}

#[derive(Serialize)]
struct SimulationReport {
    seed: u64,
    session: AcquisitionSession,
    channels: Vec<ChannelReport>,
}

#[derive(Serialize)]
struct ChannelReport {
    channel: ChannelId,
    statistics: WaveStatistics,
}
