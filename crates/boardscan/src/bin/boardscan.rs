use std::path::{Path, PathBuf};
use std::process::ExitCode;

use boardscan::detect::{load_rgb, rgb_view};
use boardscan::io::{load_segments, BoardReadConfig, BoardReadReport};
use boardscan::pieces::FeatureDataset;
use boardscan::{BoardReader, SquareParity};
use clap::{Parser, Subcommand, ValueEnum};
use log::{info, LevelFilter};

#[derive(Parser)]
#[command(name = "boardscan", version)]
#[command(about = "Read board squares from an image and detected line segments")]
struct Cli {
    /// Log verbosity
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full pipeline from a JSON config and write a JSON report
    Read {
        /// Path to the run configuration
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Load a pair of feature files and summarize them
    Dataset {
        /// Samples recorded on light squares
        #[arg(long)]
        light: PathBuf,
        /// Samples recorded on dark squares
        #[arg(long)]
        dark: PathBuf,
        /// Histogram bins per axis
        #[arg(long, default_value_t = 16)]
        bins: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    let res = match &cli.command {
        Command::Read { config } => run_read(config),
        Command::Dataset { light, dark, bins } => run_dataset(light, dark, *bins),
    };
    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(feature = "tracing"))]
fn init_logging(level: LogLevel) {
    let _ = boardscan::core::init_with_level(level.into());
}

#[cfg(feature = "tracing")]
fn init_logging(level: LogLevel) {
    boardscan::core::init_tracing(false, level.into());
    let _ = tracing_log::LogTracer::init();
}

fn run_read(config_path: &Path) -> CliResult<()> {
    let cfg = BoardReadConfig::load_json(config_path)?;
    let params = cfg.build_params();

    let img = load_rgb(&cfg.image_path)?;
    let segments = load_segments(&cfg.segments_path)?;
    let bins = params.histogram.bins;
    let load = FeatureDataset::load(&cfg.light_features, &cfg.dark_features, bins)?;
    info!(
        "dataset: {} light, {} dark samples",
        load.dataset.partition(SquareParity::Light).len(),
        load.dataset.partition(SquareParity::Dark).len()
    );

    let mut report =
        BoardReadReport::new(&cfg, config_path, [img.width(), img.height()], segments.len());
    report.skipped_records = load.skipped_light.len() + load.skipped_dark.len();

    let view = rgb_view(&img)?;
    match BoardReader::new(params).read(&view, &segments, &load.dataset) {
        Ok(reading) => report.set_reading(reading, cfg.side_to_move),
        Err(e) => report.set_error(e),
    }

    let out = cfg.output_path();
    report.write_json(&out)?;
    match (&report.fen, &report.error) {
        (Some(fen), _) => println!("{fen}"),
        (None, Some(err)) => println!("no position: {err}"),
        (None, None) => {}
    }
    info!("report written to {}", out.display());
    Ok(())
}

fn run_dataset(light: &Path, dark: &Path, bins: usize) -> CliResult<()> {
    let load = FeatureDataset::load(light, dark, bins)?;
    for (name, parity, skipped) in [
        ("light", SquareParity::Light, &load.skipped_light),
        ("dark", SquareParity::Dark, &load.skipped_dark),
    ] {
        let samples = load.dataset.partition(parity).len();
        println!("{name}: {samples} samples, {} skipped", skipped.len());
        for (label, count) in load.dataset.label_counts(parity) {
            println!("  {label}: {count}");
        }
        for err in skipped {
            println!("  skipped {err}");
        }
    }
    Ok(())
}
