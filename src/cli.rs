//! Command-line front end.

use anyhow::Context;
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use wirekit_camtools::{WireCutGenerator, WireCutJob};
use wirekit_settings::Config;

/// Generate a wire cutter program from a job file
#[derive(Parser, Debug)]
#[command(name = "wirekit", version, about = "Toolpath synthesis for 4-axis hot-wire cutters.")]
pub struct Cli {
    /// Path to the JSON job description
    #[arg(short, long)]
    pub job: PathBuf,

    /// Path to a TOML or JSON config file (defaults to the platform config, then built-in values)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output file for the program; stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Resolve the configuration for a run
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = path {
        return Config::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display()));
    }

    match Config::default_path() {
        Some(path) if path.exists() => Config::load_from_file(&path)
            .with_context(|| format!("loading config {}", path.display())),
        _ => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}

/// Execute one run
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let job = WireCutJob::load_from_file(&cli.job)
        .with_context(|| format!("reading job {}", cli.job.display()))?;

    let program = WireCutGenerator::new(config)
        .generate(&job)
        .context("generating program")?;
    if program.fallback_count > 0 {
        warn!(
            "{} far points were projected instead of intersected",
            program.fallback_count
        );
    }

    match &cli.output {
        Some(path) => {
            program
                .write_to(path)
                .with_context(|| format!("writing {}", path.display()))?;
            info!("Wrote {} lines to {}", program.lines.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(program.to_gcode().as_bytes())
                .context("writing program to stdout")?;
            stdout.flush()?;
        }
    }

    Ok(())
}
