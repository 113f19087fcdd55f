//! Wumpus CLI.
//!
//! - `wumpus run <MAP>...` - send the explorer into each cave and print its log
//! - `wumpus check <MAP>` - parse a map and draw it

mod config;
mod map;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use wumpus_agent::{Expedition, ExpeditionReport, KnowledgePolicy};
use wumpus_tools::{NullLogSink, TracingLogSink};

use crate::config::RunConfig;

#[derive(Parser)]
#[command(name = "wumpus")]
#[command(about = "Knowledge-based explorer for Wumpus caves", version)]
struct Cli {
    /// Config file (defaults to .wumpus/config.yaml in the working directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Explore one or more caves
    Run {
        /// Map files
        #[arg(required = true)]
        maps: Vec<PathBuf>,

        /// Attempts per cave before giving up
        #[arg(long)]
        attempts: Option<u32>,

        /// Carry knowledge from a failed attempt into the next one
        #[arg(long)]
        inherit_knowledge: bool,

        /// Use only the breezes and stenches written in the map
        #[arg(long)]
        no_derive_percepts: bool,

        /// Print reports as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse a map and draw it
    Check {
        map: PathBuf,

        /// Use only the breezes and stenches written in the map
        #[arg(long)]
        no_derive_percepts: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => RunConfig::load(path)?,
        None => {
            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            RunConfig::load_from_dir(&cwd)?
        }
    };

    match cli.command {
        Commands::Run {
            maps,
            attempts,
            inherit_knowledge,
            no_derive_percepts,
            json,
        } => {
            if let Some(attempts) = attempts {
                config.max_attempts = attempts;
            }
            if inherit_knowledge {
                config.knowledge = KnowledgePolicy::Inherit;
            }
            if no_derive_percepts {
                config.derive_percepts = false;
            }
            for path in &maps {
                run_map(path, &config, json, cli.verbose)?;
            }
            Ok(())
        }
        Commands::Check {
            map,
            no_derive_percepts,
        } => {
            if no_derive_percepts {
                config.derive_percepts = false;
            }
            check_map(&map, &config)
        }
    }
}

fn run_map(path: &Path, config: &RunConfig, json: bool, stream: bool) -> Result<()> {
    let parsed = map::load_map(path, config.derive_percepts)
        .with_context(|| format!("Failed to load map {}", path.display()))?;
    tracing::info!(
        map = %path.display(),
        skipped = parsed.skipped.len(),
        attempts = config.max_attempts,
        knowledge = ?config.knowledge,
        "Exploring cave"
    );

    let expedition = Expedition::new(parsed.world, config.agent, config.expedition());
    let report = if stream {
        expedition.run_with_sink(&mut TracingLogSink)
    } else {
        expedition.run_with_sink(&mut NullLogSink)
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(path, &report);
    }
    Ok(())
}

fn print_report(path: &Path, report: &ExpeditionReport) {
    println!("Cave: {}", path.display());
    for (idx, attempt) in report.attempts.iter().enumerate() {
        println!();
        println!("Attempt {}", idx + 1);
        for line in attempt.log.lines() {
            println!("  {line}");
        }
        println!(
            "  => {:?} after {} turns, score {}",
            attempt.outcome, attempt.turns, attempt.score
        );
    }
    println!();
    if report.succeeded() {
        println!("Goal reached in {} attempt(s).", report.attempts.len());
    } else {
        println!("Gave up after {} attempt(s).", report.attempts.len());
    }
}

fn check_map(path: &Path, config: &RunConfig) -> Result<()> {
    let parsed = map::load_map(path, config.derive_percepts)
        .with_context(|| format!("Failed to load map {}", path.display()))?;

    for skipped in &parsed.skipped {
        println!("line {}: {} ({})", skipped.line, skipped.text, skipped.reason);
    }
    print!("{}", map::render(&parsed.world));
    println!();
    println!("A start  X goal  $ gold  P pit  W wumpus  b breeze  s stench  * both");
    Ok(())
}
