//! Headless runner for Tessera levels.
//!
//! Plays a scenario file with its scripted input, optionally writes the
//! resulting recording, and verifies that replaying a recording reproduces
//! the run exactly.

mod scenario;

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tessera_core::RecordingLog;
use tracing::info;
use tracing_subscriber::EnvFilter;

use scenario::{drive, RunReport, Scenario};

/// Headless runner and replay verifier for Tessera levels
#[derive(Parser)]
#[command(name = "tessera-sim")]
#[command(about = "Run and replay Tessera levels without a display", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play a scenario with its scripted input
    Run {
        /// Scenario JSON file
        scenario: PathBuf,

        /// Number of frames to simulate
        #[arg(short, long, default_value_t = 240)]
        frames: u64,

        /// Override the scenario's RNG seed
        #[arg(long)]
        seed: Option<u64>,

        /// Write the recording to this file
        #[arg(long)]
        record_out: Option<PathBuf>,

        /// Print the final grid as text
        #[arg(long)]
        map: bool,
    },

    /// Replay a recording against a scenario's level
    Replay {
        /// Scenario JSON file providing the level
        scenario: PathBuf,

        /// Recording JSON file
        recording: PathBuf,

        /// Print the final grid as text
        #[arg(long)]
        map: bool,
    },

    /// Run a scenario, replay its recording and compare the results
    Verify {
        /// Scenario JSON file
        scenario: PathBuf,

        /// Number of frames to simulate
        #[arg(short, long, default_value_t = 240)]
        frames: u64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    match Cli::parse().command {
        Command::Run {
            scenario,
            frames,
            seed,
            record_out,
            map,
        } => {
            let scenario = Scenario::from_file(&scenario)?;
            let mut grid = scenario.load(seed)?;
            let report = drive(&mut grid, frames, &scenario.inputs);
            print_report(&report, map);

            if let Some(path) = record_out {
                let json = serde_json::to_string_pretty(grid.recording().log())
                    .context("failed to encode recording")?;
                fs::write(&path, json)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!(path = %path.display(), "recording written");
            }
        }
        Command::Replay {
            scenario,
            recording,
            map,
        } => {
            let scenario = Scenario::from_file(&scenario)?;
            let text = fs::read_to_string(&recording)
                .with_context(|| format!("failed to read {}", recording.display()))?;
            let log: RecordingLog = serde_json::from_str(&text)
                .with_context(|| format!("failed to parse {}", recording.display()))?;
            let frames = log.max_frame.map_or(0, |max| max + 1);

            let mut grid = scenario.load(Some(log.rng_seed))?;
            grid.start_playback(log).context("cannot start playback")?;
            let report = drive(&mut grid, frames, &BTreeMap::new());
            print_report(&report, map);
        }
        Command::Verify { scenario, frames } => {
            let scenario = Scenario::from_file(&scenario)?;

            let mut live = scenario.load(None)?;
            let recorded = drive(&mut live, frames, &scenario.inputs);
            let log = live.recording().log().clone();

            let mut replay = scenario.load(None)?;
            replay
                .start_playback(log)
                .context("cannot start playback")?;
            let replayed = drive(&mut replay, frames, &BTreeMap::new());

            if recorded.last != replayed.last {
                bail!("replay diverged from the recorded run");
            }
            info!(frames, "replay matches recorded run");
            print_report(&recorded, true);
        }
    }

    Ok(())
}

fn print_report(report: &RunReport, map: bool) {
    let snapshot = &report.last;
    println!("frame:     {}", snapshot.frame);
    println!("actors:    {}", snapshot.actors.len());
    println!("events:    {}", report.events);
    match report.completed_at {
        Some(frame) => println!("completed: frame {frame}"),
        None => println!("completed: no"),
    }
    if map {
        print!("{}", snapshot.to_ascii());
    }
}
