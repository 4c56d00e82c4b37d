mod replay;
mod rig;
mod stats;
mod throughput;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rig::{PatternArg, RigArgs};
use sortbench_common::limits::LFSR_SEED;

#[derive(Parser)]
struct Cli {
    /// Log driver and benchmark progress
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    rig: RigArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an input script against the interactive controller
    Replay { script: String },
    /// Run both sort paths once for every array size
    Sweep {
        #[arg(long, value_enum, default_value_t = PatternArg::Random)]
        pattern: PatternArg,
        #[arg(long, default_value_t = LFSR_SEED)]
        seed: u16,
        #[arg(long)]
        parallel: bool,
    },
    /// Repeat one configuration and report min / avg / max
    Stats {
        #[arg(short, long, default_value_t = 10)]
        k: u8,
        #[arg(long, value_enum, default_value_t = PatternArg::Random)]
        pattern: PatternArg,
        #[arg(short, long, default_value_t = 20)]
        trials: u32,
        #[arg(long, default_value_t = LFSR_SEED)]
        seed: u16,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Commands::Replay { script } => {
            replay::run_replay(&cli.rig, &script)?;
        }
        Commands::Sweep {
            pattern,
            seed,
            parallel,
        } => {
            throughput::run_sweep(&cli.rig, pattern.into(), seed, parallel)?;
        }
        Commands::Stats {
            k,
            pattern,
            trials,
            seed,
        } => {
            throughput::run_stats(&cli.rig, k, pattern.into(), trials, seed)?;
        }
    }
    Ok(())
}
