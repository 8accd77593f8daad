//! Skill simulation driver.
//!
//! Loads skill content from a data directory and runs it against the headless
//! sandbox world.
//!
//! ```bash
//! skill-sim list
//! skill-sim inspect Fireball --support AddedFireDamage --support FasterProjectiles
//! skill-sim cast Spark --targets 4 --frames 60
//! ```

mod commands;
mod logging;

use anyhow::Result;
use clap::Parser;
use commands::{Cast, Inspect, List};

/// Skill composition sandbox
#[derive(Parser)]
#[command(name = "skill-sim")]
#[command(about = "Run data-driven skills in a headless sandbox", long_about = None)]
#[command(version)]
struct Cli {
    /// Also write logs to this file
    #[arg(long, global = true, env = "SKILL_LOG_FILE", value_name = "FILE")]
    log_file: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// List skills, supports and classes in the content directory
    List(List),

    /// Build a skill spec with supports and print it with its wire record
    Inspect(Inspect),

    /// Cast a skill at a row of target dummies and step the simulation
    Cast(Cast),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for SKILL_DATA_DIR, RUST_LOG and friends)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = logging::setup_logging(cli.log_file.as_deref())?;

    match cli.command {
        Command::List(cmd) => cmd.execute(),
        Command::Inspect(cmd) => cmd.execute(),
        Command::Cast(cmd) => cmd.execute(),
    }
}
