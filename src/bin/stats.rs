use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use heuristic_connect_four::config::AppConfig;
use heuristic_connect_four::game::Player;
use heuristic_connect_four::history::GameLog;
use heuristic_connect_four::stats::{records_table, GameStats, OutcomeFilter, RecordFilter};

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum Side {
    Human,
    Ai,
}

impl From<Side> for Player {
    fn from(side: Side) -> Self {
        match side {
            Side::Human => Player::Human,
            Side::Ai => Player::Ai,
        }
    }
}

/// Summarise the recorded Connect Four games.
#[derive(Parser)]
#[command(name = "stats", about = "Print statistics for recorded games")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the game log path
    #[arg(long)]
    log: Option<PathBuf>,

    /// Only include games with this result
    #[arg(long, value_enum)]
    winner: Option<OutcomeFilter>,

    /// Only include games started by this side
    #[arg(long, value_enum)]
    starter: Option<Side>,

    /// Also print the selected games, one row each
    #[arg(long)]
    list: bool,

    /// Write the selected games to a CSV file
    #[arg(long)]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    let log_path = cli.log.unwrap_or(app_config.history.log_path);

    let log = GameLog::load(&log_path)
        .with_context(|| format!("reading game log {}", log_path.display()))?;

    let filter = RecordFilter {
        outcome: cli.winner,
        starter: cli.starter.map(Player::from),
    };
    let selected = filter.apply(log.records());
    log::debug!("{} of {} games match the filter", selected.len(), log.len());

    print!("{}", GameStats::from_records(&selected).report());

    if cli.list {
        println!();
        print!("{}", records_table(&selected));
    }

    if let Some(path) = cli.export {
        GameLog::write_all(&path, &selected)
            .with_context(|| format!("exporting games to {}", path.display()))?;
        println!();
        println!("Exported {} games to {}", selected.len(), path.display());
    }

    Ok(())
}
