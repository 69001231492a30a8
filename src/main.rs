use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use heuristic_connect_four::ai::{Agent, HeuristicAgent, RandomAgent};
use heuristic_connect_four::config::{AppConfig, OpponentKind, PointsConfig, StarterChoice};
use heuristic_connect_four::history::GameLog;
use heuristic_connect_four::ui::App;
use ratatui::{backend::CrosstermBackend, Terminal};

/// Play Connect Four against a heuristic computer opponent.
#[derive(Parser)]
#[command(name = "connect-four", about = "Play Connect Four in the terminal")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Who moves first
    #[arg(long, value_enum)]
    starter: Option<StarterChoice>,

    /// Computer opponent to play against
    #[arg(long, value_enum)]
    opponent: Option<OpponentKind>,

    /// Override the game log path
    #[arg(long)]
    log: Option<PathBuf>,

    /// Load heuristic weights from a JSON file instead of the config
    #[arg(long)]
    points: Option<PathBuf>,

    /// Override the AI thinking delay in milliseconds
    #[arg(long)]
    think_delay_ms: Option<u64>,
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(starter) = cli.starter {
        app_config.game.starter = starter;
    }
    if let Some(opponent) = cli.opponent {
        app_config.game.opponent = opponent;
    }
    if let Some(log_path) = cli.log {
        app_config.history.log_path = log_path;
    }
    if let Some(delay) = cli.think_delay_ms {
        app_config.game.think_delay_ms = delay;
    }
    if let Some(path) = &cli.points {
        let points = PointsConfig::load_json(path)
            .with_context(|| format!("loading weights from {}", path.display()))?;
        app_config.points = Some(points.to_toml());
    }
    app_config.validate()?;
    let points = app_config.points_config()?;

    let agent: Box<dyn Agent> = match app_config.game.opponent {
        OpponentKind::Heuristic => Box::new(HeuristicAgent::new(points)),
        OpponentKind::Random => Box::new(RandomAgent::new()),
    };

    let log = GameLog::load_or_empty(&app_config.history.log_path);
    log::info!(
        "loaded {} past games from '{}'",
        log.len(),
        app_config.history.log_path.display()
    );

    let mut app = App::new(
        agent,
        log,
        app_config.history.log_path.clone(),
        app_config.game.starter,
        Duration::from_millis(app_config.game.think_delay_ms),
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal; always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res.context("running terminal UI")
}
