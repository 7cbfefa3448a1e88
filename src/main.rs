use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::info;

use mnk_game::ai::{Agent, RandomAgent, SearchAgent, SearchEngine, TieBreak, Variant};
use mnk_game::config::AppConfig;
use mnk_game::game::{Board, Coord, GameOutcome, MnkBoard};
use mnk_game::play::play_game_observed;

/// Play one computer game of an (m,n,k)-game, optionally with gravity.
#[derive(Parser)]
#[command(name = "mnk", about = "Play an (m,n,k)-game between computer agents")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "mnk.toml")]
    config: PathBuf,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    dump_config: bool,

    /// Override number of rows
    #[arg(long)]
    rows: Option<usize>,

    /// Override number of columns
    #[arg(long)]
    cols: Option<usize>,

    /// Override the run length needed to win
    #[arg(long)]
    k: Option<usize>,

    /// Override the gravity rule (true or false)
    #[arg(long)]
    gravity: Option<bool>,

    /// Search variant: negamax, alphabeta, negascout, caching or hashing
    #[arg(long)]
    variant: Option<String>,

    /// Seconds per move
    #[arg(long)]
    time: Option<f64>,

    /// Deepest iteration per move
    #[arg(long)]
    max_depth: Option<usize>,

    /// Clamp search values to the window (fail-hard)
    #[arg(long)]
    hard: bool,

    /// Second player: search or random
    #[arg(long, default_value = "random")]
    opponent: String,

    /// Seed for every random source
    #[arg(long)]
    seed: Option<u64>,

    /// Break ties between equally valued moves at random
    #[arg(long)]
    random_tie: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.dump_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    match cli.opponent.as_str() {
        "search" | "random" => {}
        other => bail!("unknown opponent '{}' (expected 'search' or 'random')", other),
    }

    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    apply_overrides(&mut app_config, &cli)?;
    app_config.validate().context("invalid settings")?;

    let mut board = app_config.board.build()?;
    let params = app_config.search.params();
    let search_seed = app_config.search.seed;

    let engine = || match search_seed {
        Some(seed) => SearchEngine::seeded(seed),
        None => SearchEngine::new(),
    };
    let mut first = SearchAgent::new(engine(), params.clone());
    let mut second: Box<dyn Agent<MnkBoard>> = match cli.opponent.as_str() {
        "search" => Box::new(SearchAgent::new(engine(), params.clone())),
        _ => {
            let policy = app_config.random.policy;
            match app_config.random.seed {
                Some(seed) => Box::new(RandomAgent::seeded(policy, seed)),
                None => Box::new(RandomAgent::from_os_rng(policy)),
            }
        }
    };

    info!(
        "{}x{} board, k = {}, gravity = {}, {} vs {}",
        board.rows(),
        board.cols(),
        board.num_win(),
        board.has_gravity(),
        Agent::<MnkBoard>::name(&first),
        second.name()
    );
    println!("{board}");

    let record = play_game_observed(&mut board, &mut first, second.as_mut(), |board, player, mv| {
        println!("{} plays {mv}", player.name());
        println!("{board}");
    })?;

    match record.outcome {
        GameOutcome::Winner(player) => {
            println!("{} wins after {} moves", player.name(), record.len());
            for (begin, end) in board.winning_series(Some(player)) {
                let cells: Vec<String> = Coord::span(begin, end).iter().map(|c| c.to_string()).collect();
                println!("  {}", cells.join(" "));
            }
        }
        GameOutcome::Draw => println!("Draw after {} moves", record.len()),
    }
    Ok(())
}

fn apply_overrides(config: &mut AppConfig, cli: &Cli) -> Result<()> {
    if let Some(rows) = cli.rows {
        config.board.rows = rows;
    }
    if let Some(cols) = cli.cols {
        config.board.cols = cols;
    }
    if let Some(k) = cli.k {
        config.board.num_win = k;
    }
    if let Some(gravity) = cli.gravity {
        config.board.gravity = gravity;
    }
    if let Some(name) = &cli.variant {
        config.search.variant = name.parse::<Variant>()?;
    }
    if let Some(secs) = cli.time {
        config.search.time_budget_secs = secs;
    }
    if cli.max_depth.is_some() {
        config.search.max_depth = cli.max_depth;
    }
    if cli.hard {
        config.search.soft = false;
    }
    if cli.random_tie {
        config.search.tie_break = TieBreak::Random;
    }
    if let Some(seed) = cli.seed {
        config.search.seed = Some(seed);
        config.random.seed = Some(seed.wrapping_add(1));
    }
    Ok(())
}
