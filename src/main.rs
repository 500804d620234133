//! nxn-tictactoe: N×N tic-tac-toe engine.
//!
//! ## Usage
//!
//! - `nxn-tictactoe` - Start the text protocol on stdin/stdout
//! - `nxn-tictactoe play /c/3/X________` - Answer one game path and print the page
//! - `nxn-tictactoe selfplay --size 4 --games 5` - Play the engine against a random mover
//!
//! Logs go to stderr; set `RUST_LOG` or `--log-level` to change verbosity.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use nxn_tictactoe::board::{BoardSize, Player};
use nxn_tictactoe::depth::DepthPolicy;
use nxn_tictactoe::game::GameState;
use nxn_tictactoe::protocol::Protocol;
use nxn_tictactoe::render::Page;
use nxn_tictactoe::search::Engine;
use nxn_tictactoe::selfplay::run_series;

/// N×N tic-tac-toe engine
#[derive(Parser)]
#[command(name = "nxn-tictactoe")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Never search deeper than this many plies
    #[arg(long, global = true)]
    depth_cap: Option<u32>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the line-oriented text protocol on stdin/stdout
    Serve,
    /// Let the engine answer a game path such as /c/3/X________ and print the page
    Play {
        /// Game path: /<mode>/<size>/<board>
        path: String,
    },
    /// Play the engine against a random mover
    Selfplay {
        /// Board size (3, 4 or 5)
        #[arg(long, default_value_t = 3)]
        size: usize,
        /// Side the engine plays
        #[arg(long, value_enum, default_value_t = Side::X)]
        engine_plays: Side,
        /// Number of games
        #[arg(long, default_value_t = 1)]
        games: u32,
        /// Seed for the random mover (random if omitted)
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Copy, Clone, ValueEnum)]
enum Side {
    X,
    O,
}

impl From<Side> for Player {
    fn from(side: Side) -> Player {
        match side {
            Side::X => Player::X,
            Side::O => Player::O,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let policy = match cli.depth_cap {
        Some(cap) => DepthPolicy::default().capped(cap),
        None => DepthPolicy::default(),
    };
    let engine = Engine::new(policy);

    match cli.command {
        Some(Commands::Serve) | None => {
            Protocol::new(engine)
                .run()
                .context("protocol session failed")?;
        }
        Some(Commands::Play { path }) => {
            let mut state = GameState::from_path(&path);
            let taunt = state
                .computer_move(&engine)
                .with_context(|| format!("engine move for {path}"))?;
            println!("{}", state.path());
            print!("{}", Page::new(&state, taunt));
        }
        Some(Commands::Selfplay {
            size,
            engine_plays,
            games,
            seed,
        }) => {
            let size = BoardSize::new(size).context("selfplay board size")?;
            let seed = seed.unwrap_or_else(|| fastrand::u64(..));
            info!(%size, seed, games, "starting selfplay");
            let tally = run_series(size, engine_plays.into(), &engine, games, seed)?;
            println!(
                "{} games: {} won, {} lost, {} drawn (seed {seed})",
                tally.games(),
                tally.wins,
                tally.losses,
                tally.draws
            );
        }
    }

    Ok(())
}
