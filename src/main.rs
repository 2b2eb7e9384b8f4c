//! Zhithead - Main Binary
//!
//! Runs seeded engine simulations from the command line. The human
//! seat is played by the baseline greedy agent; real human input is a
//! UI concern outside this crate.

use anyhow::Context;
use clap::{Parser, Subcommand};
use zhithead::game::{
    GameEndReason, GameLoop, GameMachine, GameResult, GameState, GreedyController,
    VerbosityLevel,
};
use zhithead::zones::Seat;

/// Verbosity level for game output (accepts both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

#[derive(Parser)]
#[command(name = "zhithead")]
#[command(about = "Zhithead - Shithead/Palace card game engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run seeded greedy-vs-greedy simulations
    Sim {
        /// Random seed for the first game; game N uses seed + N
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Number of games to run
        #[arg(long, default_value_t = 1)]
        games: u64,

        /// Verbosity level for game output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,

        /// Cap on agent requests per game before forcing an end
        #[arg(long, default_value_t = 1000)]
        max_requests: u32,

        /// Print results as JSON instead of a text summary
        #[arg(long)]
        json: bool,

        /// Run the post-move timers on the wall clock (600/625/1000 ms)
        /// instead of instantly
        #[arg(long)]
        realtime: bool,
    },
}

fn run_one(
    seed: u64,
    verbosity: VerbosityLevel,
    max_requests: u32,
    realtime: bool,
) -> anyhow::Result<GameResult> {
    let mut state = GameState::new_with_seed(seed);
    state.logger.set_verbosity(verbosity);
    let mut machine = GameMachine::new(state);
    let mut human = GreedyController::new(Seat::Human);
    let mut bot = GreedyController::new(Seat::Bot);
    let mut game_loop = GameLoop::new(&mut machine).with_max_requests(max_requests);

    let result = if realtime {
        let runtime = tokio::runtime::Runtime::new().context("building tokio runtime")?;
        runtime.block_on(game_loop.run_realtime(&mut human, &mut bot))?
    } else {
        game_loop.run_game(&mut human, &mut bot)?
    };
    Ok(result)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Sim {
            seed,
            games,
            verbosity,
            max_requests,
            json,
            realtime,
        } => {
            let mut results: Vec<GameResult> = Vec::with_capacity(games as usize);
            for game in 0..games {
                let result = run_one(seed + game, verbosity.0, max_requests, realtime)
                    .with_context(|| format!("running game with seed {}", seed + game))?;
                results.push(result);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                let human_wins = results
                    .iter()
                    .filter(|r| r.winner == Some(Seat::Human))
                    .count();
                let bot_wins = results
                    .iter()
                    .filter(|r| r.winner == Some(Seat::Bot))
                    .count();
                let unfinished = results
                    .iter()
                    .filter(|r| r.end_reason == GameEndReason::RequestLimit)
                    .count();
                println!(
                    "{} game(s): human {} - bot {} ({} unfinished)",
                    results.len(),
                    human_wins,
                    bot_wins,
                    unfinished
                );
            }
        }
    }
    Ok(())
}
