//! # MCTS Duel
//!
//! Plays a batch of games between the MCTS engine and a uniformly random
//! opponent and reports how the engine fared. Games run in parallel on a
//! rayon pool; each individual search stays single-threaded.
//!
//! ## Usage
//! `cargo run --release -- --game othello --iterations 10,50,100,500,1000 --games 20`
//!
//! Set `RUST_LOG=mcts=debug` to see per-search summaries.

use clap::{Parser, ValueEnum};
use colored::Colorize;
use mcts::arena::play_game;
use mcts::games::othello::Othello;
use mcts::games::tictactoe::TicTacToe;
use mcts::{GameError, GameRules, MatchStatistics, MctsConfig, Player};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use std::error::Error;
use std::time::Instant;
use tracing::info;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum GameKind {
    Tictactoe,
    Othello,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Game to play
    #[arg(long, value_enum, default_value_t = GameKind::Tictactoe)]
    game: GameKind,

    /// MCTS iterations per move; a comma list (e.g. `10,50,100,500,1000`) plays
    /// `--games` games at each budget
    #[arg(long, value_delimiter = ',', default_values_t = [1000])]
    iterations: Vec<usize>,

    /// Games per iteration budget; the MCTS side alternates between first and second player
    #[arg(long, default_value_t = 10)]
    games: u32,

    /// Worker threads for running games (default: number of CPUs)
    #[arg(long)]
    threads: Option<usize>,

    /// Base seed; game `i` of every budget uses `seed + i`
    #[arg(long)]
    seed: Option<u64>,

    /// Override the game's UCB1 exploration constant
    #[arg(long)]
    exploration: Option<f64>,

    /// Disable the immediate win / block check before searching
    #[arg(long, default_value_t = false)]
    no_shortcut: bool,

    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let threads = args.threads.unwrap_or_else(num_cpus::get).max(1);
    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;

    let mut config = MctsConfig::default().with_tactical_shortcut(!args.no_shortcut);
    if let Some(c) = args.exploration {
        config = config.with_exploration(c);
    }

    println!("MCTS Duel - engine vs random");
    println!("============================");
    println!("Game: {:?}", args.game);
    println!("Iterations per move: {:?}", args.iterations);
    println!("Games per budget: {}", args.games);
    println!("Threads: {}", threads);
    println!("----------------------------");

    #[cfg(debug_assertions)]
    {
        println!("WARNING: Running in debug mode. Searches will be much slower.");
        println!("Use --release for realistic timings.\n");
    }

    let start = Instant::now();
    let stats = pool.install(|| match args.game {
        GameKind::Tictactoe => run_match(TicTacToe, &config, &args),
        GameKind::Othello => run_match(Othello, &config, &args),
    })?;
    info!(games = stats.games, elapsed_ms = start.elapsed().as_millis() as u64, "match finished");

    print_stats(&stats);
    Ok(())
}

/// Plays `args.games` games at every iteration budget and merges their statistics.
fn run_match<G>(game: G, config: &MctsConfig, args: &Args) -> Result<MatchStatistics, GameError>
where
    G: GameRules + Send + Sync,
{
    let mut total = MatchStatistics::new();
    for &budget in &args.iterations {
        let stats = run_budget(game, config, args, budget)?;
        info!(
            iterations = budget,
            games = stats.games,
            wins = stats.mcts_wins,
            "budget finished"
        );
        total.merge(&stats);
    }
    Ok(total)
}

/// Plays `args.games` games in parallel with a fixed iteration budget.
fn run_budget<G>(
    game: G,
    config: &MctsConfig,
    args: &Args,
    budget: usize,
) -> Result<MatchStatistics, GameError>
where
    G: GameRules + Send + Sync,
{
    let base_seed = args.seed;
    let records = (0..args.games)
        .into_par_iter()
        .map(|i| {
            let seed = match base_seed {
                Some(s) => s.wrapping_add(u64::from(i)),
                None => rand::random(),
            };
            let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
            let mcts_player = if i % 2 == 0 { Player::One } else { Player::Two };
            let record = play_game(game, config, budget, mcts_player, &mut rng)?;
            info!(
                game = i,
                iterations = budget,
                %mcts_player,
                winner = ?record.winner,
                plies = record.moves.len(),
                "game finished"
            );
            Ok(record.stats)
        })
        .collect::<Result<Vec<_>, GameError>>()?;

    let mut total = MatchStatistics::new();
    for stats in &records {
        total.merge(stats);
    }
    Ok(total)
}

fn print_stats(stats: &MatchStatistics) {
    println!("\nResults:");
    println!("  Games: {}", stats.games);
    println!("  MCTS wins: {}", stats.mcts_wins.to_string().green().bold());
    println!("  Draws: {}", stats.draws.to_string().yellow());
    println!("  Losses: {}", stats.losses.to_string().red());
    println!("  Win rate: {:.1}%", stats.win_rate() * 100.0);
    println!("  Searches: {}", stats.searches);
    let fallbacks = format!("{}", stats.fallbacks);
    if stats.fallbacks > 0 {
        println!("  Fallbacks: {}", fallbacks.red());
    } else {
        println!("  Fallbacks: {}", fallbacks);
    }
    println!("  Search success rate: {:.1}%", stats.search_success_rate() * 100.0);
    println!(
        "  Average search time: {:.3} ms",
        stats.average_search_time().as_secs_f64() * 1000.0
    );

    println!("\nIteration performance:");
    println!("  Iterations | Games | Success rate | Avg time (ms)");
    println!("  ------------------------------------------------");
    for (budget, row) in &stats.by_budget {
        println!(
            "  {:<10} | {:<5} | {:>11.1}% | {:>13.3}",
            budget,
            row.games,
            row.success_rate() * 100.0,
            row.average_search_time().as_secs_f64() * 1000.0
        );
    }
}
