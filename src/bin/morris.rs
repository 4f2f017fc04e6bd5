//! Command line front end: watch two bots play, run a match between them, or count positions.
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use morris_game::ai::mcts::MctsConfig;
use morris_game::ai::minimax::AlphaBetaConfig;
use morris_game::ai::strategy::{StrategyConfig, StrategyKind};
use morris_game::board::Board;
use morris_game::games::morris::{MorrisBoard, MorrisGame, Variant};
use morris_game::util::bot_game;
use morris_game::util::game_stats::perft;

/// Nine and Twelve Men's Morris bots
#[derive(Parser, Debug)]
#[command(name = "morris")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Default log level, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a single game between two bots and print every move
    Play(GameArgs),
    /// Play many games between two bots and print the statistics
    Match {
        #[command(flatten)]
        game: GameArgs,
        /// Number of games per starting side
        #[arg(long, default_value_t = 10)]
        games: u32,
    },
    /// Count the positions reachable from the start position
    Perft {
        #[arg(long, default_value = "9")]
        variant: Variant,
        #[arg(long, default_value_t = 4)]
        depth: u32,
    },
}

#[derive(Args, Debug)]
struct GameArgs {
    /// Pieces per player, 9 or 12
    #[arg(long, default_value = "9")]
    variant: Variant,
    /// Strategy for player a: alphabeta, mcts, trained or hybrid
    #[arg(long, default_value = "alphabeta")]
    first: StrategyKind,
    /// Strategy for player b
    #[arg(long, default_value = "mcts")]
    second: StrategyKind,
    /// Depth limit for the slide search
    #[arg(long, default_value_t = 8)]
    slide_depth: u32,
    /// Time budget per search in milliseconds
    #[arg(long, default_value_t = 1000)]
    budget_ms: u64,
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

impl GameArgs {
    fn strategy_config(&self) -> StrategyConfig {
        let budget = Duration::from_millis(self.budget_ms);
        StrategyConfig {
            alpha_beta: AlphaBetaConfig {
                slide_depth: self.slide_depth,
                time_budget: budget,
                ..AlphaBetaConfig::default()
            },
            mcts: MctsConfig {
                time_budget: budget,
                ..MctsConfig::default()
            },
            evaluator: None,
        }
    }
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Play(args) => play(&args),
        Commands::Match { game, games } => run_match(&game, games),
        Commands::Perft { variant, depth } => {
            let board = MorrisBoard::new(variant);
            for d in 0..=depth {
                println!("perft({}) = {}", d, perft(&board, d));
            }
            Ok(())
        }
    }
}

fn play(args: &GameArgs) -> Result<()> {
    let config = args.strategy_config();
    let mut bots = [
        args.first.build(&config, args.seed),
        args.second.build(&config, args.seed.wrapping_add(1)),
    ];

    let mut game = MorrisGame::new(args.variant);
    println!("{}", game.board());

    while !game.board().is_done() {
        let player = game.board().next_player();
        let bot = &mut bots[player.index() as usize];
        let mv = game
            .play_bot_turn(bot)
            .with_context(|| format!("playing a move for {:?}", player))?;

        match mv {
            Some(mv) => println!("{:?} plays {}", player, mv),
            None => println!("{:?} has no move and forfeits", player),
        }
        println!("{}", game.board());
    }

    info!(outcome = ?game.board().outcome(), "game finished");
    println!("Outcome: {:?}", game.board().outcome());
    Ok(())
}

fn run_match(args: &GameArgs, games: u32) -> Result<()> {
    let config = args.strategy_config();
    let variant = args.variant;

    let result = bot_game::run(
        || MorrisBoard::new(variant),
        || args.first.build(&config, args.seed),
        || args.second.build(&config, args.seed.wrapping_add(1)),
        games,
        true,
        |wdl, replay| info!(?wdl, outcome = ?replay.outcome, moves = replay.moves.len(), "game finished"),
    );

    println!("{:?}", result);
    Ok(())
}
