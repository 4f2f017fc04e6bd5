#![warn(missing_debug_implementations)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::new_without_default)]

//! A rules engine for [Nine Men's Morris](https://en.wikipedia.org/wiki/Nine_men%27s_morris) and its twelve piece
//! variant, together with a set of computer opponents.
//!
//! # Features
//!
//! * [MorrisBoard](crate::games::morris::MorrisBoard) implements the full rules: placing, moving and flying phases,
//!     mills with mill protection, and the win and draw conditions including repetition and the 50 move rule.
//!     It implements the generic [Board](crate::board::Board) trait, so all utilities work with it.
//! * [MorrisGame](crate::games::morris::MorrisGame) wraps a board with undo and redo and end of game notifications.
//! * Bots implementing the four decision [MorrisBot](crate::ai::MorrisBot) interface:
//!     * [AlphaBetaBot](crate::ai::minimax::AlphaBetaBot),
//!         iterative deepening minimax with alpha-beta pruning on top of the
//!         [mill heuristics](crate::heuristic::morris).
//!     * [MctsBot](crate::ai::mcts::MctsBot),
//!         time bounded [Monte Carlo Tree Search](https://en.wikipedia.org/wiki/Monte_Carlo_tree_search) with UCB1.
//!     * [TrainedBot](crate::ai::trained::TrainedBot),
//!         which ranks all successors with a [TrainedEvaluator](crate::ai::trained::TrainedEvaluator).
//!     * [HybridBot](crate::ai::hybrid::HybridBot), which combines two of the above.
//! * A bot vs bot game runner to compare playing strength, see [bot_game](crate::util::bot_game).
//! * Perft and game statistics to test the move generation, see [game_stats](crate::util::game_stats).
//!
//! # Examples
//!
//! ## List the available moves on a board and play a random one.
//!
//! ```
//! # use morris_game::games::morris::{MorrisBoard, Variant};
//! # use morris_game::board::{BoardMoves, Board};
//! # use internal_iterator::InternalIterator;
//! # let mut rng = rand::thread_rng();
//! let mut board = MorrisBoard::new(Variant::NineMen);
//! println!("{}", board);
//!
//! board.available_moves().unwrap().for_each(|mv| {
//!     println!("{:?}", mv)
//! });
//!
//! let mv = board.random_available_move(&mut rng).unwrap();
//! println!("Picked move {:?}", mv);
//! board.play(mv).unwrap();
//! println!("{}", board);
//! ```
//!
//! ## Get the best move according to MCTS
//!
//! ```
//! # use std::time::Duration;
//! # use morris_game::ai::mcts::{MctsBot, MctsConfig};
//! # use morris_game::ai::MorrisBot;
//! # use morris_game::games::morris::{MorrisBoard, Variant};
//! # use rand::thread_rng;
//! let board = MorrisBoard::new(Variant::TwelveMen);
//! let config = MctsConfig { time_budget: Duration::from_millis(100), ..MctsConfig::default() };
//!
//! let mut bot = MctsBot::new(config, thread_rng());
//! println!("{:?}", bot.choose_move(&board))
//! ```

pub mod board;
pub mod symmetry;

pub mod wdl;

pub mod ai;

pub mod games;

pub mod heuristic;

pub mod util;
