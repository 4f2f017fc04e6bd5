use std::time::Duration;

use morris_game::ai::mcts::MctsConfig;
use morris_game::ai::minimax::AlphaBetaConfig;
use morris_game::board::Player;
use morris_game::games::morris::MorrisBoard;

use crate::board::moving_board;

mod bot_game;
mod hybrid;
mod minimax;
mod strategy;
mod trained;

/// Player a wins by sliding 14 to 2, closing a mill and taking b down to two pieces.
pub fn winning_slide_board() -> MorrisBoard {
    moving_board(&[0, 1, 14, 19], &[5, 10, 22], Player::A)
}

/// Shallow searches that finish quickly, independent of the time budget.
pub fn quick_alpha_beta() -> AlphaBetaConfig {
    AlphaBetaConfig {
        placement_depth: 2,
        slide_depth: 2,
        removal_depth: 1,
        time_budget: Duration::from_secs(60),
    }
}

pub fn quick_mcts(iterations: u64) -> MctsConfig {
    MctsConfig {
        time_budget: Duration::from_secs(60),
        max_iterations: Some(iterations),
        rollout_depth: 20,
        ..MctsConfig::default()
    }
}
