use crate::ai::minimax::Heuristic;
use crate::board::Player;
use crate::games::morris::moves::potential_mills;
use crate::games::morris::MorrisBoard;
use crate::util::cells::Cells;

/// Weight of the opponent line score in [board_score].
pub const OPPONENT_LINE_WEIGHT: f64 = 2.5;
pub const PIECE_WEIGHT: f64 = 5.0;
pub const POTENTIAL_MILL_WEIGHT: f64 = 3.0;
pub const MOBILITY_WEIGHT: f64 = 2.0;

/// Score every mill line for `player` based on its occupancy pattern.
pub fn line_score(board: &MorrisBoard, player: Player) -> f64 {
    let own = board.pieces(player);
    let opp = board.pieces(player.other());

    board
        .topology()
        .all_mill_lines()
        .iter()
        .map(|line| {
            let cells = Cells::from_slice(&line[..]);
            line_pattern_score((cells & own).count(), (cells & opp).count())
        })
        .sum()
}

/// The score of a single line with `own` and `opp` pieces on it, the remaining cells are empty.
fn line_pattern_score(own: u8, opp: u8) -> f64 {
    let empty = 3 - own - opp;
    let mut score = 0.0;

    // own patterns
    if own == 3 {
        score += 1000.0;
    }
    if own == 2 && empty == 1 {
        score += 10.0;
    }
    if own == 1 && opp == 2 {
        score += 20.0;
    }
    if own == 2 && opp == 1 {
        score -= 2.0;
    }

    // mirrored opponent patterns
    if opp == 2 && empty == 1 {
        score -= 10.0;
    }
    if opp == 1 && own == 2 {
        score -= 20.0;
    }
    if opp == 2 && own == 1 {
        score -= 2.0;
    }

    score
}

/// The line score of `pov` minus the weighted line score of its opponent, favoring offense.
pub fn board_score(board: &MorrisBoard, pov: Player) -> f64 {
    line_score(board, pov) - OPPONENT_LINE_WEIGHT * line_score(board, pov.other())
}

/// The number of slides `player` could make, zero while pieces are still being placed.
pub fn mobility(board: &MorrisBoard, player: Player) -> u32 {
    if !board.all_placed() {
        0
    } else {
        board.slide_count(player)
    }
}

/// [board_score] extended with piece count, potential mill and mobility differentials.
pub fn extended_score(board: &MorrisBoard, pov: Player) -> f64 {
    let other = pov.other();
    let diff = |f: &dyn Fn(Player) -> f64| f(pov) - f(other);

    board_score(board, pov)
        + PIECE_WEIGHT * diff(&|p| board.pieces_on_board(p) as f64)
        + POTENTIAL_MILL_WEIGHT * diff(&|p| potential_mills(board, p) as f64)
        + MOBILITY_WEIGHT * diff(&|p| mobility(board, p) as f64)
}

/// Evaluates boards with [board_score].
#[derive(Debug, Copy, Clone, Default)]
pub struct MillHeuristic;

/// Evaluates boards with [extended_score].
#[derive(Debug, Copy, Clone, Default)]
pub struct ExtendedHeuristic;

impl Heuristic<MorrisBoard> for MillHeuristic {
    fn value(&self, board: &MorrisBoard, pov: Player) -> f64 {
        board_score(board, pov)
    }
}

impl Heuristic<MorrisBoard> for ExtendedHeuristic {
    fn value(&self, board: &MorrisBoard, pov: Player) -> f64 {
        extended_score(board, pov)
    }
}
