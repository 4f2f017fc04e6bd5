use std::fmt::Debug;

use tracing::warn;

use crate::board::{Board, BoardDone};
use crate::games::morris::moves;
use crate::games::morris::{MorrisBoard, Move, Phase};
use crate::util::cells::Cells;

pub mod hybrid;
pub mod mcts;
pub mod minimax;
pub mod strategy;
pub mod trained;

pub trait Bot<B: Board>: Debug {
    /// Pick a move to play.
    ///
    /// `self` is mutable to allow for random state, this method is not supposed to
    /// modify `self` in any other significant way.
    fn select_move(&mut self, board: &B) -> Result<B::Move, BoardDone>;
}

/// A Morris player, asked for one position per decision.
/// Every operation returns `None` if there is no legal position for the decision.
pub trait MorrisBot: Debug {
    /// The empty cell to place a piece on.
    fn place_piece(&mut self, board: &MorrisBoard) -> Option<u8>;

    /// The own piece to move.
    fn select_piece(&mut self, board: &MorrisBoard) -> Option<u8>;

    /// The destination for the piece on `selected`.
    fn determine_move(&mut self, board: &MorrisBoard, selected: u8) -> Option<u8>;

    /// The opponent piece to remove after closing a mill.
    fn determine_piece_to_delete(&mut self, board: &MorrisBoard) -> Option<u8>;

    /// Combine the operations above into a full move for the current phase.
    fn choose_move(&mut self, board: &MorrisBoard) -> Option<Move> {
        if board.is_done() {
            return None;
        }

        let mv = match board.phase() {
            Phase::Placing => self.place_piece(board).map(Move::Place),
            Phase::Moving | Phase::Flying => self.select_piece(board).and_then(|from| {
                self.determine_move(board, from)
                    .map(|to| Move::Slide { from, to })
            }),
            Phase::Removal(_) => self.determine_piece_to_delete(board).map(Move::Remove),
        };

        match mv {
            Some(mv) if board.is_available_move(mv) == Ok(true) => Some(mv),
            _ => {
                let fallback = moves::available_moves(board).first().copied();
                warn!(?mv, ?fallback, bot = ?self, "bot move is not available, falling back");
                fallback
            }
        }
    }
}

impl<T: MorrisBot + ?Sized> MorrisBot for Box<T> {
    fn place_piece(&mut self, board: &MorrisBoard) -> Option<u8> {
        (**self).place_piece(board)
    }

    fn select_piece(&mut self, board: &MorrisBoard) -> Option<u8> {
        (**self).select_piece(board)
    }

    fn determine_move(&mut self, board: &MorrisBoard, selected: u8) -> Option<u8> {
        (**self).determine_move(board, selected)
    }

    fn determine_piece_to_delete(&mut self, board: &MorrisBoard) -> Option<u8> {
        (**self).determine_piece_to_delete(board)
    }

    fn choose_move(&mut self, board: &MorrisBoard) -> Option<Move> {
        (**self).choose_move(board)
    }
}

impl<T: MorrisBot> Bot<MorrisBoard> for T {
    fn select_move(&mut self, board: &MorrisBoard) -> Result<Move, BoardDone> {
        board.check_done()?;
        // a board that is not done always has an available move
        self.choose_move(board).ok_or(BoardDone)
    }
}

/// Return `candidate` if it is one of the `legal` positions, otherwise the first legal position.
/// `None` only if there are no legal positions at all.
pub fn validated(decision: &str, legal: Cells, candidate: Option<u8>) -> Option<u8> {
    match candidate {
        Some(pos) if legal.has(pos) => Some(pos),
        _ => {
            let fallback = legal.iter().next();
            if legal.any() {
                warn!(decision, ?candidate, ?fallback, "search result is not legal, falling back");
            }
            fallback
        }
    }
}
