//! Utilities to generate a `Board` in a random state.
use rand::Rng;

use crate::board::{Board, BoardDone};
use crate::games::morris::{MorrisBoard, Phase};

/// Play the given moves, starting from `start`.
pub fn board_with_moves<B: Board>(start: B, moves: &[B::Move]) -> B {
    let mut curr = start;
    for &mv in moves {
        assert!(!curr.is_done(), "Board already done, playing {} on {}", mv, curr);
        assert_eq!(
            curr.is_available_move(mv),
            Ok(true),
            "Move not available, playing {} on {}",
            mv,
            curr
        );
        curr.play(mv).unwrap();
    }
    curr
}

/// Generate a `Board` by playing `n` random moves on `start`.
pub fn random_board_with_moves<B: Board>(start: &B, n: u32, rng: &mut impl Rng) -> B {
    'new_try: loop {
        let mut board = start.clone();
        for _ in 0..n {
            match board.play_random_available_move(rng) {
                Ok(()) => {}
                Err(BoardDone) => continue 'new_try,
            }
        }
        return board;
    }
}

/// Generate a `Board` by playing random moves until `cond(&board)` returns true.
pub fn random_board_with_condition<B: Board>(start: &B, rng: &mut impl Rng, mut cond: impl FnMut(&B) -> bool) -> B {
    if cond(start) {
        return start.clone();
    }
    assert!(
        !start.is_done(),
        "Start board is done and does not match condition, so we won't find anything that does"
    );

    loop {
        let mut board = start.clone();
        while let Ok(()) = board.play_random_available_move(rng) {
            if cond(&board) {
                return board;
            }
        }
    }
}

/// Generate a random Morris board by playing random moves from `start` until the phase matches `accept`.
/// Panics if `start` is done and does not match.
pub fn random_board_in_phase(start: &MorrisBoard, rng: &mut impl Rng, accept: impl Fn(Phase) -> bool) -> MorrisBoard {
    random_board_with_condition(start, rng, |board| !board.is_done() && accept(board.phase()))
}
