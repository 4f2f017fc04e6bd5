use morris_game::ai::minimax::Heuristic;
use morris_game::board::Player;
use morris_game::games::morris::moves::potential_mills;
use morris_game::games::morris::{MorrisBoard, Variant};
use morris_game::heuristic::morris::{
    board_score, extended_score, line_score, mobility, ExtendedHeuristic, MillHeuristic,
};

use crate::board::{board_from_pieces, moving_board};

#[test]
fn empty_board() {
    let board = MorrisBoard::new(Variant::NineMen);
    for player in Player::BOTH {
        assert_eq!(line_score(&board, player), 0.0);
        assert_eq!(extended_score(&board, player), 0.0);
    }
}

#[test]
fn closed_mill() {
    let board = board_from_pieces(9, &[0, 1, 2], &[], "b place 3 0 0");
    assert_eq!(line_score(&board, Player::A), 1000.0);
    assert_eq!(board_score(&board, Player::A), 1000.0);
    assert_eq!(MillHeuristic.value(&board, Player::A), 1000.0);
}

#[test]
fn open_two() {
    let board = board_from_pieces(9, &[0, 1], &[], "b place 2 0 0");
    assert_eq!(line_score(&board, Player::A), 10.0);
    assert_eq!(line_score(&board, Player::B), -10.0);
    assert_eq!(board_score(&board, Player::A), 35.0);
    assert_eq!(board_score(&board, Player::B), -10.0 - 2.5 * 10.0);

    // two pieces ahead and one potential mill, no mobility while placing
    assert_eq!(potential_mills(&board, Player::A), 1);
    assert_eq!(extended_score(&board, Player::A), 48.0);
    assert_eq!(ExtendedHeuristic.value(&board, Player::A), 48.0);
}

#[test]
fn blocked_line() {
    let board = board_from_pieces(9, &[0], &[1, 2], "a place 1 2 0");
    assert_eq!(line_score(&board, Player::A), 18.0);
    assert_eq!(line_score(&board, Player::B), -22.0);
    assert_eq!(board_score(&board, Player::A), 73.0);
}

#[test]
fn mobility_after_placing() {
    let board = moving_board(&[0, 2, 21, 23], &[1, 9, 14, 22], Player::B);
    assert_eq!(mobility(&board, Player::A), 0);
    // 1 to 4, 9 to 10, 14 to 13 and 22 to 19
    assert_eq!(mobility(&board, Player::B), 4);

    let placing = board_from_pieces(9, &[0], &[], "b place 1 0 0");
    assert_eq!(mobility(&placing, Player::A), 0);
}
