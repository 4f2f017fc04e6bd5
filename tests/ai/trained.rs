use morris_game::ai::trained::{
    encode, rank_moves, BoardVector, DenseEvaluator, DenseLayer, LinearEvaluator, ShapeError, TrainedBot,
    TrainedEvaluator, VECTOR_LENGTH,
};
use morris_game::ai::MorrisBot;
use morris_game::board::{Board, Player};
use morris_game::games::morris::{MorrisBoard, Move, Variant};
use morris_game::heuristic::morris::extended_score;

use crate::ai::winning_slide_board;
use crate::board::board_from_pieces;

/// Likes the cell at `pos` being taken by the player in the last slot.
#[derive(Debug)]
struct CellEvaluator {
    pos: usize,
}

impl TrainedEvaluator for CellEvaluator {
    fn forward(&self, input: &BoardVector) -> f32 {
        if input[self.pos] == input[VECTOR_LENGTH - 1] {
            1.0
        } else {
            0.0
        }
    }
}

#[derive(Debug)]
struct NanEvaluator;

impl TrainedEvaluator for NanEvaluator {
    fn forward(&self, _: &BoardVector) -> f32 {
        f32::NAN
    }
}

fn dense(rows: usize, inputs: usize, weight: f32, bias: f32) -> DenseLayer {
    DenseLayer {
        weights: vec![vec![weight; inputs]; rows],
        biases: vec![bias; rows],
    }
}

#[test]
fn encoding() {
    let board = board_from_pieces(9, &[0], &[1], "a place 1 1 0");

    let vector = encode(&board, Player::A);
    assert_eq!(vector.len(), 25);
    assert_eq!(vector[0], 0.5);
    assert_eq!(vector[1], 1.0);
    assert!(vector[2..24].iter().all(|&v| v == 0.0));
    assert_eq!(vector[24], 0.5);

    assert_eq!(encode(&board, Player::B)[24], 1.0);
}

#[test]
fn linear_forward() {
    let board = board_from_pieces(9, &[0, 5], &[1], "b place 2 1 0");
    let evaluator = LinearEvaluator {
        weights: [1.0; VECTOR_LENGTH],
        bias: 0.25,
    };
    // 0.5 + 0.5 + 1.0 for the tiles, 1.0 for the perspective
    assert_eq!(evaluator.forward(&encode(&board, Player::B)), 3.25);
}

#[test]
fn dense_forward() {
    let constant = DenseEvaluator::new(vec![dense(1, VECTOR_LENGTH, 0.0, 2.0)]).unwrap();
    assert_eq!(constant.forward(&[0.3; VECTOR_LENGTH]), 2.0);

    // hidden layers saturate through tanh
    let deep = DenseEvaluator::new(vec![dense(4, VECTOR_LENGTH, 10.0, 0.0), dense(1, 4, 1.0, 0.0)]).unwrap();
    let value = deep.forward(&[1.0; VECTOR_LENGTH]);
    assert!((value - 4.0).abs() < 1e-4, "got {}", value);
    assert_eq!(deep.forward(&[0.0; VECTOR_LENGTH]), 0.0);
}

#[test]
fn dense_shapes() {
    assert_eq!(
        DenseEvaluator::new(vec![dense(1, 3, 0.0, 0.0)]).unwrap_err(),
        ShapeError::Inputs {
            layer: 0,
            expected: VECTOR_LENGTH,
            actual: 3,
        }
    );

    let mut uneven = dense(2, VECTOR_LENGTH, 0.0, 0.0);
    uneven.biases.pop();
    assert_eq!(
        DenseEvaluator::new(vec![uneven]).unwrap_err(),
        ShapeError::Biases {
            layer: 0,
            weights: 2,
            biases: 1,
        }
    );

    assert_eq!(
        DenseEvaluator::new(vec![dense(3, VECTOR_LENGTH, 0.0, 0.0)]).unwrap_err(),
        ShapeError::Outputs(3)
    );
    assert_eq!(
        DenseEvaluator::new(vec![dense(3, VECTOR_LENGTH, 0.0, 0.0), dense(1, 2, 0.0, 0.0)]).unwrap_err(),
        ShapeError::Inputs {
            layer: 1,
            expected: 3,
            actual: 2,
        }
    );
    assert_eq!(DenseEvaluator::new(vec![]).unwrap_err(), ShapeError::Outputs(VECTOR_LENGTH));
}

#[test]
fn ranking_degrades_to_heuristic() {
    let board = board_from_pieces(9, &[0, 1], &[9, 13], "a place 2 2 0");

    let expected: Vec<(Move, f64)> = rank_moves::<LinearEvaluator>(&board, None)
        .iter()
        .map(|e| (e.mv, e.score))
        .collect();
    for &(mv, score) in &expected {
        let child = board.clone_and_play(mv).unwrap();
        assert_eq!(score, extended_score(&child, Player::A));
    }

    let fallback: Vec<(Move, f64)> = rank_moves(&board, Some(&NanEvaluator))
        .iter()
        .map(|e| (e.mv, e.score))
        .collect();
    assert_eq!(fallback, expected);
}

#[test]
fn evaluator_choice() {
    let board = MorrisBoard::new(Variant::NineMen);
    let mut bot = TrainedBot::new(Some(CellEvaluator { pos: 17 }));
    assert!(bot.has_evaluator());
    assert_eq!(bot.place_piece(&board), Some(17));
}

#[test]
fn without_evaluator() {
    let mut bot = TrainedBot::<DenseEvaluator>::new(None);
    assert!(!bot.has_evaluator());

    // the heuristic sees the mill
    let board = winning_slide_board();
    assert_eq!(bot.choose_move(&board), Some(Move::Slide { from: 14, to: 2 }));

    let board = board_from_pieces(9, &[0, 1], &[9, 13], "a place 2 2 0");
    assert_eq!(bot.place_piece(&board), Some(2));
}

#[test]
fn removal_choice_is_legal() {
    let board = board_from_pieces(9, &[0, 1, 2, 3, 4], &[21, 22, 23, 13], "a remove 9 9 0");
    let mut bot = TrainedBot::new(Some(CellEvaluator { pos: 22 }));
    assert_eq!(bot.determine_piece_to_delete(&board), Some(13));
    assert_eq!(bot.select_piece(&board), None);
}
