//! Bots driven by a trained positional evaluator. Only the inference side is implemented here:
//! weights are handed in by the caller, how they were trained or stored is not this module's concern.
use std::fmt::Debug;

use decorum::N64;
use thiserror::Error;
use tracing::{debug, warn};

use crate::ai::{validated, MorrisBot};
use crate::board::{Board, Player};
use crate::games::morris::moves;
use crate::games::morris::{MorrisBoard, Move, Phase};
use crate::heuristic::morris::extended_score;
use crate::util::cells::CELL_COUNT;

/// The length of [BoardVector].
pub const VECTOR_LENGTH: usize = CELL_COUNT as usize + 1;

/// One slot per cell followed by one slot for the perspective player.
pub type BoardVector = [f32; VECTOR_LENGTH];

/// Encode `board` for an evaluator scoring it for `pov`.
/// Cells are `0.0` when empty, `0.5` for [Player::A] and `1.0` for [Player::B],
/// the last slot holds `pov` with the same encoding.
pub fn encode(board: &MorrisBoard, pov: Player) -> BoardVector {
    let mut vector = [0.0; VECTOR_LENGTH];
    for pos in 0..CELL_COUNT {
        vector[pos as usize] = encode_tile(board.tile(pos));
    }
    vector[VECTOR_LENGTH - 1] = encode_tile(Some(pov));
    vector
}

fn encode_tile(tile: Option<Player>) -> f32 {
    match tile {
        None => 0.0,
        Some(Player::A) => 0.5,
        Some(Player::B) => 1.0,
    }
}

/// A numeric model scoring encoded boards, higher is better for the player in the last slot.
/// Implementations must be pure.
pub trait TrainedEvaluator: Debug {
    fn forward(&self, input: &BoardVector) -> f32;
}

impl<E: TrainedEvaluator + ?Sized> TrainedEvaluator for Box<E> {
    fn forward(&self, input: &BoardVector) -> f32 {
        (**self).forward(input)
    }
}

/// A single linear layer.
#[derive(Debug, Clone)]
pub struct LinearEvaluator {
    pub weights: BoardVector,
    pub bias: f32,
}

impl TrainedEvaluator for LinearEvaluator {
    fn forward(&self, input: &BoardVector) -> f32 {
        self.bias + self.weights.iter().zip(input).map(|(w, x)| w * x).sum::<f32>()
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ShapeError {
    #[error("layer {layer} expects {expected} inputs, got {actual}")]
    Inputs { layer: usize, expected: usize, actual: usize },
    #[error("layer {layer} has {weights} weight rows but {biases} biases")]
    Biases { layer: usize, weights: usize, biases: usize },
    #[error("the last layer must have a single output, got {0}")]
    Outputs(usize),
}

/// A fully connected layer, `weights[output][input]`.
#[derive(Debug, Clone)]
pub struct DenseLayer {
    pub weights: Vec<Vec<f32>>,
    pub biases: Vec<f32>,
}

/// A small fully connected network with `tanh` activations between the layers and a linear output.
#[derive(Debug, Clone)]
pub struct DenseEvaluator {
    layers: Vec<DenseLayer>,
}

impl DenseEvaluator {
    pub fn new(layers: Vec<DenseLayer>) -> Result<Self, ShapeError> {
        let mut inputs = VECTOR_LENGTH;
        for (layer, dense) in layers.iter().enumerate() {
            if dense.weights.len() != dense.biases.len() {
                return Err(ShapeError::Biases {
                    layer,
                    weights: dense.weights.len(),
                    biases: dense.biases.len(),
                });
            }
            if let Some(row) = dense.weights.iter().find(|row| row.len() != inputs) {
                return Err(ShapeError::Inputs {
                    layer,
                    expected: inputs,
                    actual: row.len(),
                });
            }
            inputs = dense.biases.len();
        }
        if inputs != 1 {
            return Err(ShapeError::Outputs(inputs));
        }
        Ok(DenseEvaluator { layers })
    }
}

impl TrainedEvaluator for DenseEvaluator {
    fn forward(&self, input: &BoardVector) -> f32 {
        let mut values = input.to_vec();
        let last = self.layers.len() - 1;
        for (i, layer) in self.layers.iter().enumerate() {
            values = layer
                .weights
                .iter()
                .zip(&layer.biases)
                .map(|(row, bias)| {
                    let x = bias + row.iter().zip(&values).map(|(w, v)| w * v).sum::<f32>();
                    if i == last {
                        x
                    } else {
                        x.tanh()
                    }
                })
                .collect();
        }
        values[0]
    }
}

/// A candidate move with its score.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Evaluation {
    pub mv: Move,
    pub score: f64,
}

/// Scores every available move by evaluating the board it leads to from the POV of the player making it.
/// Falls back to [extended_score] for every move if `evaluator` is missing or produces a non-finite value.
pub fn rank_moves<E: TrainedEvaluator>(board: &MorrisBoard, evaluator: Option<&E>) -> Vec<Evaluation> {
    let pov = board.next_player();
    let successors: Vec<(Move, MorrisBoard)> = moves::available_moves(board)
        .into_iter()
        // SAFETY: unwrap is safe because the move comes from the available moves
        .map(|mv| (mv, board.clone_and_play(mv).unwrap()))
        .collect();

    if let Some(evaluator) = evaluator {
        let scores: Vec<f32> = successors
            .iter()
            .map(|(_, child)| evaluator.forward(&encode(child, pov)))
            .collect();

        if scores.iter().all(|s| s.is_finite()) {
            return successors
                .iter()
                .zip(scores)
                .map(|(&(mv, _), score)| Evaluation { mv, score: score as f64 })
                .collect();
        }
        warn!(?evaluator, "evaluator produced a non-finite value, using the heuristic instead");
    }

    successors
        .iter()
        .map(|(mv, child)| Evaluation {
            mv: *mv,
            score: extended_score(child, pov),
        })
        .collect()
}

/// A bot picking the successor the evaluator likes best, or the one the heuristic likes best without an evaluator.
#[derive(Debug)]
pub struct TrainedBot<E: TrainedEvaluator> {
    evaluator: Option<E>,
    // decided slide, keyed by the position and player it was found for
    planned: Option<(u64, Player, Move)>,
}

impl<E: TrainedEvaluator> TrainedBot<E> {
    /// Build a bot around `evaluator`, `None` means the evaluator could not be loaded.
    pub fn new(evaluator: Option<E>) -> Self {
        if evaluator.is_none() {
            warn!("no trained evaluator available, degrading to the heuristic");
        }
        TrainedBot {
            evaluator,
            planned: None,
        }
    }

    pub fn has_evaluator(&self) -> bool {
        self.evaluator.is_some()
    }

    /// The highest scoring available move accepted by `filter`, first one on ties.
    fn best(&self, board: &MorrisBoard, filter: impl Fn(Move) -> bool) -> Option<Move> {
        let ranked = rank_moves(board, self.evaluator.as_ref());
        let best = ranked
            .iter()
            .filter(|e| filter(e.mv))
            .rev()
            .max_by_key(|e| N64::from_inner(e.score))
            .map(|e| e.mv);
        debug!(candidates = ranked.len(), ?best, "ranked moves");
        best
    }
}

impl<E: TrainedEvaluator> MorrisBot for TrainedBot<E> {
    fn place_piece(&mut self, board: &MorrisBoard) -> Option<u8> {
        let candidate = match self.best(board, |mv| matches!(mv, Move::Place(_))) {
            Some(Move::Place(pos)) => Some(pos),
            _ => None,
        };
        validated("placement", moves::placements(board), candidate)
    }

    fn select_piece(&mut self, board: &MorrisBoard) -> Option<u8> {
        self.planned = None;
        let candidate = match self.best(board, |mv| matches!(mv, Move::Slide { .. })) {
            Some(mv @ Move::Slide { from, .. }) => {
                self.planned = Some((board.position_key(), board.next_player(), mv));
                Some(from)
            }
            _ => None,
        };
        validated("selection", moves::selectable(board), candidate)
    }

    fn determine_move(&mut self, board: &MorrisBoard, selected: u8) -> Option<u8> {
        let key = (board.position_key(), board.next_player());
        let candidate = match self.planned.take() {
            Some((position, player, Move::Slide { from, to }))
                if (position, player) == key && from == selected =>
            {
                Some(to)
            }
            _ => match self.best(board, |mv| matches!(mv, Move::Slide { from, .. } if from == selected)) {
                Some(Move::Slide { to, .. }) => Some(to),
                _ => None,
            },
        };
        validated("destination", moves::destinations(board, selected), candidate)
    }

    fn determine_piece_to_delete(&mut self, board: &MorrisBoard) -> Option<u8> {
        let candidate = match board.phase() {
            Phase::Removal(_) => match self.best(board, |mv| matches!(mv, Move::Remove(_))) {
                Some(Move::Remove(pos)) => Some(pos),
                _ => None,
            },
            _ => None,
        };
        validated("removal", moves::removals(board), candidate)
    }
}
