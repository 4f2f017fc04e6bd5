//! Depth limited minimax with alpha-beta pruning, specialized for the three Morris sub-games:
//! placing pieces, sliding pieces and removing a piece after a mill.
use std::fmt::Debug;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::ai::{validated, MorrisBot};
use crate::board::{Board, Outcome, Player};
use crate::games::morris::moves;
use crate::games::morris::{MorrisBoard, Move, Phase};
use crate::heuristic::morris::{ExtendedHeuristic, MillHeuristic};

/// The value of a won game.
pub const WIN_VALUE: f64 = 1e9;

pub trait Heuristic<B: Board>: Debug {
    /// Return the heuristic value of `board` from the POV of `pov`, higher is better for `pov`.
    fn value(&self, board: &B, pov: Player) -> f64;
}

/// The sub-game a search runs on: which actions are available and what they do.
pub trait SearchSpace: Debug {
    type Action: Debug + Copy + Eq;

    /// The actions available on `board`, mill-closing actions first.
    /// `root` is true for the board the search was started on.
    fn actions(&self, board: &MorrisBoard, root: bool) -> Vec<Self::Action>;

    /// Apply `action` to a copy of `board`.
    fn apply(&self, board: &MorrisBoard, action: Self::Action, root: bool) -> MorrisBoard;

    /// Whether this sub-game ends at `board`, even if the game itself continues.
    fn is_leaf(&self, board: &MorrisBoard) -> bool;

    /// The static value of `board` from the POV of `pov`.
    fn evaluate(&self, board: &MorrisBoard, pov: Player) -> f64;
}

/// A full turn: a placement or slide, followed by the removal it allows if it closes a mill.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Turn {
    pub mv: Move,
    pub removal: Option<u8>,
}

#[derive(Debug)]
pub struct MinimaxResult<A> {
    /// The value of the board from the POV of the player to move at the root.
    pub value: f64,

    /// The best action to play, `None` if there are no actions.
    pub best_move: Option<A>,

    /// The deepest completed search depth.
    pub depth: u32,

    /// The number of visited nodes, summed over all depths.
    pub nodes: u64,
}

/// Search over placements, each combined with its removal. Ends once all pieces have been placed.
#[derive(Debug, Clone)]
pub struct PlacementSearch<H> {
    pub heuristic: H,
}

/// Search over slides, each combined with its removal.
/// If `from` is set only slides of that piece are considered at the root.
#[derive(Debug, Clone)]
pub struct SlideSearch<H> {
    pub heuristic: H,
    pub from: Option<u8>,
}

/// Search over removals. At the root the removed piece is taken off the board, at deeper plies the "removed" piece
/// is handed over to the acting player instead, keeping the plies symmetric.
#[derive(Debug, Clone)]
pub struct RemovalSearch<H> {
    pub heuristic: H,
}

fn turns(board: &MorrisBoard, candidates: Vec<Move>) -> Vec<Turn> {
    let mut result = vec![];
    for mv in moves::mill_first(board, candidates) {
        // SAFETY: unwrap is safe because candidates are generated from the legal move sets
        let after = board.clone_and_play(mv).unwrap();
        if matches!(after.phase(), Phase::Removal(_)) && !after.is_done() {
            result.extend(moves::removals(&after).iter().map(|r| Turn { mv, removal: Some(r) }));
        } else {
            result.push(Turn { mv, removal: None });
        }
    }
    result
}

fn apply_turn(board: &MorrisBoard, turn: Turn) -> MorrisBoard {
    // SAFETY: unwrap is safe because turns are only built by `turns`
    let mut next = board.clone_and_play(turn.mv).unwrap();
    if let Some(removal) = turn.removal {
        next.remove(removal).unwrap();
    }
    next
}

impl<H: Heuristic<MorrisBoard>> SearchSpace for PlacementSearch<H> {
    type Action = Turn;

    fn actions(&self, board: &MorrisBoard, _: bool) -> Vec<Turn> {
        turns(board, moves::placements(board).iter().map(Move::Place).collect())
    }

    fn apply(&self, board: &MorrisBoard, action: Turn, _: bool) -> MorrisBoard {
        apply_turn(board, action)
    }

    fn is_leaf(&self, board: &MorrisBoard) -> bool {
        board.phase() != Phase::Placing
    }

    fn evaluate(&self, board: &MorrisBoard, pov: Player) -> f64 {
        self.heuristic.value(board, pov)
    }
}

impl<H: Heuristic<MorrisBoard>> SearchSpace for SlideSearch<H> {
    type Action = Turn;

    fn actions(&self, board: &MorrisBoard, root: bool) -> Vec<Turn> {
        let slides = match self.from {
            Some(from) if root => moves::destinations(board, from)
                .iter()
                .map(|to| Move::Slide { from, to })
                .collect(),
            _ => moves::slides(board),
        };
        turns(board, slides)
    }

    fn apply(&self, board: &MorrisBoard, action: Turn, _: bool) -> MorrisBoard {
        apply_turn(board, action)
    }

    fn is_leaf(&self, board: &MorrisBoard) -> bool {
        board.is_done()
    }

    fn evaluate(&self, board: &MorrisBoard, pov: Player) -> f64 {
        self.heuristic.value(board, pov)
    }
}

impl<H: Heuristic<MorrisBoard>> SearchSpace for RemovalSearch<H> {
    type Action = u8;

    fn actions(&self, board: &MorrisBoard, _: bool) -> Vec<u8> {
        // the phase is kept as is on scratch boards, so query the rule for the acting player directly
        board.removable(board.next_player()).iter().collect()
    }

    fn apply(&self, board: &MorrisBoard, action: u8, root: bool) -> MorrisBoard {
        if root {
            board.scratch_assign(action, None)
        } else {
            board.scratch_assign(action, Some(board.next_player()))
        }
    }

    fn is_leaf(&self, board: &MorrisBoard) -> bool {
        board.removable(board.next_player()).is_empty()
    }

    fn evaluate(&self, board: &MorrisBoard, pov: Player) -> f64 {
        self.heuristic.value(board, pov)
    }
}

/// The value of a finished board from the POV of `pov`, oriented by the winner.
fn terminal_value(board: &MorrisBoard, pov: Player) -> Option<f64> {
    board.outcome().map(|outcome| match outcome {
        Outcome::WonBy(winner) => winner.sign::<f64>(pov) * WIN_VALUE,
        Outcome::Draw => 0.0,
    })
}

/// Run a single alpha-beta search of `depth` plies, from the POV of the player to move.
/// Equally valued actions are resolved in favor of the first one found.
pub fn alpha_beta<S: SearchSpace>(space: &S, board: &MorrisBoard, depth: u32) -> MinimaxResult<S::Action> {
    let pov = board.next_player();
    let mut nodes = 0;
    let (value, best_move) = alpha_beta_recurse(
        space,
        board,
        pov,
        depth,
        f64::NEG_INFINITY,
        f64::INFINITY,
        true,
        &mut nodes,
    );
    MinimaxResult {
        value,
        best_move,
        depth,
        nodes,
    }
}

fn alpha_beta_recurse<S: SearchSpace>(
    space: &S,
    board: &MorrisBoard,
    pov: Player,
    depth_left: u32,
    mut alpha: f64,
    mut beta: f64,
    root: bool,
    nodes: &mut u64,
) -> (f64, Option<S::Action>) {
    *nodes += 1;

    if let Some(value) = terminal_value(board, pov) {
        return (value, None);
    }
    if depth_left == 0 || space.is_leaf(board) {
        return (space.evaluate(board, pov), None);
    }

    let actions = space.actions(board, root);
    if actions.is_empty() {
        return (space.evaluate(board, pov), None);
    }

    let maximizing = board.next_player() == pov;
    let mut best_value = if maximizing { f64::NEG_INFINITY } else { f64::INFINITY };
    let mut best_move = None;

    for action in actions {
        let child = space.apply(board, action, root);
        let (value, _) = alpha_beta_recurse(space, &child, pov, depth_left - 1, alpha, beta, false, nodes);

        let better = if maximizing { value > best_value } else { value < best_value };
        if better || best_move.is_none() {
            best_value = value;
            best_move = Some(action);
        }

        if maximizing {
            alpha = alpha.max(best_value);
        } else {
            beta = beta.min(best_value);
        }
        if alpha >= beta {
            break;
        }
    }

    (best_value, best_move)
}

/// Plain minimax without pruning, only returns the value. Mostly useful to check [alpha_beta] against.
pub fn minimax_value<S: SearchSpace>(space: &S, board: &MorrisBoard, depth: u32) -> f64 {
    minimax_recurse(space, board, board.next_player(), depth, true)
}

fn minimax_recurse<S: SearchSpace>(space: &S, board: &MorrisBoard, pov: Player, depth_left: u32, root: bool) -> f64 {
    if let Some(value) = terminal_value(board, pov) {
        return value;
    }
    if depth_left == 0 || space.is_leaf(board) {
        return space.evaluate(board, pov);
    }

    let values = space
        .actions(board, root)
        .into_iter()
        .map(|action| minimax_recurse(space, &space.apply(board, action, root), pov, depth_left - 1, false));

    let best = if board.next_player() == pov {
        values.fold(f64::NEG_INFINITY, f64::max)
    } else {
        values.fold(f64::INFINITY, f64::min)
    };

    if best.is_infinite() {
        space.evaluate(board, pov)
    } else {
        best
    }
}

/// Run [alpha_beta] with increasing depth until `max_depth` is reached, a win is proven or `budget` has elapsed.
/// Depth one always runs, deeper searches only start while there is time left and are never interrupted.
/// The result of the deepest completed search is returned.
pub fn iterative_deepening<S: SearchSpace>(
    space: &S,
    board: &MorrisBoard,
    max_depth: u32,
    budget: Duration,
) -> MinimaxResult<S::Action> {
    let start = Instant::now();
    let mut result = alpha_beta(space, board, 1);

    for depth in 2..=max_depth {
        if result.value >= WIN_VALUE || start.elapsed() >= budget {
            break;
        }

        let next = alpha_beta(space, board, depth);
        let nodes = result.nodes + next.nodes;
        result = MinimaxResult { nodes, ..next };
    }

    debug!(
        depth = result.depth,
        nodes = result.nodes,
        value = result.value,
        best = ?result.best_move,
        elapsed = ?start.elapsed(),
        "alpha-beta search finished"
    );
    result
}

#[derive(Debug, Clone)]
pub struct AlphaBetaConfig {
    pub placement_depth: u32,
    pub slide_depth: u32,
    pub removal_depth: u32,
    /// Budget for iterative deepening, checked before starting each deeper search.
    pub time_budget: Duration,
}

impl Default for AlphaBetaConfig {
    fn default() -> Self {
        AlphaBetaConfig {
            placement_depth: 4,
            slide_depth: 8,
            removal_depth: 2,
            time_budget: Duration::from_secs(2),
        }
    }
}

/// The rule based bot: alpha-beta search for every decision, using [MillHeuristic] for placements and removals and
/// [ExtendedHeuristic] for slides.
#[derive(Debug)]
pub struct AlphaBetaBot {
    config: AlphaBetaConfig,
    // slide found while selecting a piece, keyed by the position and player it was found for
    planned: Option<(u64, Player, Move)>,
}

impl AlphaBetaBot {
    pub fn new(config: AlphaBetaConfig) -> Self {
        AlphaBetaBot { config, planned: None }
    }

    pub fn config(&self) -> &AlphaBetaConfig {
        &self.config
    }

    fn search_slide(&self, board: &MorrisBoard, from: Option<u8>) -> Option<Move> {
        let space = SlideSearch {
            heuristic: ExtendedHeuristic,
            from,
        };
        iterative_deepening(&space, board, self.config.slide_depth, self.config.time_budget)
            .best_move
            .map(|turn| turn.mv)
    }
}

impl Default for AlphaBetaBot {
    fn default() -> Self {
        AlphaBetaBot::new(AlphaBetaConfig::default())
    }
}

impl MorrisBot for AlphaBetaBot {
    fn place_piece(&mut self, board: &MorrisBoard) -> Option<u8> {
        let space = PlacementSearch {
            heuristic: MillHeuristic,
        };
        let result = iterative_deepening(&space, board, self.config.placement_depth, self.config.time_budget);
        let candidate = match result.best_move {
            Some(Turn {
                mv: Move::Place(pos), ..
            }) => Some(pos),
            _ => None,
        };
        validated("placement", moves::placements(board), candidate)
    }

    fn select_piece(&mut self, board: &MorrisBoard) -> Option<u8> {
        self.planned = None;
        let candidate = match self.search_slide(board, None) {
            Some(mv @ Move::Slide { from, .. }) => {
                self.planned = Some((board.position_key(), board.next_player(), mv));
                Some(from)
            }
            _ => None,
        };
        validated("selection", moves::selectable(board), candidate)
    }

    fn determine_move(&mut self, board: &MorrisBoard, selected: u8) -> Option<u8> {
        let planned = self.planned.take().and_then(|(key, player, mv)| match mv {
            Move::Slide { from, to }
                if key == board.position_key() && player == board.next_player() && from == selected =>
            {
                Some(to)
            }
            _ => None,
        });

        let candidate = planned.or_else(|| match self.search_slide(board, Some(selected)) {
            Some(Move::Slide { to, .. }) => Some(to),
            _ => None,
        });
        validated("destination", moves::destinations(board, selected), candidate)
    }

    fn determine_piece_to_delete(&mut self, board: &MorrisBoard) -> Option<u8> {
        let space = RemovalSearch {
            heuristic: MillHeuristic,
        };
        let result = iterative_deepening(&space, board, self.config.removal_depth, self.config.time_budget);
        validated("removal", moves::removals(board), result.best_move)
    }
}
