//! Time bounded Monte Carlo Tree Search with UCB1 selection and greedy-random rollouts.
//!
//! Rewards are stored relative to the player that owns the root decision. During selection the mean reward is
//! viewed from the player choosing at that node, so the opponent picks the moves that are worst for the root player.
//! This differs from plain UCB1 on root-relative rewards, which would let the opponent play for the root player.
use std::ops::Range;
use std::time::{Duration, Instant};

use decorum::N64;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::ai::{validated, MorrisBot};
use crate::board::{Board, Outcome, Player};
use crate::games::morris::moves;
use crate::games::morris::{MorrisBoard, Move, Phase};
use crate::heuristic::morris::mobility;

/// The sub-decision a search is run for, which restricts the actions considered at the root.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Decision {
    Place,
    Select,
    /// Pick the destination for the given selected piece.
    Move(u8),
    Delete,
}

impl Decision {
    fn accepts(self, mv: Move) -> bool {
        match (self, mv) {
            (Decision::Place, Move::Place(_)) => true,
            (Decision::Select, Move::Slide { .. }) => true,
            (Decision::Move(selected), Move::Slide { from, .. }) => from == selected,
            (Decision::Delete, Move::Remove(_)) => true,
            _ => false,
        }
    }

    /// The position this decision answers with for `mv`.
    fn position(self, mv: Move) -> u8 {
        match (self, mv) {
            (Decision::Select, Move::Slide { from, .. }) => from,
            (_, Move::Slide { to, .. }) => to,
            (_, Move::Place(pos) | Move::Remove(pos)) => pos,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Wall clock budget, checked before every iteration.
    pub time_budget: Duration,
    /// Optional cap on the number of iterations, mostly for reproducible tests.
    pub max_iterations: Option<u64>,
    pub exploration: f64,
    pub rollout_depth: u32,
    /// Probability of playing the first ranked move instead of a random one during rollouts.
    pub greedy_probability: f64,
    /// Selection bonus for moves that close a mill, and penalty for moves that let the opponent close one.
    pub mill_bonus: f64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        MctsConfig {
            time_budget: Duration::from_secs(3),
            max_iterations: None,
            exploration: 1.41,
            rollout_depth: 50,
            greedy_probability: 0.5,
            mill_bonus: 0.1,
        }
    }
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<usize>,
    mv: Option<Move>,
    board: MorrisBoard,
    children: Option<Range<usize>>,

    visits: u64,
    total_reward: f64,
    bias: f64,
}

impl Node {
    fn new(parent: Option<usize>, mv: Option<Move>, board: MorrisBoard, bias: f64) -> Self {
        Node {
            parent,
            mv,
            board,
            children: None,
            visits: 0,
            total_reward: 0.0,
            bias,
        }
    }

    fn mean_reward(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.total_reward / self.visits as f64
        }
    }
}

/// The statistics of a root child after a search.
#[derive(Debug, Clone)]
pub struct ChildStats {
    pub mv: Move,
    pub visits: u64,
    pub mean_reward: f64,
}

#[derive(Debug)]
pub struct MctsResult {
    /// The most visited root action, `None` if there are no actions for the decision.
    pub best_move: Option<Move>,
    pub iterations: u64,
    pub children: Vec<ChildStats>,
}

#[derive(Debug)]
struct Tree<'a> {
    config: &'a MctsConfig,
    decision: Decision,
    root_player: Player,
    nodes: Vec<Node>,
}

/// Run a search for `decision` on `board`, returning the recommended full move.
pub fn mcts(board: &MorrisBoard, decision: Decision, config: &MctsConfig, rng: &mut impl Rng) -> MctsResult {
    let start = Instant::now();

    let mut tree = Tree {
        config,
        decision,
        root_player: board.next_player(),
        nodes: vec![Node::new(None, None, board.clone(), 0.0)],
    };

    if board.is_done() {
        return MctsResult {
            best_move: None,
            iterations: 0,
            children: vec![],
        };
    }
    tree.expand(0);

    let mut iterations = 0;
    if tree.child_count(0) > 1 {
        while start.elapsed() < config.time_budget && config.max_iterations.map_or(true, |max| iterations < max) {
            tree.iterate(rng);
            iterations += 1;
        }
    }

    let children = tree.root_children();
    let best_move = children
        .iter()
        .max_by_key(|c| (c.visits, N64::from_inner(c.mean_reward)))
        .map(|c| c.mv);

    debug!(
        ?decision,
        iterations,
        nodes = tree.nodes.len(),
        best = ?best_move,
        elapsed = ?start.elapsed(),
        "mcts search finished"
    );

    MctsResult {
        best_move,
        iterations,
        children,
    }
}

impl Tree<'_> {
    fn child_count(&self, node: usize) -> usize {
        self.nodes[node].children.as_ref().map_or(0, |c| c.len())
    }

    fn root_children(&self) -> Vec<ChildStats> {
        let range = self.nodes[0].children.clone().unwrap_or(0..0);
        self.nodes[range]
            .iter()
            .filter_map(|node| {
                node.mv.map(|mv| ChildStats {
                    mv,
                    visits: node.visits,
                    mean_reward: node.mean_reward(),
                })
            })
            .collect()
    }

    fn iterate(&mut self, rng: &mut impl Rng) {
        // selection
        let mut curr = 0;
        while let Some(range) = self.nodes[curr].children.clone() {
            if range.is_empty() {
                break;
            }
            curr = self.select_child(curr, range);
        }

        // expansion
        let leaf = if self.nodes[curr].board.is_done() {
            curr
        } else {
            self.expand(curr);
            match self.nodes[curr].children.clone() {
                Some(range) if !range.is_empty() => range.start,
                _ => curr,
            }
        };

        // simulation
        let reward = self.rollout(&self.nodes[leaf].board, rng);

        // backpropagation
        let mut next = Some(leaf);
        while let Some(index) = next {
            let node = &mut self.nodes[index];
            node.visits += 1;
            node.total_reward += reward;
            next = node.parent;
        }
    }

    fn select_child(&self, parent: usize, range: Range<usize>) -> usize {
        let parent_node = &self.nodes[parent];
        let sign = if parent_node.board.next_player() == self.root_player {
            1.0
        } else {
            -1.0
        };
        let ln_visits = (parent_node.visits.max(1) as f64).ln();

        // unvisited children come first, in order
        if let Some(index) = range.clone().find(|&i| self.nodes[i].visits == 0) {
            return index;
        }

        let ucb = |i: usize| {
            let node = &self.nodes[i];
            let exploration = self.config.exploration * (ln_visits / node.visits as f64).sqrt();
            sign * node.mean_reward() + exploration + node.bias
        };

        let mut best = range.start;
        let mut best_value = f64::NEG_INFINITY;
        for i in range {
            let value = ucb(i);
            if value > best_value {
                best = i;
                best_value = value;
            }
        }
        best
    }

    fn expand(&mut self, node: usize) {
        let board = self.nodes[node].board.clone();
        let mut candidates = moves::available_moves(&board);
        if node == 0 {
            let decision = self.decision;
            candidates.retain(|&mv| decision.accepts(mv));
        }

        let start = self.nodes.len();
        for mv in candidates {
            // SAFETY: unwrap is safe because the move comes from the available moves
            let child = board.clone_and_play(mv).unwrap();
            let bias = self.mill_bias(&board, mv, &child);
            self.nodes.push(Node::new(Some(node), Some(mv), child, bias));
        }
        self.nodes[node].children = Some(start..self.nodes.len());
    }

    fn mill_bias(&self, board: &MorrisBoard, mv: Move, child: &MorrisBoard) -> f64 {
        let mut bias = 0.0;
        if moves::forms_mill(board, mv) {
            bias += self.config.mill_bonus;
        }
        if allows_opponent_mill(child, board.next_player()) {
            bias -= self.config.mill_bonus;
        }
        bias
    }

    fn rollout(&self, start: &MorrisBoard, rng: &mut impl Rng) -> f64 {
        let mut board = start.clone();
        for _ in 0..self.config.rollout_depth {
            if board.is_done() {
                break;
            }
            let candidates = moves::available_moves(&board);
            let mv = if rng.gen_bool(self.config.greedy_probability) {
                candidates.first()
            } else {
                candidates.choose(rng)
            };
            match mv {
                // SAFETY: unwrap is safe because the move comes from the available moves
                Some(&mv) => board.play(mv).unwrap(),
                None => break,
            }
        }
        reward(&board, self.root_player)
    }
}

/// Whether, after `player` moved to reach `board`, the opponent can close a mill with its next placement or slide.
fn allows_opponent_mill(board: &MorrisBoard, player: Player) -> bool {
    let opponent = player.other();
    if board.is_done() || board.next_player() != opponent {
        return false;
    }
    match board.phase() {
        Phase::Placing => moves::placements(board).iter().any(|p| board.forms_mill(p, opponent)),
        Phase::Moving | Phase::Flying => moves::slides(board).into_iter().any(|mv| moves::forms_mill(board, mv)),
        Phase::Removal(_) => false,
    }
}

/// The reward of `board` for `pov`: the outcome if the game is done, otherwise a heuristic in `[-1, 1]` built from the
/// piece and mobility differentials.
pub fn reward(board: &MorrisBoard, pov: Player) -> f64 {
    match board.outcome() {
        Some(Outcome::WonBy(winner)) => winner.sign::<f64>(pov),
        Some(Outcome::Draw) => 0.0,
        None => {
            let other = pov.other();
            let pieces = |p: Player| (board.pieces_on_board(p) + board.pieces_in_hand(p)) as f64;
            let piece_term = (pieces(pov) - pieces(other)) / board.required_pieces() as f64;

            let (own, opp) = (mobility(board, pov) as f64, mobility(board, other) as f64);
            let mobility_term = if own + opp == 0.0 { 0.0 } else { (own - opp) / (own + opp) };

            (0.5 * (piece_term + mobility_term)).clamp(-1.0, 1.0)
        }
    }
}

/// The adaptive bot, running a fresh search for every decision.
#[derive(Debug)]
pub struct MctsBot<R: Rng> {
    config: MctsConfig,
    rng: R,
}

impl<R: Rng> MctsBot<R> {
    pub fn new(config: MctsConfig, rng: R) -> Self {
        MctsBot { config, rng }
    }

    fn decide(&mut self, board: &MorrisBoard, decision: Decision) -> Option<u8> {
        mcts(board, decision, &self.config, &mut self.rng)
            .best_move
            .map(|mv| decision.position(mv))
    }
}

impl<R: Rng + std::fmt::Debug> MorrisBot for MctsBot<R> {
    fn place_piece(&mut self, board: &MorrisBoard) -> Option<u8> {
        let candidate = self.decide(board, Decision::Place);
        validated("placement", moves::placements(board), candidate)
    }

    fn select_piece(&mut self, board: &MorrisBoard) -> Option<u8> {
        let candidate = self.decide(board, Decision::Select);
        validated("selection", moves::selectable(board), candidate)
    }

    fn determine_move(&mut self, board: &MorrisBoard, selected: u8) -> Option<u8> {
        let candidate = self.decide(board, Decision::Move(selected));
        validated("destination", moves::destinations(board, selected), candidate)
    }

    fn determine_piece_to_delete(&mut self, board: &MorrisBoard) -> Option<u8> {
        let candidate = self.decide(board, Decision::Delete);
        validated("removal", moves::removals(board), candidate)
    }
}
