use std::fmt::{Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

use crate::ai::hybrid::HybridBot;
use crate::ai::mcts::{MctsBot, MctsConfig};
use crate::ai::minimax::{AlphaBetaBot, AlphaBetaConfig};
use crate::ai::trained::{DenseEvaluator, TrainedBot};
use crate::ai::MorrisBot;
use crate::util::tiny::seeded_rng;

/// The available bot strategies.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum StrategyKind {
    AlphaBeta,
    Mcts,
    Trained,
    /// [StrategyKind::AlphaBeta] for placements and removals, [StrategyKind::Mcts] for moving pieces.
    Hybrid,
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("unknown strategy {0:?}, expected one of alphabeta, mcts, trained, hybrid")]
pub struct UnknownStrategy(pub String);

/// Everything needed to build any of the strategies.
#[derive(Debug, Clone, Default)]
pub struct StrategyConfig {
    pub alpha_beta: AlphaBetaConfig,
    pub mcts: MctsConfig,
    /// The evaluator for [StrategyKind::Trained], the bot degrades to the heuristic without one.
    pub evaluator: Option<DenseEvaluator>,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::AlphaBeta,
        StrategyKind::Mcts,
        StrategyKind::Trained,
        StrategyKind::Hybrid,
    ];

    /// Build a new bot, `seed` is used for the strategies that need randomness.
    pub fn build(self, config: &StrategyConfig, seed: u64) -> Box<dyn MorrisBot> {
        let mcts = || MctsBot::new(config.mcts.clone(), seeded_rng(seed));
        let alpha_beta = || AlphaBetaBot::new(config.alpha_beta.clone());

        match self {
            StrategyKind::AlphaBeta => Box::new(alpha_beta()),
            StrategyKind::Mcts => Box::new(mcts()),
            StrategyKind::Trained => Box::new(TrainedBot::new(config.evaluator.clone())),
            StrategyKind::Hybrid => Box::new(HybridBot::new(alpha_beta(), mcts())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::AlphaBeta => "alphabeta",
            StrategyKind::Mcts => "mcts",
            StrategyKind::Trained => "trained",
            StrategyKind::Hybrid => "hybrid",
        }
    }
}

impl Display for StrategyKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StrategyKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownStrategy(s.to_owned()))
    }
}
