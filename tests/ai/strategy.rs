use morris_game::ai::strategy::{StrategyConfig, StrategyKind, UnknownStrategy};
use morris_game::board::Board;
use morris_game::games::morris::{MorrisBoard, Variant};

use crate::ai::{quick_alpha_beta, quick_mcts, winning_slide_board};

fn quick_config() -> StrategyConfig {
    StrategyConfig {
        alpha_beta: quick_alpha_beta(),
        mcts: quick_mcts(50),
        evaluator: None,
    }
}

#[test]
fn parse_names() {
    for kind in StrategyKind::ALL {
        assert_eq!(kind.name().parse::<StrategyKind>(), Ok(kind));
        assert_eq!(kind.to_string(), kind.name());
    }
    assert_eq!("AlphaBeta".parse::<StrategyKind>(), Ok(StrategyKind::AlphaBeta));
    assert_eq!(
        "random".parse::<StrategyKind>(),
        Err(UnknownStrategy("random".to_owned()))
    );
}

#[test]
fn built_bots_play_legal_moves() {
    let config = quick_config();

    for kind in StrategyKind::ALL {
        for board in [MorrisBoard::new(Variant::NineMen), winning_slide_board()] {
            let mut bot = kind.build(&config, 0);
            let mv = bot.choose_move(&board).unwrap();
            assert!(board.is_available_move(mv).unwrap(), "{} played {:?} on {:?}", kind, mv, board);
        }
    }
}

#[test]
fn default_config() {
    let config = StrategyConfig::default();
    assert_eq!(config.alpha_beta.placement_depth, 4);
    assert_eq!(config.alpha_beta.slide_depth, 8);
    assert_eq!(config.mcts.exploration, 1.41);
    assert!(config.evaluator.is_none());
}
