use morris_game::ai::minimax::AlphaBetaBot;
use morris_game::ai::trained::{LinearEvaluator, TrainedBot};
use morris_game::board::Board;
use morris_game::games::morris::{MorrisBoard, Variant};
use morris_game::util::board_gen::board_with_moves;
use morris_game::util::bot_game;
use morris_game::util::game_stats::average_game_stats;

use crate::ai::quick_alpha_beta;

#[test]
fn small_match() {
    let result = bot_game::run(
        || MorrisBoard::new(Variant::NineMen),
        || AlphaBetaBot::new(quick_alpha_beta()),
        || TrainedBot::<LinearEvaluator>::new(None),
        1,
        true,
        |_, _| {},
    );

    assert_eq!(result.game_count, 2);
    assert_eq!(result.replays.len(), 2);
    assert_eq!(result.wdl_l.sum(), 2);

    // bots that only play legal moves never forfeit, so every replay reproduces its outcome
    for replay in &result.replays {
        let end = board_with_moves(replay.start.clone(), &replay.moves);
        assert_eq!(end.outcome(), Some(replay.outcome));
    }
    assert_ne!(result.replays[0].player_l, result.replays[1].player_l);
}

#[test]
fn game_stats() {
    let start = MorrisBoard::new(Variant::TwelveMen);
    let stats = average_game_stats(&start, TrainedBot::<LinearEvaluator>::new(None), 1).unwrap();

    assert!(stats.game_length >= 5.0);
    assert!(stats.available_moves > 0.0);
}
