use std::time::Duration;

use rand::Rng;

use morris_game::ai::minimax::{
    alpha_beta, iterative_deepening, minimax_value, AlphaBetaBot, AlphaBetaConfig, PlacementSearch, RemovalSearch,
    SearchSpace, SlideSearch, Turn, WIN_VALUE,
};
use morris_game::ai::MorrisBot;
use morris_game::board::{Board, Player};
use morris_game::games::morris::{moves, MorrisBoard, Move, Phase, Variant};
use morris_game::heuristic::morris::{ExtendedHeuristic, MillHeuristic};
use morris_game::util::board_gen::{random_board_in_phase, random_board_with_moves};
use morris_game::util::tiny::consistent_rng;

use crate::ai::{quick_alpha_beta, winning_slide_board};
use crate::board::board_from_pieces;

fn check_pruning<S: SearchSpace>(space: &S, board: &MorrisBoard, depth: u32) {
    let pruned = alpha_beta(space, board, depth);
    let full = minimax_value(space, board, depth);
    assert_eq!(pruned.value, full, "depth {} on {:?}", depth, board);
    assert_eq!(pruned.depth, depth);
    assert!(pruned.nodes > 0);
}

#[test]
fn pruning_matches_minimax_placing() {
    let mut rng = consistent_rng();
    let space = PlacementSearch {
        heuristic: MillHeuristic,
    };

    for _ in 0..5 {
        let n = rng.gen_range(4..12);
        let board = random_board_with_moves(&MorrisBoard::new(Variant::NineMen), n, &mut rng);
        if board.phase() != Phase::Placing {
            continue;
        }
        for depth in 1..=2 {
            check_pruning(&space, &board, depth);
        }
    }
}

#[test]
fn pruning_matches_minimax_sliding() {
    let mut rng = consistent_rng();
    let space = SlideSearch {
        heuristic: ExtendedHeuristic,
        from: None,
    };

    for _ in 0..5 {
        let board = random_board_in_phase(&MorrisBoard::new(Variant::NineMen), &mut rng, |phase| {
            matches!(phase, Phase::Moving | Phase::Flying)
        });
        for depth in 1..=3 {
            check_pruning(&space, &board, depth);
        }
    }
}

#[test]
fn pruning_matches_minimax_removal() {
    let board = board_from_pieces(9, &[0, 1, 2, 4], &[9, 10, 16, 20, 21, 22, 23], "a remove 4 7 0");
    let space = RemovalSearch {
        heuristic: MillHeuristic,
    };
    for depth in 1..=3 {
        check_pruning(&space, &board, depth);
    }
}

#[test]
fn finds_winning_slide() {
    let board = winning_slide_board();
    let space = SlideSearch {
        heuristic: ExtendedHeuristic,
        from: None,
    };

    let result = alpha_beta(&space, &board, 1);
    assert_eq!(result.value, WIN_VALUE);
    let best = result.best_move.unwrap();
    assert_eq!(best.mv, Move::Slide { from: 14, to: 2 });
    assert!(best.removal.is_some());

    // a proven win stops the deepening right away
    let result = iterative_deepening(&space, &board, 6, Duration::from_secs(60));
    assert_eq!(result.depth, 1);
    assert_eq!(result.value, WIN_VALUE);
}

#[test]
fn restricted_slide_search() {
    let board = winning_slide_board();
    let space = SlideSearch {
        heuristic: ExtendedHeuristic,
        from: Some(19),
    };

    let result = alpha_beta(&space, &board, 2);
    match result.best_move {
        Some(Turn {
            mv: Move::Slide { from, .. }, ..
        }) => assert_eq!(from, 19),
        other => panic!("expected a slide of 19, got {:?}", other),
    }
}

#[test]
fn placement_completes_mill() {
    let board = board_from_pieces(9, &[0, 1], &[9, 13], "a place 2 2 0");
    let space = PlacementSearch {
        heuristic: MillHeuristic,
    };

    let result = alpha_beta(&space, &board, 1);
    let best = result.best_move.unwrap();
    assert_eq!(best.mv, Move::Place(2));
    assert!(best.removal.is_some());
}

#[test]
fn placement_blocks_mill() {
    let board = board_from_pieces(9, &[0, 1], &[9], "b place 2 1 0");
    let space = PlacementSearch {
        heuristic: MillHeuristic,
    };

    let result = alpha_beta(&space, &board, 2);
    assert_eq!(result.best_move.map(|turn| turn.mv), Some(Move::Place(2)));
}

#[test]
fn removal_search_scratch_boards() {
    let board = board_from_pieces(9, &[0, 1, 2, 4], &[9, 10, 16, 20, 21, 22, 23], "a remove 4 7 0");
    let space = RemovalSearch {
        heuristic: MillHeuristic,
    };

    let root: Vec<u8> = space.actions(&board, true);
    assert_eq!(root, vec![9, 10, 16, 20]);

    let removed = space.apply(&board, 9, true);
    assert_eq!(removed.tile(9), None);
    assert_eq!(removed.next_player(), Player::B);

    let taken = space.apply(&board, 9, false);
    assert_eq!(taken.tile(9), Some(Player::A));
}

#[test]
fn zero_budget_runs_one_depth() {
    let board = MorrisBoard::new(Variant::NineMen);
    let space = PlacementSearch {
        heuristic: MillHeuristic,
    };
    let result = iterative_deepening(&space, &board, 4, Duration::ZERO);
    assert_eq!(result.depth, 1);
    assert!(result.best_move.is_some());
}

#[test]
fn bot_plays_winning_slide() {
    let mut bot = AlphaBetaBot::new(quick_alpha_beta());
    let board = winning_slide_board();

    assert_eq!(bot.select_piece(&board), Some(14));
    assert_eq!(bot.determine_move(&board, 14), Some(2));
    assert_eq!(bot.choose_move(&board), Some(Move::Slide { from: 14, to: 2 }));
}

#[test]
fn bot_decisions_are_legal() {
    let mut rng = consistent_rng();
    let mut bot = AlphaBetaBot::new(quick_alpha_beta());

    for _ in 0..10 {
        let n = rng.gen_range(0..40);
        let board = random_board_with_moves(&MorrisBoard::new(Variant::TwelveMen), n, &mut rng);
        if board.is_done() {
            continue;
        }
        let mv = bot.choose_move(&board).unwrap();
        assert!(board.is_available_move(mv).unwrap(), "{:?} on {:?}", mv, board);
    }
}

#[test]
fn bot_removal_is_legal() {
    let board = board_from_pieces(9, &[0, 1, 2, 4], &[9, 10, 16, 20, 21, 22, 23], "a remove 4 7 0");
    let mut bot = AlphaBetaBot::default();

    let removal = bot.determine_piece_to_delete(&board).unwrap();
    assert!(moves::removals(&board).has(removal));
    assert!(![21, 22, 23].contains(&removal));
}

#[test]
fn done_board_has_no_decisions() {
    let board = board_from_pieces(9, &[0, 4, 13, 19], &[21, 23], "a move 9 9 0");
    assert!(board.is_done());

    let mut bot = AlphaBetaBot::new(AlphaBetaConfig::default());
    assert_eq!(bot.place_piece(&board), None);
    assert_eq!(bot.select_piece(&board), None);
    assert_eq!(bot.determine_piece_to_delete(&board), None);
    assert_eq!(bot.choose_move(&board), None);
}
