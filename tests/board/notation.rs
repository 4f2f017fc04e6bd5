use morris_game::board::{Board, Player};
use morris_game::games::morris::{MorrisBoard, Move, Phase, Variant};
use morris_game::util::board_gen::random_board_with_moves;
use morris_game::util::tiny::consistent_rng;

#[test]
fn start_notation() {
    let board = MorrisBoard::new(Variant::NineMen);
    assert_eq!(board.to_notation(), "9 ........................ a place 0 0 0");

    let board = MorrisBoard::new(Variant::TwelveMen);
    assert_eq!(board.to_notation(), "12 ........................ a place 0 0 0");
}

#[test]
fn parse_fields() {
    let board = MorrisBoard::from_notation("9 ab.......b.............. b place 2 2 0").unwrap();
    assert_eq!(board.variant(), Variant::NineMen);
    assert_eq!(board.tile(0), Some(Player::A));
    assert_eq!(board.tile(1), Some(Player::B));
    assert_eq!(board.tile(9), Some(Player::B));
    assert_eq!(board.tile(2), None);
    assert_eq!(board.next_player(), Player::B);
    assert_eq!(board.phase(), Phase::Placing);
    // a piece of a has been removed
    assert_eq!(board.removed_count(Player::A), 1);
    assert_eq!(board.pieces_in_hand(Player::B), 7);
}

#[test]
fn round_trip_random_boards() {
    let mut rng = consistent_rng();
    for variant in Variant::ALL {
        for n in [0, 3, 10, 24, 30] {
            let board = random_board_with_moves(&MorrisBoard::new(variant), n, &mut rng);
            let notation = board.to_notation();
            let parsed = MorrisBoard::from_notation(&notation).unwrap();

            assert_eq!(parsed.to_notation(), notation);
            assert_eq!(parsed.phase(), board.phase());
            assert_eq!(parsed.next_player(), board.next_player());
            // history is not part of the notation, so the outcome only matches without repetitions
            if board.repetitions() == 1 {
                assert_eq!(parsed.outcome(), board.outcome());
            }
        }
    }
}

#[test]
fn invalid_notation() {
    let invalid = [
        "",
        "9 ........................ a place 0 0",
        "9 ....................... a place 0 0 0",
        "9 ........................ c place 0 0 0",
        "9 ........................ a fly 0 0 0",
        "10 ........................ a place 0 0 0",
        "9 aaaa.................... a place 3 0 0",
        "9 ........................ a place 10 0 0",
        "9 ........................ a place 9 9 0",
        "9 ........................ a move 8 9 0",
        "9 a....................... a remove 1 0 0",
        "9 ........................ a place 9 8 0",
        "9 ........................ a place 0 0 0 extra",
    ];
    for notation in invalid {
        let result = MorrisBoard::from_notation(notation);
        assert!(result.is_err(), "parsed invalid notation {:?} as {:?}", notation, result);
    }
}

#[test]
fn removal_notation() {
    let board = MorrisBoard::from_notation("9 aaab.................... a remove 3 1 0").unwrap();
    assert_eq!(board.phase(), Phase::Removal(Player::A));
    assert_eq!(board.to_notation(), "9 aaab.................... a remove 3 1 0");
}

#[test]
fn move_notation() {
    let cases = [
        ("4", Move::Place(4)),
        ("4-7", Move::Slide { from: 4, to: 7 }),
        ("x13", Move::Remove(13)),
        ("0", Move::Place(0)),
        ("23-0", Move::Slide { from: 23, to: 0 }),
    ];
    for (s, mv) in cases {
        assert_eq!(Move::from_notation(s), Ok(mv));
        assert_eq!(mv.to_notation(), s);
        assert_eq!(format!("{}", mv), s);
    }

    for s in ["", "24", "x", "x24", "-", "1-", "a", "1-2-3", "-1"] {
        assert!(Move::from_notation(s).is_err(), "parsed invalid move {:?}", s);
    }
}

#[test]
fn display_contains_board() {
    let board = MorrisBoard::from_notation("9 ab...................... a place 1 1 0").unwrap();
    let display = format!("{}", board);

    assert!(display.starts_with("notation: 9 ab"));
    assert!(display.contains("a-----------b-----------."));
    assert!(display.contains("a: 8 in hand, b: 8 in hand"));
}
