use morris_game::ai::hybrid::HybridBot;
use morris_game::ai::MorrisBot;
use morris_game::games::morris::{MorrisBoard, Variant};

/// Answers every decision with a fixed position and counts how often it was asked.
#[derive(Debug, Default)]
struct FixedBot {
    answer: u8,
    calls: [u32; 4],
}

impl FixedBot {
    fn new(answer: u8) -> Self {
        FixedBot { answer, calls: [0; 4] }
    }
}

impl MorrisBot for FixedBot {
    fn place_piece(&mut self, _: &MorrisBoard) -> Option<u8> {
        self.calls[0] += 1;
        Some(self.answer)
    }

    fn select_piece(&mut self, _: &MorrisBoard) -> Option<u8> {
        self.calls[1] += 1;
        Some(self.answer)
    }

    fn determine_move(&mut self, _: &MorrisBoard, _: u8) -> Option<u8> {
        self.calls[2] += 1;
        Some(self.answer)
    }

    fn determine_piece_to_delete(&mut self, _: &MorrisBoard) -> Option<u8> {
        self.calls[3] += 1;
        Some(self.answer)
    }
}

#[test]
fn routing() {
    let board = MorrisBoard::new(Variant::NineMen);
    let mut bot = HybridBot::new(FixedBot::new(1), FixedBot::new(2));

    assert_eq!(bot.place_piece(&board), Some(1));
    assert_eq!(bot.select_piece(&board), Some(2));
    assert_eq!(bot.determine_move(&board, 0), Some(2));
    assert_eq!(bot.determine_piece_to_delete(&board), Some(1));

    assert_eq!(bot.rule.calls, [1, 0, 0, 1]);
    assert_eq!(bot.adaptive.calls, [0, 1, 1, 0]);
}

#[test]
fn placement_through_rule_bot() {
    let board = MorrisBoard::new(Variant::TwelveMen);
    let mut bot = HybridBot::new(FixedBot::new(7), FixedBot::new(3));

    assert_eq!(bot.choose_move(&board), Some(morris_game::games::morris::Move::Place(7)));
    assert_eq!(bot.adaptive.calls, [0; 4]);
}
