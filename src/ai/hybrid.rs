use crate::ai::MorrisBot;
use crate::games::morris::MorrisBoard;

/// Composes two bots: `rule` handles placements and removals, `adaptive` picks and moves pieces.
#[derive(Debug)]
pub struct HybridBot<R: MorrisBot, A: MorrisBot> {
    pub rule: R,
    pub adaptive: A,
}

impl<R: MorrisBot, A: MorrisBot> HybridBot<R, A> {
    pub fn new(rule: R, adaptive: A) -> Self {
        HybridBot { rule, adaptive }
    }
}

impl<R: MorrisBot, A: MorrisBot> MorrisBot for HybridBot<R, A> {
    fn place_piece(&mut self, board: &MorrisBoard) -> Option<u8> {
        self.rule.place_piece(board)
    }

    fn select_piece(&mut self, board: &MorrisBoard) -> Option<u8> {
        self.adaptive.select_piece(board)
    }

    fn determine_move(&mut self, board: &MorrisBoard, selected: u8) -> Option<u8> {
        self.adaptive.determine_move(board, selected)
    }

    fn determine_piece_to_delete(&mut self, board: &MorrisBoard) -> Option<u8> {
        self.rule.determine_piece_to_delete(board)
    }
}
