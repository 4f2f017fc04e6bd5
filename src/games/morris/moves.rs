//! Phase dependent action sets. All functions return an empty set when the action kind does not apply to the current
//! phase, so they can be called on any board.
use crate::board::{Board, Player};
use crate::games::morris::board::{MorrisBoard, Phase};
use crate::games::morris::Move;
use crate::util::cells::Cells;

/// The cells the player to move can place a piece on.
pub fn placements(board: &MorrisBoard) -> Cells {
    if board.is_done() || board.phase() != Phase::Placing {
        return Cells::EMPTY;
    }
    board.empty_cells()
}

/// The pieces of the player to move that have at least one legal destination.
pub fn selectable(board: &MorrisBoard) -> Cells {
    if board.is_done() || !is_moving(board) {
        return Cells::EMPTY;
    }
    let player = board.next_player();
    board
        .pieces(player)
        .iter()
        .filter(|&p| board.legal_destinations(p).any())
        .collect()
}

/// The cells the piece on `from` can move to, empty if it is not a piece of the player to move.
pub fn destinations(board: &MorrisBoard, from: u8) -> Cells {
    if board.is_done() || !is_moving(board) || !board.pieces(board.next_player()).has(from) {
        return Cells::EMPTY;
    }
    board.legal_destinations(from)
}

/// The opponent pieces that may be removed, respecting mill protection.
pub fn removals(board: &MorrisBoard) -> Cells {
    match board.phase() {
        Phase::Removal(remover) if !board.is_done() => board.removable(remover),
        _ => Cells::EMPTY,
    }
}

/// Every slide the player to move can make.
pub fn slides(board: &MorrisBoard) -> Vec<Move> {
    selectable(board)
        .iter()
        .flat_map(|from| destinations(board, from).iter().map(move |to| Move::Slide { from, to }))
        .collect()
}

/// Whether `mv`, played by the player to move, closes a mill.
pub fn forms_mill(board: &MorrisBoard, mv: Move) -> bool {
    let player = board.next_player();
    match mv {
        Move::Place(pos) => board.forms_mill(pos, player),
        Move::Slide { from, to } => board.forms_mill_after_slide(from, to, player),
        Move::Remove(_) => false,
    }
}

/// All available moves, with the ones that close a mill first. The relative order within both groups is by position.
pub fn available_moves(board: &MorrisBoard) -> Vec<Move> {
    let moves: Vec<Move> = match board.phase() {
        _ if board.is_done() => vec![],
        Phase::Placing => placements(board).iter().map(Move::Place).collect(),
        Phase::Moving | Phase::Flying => slides(board),
        Phase::Removal(_) => removals(board).iter().map(Move::Remove).collect(),
    };
    mill_first(board, moves)
}

/// Stable sort that moves the mill-closing moves to the front.
pub fn mill_first(board: &MorrisBoard, moves: Vec<Move>) -> Vec<Move> {
    let (mut mills, rest): (Vec<Move>, Vec<Move>) = moves.into_iter().partition(|&mv| forms_mill(board, mv));
    mills.extend(rest);
    mills
}

/// The number of lines in which `player` owns exactly two cells and the third is empty.
pub fn potential_mills(board: &MorrisBoard, player: Player) -> u32 {
    let own = board.pieces(player);
    let empty = board.empty_cells();
    board
        .topology()
        .all_mill_lines()
        .iter()
        .filter(|line| {
            let cells = Cells::from_slice(&line[..]);
            (cells & own).count() == 2 && (cells & empty).count() == 1
        })
        .count() as u32
}

fn is_moving(board: &MorrisBoard) -> bool {
    matches!(board.phase(), Phase::Moving | Phase::Flying)
}
