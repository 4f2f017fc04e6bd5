use internal_iterator::{Internal, IteratorExt};

use crate::board::{Board, BoardDone, BoardMoves, BoardSymmetry, Outcome, PlayError, Player};
use crate::games::morris::moves;
use crate::games::morris::topology::{position_at, Topology, Variant, COORDS, GRID_SIZE};
use crate::symmetry::D4Symmetry;
use crate::util::cells::{Cells, CELL_COUNT};

/// Moves without a mill after which the game is drawn.
pub const MAX_MOVES_WITHOUT_CAPTURE: u32 = 50;

/// The number of pieces at which a player starts flying.
pub const FLYING_PIECES: u8 = 3;

/// The phase of the game, as seen by the player to move.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Phase {
    /// Both players alternately add pieces to the board.
    Placing,
    /// Pieces slide along the edges of the board.
    Moving,
    /// Like [Phase::Moving], but the player to move has exactly three pieces left and may jump to any empty cell.
    /// This is never stored, it is derived from the piece count in [MorrisBoard::phase].
    Flying,
    /// The given player just closed a mill and now has to remove an opponent piece.
    Removal(Player),
}

/// A single action. Sliding a piece is one move even though the two-step
/// [MorrisBoard::select] / [MorrisBoard::move_selected] interface is available as well.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Move {
    Place(u8),
    Slide { from: u8, to: u8 },
    Remove(u8),
}

/// The full game state of a Nine or Twelve Men's Morris game.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct MorrisBoard {
    variant: Variant,
    tiles: [Cells; 2],
    // never `Phase::Flying`
    phase: Phase,
    next_player: Player,
    placed: [u8; 2],
    selected: Option<u8>,
    moves_without_capture: u32,
    history: Vec<u64>,
    draw_agreed: bool,
    forfeited: Option<Player>,
    outcome: Option<Outcome>,
}

impl Default for MorrisBoard {
    fn default() -> Self {
        MorrisBoard::new(Variant::NineMen)
    }
}

impl MorrisBoard {
    /// An empty board in the placing phase, with [Player::A] to move.
    pub fn new(variant: Variant) -> Self {
        let mut board = MorrisBoard {
            variant,
            tiles: [Cells::EMPTY; 2],
            phase: Phase::Placing,
            next_player: Player::A,
            placed: [0; 2],
            selected: None,
            moves_without_capture: 0,
            history: vec![],
            draw_agreed: false,
            forfeited: None,
            outcome: None,
        };
        board.history.push(board.position_key());
        board
    }

    /// Build a board from its raw parts, used when parsing notation.
    /// The caller is responsible for the consistency between the tiles and placed counts.
    pub(super) fn from_parts(
        variant: Variant,
        tiles: [Cells; 2],
        phase: Phase,
        next_player: Player,
        placed: [u8; 2],
        moves_without_capture: u32,
    ) -> Self {
        debug_assert!(phase != Phase::Flying);
        let mut board = MorrisBoard {
            variant,
            tiles,
            phase,
            next_player,
            placed,
            selected: None,
            moves_without_capture,
            history: vec![],
            draw_agreed: false,
            forfeited: None,
            outcome: None,
        };
        board.history.push(board.position_key());
        board.update_outcome();
        board
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn topology(&self) -> &'static Topology {
        self.variant.topology()
    }

    pub fn required_pieces(&self) -> u8 {
        self.variant.required_pieces()
    }

    /// The occupant of `pos`. Panics if `pos` is not a valid position.
    pub fn tile(&self, pos: u8) -> Option<Player> {
        assert!(pos < CELL_COUNT, "position {} out of range", pos);
        if self.tiles[0].has(pos) {
            Some(Player::A)
        } else if self.tiles[1].has(pos) {
            Some(Player::B)
        } else {
            None
        }
    }

    /// The positions occupied by `player`.
    pub fn pieces(&self, player: Player) -> Cells {
        self.tiles[player.index() as usize]
    }

    pub fn empty_cells(&self) -> Cells {
        !(self.tiles[0] | self.tiles[1])
    }

    pub fn pieces_on_board(&self, player: Player) -> u8 {
        self.pieces(player).count()
    }

    pub fn placed_count(&self, player: Player) -> u8 {
        self.placed[player.index() as usize]
    }

    /// The pieces `player` still has to place.
    pub fn pieces_in_hand(&self, player: Player) -> u8 {
        self.required_pieces() - self.placed_count(player)
    }

    /// The number of pieces of `player` that have been removed from the board so far.
    pub fn removed_count(&self, player: Player) -> u8 {
        self.placed_count(player) - self.pieces_on_board(player)
    }

    pub fn all_placed(&self) -> bool {
        Player::BOTH.iter().all(|&p| self.placed_count(p) == self.required_pieces())
    }

    pub fn moves_without_capture(&self) -> u32 {
        self.moves_without_capture
    }

    pub fn selected(&self) -> Option<u8> {
        self.selected
    }

    pub fn is_draw_agreed(&self) -> bool {
        self.draw_agreed
    }

    /// The current phase, with [Phase::Flying] derived from the piece count of the player to move.
    pub fn phase(&self) -> Phase {
        match self.phase {
            Phase::Moving if self.is_flying(self.next_player) => Phase::Flying,
            phase => phase,
        }
    }

    /// Whether `player` has placed all pieces and has exactly three left, allowing it to move to any empty cell.
    pub fn is_flying(&self, player: Player) -> bool {
        self.placed_count(player) == self.required_pieces() && self.pieces_on_board(player) == FLYING_PIECES
    }

    /// A compact key for the occupancy of the board, used for repetition detection.
    pub fn position_key(&self) -> u64 {
        self.tiles[0].inner() as u64 | ((self.tiles[1].inner() as u64) << CELL_COUNT)
    }

    /// How often the current occupancy has occurred so far, including the current occurrence.
    pub fn repetitions(&self) -> usize {
        let key = self.position_key();
        self.history.iter().filter(|&&k| k == key).count()
    }

    /// Whether a piece of `player` on `pos` would complete a mill.
    /// The occupancy of `pos` itself is ignored, so this works for placements that have not been applied yet.
    pub fn forms_mill(&self, pos: u8, player: Player) -> bool {
        let owned = self.pieces(player).set(pos);
        self.topology()
            .mill_lines(pos)
            .iter()
            .any(|line| line.iter().all(|&p| owned.has(p)))
    }

    /// Whether sliding the piece of `player` from `from` to `to` would complete a mill on `to`.
    pub fn forms_mill_after_slide(&self, from: u8, to: u8, player: Player) -> bool {
        let owned = self.pieces(player).clear(from).set(to);
        self.topology()
            .mill_lines(to)
            .iter()
            .any(|line| line.iter().all(|&p| owned.has(p)))
    }

    /// Whether the piece on `pos` is part of a mill.
    pub fn in_mill(&self, pos: u8) -> bool {
        match self.tile(pos) {
            None => false,
            Some(player) => self.forms_mill(pos, player),
        }
    }

    /// The opponent pieces `remover` is allowed to remove: those outside of mills,
    /// or all of them if every opponent piece is part of a mill.
    pub fn removable(&self, remover: Player) -> Cells {
        let opponent = self.pieces(remover.other());
        let unprotected: Cells = opponent.iter().filter(|&p| !self.in_mill(p)).collect();
        if unprotected.any() {
            unprotected
        } else {
            opponent
        }
    }

    /// The empty cells the piece on `pos` can move to: all of them when its owner is flying,
    /// otherwise only the empty neighbors. Empty for an empty `pos`.
    pub fn legal_destinations(&self, pos: u8) -> Cells {
        match self.tile(pos) {
            None => Cells::EMPTY,
            Some(owner) => {
                let reachable = if self.is_flying(owner) {
                    Cells::FULL
                } else {
                    self.topology().neighbors(pos)
                };
                reachable & self.empty_cells()
            }
        }
    }

    /// Whether any piece of `player` has a legal destination.
    pub fn can_move(&self, player: Player) -> bool {
        self.pieces(player).iter().any(|p| self.legal_destinations(p).any())
    }

    /// The number of distinct slides `player` could make.
    pub fn slide_count(&self, player: Player) -> u32 {
        self.pieces(player)
            .iter()
            .map(|p| self.legal_destinations(p).count() as u32)
            .sum()
    }

    /// Put a piece of the player to move on the empty cell `pos`.
    pub fn place(&mut self, pos: u8) -> Result<(), PlayError> {
        self.check_done()?;
        check_range(pos)?;
        let player = self.next_player;
        if self.phase != Phase::Placing || self.pieces_in_hand(player) == 0 {
            return Err(PlayError::WrongPhase);
        }
        if self.tile(pos).is_some() {
            return Err(PlayError::Occupied(pos));
        }

        self.tiles[player.index() as usize] = self.pieces(player).set(pos);
        self.placed[player.index() as usize] += 1;
        self.selected = None;

        if self.forms_mill(pos, player) {
            self.mill_formed();
        } else {
            self.end_turn();
        }
        Ok(())
    }

    /// Move the piece of the player to move from `from` to `to`, see [MorrisBoard::legal_destinations].
    pub fn slide(&mut self, from: u8, to: u8) -> Result<(), PlayError> {
        self.check_done()?;
        check_range(from)?;
        check_range(to)?;
        let player = self.next_player;
        if self.phase != Phase::Moving {
            return Err(PlayError::WrongPhase);
        }
        if self.tile(from) != Some(player) {
            return Err(PlayError::NotOwnPiece(from));
        }
        if self.tile(to).is_some() {
            return Err(PlayError::Occupied(to));
        }
        if !self.legal_destinations(from).has(to) {
            return Err(PlayError::Unreachable { from, to });
        }

        let index = player.index() as usize;
        self.tiles[index] = self.tiles[index].clear(from).set(to);
        self.selected = None;

        // only mills through the destination count, a piece leaving a mill cannot close it
        if self.forms_mill(to, player) {
            self.mill_formed();
        } else {
            self.moves_without_capture += 1;
            self.end_turn();
        }
        Ok(())
    }

    /// Remove the opponent piece on `pos` after closing a mill.
    pub fn remove(&mut self, pos: u8) -> Result<(), PlayError> {
        self.check_done()?;
        check_range(pos)?;
        let remover = match self.phase {
            Phase::Removal(remover) => remover,
            _ => return Err(PlayError::WrongPhase),
        };
        let opponent = remover.other();
        if self.tile(pos) != Some(opponent) {
            return Err(PlayError::NotOpponentPiece(pos));
        }
        if !self.removable(remover).has(pos) {
            return Err(PlayError::ProtectedByMill(pos));
        }

        self.tiles[opponent.index() as usize] = self.pieces(opponent).clear(pos);
        self.moves_without_capture = 0;
        self.end_turn();
        Ok(())
    }

    /// Select the piece on `pos` to be moved by [MorrisBoard::move_selected].
    /// Selecting another piece replaces the previous selection.
    pub fn select(&mut self, pos: u8) -> Result<(), PlayError> {
        self.check_done()?;
        check_range(pos)?;
        if self.phase != Phase::Moving {
            return Err(PlayError::WrongPhase);
        }
        if self.tile(pos) != Some(self.next_player) {
            return Err(PlayError::NotOwnPiece(pos));
        }
        if self.legal_destinations(pos).is_empty() {
            return Err(PlayError::Immobile(pos));
        }
        self.selected = Some(pos);
        Ok(())
    }

    /// Move the selected piece to `to`. The selection is kept if the move is refused.
    pub fn move_selected(&mut self, to: u8) -> Result<(), PlayError> {
        self.check_done()?;
        let from = self.selected.ok_or(PlayError::NothingSelected)?;
        self.slide(from, to)
    }

    /// Both players agree to a draw.
    pub fn agree_draw(&mut self) -> Result<(), BoardDone> {
        self.check_done()?;
        self.draw_agreed = true;
        self.update_outcome();
        Ok(())
    }

    /// `player` gives up, used when a bot cannot produce an action.
    pub fn forfeit(&mut self, player: Player) -> Result<(), BoardDone> {
        self.check_done()?;
        self.forfeited = Some(player);
        self.update_outcome();
        Ok(())
    }

    /// Change the occupant of `pos` and pass the turn, without any rule checks or outcome updates.
    /// Only meant for hypothetical positions inside searches.
    pub(crate) fn scratch_assign(&self, pos: u8, tile: Option<Player>) -> MorrisBoard {
        let mut next = self.clone();
        for player in Player::BOTH {
            let index = player.index() as usize;
            next.tiles[index] = if tile == Some(player) {
                next.tiles[index].set(pos)
            } else {
                next.tiles[index].clear(pos)
            };
        }
        next.next_player = self.next_player.other();
        next
    }

    fn mill_formed(&mut self) {
        self.moves_without_capture = 0;
        if self.pieces(self.next_player.other()).any() {
            self.phase = Phase::Removal(self.next_player);
        } else {
            // nothing to remove, the mill has no further effect
            self.end_turn();
        }
    }

    fn end_turn(&mut self) {
        self.next_player = self.next_player.other();
        self.phase = if self.all_placed() {
            Phase::Moving
        } else {
            Phase::Placing
        };
        self.history.push(self.position_key());
        self.update_outcome();
    }

    fn update_outcome(&mut self) {
        self.outcome = self.compute_outcome();
    }

    fn compute_outcome(&self) -> Option<Outcome> {
        if let Some(player) = self.forfeited {
            return Some(Outcome::WonBy(player.other()));
        }
        if self.draw_agreed {
            return Some(Outcome::Draw);
        }

        // a pending removal is always resolved first
        if let Phase::Removal(_) = self.phase {
            return None;
        }

        for player in Player::BOTH {
            if self.pieces_on_board(player) + self.pieces_in_hand(player) < FLYING_PIECES {
                return Some(Outcome::WonBy(player.other()));
            }
        }

        let moving = self.phase == Phase::Moving;
        let mover = self.next_player;
        let mover_stuck = moving && !self.can_move(mover);
        let other_stuck = moving && !self.can_move(mover.other());
        if mover_stuck && !other_stuck {
            return Some(Outcome::WonBy(mover.other()));
        }

        let repetitions = self.repetitions();
        if repetitions >= 3 {
            return Some(Outcome::Draw);
        }

        let all_placed = self.all_placed();
        let on_board = Player::BOTH.map(|p| self.pieces_on_board(p));
        if all_placed && on_board.iter().all(|&n| n == FLYING_PIECES) {
            return Some(Outcome::Draw);
        }

        if self.moves_without_capture >= MAX_MOVES_WITHOUT_CAPTURE {
            return Some(Outcome::Draw);
        }

        if mover_stuck && other_stuck {
            return Some(Outcome::Draw);
        }

        // unreachable in practice: with everything placed, two or fewer pieces already lost and three each already drew
        if all_placed && on_board.iter().all(|&n| n <= FLYING_PIECES) && repetitions >= 2 {
            return Some(Outcome::Draw);
        }

        None
    }

    fn map_history_key(sym: D4Symmetry, key: u64) -> u64 {
        let mask = Cells::FULL.inner() as u64;
        let a = map_cells(sym, Cells::new((key & mask) as u32));
        let b = map_cells(sym, Cells::new(((key >> CELL_COUNT) & mask) as u32));
        a.inner() as u64 | ((b.inner() as u64) << CELL_COUNT)
    }
}

fn check_range(pos: u8) -> Result<(), PlayError> {
    if pos < CELL_COUNT {
        Ok(())
    } else {
        Err(PlayError::OutOfRange(pos))
    }
}

/// Map a single position under a symmetry of the square board.
pub fn map_position(sym: D4Symmetry, pos: u8) -> u8 {
    let (x, y) = COORDS[pos as usize];
    let (x, y) = sym.map_xy(x, y, GRID_SIZE);
    // SAFETY: unwrap is safe because the set of positions is closed under the D4 symmetries of the grid
    position_at(x, y).unwrap()
}

fn map_cells(sym: D4Symmetry, cells: Cells) -> Cells {
    cells.iter().map(|p| map_position(sym, p)).collect()
}

impl Board for MorrisBoard {
    type Move = Move;

    fn next_player(&self) -> Player {
        self.next_player
    }

    fn is_available_move(&self, mv: Self::Move) -> Result<bool, BoardDone> {
        self.check_done()?;
        let available = match mv {
            Move::Place(pos) => self.phase == Phase::Placing && moves::placements(self).has(pos),
            Move::Slide { from, to } => moves::destinations(self, from).has(to),
            Move::Remove(pos) => moves::removals(self).has(pos),
        };
        Ok(available)
    }

    fn play(&mut self, mv: Self::Move) -> Result<(), PlayError> {
        match mv {
            Move::Place(pos) => self.place(pos),
            Move::Slide { from, to } => self.slide(from, to),
            Move::Remove(pos) => self.remove(pos),
        }
    }

    fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }
}

impl<'a> BoardMoves<'a, MorrisBoard> for MorrisBoard {
    type AllMovesIterator = Internal<std::vec::IntoIter<Move>>;
    type AvailableMovesIterator = Internal<std::vec::IntoIter<Move>>;

    fn all_possible_moves() -> Self::AllMovesIterator {
        let positions = 0..CELL_COUNT;
        let places = positions.clone().map(Move::Place);
        let slides = positions
            .clone()
            .flat_map(|from| (0..CELL_COUNT).filter(move |&to| to != from).map(move |to| Move::Slide { from, to }));
        let removes = positions.map(Move::Remove);
        places.chain(slides).chain(removes).collect::<Vec<_>>().into_iter().into_internal()
    }

    fn available_moves(&'a self) -> Result<Self::AvailableMovesIterator, BoardDone> {
        self.check_done()?;
        Ok(moves::available_moves(self).into_iter().into_internal())
    }
}

impl BoardSymmetry<MorrisBoard> for MorrisBoard {
    type Symmetry = D4Symmetry;

    fn map(&self, sym: D4Symmetry) -> Self {
        MorrisBoard {
            variant: self.variant,
            tiles: self.tiles.map(|cells| map_cells(sym, cells)),
            phase: self.phase,
            next_player: self.next_player,
            placed: self.placed,
            selected: self.selected.map(|p| map_position(sym, p)),
            moves_without_capture: self.moves_without_capture,
            history: self.history.iter().map(|&k| Self::map_history_key(sym, k)).collect(),
            draw_agreed: self.draw_agreed,
            forfeited: self.forfeited,
            outcome: self.outcome,
        }
    }

    fn map_move(&self, sym: D4Symmetry, mv: Move) -> Move {
        match mv {
            Move::Place(pos) => Move::Place(map_position(sym, pos)),
            Move::Slide { from, to } => Move::Slide {
                from: map_position(sym, from),
                to: map_position(sym, to),
            },
            Move::Remove(pos) => Move::Remove(map_position(sym, pos)),
        }
    }
}
