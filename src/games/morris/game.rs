use std::fmt::{Debug, Formatter};

use tracing::info;

use crate::ai::MorrisBot;
use crate::board::{Board, BoardDone, Outcome, PlayError, Player};
use crate::games::morris::{MorrisBoard, Move, Variant};

/// Receives the end of a game. Each method has an empty default implementation.
pub trait GameObserver {
    fn game_won(&mut self, _winner: Player) {}

    fn game_drawn(&mut self) {}
}

/// The authoritative game held by a user interface: the current board with undo and redo history,
/// notifying observers when the game ends.
pub struct MorrisGame {
    board: MorrisBoard,
    undo: Vec<MorrisBoard>,
    redo: Vec<MorrisBoard>,
    observers: Vec<Box<dyn GameObserver>>,
    // whether the observers have been told about the outcome of the current board
    notified: bool,
}

impl MorrisGame {
    pub fn new(variant: Variant) -> Self {
        MorrisGame {
            board: MorrisBoard::new(variant),
            undo: vec![],
            redo: vec![],
            observers: vec![],
            notified: false,
        }
    }

    pub fn board(&self) -> &MorrisBoard {
        &self.board
    }

    pub fn variant(&self) -> Variant {
        self.board.variant()
    }

    pub fn add_observer(&mut self, observer: Box<dyn GameObserver>) {
        self.observers.push(observer);
    }

    pub fn play(&mut self, mv: Move) -> Result<(), PlayError> {
        self.act(|board| board.play(mv))
    }

    pub fn place(&mut self, pos: u8) -> Result<(), PlayError> {
        self.act(|board| board.place(pos))
    }

    pub fn slide(&mut self, from: u8, to: u8) -> Result<(), PlayError> {
        self.act(|board| board.slide(from, to))
    }

    pub fn remove(&mut self, pos: u8) -> Result<(), PlayError> {
        self.act(|board| board.remove(pos))
    }

    /// Select a piece to move, see [MorrisBoard::select]. Selecting is not recorded in the history.
    pub fn select(&mut self, pos: u8) -> Result<(), PlayError> {
        self.board.select(pos)
    }

    pub fn move_selected(&mut self, to: u8) -> Result<(), PlayError> {
        self.act(|board| board.move_selected(to))
    }

    pub fn agree_draw(&mut self) -> Result<(), BoardDone> {
        self.act(|board| board.agree_draw())
    }

    pub fn forfeit(&mut self, player: Player) -> Result<(), BoardDone> {
        self.act(|board| board.forfeit(player))
    }

    /// Let `bot` play the next move. If the bot has no move for a board that is not done the player to move forfeits,
    /// in which case `Ok(None)` is returned.
    pub fn play_bot_turn(&mut self, bot: &mut (impl MorrisBot + ?Sized)) -> Result<Option<Move>, BoardDone> {
        self.board.check_done()?;

        match bot.choose_move(&self.board) {
            Some(mv) => match self.play(mv) {
                Ok(()) => Ok(Some(mv)),
                Err(PlayError::BoardDone) => Err(BoardDone),
                Err(_) => self.forfeit_turn(),
            },
            None => self.forfeit_turn(),
        }
    }

    fn forfeit_turn(&mut self) -> Result<Option<Move>, BoardDone> {
        let player = self.board.next_player();
        info!(?player, "no move available, forfeiting");
        self.forfeit(player)?;
        Ok(None)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Revert the last action, returns whether there was one.
    pub fn undo(&mut self) -> bool {
        match self.undo.pop() {
            Some(prev) => {
                let curr = std::mem::replace(&mut self.board, prev);
                self.redo.push(curr);
                self.notified = self.board.is_done();
                true
            }
            None => false,
        }
    }

    /// Reapply the last undone action, returns whether there was one.
    pub fn redo(&mut self) -> bool {
        match self.redo.pop() {
            Some(next) => {
                let curr = std::mem::replace(&mut self.board, next);
                self.undo.push(curr);
                self.notify();
                true
            }
            None => false,
        }
    }

    /// Start a new game with the same variant, keeping the observers.
    pub fn reset(&mut self) {
        self.switch_variant(self.variant());
    }

    /// Start a new game with `variant`, keeping the observers.
    pub fn switch_variant(&mut self, variant: Variant) {
        self.board = MorrisBoard::new(variant);
        self.undo.clear();
        self.redo.clear();
        self.notified = false;
    }

    fn act<E>(&mut self, f: impl FnOnce(&mut MorrisBoard) -> Result<(), E>) -> Result<(), E> {
        let prev = self.board.clone();
        f(&mut self.board)?;
        self.undo.push(prev);
        self.redo.clear();
        self.notify();
        Ok(())
    }

    fn notify(&mut self) {
        if self.notified {
            return;
        }
        if let Some(outcome) = self.board.outcome() {
            self.notified = true;
            info!(?outcome, "game finished");
            for observer in &mut self.observers {
                match outcome {
                    Outcome::WonBy(winner) => observer.game_won(winner),
                    Outcome::Draw => observer.game_drawn(),
                }
            }
        }
    }
}

impl Default for MorrisGame {
    fn default() -> Self {
        MorrisGame::new(Variant::NineMen)
    }
}

impl Debug for MorrisGame {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MorrisGame")
            .field("board", &self.board)
            .field("undo", &self.undo.len())
            .field("redo", &self.redo.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}
