use std::fmt::{Debug, Display, Formatter};

use itertools::Itertools;
use nom::Finish;
use thiserror::Error;

use crate::board::{Board, Player};
use crate::games::morris::board::{MorrisBoard, Phase};
use crate::games::morris::topology::Variant;
use crate::games::morris::Move;
use crate::util::cells::{Cells, CELL_COUNT};

/// Each `@` is replaced by the tile of the next position, in position order.
const TEMPLATE: &str = "\
@-----------@-----------@
|           |           |
|   @-------@-------@   |
|   |       |       |   |
|   |   @---@---@   |   |
|   |   |       |   |   |
@---@---@       @---@---@
|   |   |       |   |   |
|   |   @---@---@   |   |
|   |       |       |   |
|   @-------@-------@   |
|           |           |
@-----------@-----------@";

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("invalid morris notation {notation:?}: {reason}")]
pub struct InvalidNotation {
    pub notation: String,
    pub reason: &'static str,
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("invalid morris move {0:?}")]
pub struct InvalidMove(pub String);

impl Move {
    /// Placements are written as the position (`4`), slides as `from-to` (`4-7`) and removals as `x` followed by the
    /// position (`x13`).
    pub fn to_notation(self) -> String {
        match self {
            Move::Place(pos) => format!("{}", pos),
            Move::Slide { from, to } => format!("{}-{}", from, to),
            Move::Remove(pos) => format!("x{}", pos),
        }
    }

    pub fn from_notation(s: &str) -> Result<Move, InvalidMove> {
        let err = || InvalidMove(s.to_owned());
        let pos = |p: &str| p.parse::<u8>().ok().filter(|&p| p < CELL_COUNT).ok_or_else(err);

        if let Some(rest) = s.strip_prefix('x') {
            Ok(Move::Remove(pos(rest)?))
        } else if let Some((from, to)) = s.split_once('-') {
            Ok(Move::Slide {
                from: pos(from)?,
                to: pos(to)?,
            })
        } else {
            Ok(Move::Place(pos(s)?))
        }
    }
}

impl Debug for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_notation())
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_notation())
    }
}

impl MorrisBoard {
    /// Parse a board from notation like `9 ab.......b.............. a place 2 2 0`, containing:
    /// * the number of pieces per player, selecting the variant
    /// * the 24 tiles in position order, `a`, `b` or `.` for empty
    /// * the player to move, `a` or `b`
    /// * the phase, `place`, `move` or `remove` (the player to move is removing)
    /// * the number of pieces placed by both players
    /// * the number of moves since the last mill
    ///
    /// The repetition history of the parsed board only contains the parsed position.
    pub fn from_notation(notation: &str) -> Result<MorrisBoard, InvalidNotation> {
        let err = |reason| InvalidNotation {
            notation: notation.to_owned(),
            reason,
        };

        let (_, raw) = parse::notation(notation)
            .finish()
            .map_err(|_| err("expected '<pieces> <tiles> <player> <phase> <placed a> <placed b> <moves>'"))?;

        let variant = Variant::from_piece_count(raw.pieces).map_err(|_| err("unsupported piece count"))?;

        let mut tiles = [Cells::EMPTY; 2];
        for (pos, c) in raw.tiles.chars().enumerate() {
            match c {
                'a' => tiles[0] = tiles[0].set(pos as u8),
                'b' => tiles[1] = tiles[1].set(pos as u8),
                _ => {}
            }
        }

        let placed = [raw.placed_a, raw.placed_b];
        for player in Player::BOTH {
            let index = player.index() as usize;
            if placed[index] > variant.required_pieces() {
                return Err(err("more pieces placed than available"));
            }
            if tiles[index].count() > placed[index] {
                return Err(err("more pieces on the board than placed"));
            }
        }
        let all_placed = placed.iter().all(|&p| p == variant.required_pieces());

        let phase = match raw.phase {
            RawPhase::Place if all_placed => return Err(err("placing phase after all pieces have been placed")),
            RawPhase::Move if !all_placed => return Err(err("moving phase before all pieces have been placed")),
            RawPhase::Place => Phase::Placing,
            RawPhase::Move => Phase::Moving,
            RawPhase::Remove => {
                if tiles[raw.next.other().index() as usize].is_empty() {
                    return Err(err("removal phase without opponent pieces"));
                }
                Phase::Removal(raw.next)
            }
        };

        if phase == Phase::Placing && placed[raw.next.index() as usize] == variant.required_pieces() {
            return Err(err("player to move has no pieces left to place"));
        }

        Ok(MorrisBoard::from_parts(
            variant,
            tiles,
            phase,
            raw.next,
            placed,
            raw.moves_without_capture,
        ))
    }

    pub fn to_notation(&self) -> String {
        let tiles: String = (0..CELL_COUNT).map(|pos| tile_symbol(self.tile(pos))).collect();
        let phase = match self.phase() {
            Phase::Placing => "place",
            Phase::Moving | Phase::Flying => "move",
            Phase::Removal(_) => "remove",
        };

        format!(
            "{} {} {} {} {} {} {}",
            self.variant(),
            tiles,
            player_symbol(self.next_player()),
            phase,
            self.placed_count(Player::A),
            self.placed_count(Player::B),
            self.moves_without_capture(),
        )
    }
}

impl Debug for MorrisBoard {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "MorrisBoard(\"{}\")", self.to_notation())
    }
}

impl Display for MorrisBoard {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "notation: {}", self.to_notation())?;

        let mut pos = 0;
        for line in TEMPLATE.lines() {
            let line = line
                .chars()
                .map(|c| {
                    if c == '@' {
                        let symbol = tile_symbol(self.tile(pos));
                        pos += 1;
                        symbol
                    } else {
                        c
                    }
                })
                .join("");
            writeln!(f, "{}", line)?;
        }

        let hands = Player::BOTH
            .iter()
            .map(|&p| format!("{}: {} in hand", player_symbol(p), self.pieces_in_hand(p)))
            .join(", ");
        writeln!(f, "{:?}, {}", self.phase(), hands)?;

        Ok(())
    }
}

fn tile_symbol(tile: Option<Player>) -> char {
    match tile {
        None => '.',
        Some(player) => player_symbol(player),
    }
}

fn player_symbol(player: Player) -> char {
    match player {
        Player::A => 'a',
        Player::B => 'b',
    }
}

#[derive(Debug, Copy, Clone)]
enum RawPhase {
    Place,
    Move,
    Remove,
}

#[derive(Debug)]
struct RawNotation<'a> {
    pieces: u8,
    tiles: &'a str,
    next: Player,
    phase: RawPhase,
    placed_a: u8,
    placed_b: u8,
    moves_without_capture: u32,
}

mod parse {
    use std::str::FromStr;

    use nom::branch::alt;
    use nom::bytes::complete::{tag, take_while_m_n};
    use nom::character::complete::{digit1, space1};
    use nom::combinator::{eof, map, map_res, value};
    use nom::sequence::{terminated, tuple};
    use nom::IResult;

    use super::*;

    fn int<T: FromStr>(input: &str) -> IResult<&str, T> {
        map_res(digit1, |s: &str| s.parse::<T>())(input)
    }

    pub fn notation(input: &str) -> IResult<&str, RawNotation> {
        let tiles = take_while_m_n(24, 24, |c| matches!(c, 'a' | 'b' | '.'));
        let player = alt((value(Player::A, tag("a")), value(Player::B, tag("b"))));
        let phase = alt((
            value(RawPhase::Place, tag("place")),
            value(RawPhase::Move, tag("move")),
            value(RawPhase::Remove, tag("remove")),
        ));

        let fields = tuple((
            int::<u8>, space1, tiles, space1, player, space1, phase, space1, int::<u8>, space1, int::<u8>, space1, int::<u32>,
        ));

        map(
            terminated(fields, eof),
            |(pieces, _, tiles, _, next, _, phase, _, placed_a, _, placed_b, _, moves_without_capture)| RawNotation {
                pieces,
                tiles,
                next,
                phase,
                placed_a,
                placed_b,
                moves_without_capture,
            },
        )(input)
    }
}
