//! The static board layouts of the two supported variants.
//!
//! Positions are numbered row by row, from the top left corner:
//! ```text
//! 0-----------1-----------2
//! |           |           |
//! |   3-------4-------5   |
//! |   |       |       |   |
//! |   |   6---7---8   |   |
//! |   |   |       |   |   |
//! 9---10--11      12--13--14
//! |   |   |       |   |   |
//! |   |   15--16--17  |   |
//! |   |       |       |   |
//! |   18------19------20  |
//! |           |           |
//! 21----------22----------23
//! ```
//! The twelve piece variant adds the four diagonals `0-3-6`, `2-5-8`, `21-18-15` and `23-20-17` as edges.
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

use crate::util::cells::{Cells, CELL_COUNT};

/// The game variant, which fixes the topology and the number of pieces per player.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Variant {
    NineMen,
    TwelveMen,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
#[error("there is no morris variant with {0} pieces per player")]
pub struct UnsupportedVariant(pub u8);

/// Adjacency graph and mill table for a variant, see [Variant::topology].
#[derive(Debug, Eq, PartialEq)]
pub struct Topology {
    variant: Variant,
    neighbors: [Cells; CELL_COUNT as usize],
    mill_lines: [[usize; 2]; CELL_COUNT as usize],
}

/// All lines that form a mill when fully owned by a single player. These are the same for both variants.
pub const MILL_LINES: [[u8; 3]; 16] = [
    // rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [9, 10, 11],
    [12, 13, 14],
    [15, 16, 17],
    [18, 19, 20],
    [21, 22, 23],
    // columns
    [0, 9, 21],
    [3, 10, 18],
    [6, 11, 15],
    [1, 4, 7],
    [16, 19, 22],
    [8, 12, 17],
    [5, 13, 20],
    [2, 14, 23],
];

const DIAGONALS: [[u8; 3]; 4] = [[0, 3, 6], [2, 5, 8], [21, 18, 15], [23, 20, 17]];

/// The coordinates of each position on a 7x7 grid, used for symmetries and rendering.
pub const COORDS: [(u8, u8); CELL_COUNT as usize] = [
    (0, 0),
    (3, 0),
    (6, 0),
    (1, 1),
    (3, 1),
    (5, 1),
    (2, 2),
    (3, 2),
    (4, 2),
    (0, 3),
    (1, 3),
    (2, 3),
    (4, 3),
    (5, 3),
    (6, 3),
    (2, 4),
    (3, 4),
    (4, 4),
    (1, 5),
    (3, 5),
    (5, 5),
    (0, 6),
    (3, 6),
    (6, 6),
];

pub const GRID_SIZE: u8 = 7;

static NINE_MEN: Topology = Topology::build(Variant::NineMen);
static TWELVE_MEN: Topology = Topology::build(Variant::TwelveMen);

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::NineMen, Variant::TwelveMen];

    /// Select the variant played with `pieces` pieces per player.
    pub fn from_piece_count(pieces: u8) -> Result<Variant, UnsupportedVariant> {
        match pieces {
            9 => Ok(Variant::NineMen),
            12 => Ok(Variant::TwelveMen),
            _ => Err(UnsupportedVariant(pieces)),
        }
    }

    pub fn required_pieces(self) -> u8 {
        match self {
            Variant::NineMen => 9,
            Variant::TwelveMen => 12,
        }
    }

    pub fn topology(self) -> &'static Topology {
        match self {
            Variant::NineMen => &NINE_MEN,
            Variant::TwelveMen => &TWELVE_MEN,
        }
    }
}

impl Topology {
    const fn build(variant: Variant) -> Topology {
        let mut neighbors = [Cells::EMPTY; CELL_COUNT as usize];

        // consecutive cells on a mill line are exactly the edges of the standard board
        let mut i = 0;
        while i < MILL_LINES.len() {
            let [a, b, c] = MILL_LINES[i];
            neighbors = link(link(neighbors, a, b), b, c);
            i += 1;
        }

        if let Variant::TwelveMen = variant {
            let mut i = 0;
            while i < DIAGONALS.len() {
                let [a, b, c] = DIAGONALS[i];
                neighbors = link(link(neighbors, a, b), b, c);
                i += 1;
            }
        }

        let mut mill_lines = [[0; 2]; CELL_COUNT as usize];
        let mut found = [0; CELL_COUNT as usize];
        let mut i = 0;
        while i < MILL_LINES.len() {
            let mut j = 0;
            while j < 3 {
                let pos = MILL_LINES[i][j] as usize;
                mill_lines[pos][found[pos]] = i;
                found[pos] += 1;
                j += 1;
            }
            i += 1;
        }

        Topology {
            variant,
            neighbors,
            mill_lines,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn required_pieces(&self) -> u8 {
        self.variant.required_pieces()
    }

    /// The positions connected to `pos` by an edge.
    pub fn neighbors(&self, pos: u8) -> Cells {
        self.neighbors[pos as usize]
    }

    /// The two mill lines that go through `pos`.
    pub fn mill_lines(&self, pos: u8) -> [[u8; 3]; 2] {
        let [a, b] = self.mill_lines[pos as usize];
        [MILL_LINES[a], MILL_LINES[b]]
    }

    /// All mill lines of the board.
    pub fn all_mill_lines(&self) -> &'static [[u8; 3]] {
        &MILL_LINES
    }
}

const fn link(mut neighbors: [Cells; CELL_COUNT as usize], a: u8, b: u8) -> [Cells; CELL_COUNT as usize] {
    neighbors[a as usize] = neighbors[a as usize].set(b);
    neighbors[b as usize] = neighbors[b as usize].set(a);
    neighbors
}

/// Find the position with the given grid coordinates, if there is one.
pub fn position_at(x: u8, y: u8) -> Option<u8> {
    COORDS.iter().position(|&c| c == (x, y)).map(|i| i as u8)
}

impl Display for Variant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.required_pieces())
    }
}

impl FromStr for Variant {
    type Err = UnsupportedVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pieces = s.parse::<u8>().map_err(|_| UnsupportedVariant(0))?;
        Variant::from_piece_count(pieces)
    }
}
