//! Nine and Twelve Men's Morris, see <https://en.wikipedia.org/wiki/Nine_men%27s_morris>.
pub use board::*;
pub use game::*;
pub use io::*;
pub use topology::{Topology, UnsupportedVariant, Variant};

mod board;
mod game;
mod io;
pub mod moves;
pub mod topology;
