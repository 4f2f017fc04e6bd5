//! The game implementations of this crate.
pub mod morris;
