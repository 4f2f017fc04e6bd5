//! Static evaluation functions to be used with [minimax](crate::ai::minimax).
pub mod morris;
