//! The placement-granular Tetris environment (C4): combines piece
//! geometry, the board, and the bag into a game that advances one
//! hard-drop at a time, with hold support and legal-placement
//! enumeration for forward search.
//!
//! Dependency-free beyond [`tetris_mcts_core`] and [`tetris_mcts_types`],
//! matching this workspace's core crates' "zero dependencies on UI,
//! networking, or I/O" philosophy.

pub mod env;
pub mod piece;

pub use env::{Environment, PlayState};
pub use piece::{simulate_placement, ActivePiece};
