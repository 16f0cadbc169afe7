//! Tetris MCTS decision core (workspace facade crate).
//!
//! This package keeps a stable `tetris_mcts::{core,types,engine,heuristic,mcts}`
//! public API while the implementation lives in dedicated crates under
//! `crates/`.

pub use tetris_mcts_core as core;
pub use tetris_mcts_engine as engine;
pub use tetris_mcts_heuristic as heuristic;
pub use tetris_mcts_mcts as mcts;
pub use tetris_mcts_types as types;
