//! Piece geometry, board, and bag: the pure, deterministic simulation
//! primitives the environment is built from.
//!
//! This crate has **zero dependencies** on UI, networking, or I/O:
//!
//! - **Deterministic**: a fixed seed reproduces an identical bag sequence.
//! - **Testable**: every module carries unit tests for its invariants.
//! - **Portable**: usable from a search loop, a benchmark, or a driver.
//! - **Fast**: the board is a `Copy` fixed-size array; cloning it for a
//!   simulated placement is a flat memory copy.
//!
//! # Module structure
//!
//! - [`shapetable`]: the static 7x4 tetromino bitmask catalog
//! - [`board`]: the 10x20 occupancy grid, placement legality, line clears
//! - [`bag`]: the randomized piece queue with anti-repeat history

pub mod bag;
pub mod board;
pub mod shapetable;

pub use bag::Bag;
pub use board::Board;
pub use shapetable::{ensure_shape_table_valid, shape_cells, SHAPE_MASKS};
