//! Shared data types for the placement-granular Tetris environment.
//!
//! This crate defines the fundamental types used across the engine,
//! heuristic evaluator, and search crates. All types are pure data
//! structures with no external dependencies, so they can be used from
//! any context (environment, search, benchmarks, tests).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn origin**: `(BOARD_WIDTH / 2 - 2, 0)`, i.e. `(3, 0)`
//!
//! This crate has no notion of gravity ticks, lock delay, or wall kicks:
//! placements are resolved in a single atomic step from spawn to a legal
//! terminal position.

/// Board width in cells (10 columns).
pub const BOARD_WIDTH: i32 = 10;

/// Board height in cells (20 rows).
pub const BOARD_HEIGHT: i32 = 20;

/// Side length of a tetromino's bounding box.
pub const SHAPE_BOX: i32 = 4;

/// Number of distinct rotation states per piece.
pub const ROTATION_COUNT: usize = 4;

/// Number of distinct piece kinds.
pub const PIECE_KIND_COUNT: usize = 7;

/// Depth of the "next piece" preview queue kept topped up from the bag.
pub const QUEUE_PREVIEW_LEN: usize = 4;

/// Number of most-recently-emitted pieces the bag refill avoids repeating.
pub const BAG_HISTORY_LEN: usize = 3;

/// Spawn column for a newly activated piece: `BOARD_WIDTH / 2 - 2`.
pub const SPAWN_X: i32 = BOARD_WIDTH / 2 - 2;

/// Spawn row for a newly activated piece.
pub const SPAWN_Y: i32 = 0;

/// The seven tetromino piece kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All seven kinds in table order, matching the shape catalog's indexing.
    pub const ALL: [PieceKind; PIECE_KIND_COUNT] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Index into the shape catalog's first dimension.
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }
}

/// Rotation states, labeled by clockwise steps from spawn.
///
/// The cycle goes `Spawn -> R -> Flip -> L -> Spawn` under `rotate_cw`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    Spawn,
    R,
    Flip,
    L,
}

impl Rotation {
    pub const ALL: [Rotation; ROTATION_COUNT] =
        [Rotation::Spawn, Rotation::R, Rotation::Flip, Rotation::L];

    pub fn index(&self) -> usize {
        match self {
            Rotation::Spawn => 0,
            Rotation::R => 1,
            Rotation::Flip => 2,
            Rotation::L => 3,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i % ROTATION_COUNT).copied()
    }

    pub fn rotate_cw(&self) -> Self {
        Self::from_index((self.index() + 1) % ROTATION_COUNT).unwrap()
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Rotation::Spawn
    }
}

/// An occupied board cell records which piece kind locked it (for display
/// or feature extraction); an empty cell is `None`.
pub type Occupant = Option<PieceKind>;

/// A board coordinate. `x` grows right, `y` grows down; `(0, 0)` is the
/// top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }
}

/// A fully resolved placement for the active piece (or the held piece),
/// expressed as the final rotation state and column offset to apply
/// before a hard drop. `use_hold` selects whether this action first
/// swaps the active piece with the hold slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Action {
    pub use_hold: bool,
    pub rotation: Rotation,
    /// Target column for the piece's bounding-box origin after horizontal
    /// movement from its spawn column, i.e. `origin_x - SPAWN_X`.
    pub dx: i32,
}

/// Outcome of applying one [`Action`] to the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    pub lines_cleared: u32,
    pub score_delta: u32,
    pub game_over: bool,
}

/// Line-clear scoring table, indexed by number of lines cleared
/// (index 0, zero lines, is unreachable in practice but kept for
/// uniform indexing).
pub const LINE_CLEAR_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Why a driver stopped an episode, surfaced to the result sink alongside
/// the rest of an [`EpisodeRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    GameOver,
    ScoreLimit,
    TimeLimit,
}

/// Plain data summary of one finished episode, populated by a driver and
/// handed to whatever result sink it chooses; this crate never persists
/// it.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeRecord {
    pub agent_name: String,
    pub mode_name: String,
    pub agent_config_string: String,
    pub run_id: u64,
    pub episode_index: u64,
    pub score: u64,
    pub total_lines: u32,
    pub total_turns: u32,
    pub holds_used: u32,
    pub elapsed_seconds: f64,
    pub end_reason: EndReason,
}
