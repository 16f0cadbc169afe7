//! Transposition key canonicalization (spec.md §4.7.2).

use tetris_mcts_engine::Environment;
use tetris_mcts_types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH, QUEUE_PREVIEW_LEN};

/// Canonical snapshot of everything that affects legal continuations
/// from a state: the full board grid, the active piece, the hold slot,
/// and a fixed-length queue preview. Equality and hashing are purely
/// structural; no rotation or translation normalization is performed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateKey {
    board: [[Option<PieceKind>; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    has_active: bool,
    active_kind: Option<PieceKind>,
    rotation: Option<Rotation>,
    origin_x: i32,
    origin_y: i32,
    can_hold: bool,
    hold: Option<PieceKind>,
    queue_preview: [Option<PieceKind>; QUEUE_PREVIEW_LEN],
}

/// Builds the canonical key for `env`'s current state.
pub fn make_key(env: &Environment) -> StateKey {
    let mut board = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
    for y in 0..BOARD_HEIGHT {
        for x in 0..BOARD_WIDTH {
            board[y as usize][x as usize] = env.board().cell(x, y);
        }
    }

    let active = env.active();

    let mut queue_preview = [None; QUEUE_PREVIEW_LEN];
    for (slot, kind) in queue_preview
        .iter_mut()
        .zip(env.peek_queue(QUEUE_PREVIEW_LEN))
    {
        *slot = Some(kind);
    }

    StateKey {
        board,
        has_active: active.is_some(),
        active_kind: active.map(|p| p.kind),
        rotation: active.map(|p| p.rotation),
        origin_x: active.map(|p| p.origin.x).unwrap_or(0),
        origin_y: active.map(|p| p.origin.y).unwrap_or(0),
        can_hold: !env.hold_used(),
        hold: env.hold(),
        queue_preview,
    }
}
