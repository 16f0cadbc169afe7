//! The falling piece: kind, rotation, and bounding-box origin.

use tetris_mcts_core::{shape_cells, Board};
use tetris_mcts_types::{Cell, PieceKind, Rotation, SPAWN_X, SPAWN_Y};

/// A tetromino in play, not yet locked into the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub origin: Cell,
}

impl ActivePiece {
    /// A freshly spawned piece at the standard spawn column and row,
    /// facing its spawn rotation.
    pub fn spawn(kind: PieceKind) -> Self {
        ActivePiece {
            kind,
            rotation: Rotation::Spawn,
            origin: Cell::new(SPAWN_X, SPAWN_Y),
        }
    }

    /// The four absolute board cells this piece currently occupies.
    pub fn absolute_cells(&self) -> [(i32, i32); 4] {
        let mut cells = shape_cells(self.kind, self.rotation);
        for cell in cells.iter_mut() {
            cell.0 += self.origin.x;
            cell.1 += self.origin.y;
        }
        cells
    }

    pub fn can_place(&self, board: &Board) -> bool {
        board.can_place(&self.absolute_cells())
    }

    fn with_rotation(&self, rotation: Rotation) -> Self {
        ActivePiece { rotation, ..*self }
    }

    fn with_origin(&self, origin: Cell) -> Self {
        ActivePiece { origin, ..*self }
    }
}

/// Rotates clockwise one step at a time until `target`, shifts horizontally
/// one column at a time until `target_x`, then hard-drops one row at a time.
/// Returns `None` the instant any intermediate position is obstructed.
pub fn simulate_placement(
    board: &Board,
    start: ActivePiece,
    target_rotation: Rotation,
    target_x: i32,
) -> Option<ActivePiece> {
    let mut piece = start;
    if !piece.can_place(board) {
        return None;
    }

    while piece.rotation != target_rotation {
        let candidate = piece.with_rotation(piece.rotation.rotate_cw());
        if candidate.can_place(board) {
            piece = candidate;
        } else {
            return None;
        }
    }

    let mut dx = target_x - piece.origin.x;
    let step = if dx > 0 { 1 } else { -1 };
    while dx != 0 {
        let candidate = piece.with_origin(Cell::new(piece.origin.x + step, piece.origin.y));
        if candidate.can_place(board) {
            piece = candidate;
            dx -= step;
        } else {
            return None;
        }
    }

    loop {
        let candidate = piece.with_origin(Cell::new(piece.origin.x, piece.origin.y + 1));
        if candidate.can_place(board) {
            piece = candidate;
        } else {
            break;
        }
    }

    Some(piece)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetris_mcts_types::PieceKind;

    #[test]
    fn spawn_places_piece_at_spawn_origin() {
        let p = ActivePiece::spawn(PieceKind::T);
        assert_eq!(p.origin, Cell::new(SPAWN_X, SPAWN_Y));
        assert_eq!(p.rotation, Rotation::Spawn);
    }

    #[test]
    fn simulate_placement_drops_to_the_floor_on_an_empty_board() {
        let board = Board::new();
        let start = ActivePiece::spawn(PieceKind::O);
        let landing = simulate_placement(&board, start, Rotation::Spawn, SPAWN_X).unwrap();
        // O-piece occupies rows (0,1) of its box; resting on an empty 20-row
        // board its origin.y should be BOARD_HEIGHT - 2.
        assert_eq!(landing.origin.y, 18);
    }

    #[test]
    fn simulate_placement_fails_when_rotation_path_is_blocked() {
        let mut board = Board::new();
        // T's spawn-to-R rotation adds cell (SPAWN_X + 2, 2); occupy it so
        // the single clockwise step needed is obstructed.
        let blocker = (SPAWN_X + 2, 2);
        board.lock(&[blocker, blocker, blocker, blocker], PieceKind::I);

        let start = ActivePiece::spawn(PieceKind::T);
        assert!(simulate_placement(&board, start, Rotation::R, SPAWN_X).is_none());
    }
}
