//! Static tetromino geometry: a 16-bit row-major bitmask per piece/rotation
//! inside a 4x4 bounding box, and helpers to enumerate occupied cells.

use tetris_mcts_types::{PieceKind, Rotation, PIECE_KIND_COUNT, ROTATION_COUNT, SHAPE_BOX};

/// `SHAPE_MASKS[piece.index()][rotation.index()]` is the 16-bit mask for
/// that piece in that rotation, bit `y * 4 + x` set when cell `(x, y)` of
/// the bounding box is occupied.
///
/// Reproduces the bitmask catalog used by the reference Tetris engine this
/// environment's placement semantics are modeled on, reordered to this
/// crate's `PieceKind` indexing (I, O, T, S, Z, J, L).
pub const SHAPE_MASKS: [[u16; ROTATION_COUNT]; PIECE_KIND_COUNT] = [
    [0x2222, 0x00F0, 0x2222, 0x00F0], // I
    [0x0660, 0x0660, 0x0660, 0x0660], // O
    [0x2320, 0x0720, 0x2620, 0x2700], // T
    [0x1320, 0x0630, 0x2640, 0x6300], // S
    [0x2310, 0x3600, 0x2310, 0x0360], // Z
    [0x3220, 0x0710, 0x2260, 0x4700], // J
    [0x2230, 0x0074, 0x0622, 0x02E0], // L
];

/// Offsets of the occupied cells of `kind` at `rotation`, relative to the
/// bounding box's top-left corner. Always exactly four cells.
pub fn shape_cells(kind: PieceKind, rotation: Rotation) -> [(i32, i32); 4] {
    let mask = SHAPE_MASKS[kind.index()][rotation.index()];
    let mut cells = [(0i32, 0i32); 4];
    let mut n = 0;
    for y in 0..SHAPE_BOX {
        for x in 0..SHAPE_BOX {
            if mask & (1u16 << (y * SHAPE_BOX + x)) != 0 {
                cells[n] = (x, y);
                n += 1;
            }
        }
    }
    debug_assert_eq!(n, 4, "tetromino mask must contain exactly four cells");
    cells
}

/// Validates that every mask in the table encodes exactly four set bits.
/// Checked once lazily via [`std::sync::OnceLock`] by callers that want a
/// cheap startup assertion instead of re-deriving it on every lookup.
pub fn validate_shape_table() -> bool {
    SHAPE_MASKS
        .iter()
        .flat_map(|rotations| rotations.iter())
        .all(|mask| mask.count_ones() == 4)
}

static VALIDATED: std::sync::OnceLock<bool> = std::sync::OnceLock::new();

/// Asserts the shape table is well-formed. Panics on corruption: this is
/// an internal-consistency invariant, not a recoverable error.
pub fn ensure_shape_table_valid() {
    let ok = *VALIDATED.get_or_init(validate_shape_table);
    assert!(ok, "tetromino shape table failed validation");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mask_has_four_cells() {
        assert!(validate_shape_table());
    }

    #[test]
    fn shape_cells_matches_mask_popcount() {
        for kind in PieceKind::ALL {
            for rotation in Rotation::ALL {
                let cells = shape_cells(kind, rotation);
                assert_eq!(cells.len(), 4);
            }
        }
    }

    #[test]
    fn o_piece_is_identical_across_rotations() {
        let masks = SHAPE_MASKS[PieceKind::O.index()];
        assert!(masks.iter().all(|&m| m == masks[0]));
    }

    #[test]
    fn ensure_shape_table_valid_does_not_panic() {
        ensure_shape_table_valid();
    }
}
