//! The 10x20 occupancy grid: placement legality, locking, and line
//! clearing.

use arrayvec::ArrayVec;
use tetris_mcts_types::{Occupant, BOARD_HEIGHT, BOARD_WIDTH};

/// Fixed-size occupancy grid. `Copy` so cloning a board for a simulated
/// placement is a flat memory copy, not a heap allocation.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Occupant; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
}

impl Default for Board {
    fn default() -> Self {
        Board {
            cells: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
        }
    }
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the occupant at `(x, y)`, or `None` if the coordinate is
    /// off the board or the cell is empty.
    pub fn cell(&self, x: i32, y: i32) -> Occupant {
        if !self.in_bounds(x, y) {
            return None;
        }
        self.cells[y as usize][x as usize]
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < BOARD_WIDTH && y >= 0 && y < BOARD_HEIGHT
    }

    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.cell(x, y).is_some()
    }

    /// Whether every one of the four absolute cells is in bounds and
    /// empty.
    pub fn can_place(&self, cells: &[(i32, i32); 4]) -> bool {
        cells.iter().all(|&(x, y)| {
            if x < 0 || x >= BOARD_WIDTH || y < 0 || y >= BOARD_HEIGHT {
                return false;
            }
            !self.is_occupied(x, y)
        })
    }

    /// Writes `kind` into each of the four absolute cells. Cells above
    /// the visible board are silently dropped.
    pub fn lock(&mut self, cells: &[(i32, i32); 4], kind: tetris_mcts_types::PieceKind) {
        for &(x, y) in cells {
            if self.in_bounds(x, y) {
                self.cells[y as usize][x as usize] = Some(kind);
            }
        }
    }

    /// Compacts full rows out of the grid bottom-up and returns the
    /// number of lines cleared. Rows above the cleared lines shift down
    /// to fill the gap; vacated rows at the top are zeroed.
    pub fn clear_full_lines(&mut self) -> u32 {
        let mut target_row: i32 = BOARD_HEIGHT - 1;
        let mut cleared = 0u32;

        for row in (0..BOARD_HEIGHT).rev() {
            let filled = self.cells[row as usize]
                .iter()
                .filter(|c| c.is_some())
                .count();
            self.cells[target_row as usize] = self.cells[row as usize];

            if filled == BOARD_WIDTH as usize {
                cleared += 1;
            } else {
                target_row -= 1;
            }
        }

        let mut row = target_row;
        while row >= 0 {
            self.cells[row as usize] = [None; BOARD_WIDTH as usize];
            row -= 1;
        }

        cleared
    }

    /// Column heights measured from the topmost occupied cell (0 means
    /// empty column). Used by the heuristic evaluator.
    pub fn column_heights(&self) -> ArrayVec<i32, { BOARD_WIDTH as usize }> {
        let mut heights = ArrayVec::new();
        for x in 0..BOARD_WIDTH {
            let mut h = 0;
            for y in 0..BOARD_HEIGHT {
                if self.is_occupied(x, y) {
                    h = BOARD_HEIGHT - y;
                    break;
                }
            }
            heights.push(h);
        }
        heights
    }
}
