//! Board-feature extraction (C5): heights, holes, and bumpiness, plus the
//! bit-exact transition-value formula used by the greedy policy and the
//! `GreedyHeuristic` MCTS value function.

use tetris_mcts_core::Board;
use tetris_mcts_types::{StepResult, BOARD_WIDTH};

/// Features of a board position, used to score a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardFeatures {
    pub total_height: i32,
    pub max_height: i32,
    pub holes: i32,
    pub bumpiness: i32,
}

/// Extracts [`BoardFeatures`] from the current occupancy grid.
///
/// `holes` counts every empty cell that has at least one occupied cell
/// above it in the same column; `bumpiness` sums the absolute height
/// difference between adjacent columns.
pub fn compute_board_features(board: &Board) -> BoardFeatures {
    let heights = board.column_heights();

    let mut holes = 0;
    for x in 0..BOARD_WIDTH {
        let mut seen_block = false;
        for y in 0..tetris_mcts_types::BOARD_HEIGHT {
            if board.is_occupied(x, y) {
                seen_block = true;
            } else if seen_block {
                holes += 1;
            }
        }
    }

    let total_height: i32 = heights.iter().sum();
    let max_height = heights.iter().copied().max().unwrap_or(0);

    let mut bumpiness = 0;
    for pair in heights.windows(2) {
        bumpiness += (pair[0] - pair[1]).abs();
    }

    BoardFeatures {
        total_height,
        max_height,
        holes,
        bumpiness,
    }
}

/// The transition-value formula from spec §4.5. Weights are a
/// bit-for-bit contract: any change here changes the agents' behavior.
pub fn transition_value(before: &BoardFeatures, after: &BoardFeatures, result: &StepResult) -> f64 {
    const W_LINES: f64 = 1.0;
    const W_SCORE: f64 = 0.01;
    const W_HOLES: f64 = 4.0;
    const W_TOTAL_HEIGHT: f64 = 0.5;
    const W_BUMPINESS: f64 = 0.3;
    const W_NEW_HOLES: f64 = 2.0;

    let holes_delta = after.holes - before.holes;

    let mut value = W_LINES * result.lines_cleared as f64;
    value += W_SCORE * result.score_delta as f64;
    value -= W_HOLES * after.holes as f64;
    value -= W_TOTAL_HEIGHT * after.total_height as f64;
    value -= W_BUMPINESS * after.bumpiness as f64;
    if holes_delta > 0 {
        value -= W_NEW_HOLES * holes_delta as f64;
    }

    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetris_mcts_types::PieceKind;

    #[test]
    fn empty_board_has_zero_features() {
        let board = Board::new();
        let f = compute_board_features(&board);
        assert_eq!(f, BoardFeatures::default());
    }

    #[test]
    fn a_single_hole_is_counted_once() {
        let mut board = Board::new();
        board.lock(&[(0, 17), (0, 17), (0, 17), (0, 17)], PieceKind::I);
        // Row 18 at column 0 is left empty beneath row 17's block: a hole.
        board.lock(&[(0, 19), (0, 19), (0, 19), (0, 19)], PieceKind::I);
        let f = compute_board_features(&board);
        assert_eq!(f.holes, 1);
    }

    #[test]
    fn bumpiness_sums_adjacent_height_differences() {
        let mut board = Board::new();
        board.lock(&[(0, 19), (0, 19), (0, 19), (0, 19)], PieceKind::I);
        board.lock(&[(1, 18), (1, 18), (1, 18), (1, 18)], PieceKind::I);
        let f = compute_board_features(&board);
        // column 0 height 1, column 1 height 2: |1-2| = 1
        assert_eq!(f.bumpiness, 1);
    }

    #[test]
    fn transition_value_rewards_lines_and_penalizes_holes() {
        let before = BoardFeatures::default();
        let after_clean = BoardFeatures {
            total_height: 4,
            max_height: 2,
            holes: 0,
            bumpiness: 0,
        };
        let result = StepResult {
            lines_cleared: 1,
            score_delta: 100,
            game_over: false,
        };
        let clean_value = transition_value(&before, &after_clean, &result);

        let after_holes = BoardFeatures {
            holes: 2,
            ..after_clean
        };
        let holes_value = transition_value(&before, &after_holes, &result);

        assert!(clean_value > holes_value);
    }
}
