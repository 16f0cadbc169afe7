//! The placement-granular environment (C4): combines the board, bag, and
//! piece geometry into a game that advances one hard-drop at a time.

use arrayvec::ArrayVec;
use tetris_mcts_core::{Bag, Board};
use tetris_mcts_types::{
    Action, PieceKind, Rotation, StepResult, LINE_CLEAR_SCORES, QUEUE_PREVIEW_LEN, SPAWN_X,
};

use crate::piece::{simulate_placement, ActivePiece};

/// Upper bound on how many pieces the queue ever holds at once: a few
/// refills' worth of slack above [`QUEUE_PREVIEW_LEN`] so `Bag::refill`
/// never has to reallocate.
const QUEUE_CAPACITY: usize = 16;

/// Lifecycle state of an [`Environment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    Playing,
    GameOver,
}

/// The placement-level Tetris environment. Cheap to clone: every field is
/// either `Copy` or a small fixed-capacity collection, so `clone()` is a
/// flat memory copy with no allocation.
#[derive(Clone)]
pub struct Environment {
    board: Board,
    bag: Bag,
    queue: ArrayVec<PieceKind, QUEUE_CAPACITY>,
    active: Option<ActivePiece>,
    hold: Option<PieceKind>,
    hold_used: bool,
    score: u32,
    total_lines: u32,
    turns: u32,
    holds_used: u32,
    state: PlayState,
}

impl Environment {
    /// Creates a new environment seeded from a nondeterministic source.
    /// Derives the seed from the system clock rather than pulling in a
    /// PRNG crate here: this crate stays dependency-free beyond `core`
    /// and `types`, matching this workspace's core crates' philosophy.
    pub fn new() -> Self {
        use std::hash::{Hash, Hasher};
        use std::time::{SystemTime, UNIX_EPOCH};

        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        let elapsed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        elapsed.hash(&mut hasher);
        Self::with_seed(hasher.finish() as u32)
    }

    /// Creates a new environment with a fixed bag seed, for deterministic
    /// tests and reproducible search.
    pub fn with_seed(seed: u32) -> Self {
        let mut env = Environment {
            board: Board::new(),
            bag: Bag::new(seed),
            queue: ArrayVec::new(),
            active: None,
            hold: None,
            hold_used: false,
            score: 0,
            total_lines: 0,
            turns: 0,
            holds_used: 0,
            state: PlayState::Playing,
        };
        env.reset();
        env
    }

    /// Clears the board, score, and hold state, and spawns the first
    /// piece. The bag's PRNG stream is *not* reseeded, only its history.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.score = 0;
        self.total_lines = 0;
        self.turns = 0;
        self.holds_used = 0;
        self.hold = None;
        self.hold_used = false;
        self.state = PlayState::Playing;

        self.queue.clear();
        self.bag.reset_history();
        self.bag.refill(&mut self.queue, QUEUE_PREVIEW_LEN);
        self.active = None;
        self.spawn_from_queue();
    }

    pub fn is_game_over(&self) -> bool {
        self.state == PlayState::GameOver
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn hold(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn hold_used(&self) -> bool {
        self.hold_used
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn total_lines(&self) -> u32 {
        self.total_lines
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn holds_used(&self) -> u32 {
        self.holds_used
    }

    /// Non-destructive copy of the first `n` queued piece ids.
    pub fn peek_queue(&self, n: usize) -> ArrayVec<PieceKind, QUEUE_PREVIEW_LEN> {
        let mut out = ArrayVec::new();
        for &kind in self.queue.iter().take(n.min(QUEUE_PREVIEW_LEN)) {
            out.push(kind);
        }
        out
    }

    /// Direct board access for constructing fixture positions. Not used
    /// by any production code path; kept public (rather than gated
    /// behind `cfg(test)`) because test and benchmark suites in other
    /// crates — the search crate's forced-outcome scenarios, the root
    /// integration tests — need it too, and `cfg(test)` attributes don't
    /// cross crate boundaries.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Overrides the active piece for constructing fixture positions;
    /// leaves hold/score/queue state untouched.
    pub fn set_active_for_test(&mut self, piece: ActivePiece) {
        self.active = Some(piece);
        self.state = PlayState::Playing;
    }

    /// Performs the hold swap in isolation, without the placement that
    /// normally follows it inside [`Self::step`].
    pub fn apply_hold_for_test(&mut self) {
        self.apply_hold();
    }

    /// Applies one action: optional hold swap, then rotate-shift-drop.
    pub fn step(&mut self, action: Action) -> StepResult {
        if self.state == PlayState::GameOver {
            return StepResult {
                lines_cleared: 0,
                score_delta: 0,
                game_over: true,
            };
        }

        let prev_score = self.score;

        if action.use_hold && !self.hold_used {
            self.apply_hold();
        }

        let Some(active) = self.active else {
            self.state = PlayState::GameOver;
            return StepResult {
                lines_cleared: 0,
                score_delta: self.score - prev_score,
                game_over: true,
            };
        };
        if self.state == PlayState::GameOver {
            return StepResult {
                lines_cleared: 0,
                score_delta: self.score - prev_score,
                game_over: true,
            };
        }

        let target_x = SPAWN_X + action.dx;
        let Some(landing) = simulate_placement(&self.board, active, action.rotation, target_x)
        else {
            self.state = PlayState::GameOver;
            return StepResult {
                lines_cleared: 0,
                score_delta: self.score - prev_score,
                game_over: true,
            };
        };

        self.board.lock(&landing.absolute_cells(), landing.kind);
        let cleared = self.board.clear_full_lines();
        if cleared > 0 {
            self.score += LINE_CLEAR_SCORES[cleared as usize];
            self.total_lines += cleared;
        }
        self.turns += 1;

        self.spawn_from_queue();
        let done = self.state == PlayState::GameOver;

        StepResult {
            lines_cleared: cleared,
            score_delta: self.score - prev_score,
            game_over: done,
        }
    }

    /// Enumerates every legal placement of the active piece, plus (if hold
    /// has not yet been used this piece) every legal placement of whatever
    /// piece a hold swap would bring into play.
    pub fn get_valid_actions(&self) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.state == PlayState::GameOver {
            return actions;
        }
        let Some(active) = self.active else {
            return actions;
        };

        generate_actions_for_piece(&self.board, active, false, &mut actions);

        if !self.hold_used {
            let hold_piece = match self.hold {
                Some(kind) => Some(ActivePiece::spawn(kind)),
                None => self.queue.first().copied().map(ActivePiece::spawn),
            };
            if let Some(hp) = hold_piece {
                generate_actions_for_piece(&self.board, hp, true, &mut actions);
            }
        }

        actions
    }

    fn spawn_from_queue(&mut self) {
        self.bag.refill(&mut self.queue, QUEUE_PREVIEW_LEN);
        if self.queue.is_empty() {
            self.state = PlayState::GameOver;
            self.active = None;
            return;
        }

        let kind = self.queue.remove(0);
        self.bag.refill(&mut self.queue, QUEUE_PREVIEW_LEN);

        let spawned = ActivePiece::spawn(kind);
        self.hold_used = false;
        self.bag.register_use(kind);

        if spawned.can_place(&self.board) {
            self.active = Some(spawned);
            self.state = PlayState::Playing;
        } else {
            self.active = Some(spawned);
            self.state = PlayState::GameOver;
        }
    }

    fn apply_hold(&mut self) {
        if self.state != PlayState::Playing || self.active.is_none() || self.hold_used {
            return;
        }

        let current_kind = self.active.unwrap().kind;
        match self.hold {
            None => {
                self.hold = Some(current_kind);
                self.spawn_from_queue();
            }
            Some(held_kind) => {
                self.hold = Some(current_kind);
                let spawned = ActivePiece::spawn(held_kind);
                self.bag.register_use(held_kind);
                if spawned.can_place(&self.board) {
                    self.active = Some(spawned);
                } else {
                    self.active = Some(spawned);
                    self.state = PlayState::GameOver;
                }
            }
        }

        self.hold_used = true;
        self.holds_used += 1;
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

fn generate_actions_for_piece(
    board: &Board,
    piece: ActivePiece,
    use_hold: bool,
    actions: &mut Vec<Action>,
) {
    if !piece.can_place(board) {
        return;
    }

    for rotation in Rotation::ALL {
        let offsets = tetris_mcts_core::shape_cells(piece.kind, rotation);
        let min_off = offsets.iter().map(|c| c.0).min().unwrap();
        let max_off = offsets.iter().map(|c| c.0).max().unwrap();
        let min_x = -min_off;
        let max_x = tetris_mcts_types::BOARD_WIDTH - 1 - max_off;

        let mut target_x = min_x;
        while target_x <= max_x {
            if let Some(landing) = simulate_placement(board, piece, rotation, target_x) {
                actions.push(Action {
                    use_hold,
                    rotation,
                    dx: landing.origin.x - SPAWN_X,
                });
            }
            target_x += 1;
        }
    }
}
