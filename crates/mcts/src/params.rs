//! MCTS engine configuration (C7 §4.7). A single superset struct, per
//! spec.md §9's "polymorphism across MCTS variants": the three named
//! agents are this same engine under different presets, not distinct
//! types.

/// How leaf rollouts pick actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RolloutPolicy {
    Random,
    Greedy,
}

/// How a single simulated step's value is computed before accumulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFunction {
    ScoreDelta,
    GreedyHeuristic,
}

/// Default bound on transposition table size; see [`MctsParams::tt_max_entries`].
pub const DEFAULT_TT_MAX_ENTRIES: usize = 200_000;

/// Configuration for [`crate::agent::MctsAgent`]. Values outside the
/// stated constraints (non-positive `iterations`/`max_depth`/`exploration`)
/// make `choose_action` degrade to the default action rather than error.
#[derive(Debug, Clone, Copy)]
pub struct MctsParams {
    pub iterations: i32,
    pub max_depth: i32,
    pub exploration: f64,
    pub threads: usize,
    pub seed: Option<u32>,
    /// Observed by the driver between placements, not by this engine.
    pub score_limit: Option<i32>,
    /// Observed by the driver between placements, not by this engine.
    pub time_limit_seconds: Option<f64>,
    pub rollout_policy: RolloutPolicy,
    pub value_function: ValueFunction,
    pub use_transposition_table: bool,
    /// `0` means [`DEFAULT_TT_MAX_ENTRIES`].
    pub tt_max_entries: usize,
}

impl Default for MctsParams {
    fn default() -> Self {
        MctsParams {
            iterations: 0,
            max_depth: 0,
            exploration: 0.0,
            threads: num_cpus::get(),
            seed: None,
            score_limit: None,
            time_limit_seconds: None,
            rollout_policy: RolloutPolicy::Random,
            value_function: ValueFunction::ScoreDelta,
            use_transposition_table: false,
            tt_max_entries: 0,
        }
    }
}

impl MctsParams {
    /// Resolves `tt_max_entries`, substituting the default when unset.
    pub fn resolved_tt_max_entries(&self) -> usize {
        if self.tt_max_entries == 0 {
            DEFAULT_TT_MAX_ENTRIES
        } else {
            self.tt_max_entries
        }
    }
}
