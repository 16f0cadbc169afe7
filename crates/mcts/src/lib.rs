//! Monte Carlo Tree Search (C7): UCT selection, expansion, rollout, and
//! backpropagation over a contiguous node arena, with root-parallel
//! worker fan-out and an optional cross-path transposition table.
//!
//! The three named agents from the original system — default random
//! rollout, greedy rollout, and transposition-sharing root-parallel
//! search — are this one engine under three presets; see
//! [`MctsAgent::with_default_rollout`], [`MctsAgent::with_greedy_rollout`],
//! and [`MctsAgent::with_transposition`].

mod agent;
mod key;
mod params;
mod search;
mod table;

pub use agent::MctsAgent;
pub use key::{make_key, StateKey};
pub use params::{MctsParams, RolloutPolicy, ValueFunction, DEFAULT_TT_MAX_ENTRIES};
pub use search::{run_search, SearchResult};
pub use table::{TranspositionEntry, TranspositionTable};
