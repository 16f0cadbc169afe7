//! Board-feature heuristic (C5) and the greedy policy (C6) built on top of
//! it. The greedy policy is consumed both as a standalone baseline and as
//! an MCTS rollout collaborator (`rollout_policy = Greedy`).

pub mod features;
pub mod greedy;

pub use features::{compute_board_features, transition_value, BoardFeatures};
pub use greedy::choose as choose_greedy_action;
