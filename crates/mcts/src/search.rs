//! The single-threaded tree search at the heart of one MCTS worker:
//! selection, expansion, rollout, and backpropagation over an arena of
//! nodes indexed by position, never by pointer (spec.md §9 "Tree
//! storage").

use rand::Rng;
use rand_mt::Mt19937GenRand32;

use tetris_mcts_core::Board;
use tetris_mcts_engine::Environment;
use tetris_mcts_heuristic::{choose_greedy_action, compute_board_features, transition_value};
use tetris_mcts_types::{Action, StepResult};

use crate::key::make_key;
use crate::params::{MctsParams, RolloutPolicy, ValueFunction};
use crate::table::{accumulate, TranspositionTable};

struct Node {
    parent: Option<usize>,
    action_from_parent: Action,
    visits: u32,
    total_value: f64,
    terminal: bool,
    untried_actions: Vec<Action>,
    children: Vec<usize>,
}

/// Per-root-action visit and value totals produced by one worker.
pub struct SearchResult {
    pub visits: Vec<u32>,
    pub total_value: Vec<f64>,
}

/// Per-step value per spec.md §4.7.1: either the raw score delta, or the
/// board-feature transition score of §4.5 computed from the board just
/// before and just after the step.
fn step_value(params: &MctsParams, before: &Board, result: &StepResult, after: &Board) -> f64 {
    match params.value_function {
        ValueFunction::ScoreDelta => result.score_delta as f64,
        ValueFunction::GreedyHeuristic => {
            let before_features = compute_board_features(before);
            let after_features = compute_board_features(after);
            transition_value(&before_features, &after_features, result)
        }
    }
}

/// Picks a rollout action per `policy`, falling back to uniform random
/// whenever `Greedy` nominates something not in `actions` (can't happen
/// in practice since the greedy policy only considers `actions` itself,
/// but the fallback keeps the search total whatever the policy does).
fn rollout_action(
    policy: RolloutPolicy,
    sim: &Environment,
    actions: &[Action],
    rng: &mut Mt19937GenRand32,
) -> Action {
    match policy {
        RolloutPolicy::Random => actions[rng.gen_range(0..actions.len())],
        RolloutPolicy::Greedy => {
            let candidate = choose_greedy_action(sim);
            if actions.contains(&candidate) {
                candidate
            } else {
                actions[rng.gen_range(0..actions.len())]
            }
        }
    }
}

/// Runs `iterations` MCTS iterations from `env`, returning aggregated
/// `(visits, value)` per root action. `tt`, if present, is both read to
/// prime newly created nodes and written during backpropagation.
pub fn run_search(
    env: &Environment,
    root_actions: &[Action],
    iterations: u32,
    rng: &mut Mt19937GenRand32,
    mut tt: Option<&mut TranspositionTable>,
    params: &MctsParams,
) -> SearchResult {
    let tt_max_entries = params.resolved_tt_max_entries();

    let mut nodes: Vec<Node> = Vec::with_capacity(iterations as usize + 1);
    nodes.push(Node {
        parent: None,
        action_from_parent: Action::default(),
        visits: 0,
        total_value: 0.0,
        terminal: false,
        untried_actions: root_actions.to_vec(),
        children: Vec::new(),
    });

    let mut node_keys: Vec<crate::key::StateKey> = Vec::new();
    if let Some(table) = tt.as_deref_mut() {
        let root_key = make_key(env);
        if let Some(entry) = table.get(&root_key) {
            nodes[0].visits = entry.visits;
            nodes[0].total_value = entry.total_value;
        }
        node_keys.push(root_key);
    }

    for _ in 0..iterations {
        let mut sim = env.clone();
        let mut node_index = 0usize;
        let mut depth = 0i32;
        let mut accumulated_reward = 0.0f64;

        // Selection.
        loop {
            let node = &nodes[node_index];
            if node.terminal || depth >= params.max_depth || !node.untried_actions.is_empty() {
                break;
            }
            if node.children.is_empty() {
                nodes[node_index].terminal = true;
                break;
            }

            let parent_visits_log = (node.visits.max(1) as f64).ln();
            let mut best_child = node.children[0];
            let mut best_score = f64::NEG_INFINITY;
            for &child_idx in &node.children {
                let child = &nodes[child_idx];
                let q = if child.visits > 0 {
                    child.total_value / child.visits as f64
                } else {
                    0.0
                };
                let u = params.exploration
                    * (parent_visits_log / (1.0 + child.visits as f64)).sqrt();
                let score = q + u;
                if score > best_score {
                    best_score = score;
                    best_child = child_idx;
                }
            }

            let action = nodes[best_child].action_from_parent;
            let before = *sim.board();
            let result = sim.step(action);
            let after = *sim.board();
            accumulated_reward += step_value(params, &before, &result, &after);
            depth += 1;

            node_index = best_child;
            if result.game_over || sim.is_game_over() {
                nodes[node_index].terminal = true;
                break;
            }
        }

        // Expansion.
        let can_expand = !nodes[node_index].terminal
            && depth < params.max_depth
            && !nodes[node_index].untried_actions.is_empty();
        if can_expand {
            let untried_len = nodes[node_index].untried_actions.len();
            let pick = rng.gen_range(0..untried_len);
            let action = nodes[node_index].untried_actions.swap_remove(pick);

            let before = *sim.board();
            let result = sim.step(action);
            let after = *sim.board();
            accumulated_reward += step_value(params, &before, &result, &after);
            depth += 1;

            let mut child_terminal = result.game_over || sim.is_game_over();
            let child_untried = if child_terminal {
                Vec::new()
            } else {
                let actions = sim.get_valid_actions();
                if actions.is_empty() {
                    child_terminal = true;
                }
                actions
            };

            let child_index = nodes.len();
            nodes.push(Node {
                parent: Some(node_index),
                action_from_parent: action,
                visits: 0,
                total_value: 0.0,
                terminal: child_terminal,
                untried_actions: child_untried,
                children: Vec::new(),
            });

            if let Some(table) = tt.as_deref_mut() {
                let key = make_key(&sim);
                if let Some(entry) = table.get(&key) {
                    nodes[child_index].visits = entry.visits;
                    nodes[child_index].total_value = entry.total_value;
                }
                node_keys.push(key);
            }

            nodes[node_index].children.push(child_index);
            node_index = child_index;
        }

        // Rollout.
        if !nodes[node_index].terminal && depth < params.max_depth {
            loop {
                if sim.is_game_over() || depth >= params.max_depth {
                    break;
                }
                let actions = sim.get_valid_actions();
                if actions.is_empty() {
                    break;
                }
                let action = rollout_action(params.rollout_policy, &sim, &actions, rng);

                let before = *sim.board();
                let result = sim.step(action);
                let after = *sim.board();
                accumulated_reward += step_value(params, &before, &result, &after);
                depth += 1;

                if result.game_over {
                    break;
                }
            }
        }

        // Backpropagation.
        let mut current = Some(node_index);
        while let Some(idx) = current {
            nodes[idx].visits += 1;
            nodes[idx].total_value += accumulated_reward;
            if let Some(table) = tt.as_deref_mut() {
                accumulate(table, &node_keys[idx], accumulated_reward, tt_max_entries);
            }
            current = nodes[idx].parent;
        }
    }

    let mut visits = vec![0u32; root_actions.len()];
    let mut total_value = vec![0.0f64; root_actions.len()];
    for &child_idx in &nodes[0].children {
        let child = &nodes[child_idx];
        if let Some(pos) = root_actions
            .iter()
            .position(|a| *a == child.action_from_parent)
        {
            visits[pos] += child.visits;
            total_value[pos] += child.total_value;
        }
    }

    SearchResult {
        visits,
        total_value,
    }
}
