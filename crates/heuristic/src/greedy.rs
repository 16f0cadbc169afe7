//! Greedy policy (C6): argmax over legal placements using the §4.5
//! transition-value formula. Stateless — a pure function of the
//! simulation state, suitable as an MCTS rollout collaborator.

use tetris_mcts_engine::Environment;
use tetris_mcts_types::Action;

use crate::features::{compute_board_features, transition_value};

/// Chooses the legal action with the highest transition value, breaking
/// ties by first encountered. Returns the default action if the
/// environment is already over or has no legal actions.
pub fn choose(env: &Environment) -> Action {
    if env.is_game_over() {
        return Action::default();
    }

    let actions = env.get_valid_actions();
    if actions.is_empty() {
        return Action::default();
    }

    let before = compute_board_features(env.board());

    let mut best_action = actions[0];
    let mut best_value = f64::NEG_INFINITY;

    for &action in &actions {
        let mut sim = env.clone();
        let result = sim.step(action);
        let after = compute_board_features(sim.board());
        let value = transition_value(&before, &after, &result);

        if value > best_value {
            best_value = value;
            best_action = action;
        }
    }

    best_action
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_over_environment_returns_default_action() {
        let mut env = Environment::with_seed(1);
        while !env.is_game_over() {
            let actions = env.get_valid_actions();
            if actions.is_empty() {
                break;
            }
            env.step(actions[0]);
        }
        assert_eq!(choose(&env), Action::default());
    }

    #[test]
    fn picks_some_legal_action_on_a_fresh_board() {
        let env = Environment::with_seed(9);
        let action = choose(&env);
        assert!(env.get_valid_actions().contains(&action));
    }
}
