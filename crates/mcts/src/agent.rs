//! The MCTS agent (C7): root-parallel worker fan-out over [`run_search`],
//! plus the three named presets from spec.md §9, surfaced as thin
//! configurators over one engine rather than separate types.

use rand::{Rng, SeedableRng};
use rand_mt::Mt19937GenRand32;
use rayon::prelude::*;

use tetris_mcts_engine::Environment;
use tetris_mcts_types::Action;

use crate::params::{MctsParams, RolloutPolicy, ValueFunction};
use crate::search::run_search;
use crate::table::{merge_into, TranspositionTable};

/// Root-parallel MCTS agent. Carries its own PRNG (used only by the main
/// thread: to draw worker seeds and to pick a fallback action) and, when
/// transpositions are enabled, a transposition table that persists
/// across [`Self::choose_action`] calls within an episode.
pub struct MctsAgent {
    params: MctsParams,
    rng: Mt19937GenRand32,
    tt: Option<TranspositionTable>,
}

impl MctsAgent {
    pub fn new(params: MctsParams) -> Self {
        let rng = match params.seed {
            Some(seed) => Mt19937GenRand32::from_seed(seed.to_le_bytes()),
            None => Mt19937GenRand32::from_seed(rand::random::<u32>().to_le_bytes()),
        };
        let tt = if params.use_transposition_table {
            Some(TranspositionTable::new())
        } else {
            None
        };
        MctsAgent { params, rng, tt }
    }

    /// Single-threaded uniform-rollout preset (`mcts_default`).
    pub fn with_default_rollout(mut params: MctsParams) -> Self {
        params.rollout_policy = RolloutPolicy::Random;
        params.value_function = ValueFunction::ScoreDelta;
        params.use_transposition_table = false;
        Self::new(params)
    }

    /// Greedy-rollout preset (`mcts_greedy`).
    pub fn with_greedy_rollout(mut params: MctsParams) -> Self {
        params.rollout_policy = RolloutPolicy::Greedy;
        params.value_function = ValueFunction::ScoreDelta;
        params.use_transposition_table = false;
        Self::new(params)
    }

    /// Root-parallel, transposition-sharing preset (`mcts_transposition`).
    pub fn with_transposition(mut params: MctsParams) -> Self {
        params.rollout_policy = RolloutPolicy::Greedy;
        params.value_function = ValueFunction::ScoreDelta;
        params.use_transposition_table = true;
        Self::new(params)
    }

    /// Clears the long-lived transposition table at the start of a new
    /// episode (spec.md §5 "Resource scoping").
    pub fn on_episode_start(&mut self) {
        if self.params.use_transposition_table {
            self.tt = Some(TranspositionTable::new());
        }
    }

    /// Chooses the root action with the highest mean value after the
    /// configured iteration budget, per spec.md §4.7.
    pub fn choose_action(&mut self, env: &Environment) -> Action {
        if self.params.iterations <= 0 || self.params.max_depth <= 0 || self.params.exploration <= 0.0
        {
            return Action::default();
        }
        if env.is_game_over() {
            return Action::default();
        }

        let root_actions = env.get_valid_actions();
        if root_actions.is_empty() {
            return Action::default();
        }

        let total_iterations = self.params.iterations as usize;
        let max_threads = self.params.threads.max(1);
        let worker_count = total_iterations.min(max_threads).max(1);
        let base_iterations = total_iterations / worker_count;
        let remainder = total_iterations % worker_count;

        let seeds: Vec<u32> = (0..worker_count).map(|_| self.rng.gen()).collect();
        let use_tt = self.params.use_transposition_table;
        let params = self.params;

        let worker_outputs: Vec<(Vec<u32>, Vec<f64>, Option<TranspositionTable>)> = (0
            ..worker_count)
            .into_par_iter()
            .map(|i| {
                let iterations_for_worker =
                    (base_iterations + if i < remainder { 1 } else { 0 }) as u32;
                let mut local_rng = Mt19937GenRand32::from_seed(seeds[i].to_le_bytes());
                let mut local_tt = if use_tt {
                    Some(TranspositionTable::new())
                } else {
                    None
                };
                let result = run_search(
                    env,
                    &root_actions,
                    iterations_for_worker,
                    &mut local_rng,
                    local_tt.as_mut(),
                    &params,
                );
                (result.visits, result.total_value, local_tt)
            })
            .collect();

        let mut total_visits = vec![0u32; root_actions.len()];
        let mut total_values = vec![0.0f64; root_actions.len()];
        let tt_max_entries = params.resolved_tt_max_entries();

        for (visits, values, local_tt) in worker_outputs {
            for i in 0..root_actions.len() {
                total_visits[i] += visits[i];
                total_values[i] += values[i];
            }
            if let Some(local_table) = local_tt {
                let main_table = self.tt.get_or_insert_with(TranspositionTable::new);
                merge_into(main_table, local_table, tt_max_entries);
            }
        }

        let mut best_index = None;
        let mut best_value = f64::NEG_INFINITY;
        for i in 0..root_actions.len() {
            if total_visits[i] == 0 {
                continue;
            }
            let mean_value = total_values[i] / total_visits[i] as f64;
            if mean_value > best_value {
                best_value = mean_value;
                best_index = Some(i);
            }
        }

        match best_index {
            Some(i) => root_actions[i],
            None => root_actions[self.rng.gen_range(0..root_actions.len())],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tetris_mcts_engine::ActivePiece;
    use tetris_mcts_types::{PieceKind, Rotation, SPAWN_X};

    fn base_params(iterations: i32, seed: u32) -> MctsParams {
        MctsParams {
            iterations,
            max_depth: 6,
            exploration: 1.4,
            threads: 1,
            seed: Some(seed),
            ..MctsParams::default()
        }
    }

    /// A board with rows 16..19 filled except column 9, and a vertical
    /// I-piece active: exactly one root action clears a Tetris, every
    /// other root action clears nothing.
    fn forced_tetris_env(seed: u32) -> Environment {
        let mut env = Environment::with_seed(seed);
        {
            let board = env.board_mut();
            for y in 16..20 {
                for x in 0..9 {
                    board.lock(&[(x, y), (x, y), (x, y), (x, y)], PieceKind::L);
                }
            }
        }
        env.set_active_for_test(ActivePiece::spawn(PieceKind::I));
        env
    }

    #[test]
    fn invalid_configuration_yields_the_default_action() {
        let mut agent = MctsAgent::with_default_rollout(base_params(0, 1));
        let env = Environment::with_seed(1);
        assert_eq!(agent.choose_action(&env), Action::default());
    }

    #[test]
    fn game_over_environment_yields_the_default_action() {
        let mut agent = MctsAgent::with_default_rollout(base_params(50, 1));
        let mut env = Environment::with_seed(1);
        while !env.is_game_over() {
            let actions = env.get_valid_actions();
            if actions.is_empty() {
                break;
            }
            env.step(actions[0]);
        }
        assert_eq!(agent.choose_action(&env), Action::default());
    }

    #[test]
    fn picks_a_legal_root_action_on_a_fresh_board() {
        let mut agent = MctsAgent::with_default_rollout(base_params(40, 11));
        let env = Environment::with_seed(11);
        let action = agent.choose_action(&env);
        assert!(env.get_valid_actions().contains(&action));
    }

    #[test]
    fn same_seed_and_thread_count_is_deterministic() {
        let env = Environment::with_seed(21);
        let mut a = MctsAgent::with_default_rollout(base_params(60, 99));
        let mut b = MctsAgent::with_default_rollout(base_params(60, 99));
        assert_eq!(a.choose_action(&env), b.choose_action(&env));
    }

    /// Scenario 5: with a single action dominating every other by score
    /// delta and `iterations >= |root_actions|`, the engine must select
    /// it deterministically. `max_depth = 1` keeps rollouts from
    /// extending past the root action so no later placement's score can
    /// cloud the comparison.
    #[test]
    fn mcts_selects_the_forced_tetris_action() {
        let env = forced_tetris_env(30);
        let root_action_count = env.get_valid_actions().len();
        let mut params = base_params((root_action_count * 4) as i32, 30);
        params.max_depth = 1;
        let mut agent = MctsAgent::with_default_rollout(params);

        let chosen = agent.choose_action(&env);
        assert_eq!(chosen.rotation, Rotation::Spawn);
        assert_eq!(chosen.dx, 8 - SPAWN_X);

        let mut check = env.clone();
        let result = check.step(chosen);
        assert_eq!(result.lines_cleared, 4);
        assert_eq!(result.score_delta, 800);
    }

    /// Scenario 6: with the same forced setup, `threads=1` and
    /// `threads=4` must agree on total visits and on the chosen action.
    #[test]
    fn root_parallel_equivalence_across_thread_counts() {
        let env = forced_tetris_env(31);
        let root_action_count = env.get_valid_actions().len();
        let iterations = (root_action_count * 4) as i32;

        let mut params_one = base_params(iterations, 7);
        params_one.max_depth = 1;
        params_one.threads = 1;
        let mut params_four = base_params(iterations, 7);
        params_four.max_depth = 1;
        params_four.threads = 4;

        let mut single = MctsAgent::with_default_rollout(params_one);
        let mut multi = MctsAgent::with_default_rollout(params_four);

        assert_eq!(single.choose_action(&env), multi.choose_action(&env));
    }

    #[test]
    fn on_episode_start_clears_the_transposition_table() {
        let mut agent = MctsAgent::with_transposition(base_params(40, 5));
        let env = Environment::with_seed(5);
        agent.choose_action(&env);
        assert!(agent.tt.as_ref().is_some_and(|t| !t.is_empty()));
        agent.on_episode_start();
        assert!(agent.tt.as_ref().is_some_and(|t| t.is_empty()));
    }
}
