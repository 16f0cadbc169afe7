use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tetris_mcts::engine::Environment;
use tetris_mcts::mcts::{MctsAgent, MctsParams};
use tetris_mcts::types::PieceKind;

fn bench_clone(c: &mut Criterion) {
    let env = Environment::with_seed(12345);

    c.bench_function("environment_clone", |b| {
        b.iter(|| {
            let cloned = env.clone();
            black_box(cloned)
        })
    });
}

fn bench_step(c: &mut Criterion) {
    c.bench_function("environment_step_hard_drop", |b| {
        b.iter(|| {
            let mut env = Environment::with_seed(12345);
            let actions = env.get_valid_actions();
            let action = actions[0];
            black_box(env.step(black_box(action)))
        })
    });
}

fn bench_clear_four_lines(c: &mut Criterion) {
    c.bench_function("board_clear_four_lines", |b| {
        b.iter(|| {
            let mut env = Environment::with_seed(1);
            {
                let board = env.board_mut();
                for y in 16..20 {
                    for x in 0..9 {
                        board.lock(&[(x, y), (x, y), (x, y), (x, y)], PieceKind::L);
                    }
                }
            }
            black_box(env.board_mut().clear_full_lines())
        })
    });
}

fn bench_default_rollout_search(c: &mut Criterion) {
    let env = Environment::with_seed(777);

    c.bench_function("mcts_default_rollout_400_iterations", |b| {
        b.iter(|| {
            let mut agent = MctsAgent::with_default_rollout(MctsParams {
                iterations: 400,
                max_depth: 20,
                exploration: 1.4,
                threads: 1,
                seed: Some(1),
                ..MctsParams::default()
            });
            black_box(agent.choose_action(black_box(&env)))
        })
    });
}

fn bench_transposition_search_multithreaded(c: &mut Criterion) {
    let env = Environment::with_seed(777);

    c.bench_function("mcts_transposition_400_iterations_4_threads", |b| {
        b.iter(|| {
            let mut agent = MctsAgent::with_transposition(MctsParams {
                iterations: 400,
                max_depth: 20,
                exploration: 1.4,
                threads: 4,
                seed: Some(1),
                ..MctsParams::default()
            });
            black_box(agent.choose_action(black_box(&env)))
        })
    });
}

criterion_group!(
    benches,
    bench_clone,
    bench_step,
    bench_clear_four_lines,
    bench_default_rollout_search,
    bench_transposition_search_multithreaded
);
criterion_main!(benches);
