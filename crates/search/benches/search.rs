use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tsumo_core::{Board, ColorPair};
use tsumo_engine::{enumerate_moves, simulate_placement};
use tsumo_eval::{EvalConfig, Evaluator};
use tsumo_search::{BeamSearch, LookaheadSearch, SearchConfig};

fn midgame_board() -> Board {
    Board::from_rows(
        6,
        12,
        2,
        &["1.2...", "21.3..", "1234.1", "214321", "332144"],
    )
    .expect("valid rows")
}

fn bench_simulate(c: &mut Criterion) {
    let board = midgame_board();
    let colors = ColorPair::new(1, 2);

    c.bench_function("simulate_all_moves", |b| {
        b.iter(|| {
            for mv in enumerate_moves(black_box(&board)) {
                black_box(simulate_placement(&board, colors, &mv));
            }
        })
    });

    let config = EvalConfig::general();
    c.bench_function("evaluate_general", |b| {
        b.iter(|| config.evaluate(black_box(&board), Default::default()))
    });
    let gtr = EvalConfig::gtr();
    c.bench_function("evaluate_gtr", |b| {
        b.iter(|| gtr.evaluate(black_box(&board), Default::default()))
    });
}

fn bench_search(c: &mut Criterion) {
    let board = midgame_board();
    let current = ColorPair::new(1, 2);
    let next = ColorPair::new(3, 4);

    let beam = BeamSearch::default();
    c.bench_function("best_single_move", |b| {
        b.iter(|| beam.best_single_move(black_box(&board), black_box(current)))
    });

    let lookahead = LookaheadSearch::from_config(&SearchConfig::default());
    c.bench_function("think_two_ply", |b| {
        b.iter(|| lookahead.think(black_box(&board), black_box(current), Some(next)))
    });
}

criterion_group!(benches, bench_simulate, bench_search);
criterion_main!(benches);
