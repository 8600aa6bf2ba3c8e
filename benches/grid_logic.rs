use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_match3::core::{cascade, find_runs, Grid, Layout};
use tui_match3::engine::{EngineConfig, TurnController};

fn settled_grid(seed: u32) -> Grid {
    let mut grid = Grid::create(7, 7, Layout::default(), 5, seed).unwrap();
    while cascade::resolve_step(&mut grid, 500).acted() {}
    grid.drain_events().for_each(drop);
    grid
}

fn bench_find_runs(c: &mut Criterion) {
    let grid = settled_grid(12345);

    c.bench_function("find_runs_7x7_stable", |b| {
        b.iter(|| black_box(find_runs(black_box(&grid))))
    });
}

fn bench_settle_fresh_board(c: &mut Criterion) {
    let mut seed = 0u32;
    c.bench_function("settle_fresh_7x7", |b| {
        b.iter(|| {
            seed = seed.wrapping_add(1);
            let mut grid = Grid::create(7, 7, Layout::default(), 5, seed).unwrap();
            while cascade::resolve_step(&mut grid, 500).acted() {}
            grid.drain_events().count()
        })
    });
}

fn bench_advance_idle(c: &mut Criterion) {
    let mut controller = TurnController::new(EngineConfig::default()).unwrap();
    let mut now = 0u64;
    c.bench_function("advance_idle_tick", |b| {
        b.iter(|| {
            now += 16;
            controller.advance(black_box(now), None);
            controller.drain_grid_events().for_each(drop);
        })
    });
}

criterion_group!(
    benches,
    bench_find_runs,
    bench_settle_fresh_board,
    bench_advance_idle
);
criterion_main!(benches);
