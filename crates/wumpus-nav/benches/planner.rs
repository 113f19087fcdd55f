use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wumpus_core::{Bounds, Cell};
use wumpus_nav::GridPlanner;

fn bench_grid_planner(c: &mut Criterion) {
    let bounds = Bounds::new(32, 32);
    let planner = GridPlanner::new(bounds);
    // Comb of walls with alternating gaps.
    let passable = |cell: Cell| {
        let gap = if cell.x % 8 == 0 { 1 } else { 32 };
        cell.x % 4 != 0 || cell.y == gap
    };

    c.bench_function("wumpus-nav/grid.find_path(32x32 comb)", |b| {
        b.iter(|| {
            let route = planner.find_path(&passable, Cell::new(1, 1), Cell::new(32, 32));
            black_box(route.steps());
        })
    });
}

criterion_group!(benches, bench_grid_planner);
criterion_main!(benches);
