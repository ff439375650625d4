#![forbid(unsafe_code)]

use criterion::{Criterion, criterion_group, criterion_main};
use duopane_layout::LayoutConfig;
use duopane_runtime::{DragController, LayoutStore, MemoryStorage, NullApplier, PointerButton};
use std::hint::black_box;

fn store() -> LayoutStore<MemoryStorage, NullApplier> {
    LayoutStore::new(
        LayoutConfig::default().with_storage(true),
        MemoryStorage::new(),
        NullApplier,
    )
}

fn bench_drag_lifecycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("duopane/drag/lifecycle");

    for moves in [32u32, 120] {
        group.bench_function(format!("down_move_{moves}_up"), |b| {
            b.iter(|| {
                let mut store = store();
                let mut controller = DragController::new();
                let down =
                    controller.pointer_down(&mut store, 11, PointerButton::Primary, 0.0, 1200.0);
                black_box(down.sequence);
                for step in 0..moves {
                    let dispatch = controller.pointer_move(&mut store, 11, f64::from(step) * 9.5);
                    black_box(dispatch.outcome);
                }
                let up = controller.pointer_up(&mut store, 11);
                black_box(up.state);
            });
        });
    }

    group.finish();
}

fn bench_drag_move_hot_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("duopane/drag/move");
    let mut store = store();
    let mut controller = DragController::new();
    controller.pointer_down(&mut store, 7, PointerButton::Primary, 0.0, 1200.0);
    let mut x = 0.0f64;

    group.bench_function("single_move", |b| {
        b.iter(|| {
            x = (x + 13.0) % 1200.0;
            black_box(controller.pointer_move(&mut store, 7, black_box(x)).outcome);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_drag_lifecycle, bench_drag_move_hot_path);
criterion_main!(benches);
