// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use glam::DVec3;
use orrery_tree::{Hierarchy, NodeId, Placement};

/// Root followed by a single chain of `depth` transforms. Returns (hierarchy, root, top, leaf).
fn gen_chain(depth: usize) -> (Hierarchy, NodeId, NodeId, NodeId) {
    let mut h = Hierarchy::new();
    let root = h.insert_root(Placement::IDENTITY);
    let top = h.insert_transform(Some(root)).unwrap();
    let mut leaf = top;
    for i in 0..depth {
        leaf = h.insert_transform(Some(leaf)).unwrap();
        h.set_local_position(leaf, DVec3::new(1.0, i as f64, 0.0)).unwrap();
    }
    (h, root, top, leaf)
}

/// Root with `n` direct leaf children spread over a large area.
fn gen_flat(n: usize) -> (Hierarchy, NodeId) {
    let mut h = Hierarchy::new();
    let root = h.insert_root(Placement::IDENTITY);
    for i in 0..n {
        let id = h.insert_transform(Some(root)).unwrap();
        h.set_local_position(id, DVec3::new(i as f64 * 1.0e7, 0.0, 0.0)).unwrap();
    }
    (h, root)
}

fn bench_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain_256");
    group.bench_function("edit_top_read_leaf_world", |b| {
        let (mut h, _, top, leaf) = gen_chain(256);
        let mut x = 0.0;
        b.iter(|| {
            x += 1.0;
            h.set_local_position(top, DVec3::new(x, 0.0, 0.0)).unwrap();
            black_box(h.world_matrix(leaf).unwrap());
        });
    });
    group.bench_function("move_anchor_read_leaf_world", |b| {
        let (mut h, root, _, leaf) = gen_chain(256);
        let mut x = 0.0;
        b.iter(|| {
            x += 1.0;
            h.set_root_universe_position(root, DVec3::new(x, 0.0, 0.0)).unwrap();
            black_box(h.world_matrix(leaf).unwrap());
        });
    });
    group.bench_function("cached_leaf_world", |b| {
        let (mut h, _, _, leaf) = gen_chain(256);
        let _ = h.world_matrix(leaf).unwrap();
        b.iter(|| black_box(h.world_matrix(leaf).unwrap()));
    });
    group.finish();
}

fn bench_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("flat_1024");
    group.bench_function("move_anchor_push", |b| {
        b.iter_batched(
            || gen_flat(1024),
            |(mut h, root)| {
                h.set_root_universe_position(root, DVec3::new(5.0e9, 0.0, 0.0))
                    .unwrap();
                black_box(h.push_placements().unwrap().len());
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_chain, bench_push);
criterion_main!(benches);
