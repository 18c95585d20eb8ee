// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use glam::{DMat4, DQuat, DVec3, EulerRot};
use orrery_geom::{Bounds, Plane, compose, decompose};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

fn gen_matrices(count: usize) -> Vec<DMat4> {
    let mut rng = Rng::new(0x9E37_79B9_7F4A_7C15);
    (0..count)
        .map(|_| {
            let t = DVec3::new(
                rng.range(-1.0e12, 1.0e12),
                rng.range(-1.0e12, 1.0e12),
                rng.range(-1.0e12, 1.0e12),
            );
            let r = DQuat::from_euler(
                EulerRot::YXZ,
                rng.range(-3.1, 3.1),
                rng.range(-1.5, 1.5),
                rng.range(-3.1, 3.1),
            );
            let s = DVec3::new(rng.range(0.1, 10.0), rng.range(0.1, 10.0), rng.range(0.1, 10.0));
            compose(t, r, s)
        })
        .collect()
}

fn bench_decompose(c: &mut Criterion) {
    let mut group = c.benchmark_group("trs");
    let matrices = gen_matrices(1024);
    group.throughput(Throughput::Elements(matrices.len() as u64));
    group.bench_function("decompose", |b| {
        b.iter(|| {
            for m in &matrices {
                black_box(decompose(black_box(m)));
            }
        });
    });
    group.bench_function("decompose_recompose", |b| {
        b.iter(|| {
            for m in &matrices {
                black_box(decompose(m).to_matrix());
            }
        });
    });
    group.finish();
}

fn bench_bounds(c: &mut Criterion) {
    let mut group = c.benchmark_group("bounds");
    let bounds = Bounds::from_center_extents(DVec3::new(0.0, 0.0, 5.0), DVec3::splat(10.0));
    let view = DMat4::look_at_rh(DVec3::new(0.0, 0.0, -3.0), DVec3::ZERO, DVec3::Y);
    let projection = DMat4::perspective_rh(1.0, 16.0 / 9.0, 0.1, 1.0e4) * view;
    let near = Plane::new(DVec3::Z, 2.9);
    group.bench_function("transform", |b| {
        b.iter(|| black_box(bounds.transform(black_box(&projection))));
    });
    group.bench_function("transform_clipped", |b| {
        b.iter(|| black_box(bounds.transform_clipped(black_box(&projection), &near)));
    });
    group.finish();
}

criterion_group!(benches, bench_decompose, bench_bounds);
criterion_main!(benches);
