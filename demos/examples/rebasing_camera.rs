// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rebasing camera.
//!
//! Fly a camera across an astronomical distance with a distance-threshold policy and
//! print the single-precision placements the host would render.
//!
//! Run:
//! - `cargo run -p orrery_demos --example rebasing_camera`

use glam::DVec3;
use orrery_rebase::{DistanceThreshold, ThresholdConfig, step};
use orrery_tree::{Hierarchy, Placement};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut h = Hierarchy::new();
    let root = h.insert_root(Placement::IDENTITY);
    let camera = h.insert_transform(Some(root)).unwrap();
    let beacon = h.insert_transform(Some(root)).unwrap();
    h.set_local_position(beacon, DVec3::new(0.0, 1.0, 4.0e12)).unwrap();

    let mut policy = DistanceThreshold::new(root, camera, ThresholdConfig {
        max_distance: 1.0e9,
    });

    for frame in 0..=10 {
        let z = f64::from(frame) * 4.0e11 - 1.0;
        h.set_local_position(camera, DVec3::new(0.0, 0.0, z)).unwrap();
        let report = step(&mut h, &mut policy).unwrap();
        let cam = h.host_placement(camera).unwrap();
        let bea = h.host_placement(beacon).unwrap();
        println!(
            "frame {frame:2}: rebased={:5} camera={} beacon={}",
            report.rebased, cam.translation, bea.translation
        );
    }

    // At the end the beacon sits one unit up and one unit ahead of the camera.
    let anchor = h.root_universe_position(root).unwrap();
    println!("final anchor: {anchor}");
}
