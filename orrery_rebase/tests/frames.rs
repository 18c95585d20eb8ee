// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multi-frame behavior of the driver with the reference policies.

use glam::{DVec3, Vec3};
use orrery_rebase::{DistanceThreshold, ThresholdConfig, TrackOrigin, step};
use orrery_tree::{Hierarchy, NodeId, Placement};

struct Scene {
    h: Hierarchy,
    root: NodeId,
    camera: NodeId,
    planet: NodeId,
}

fn scene() -> Scene {
    let mut h = Hierarchy::new();
    let root = h.insert_root(Placement::IDENTITY);
    let camera = h.insert_transform(Some(root)).unwrap();
    let planet = h.insert_transform(Some(root)).unwrap();
    h.set_local_position(planet, DVec3::new(0.0, 0.0, 1.5e11)).unwrap();
    Scene {
        h,
        root,
        camera,
        planet,
    }
}

#[test]
fn host_edits_are_seen_by_the_policy() {
    let Scene {
        mut h,
        root,
        camera,
        ..
    } = scene();
    let mut policy = TrackOrigin::new(root, camera);
    let _ = step(&mut h, &mut policy).unwrap();

    // The host nudges the camera in world space.
    h.set_host_placement(camera, Placement::from_translation(Vec3::new(5.0, 0.0, 0.0)))
        .unwrap();
    let report = step(&mut h, &mut policy).unwrap();
    assert_eq!(report.adopted, vec![camera], "host edit adopted first");
    assert!(report.rebased, "anchor followed the adopted position");
    assert_eq!(
        h.root_universe_position(root).unwrap(),
        DVec3::new(5.0, 0.0, 0.0),
        "anchor at the camera"
    );
    let placement = h.host_placement(camera).unwrap();
    assert!(
        placement.translation.abs_diff_eq(Vec3::ZERO, 1e-6),
        "camera back at the origin {placement:?}"
    );
}

#[test]
fn distant_objects_move_opposite_the_anchor() {
    let Scene {
        mut h,
        root,
        camera,
        planet,
    } = scene();
    let mut policy = TrackOrigin::new(root, camera);
    h.set_local_position(camera, DVec3::new(0.0, 0.0, 1.5e11 - 100.0)).unwrap();

    let report = step(&mut h, &mut policy).unwrap();
    assert!(report.pushed.contains(&planet), "planet pushed");
    let planet_world = h.host_placement(planet).unwrap().translation;
    assert!(
        planet_world.abs_diff_eq(Vec3::new(0.0, 0.0, 100.0), 1e-3),
        "planet 100 units ahead {planet_world}"
    );
    assert_eq!(
        h.local_position(planet).unwrap(),
        DVec3::new(0.0, 0.0, 1.5e11),
        "universe state untouched"
    );
}

#[test]
fn threshold_rebases_rarely_during_flight() {
    let Scene {
        mut h,
        root,
        camera,
        ..
    } = scene();
    let mut policy = DistanceThreshold::new(root, camera, ThresholdConfig {
        max_distance: 1.0e4,
    });

    let mut rebases = 0;
    for frame in 1..=20 {
        let z = f64::from(frame) * 3.0e3;
        h.set_local_position(camera, DVec3::new(0.0, 0.0, z)).unwrap();
        let report = step(&mut h, &mut policy).unwrap();
        if report.rebased {
            rebases += 1;
        }
        let world = h.host_placement(camera).unwrap().translation;
        assert!(world.length() <= 1.0e4, "camera stays near the origin at frame {frame}");
    }
    // Every fourth frame crosses 12_000 > 10_000 units from the last anchor.
    assert_eq!(rebases, 5, "rebase count");
}

#[test]
fn idle_frames_do_nothing() {
    let Scene {
        mut h, root, camera, ..
    } = scene();
    let mut policy = TrackOrigin::new(root, camera);
    let _ = step(&mut h, &mut policy).unwrap();
    let report = step(&mut h, &mut policy).unwrap();
    assert!(!report.rebased, "nothing moved");
    assert!(report.adopted.is_empty() && report.pushed.is_empty(), "nothing to sync");
}
