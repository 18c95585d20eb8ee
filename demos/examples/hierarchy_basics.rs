// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hierarchy basics.
//!
//! Build a root with a moon orbiting a planet, read universe and world values,
//! and watch which caches a local edit drops.
//!
//! Run:
//! - `cargo run -p orrery_demos --example hierarchy_basics`

use glam::{DQuat, DVec3};
use orrery_tree::{Caches, Hierarchy, Placement};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let mut h = Hierarchy::new();
    let root = h.insert_root(Placement::IDENTITY);
    let planet = h.insert_transform(Some(root)).unwrap();
    let moon = h.insert_transform(Some(planet)).unwrap();

    h.set_local_position(planet, DVec3::new(1.496e11, 0.0, 0.0)).unwrap();
    h.set_local_rotation(planet, DQuat::from_rotation_y(0.4)).unwrap();
    h.set_local_scale(planet, DVec3::new(2.0, 3.0, 4.0)).unwrap();
    h.set_local_position(moon, DVec3::new(0.0, 0.0, 3.84e8)).unwrap();

    // The planet has a child, so only the x component of its scale applies.
    println!("planet scale mode: {:?}", h.scale_mode(planet).unwrap());
    println!("planet local scale: {}", h.local_scale(planet).unwrap());
    println!("moon universe position: {}", h.universe_position(moon).unwrap());

    // Center world space on the planet.
    h.set_root_universe_position(root, DVec3::new(1.496e11, 0.0, 0.0)).unwrap();
    let world = h.world_matrix(moon).unwrap();
    println!("moon world translation: {}", world.w_axis.truncate());

    h.set_local_position(moon, DVec3::new(0.0, 0.0, 3.85e8)).unwrap();
    let caches = h.cache_state(moon).unwrap();
    println!("moon caches after edit: {caches:?}");
    assert!(!caches.contains(Caches::WORLD_MATRIX), "edit drops the world cache");
    assert!(
        h.cache_state(root).unwrap().contains(Caches::WORLD_MATRIX),
        "root world survives a local edit"
    );
}
