// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clipped bounds.
//!
//! Project a box that straddles the camera through a perspective matrix, with and
//! without clipping against the near plane.
//!
//! Run:
//! - `cargo run -p orrery_demos --example clipped_bounds`

use glam::{DMat4, DVec3};
use orrery_geom::{Bounds, Plane};

fn main() {
    tracing_subscriber::fmt().init();

    // Camera at the origin looking down -Z (right-handed view space).
    let projection = DMat4::perspective_rh(60_f64.to_radians(), 1.0, 0.1, 1000.0);
    let near = Plane::new(-DVec3::Z, -0.1);

    // A box from z = -10 to z = +2 passes behind the camera.
    let straddling = Bounds::from_min_max(DVec3::new(-1.0, -1.0, -10.0), DVec3::new(1.0, 1.0, 2.0));
    println!("input:     {straddling}");
    println!("unclipped: {}", straddling.transform(&projection));
    println!("clipped:   {}", straddling.transform_clipped(&projection, &near));

    let behind = Bounds::from_center_extents(DVec3::new(0.0, 0.0, 5.0), DVec3::ONE);
    let clipped = behind.transform_clipped(&projection, &near);
    println!("behind:    {clipped}");
    assert!(clipped.is_empty(), "a box fully behind the camera projects to nothing");
}
