// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for TRS composition and decomposition.

use approx::relative_eq;
use glam::{DMat4, DQuat, DVec3, EulerRot};
use orrery_geom::consts::DEFAULT_TOLERANCE as EPS;
use orrery_geom::{Plane, compose, decompose};
use proptest::prelude::*;

fn vec3(range: core::ops::Range<f64>) -> impl Strategy<Value = DVec3> {
    (range.clone(), range.clone(), range).prop_map(|(x, y, z)| DVec3::new(x, y, z))
}

fn rotation() -> impl Strategy<Value = DQuat> {
    let angle = -core::f64::consts::PI..core::f64::consts::PI;
    (angle.clone(), angle.clone(), angle)
        .prop_map(|(a, b, c)| DQuat::from_euler(EulerRot::YXZ, a, b, c))
}

fn vec_close(a: DVec3, b: DVec3) -> bool {
    a.to_array()
        .iter()
        .zip(b.to_array())
        .all(|(x, y)| relative_eq!(*x, y, epsilon = EPS, max_relative = EPS))
}

fn mat_close(a: &DMat4, b: &DMat4) -> bool {
    a.to_cols_array()
        .iter()
        .zip(b.to_cols_array())
        .all(|(x, y)| relative_eq!(*x, y, epsilon = EPS, max_relative = EPS))
}

proptest! {
    #[test]
    fn decompose_recovers_parts(
        t in vec3(-1.0e12..1.0e12),
        r in rotation(),
        s in vec3(0.01..100.0),
    ) {
        let trs = decompose(&compose(t, r, s));
        prop_assert_eq!(trs.translation, t);
        prop_assert!(vec_close(trs.scale, s), "scale {} vs {}", trs.scale, s);
        // q and -q are the same rotation.
        prop_assert!(
            relative_eq!(trs.rotation.dot(r).abs(), 1.0, epsilon = EPS),
            "rotation {:?} vs {:?}", trs.rotation, r
        );
    }

    #[test]
    fn recompose_reproduces_matrix_with_one_mirrored_axis(
        t in vec3(-1.0e6..1.0e6),
        r in rotation(),
        s in vec3(0.01..100.0),
        mirrored in 0_usize..4,
    ) {
        let mut s = s;
        if mirrored < 3 {
            s[mirrored] = -s[mirrored];
        }
        let m = compose(t, r, s);
        let back = decompose(&m).to_matrix();
        prop_assert!(mat_close(&m, &back), "{m} vs {back}");
    }

    #[test]
    fn side_and_same_side_agree(
        normal in vec3(-1.0..1.0),
        distance in -10.0..10.0_f64,
        a in vec3(-20.0..20.0),
        b in vec3(-20.0..20.0),
    ) {
        let plane = Plane::new(normal, distance);
        prop_assert_eq!(plane.same_side(a, b), plane.side(a) == plane.side(b));
    }
}
