//! Wrapped-angle helpers shared by the controller and the camera rig.

use std::f32::consts::{PI, TAU};

/// Wrap an angle to `[0, 2π)`.
#[must_use]
pub fn wrap_angle(a: f32) -> f32 {
    let x = a.rem_euclid(TAU);
    if x.is_finite() { x } else { 0.0 }
}

/// Signed shortest delta from `a` to `b`, always in `(-π, π]`.
#[must_use]
pub fn shortest_delta(a: f32, b: f32) -> f32 {
    let mut d = (b - a).rem_euclid(TAU);
    if d > PI {
        d -= TAU;
    }
    d
}

/// Interpolate from `a` toward `b` along the shorter angular path.
/// `t` is clamped to `[0, 1]`; the result is wrapped to `[0, 2π)`.
#[must_use]
pub fn lerp_angle(a: f32, b: f32, t: f32) -> f32 {
    wrap_angle(a + shortest_delta(a, b) * t.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_lands_in_range() {
        for a in [-7.0, -0.1, 0.0, 1.0, TAU, 10.0 * TAU + 0.5] {
            let w = wrap_angle(a);
            assert!((0.0..TAU).contains(&w), "wrap({a}) = {w}");
        }
    }

    #[test]
    fn shortest_delta_never_takes_the_long_way() {
        // across the 0/2π seam in both directions
        assert!((shortest_delta(0.1, TAU - 0.1) + 0.2).abs() < 1e-5);
        assert!((shortest_delta(TAU - 0.1, 0.1) - 0.2).abs() < 1e-5);
        // the delta is always in (-π, π]
        let mut a = 0.0f32;
        while a < TAU {
            let mut b = 0.0f32;
            while b < TAU {
                let d = shortest_delta(a, b);
                assert!(d > -PI - 1e-6 && d <= PI + 1e-6, "delta({a},{b}) = {d}");
                b += 0.37;
            }
            a += 0.41;
        }
    }

    #[test]
    fn lerp_crosses_the_seam() {
        // from 0.1 rad toward 2π-0.1 rad: halfway is at the seam, not at π
        let mid = lerp_angle(0.1, TAU - 0.1, 0.5);
        assert!(mid < 0.01 || mid > TAU - 0.01, "mid = {mid}");
    }
}
