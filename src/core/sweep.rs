//! Sweep - motion of a body's center of mass over one step window
//!
//! The window runs from `t0` to 1. Positions and angles are blended
//! linearly between the window-start pose `(c0, a0)` and the end pose
//! `(c, a)`. Time of impact searches narrow the window with `advance`
//! without losing the end pose.

use crate::core::math::{Mat22, Vec2, PI};
use crate::core::transform::Transform;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Sweep {
    /// Center of mass in body-local coordinates
    pub local_center: Vec2,
    /// World center of mass at window start
    pub c0: Vec2,
    /// World center of mass at window end
    pub c: Vec2,
    /// World angle at window start
    pub a0: f32,
    /// World angle at window end
    pub a: f32,
    /// Window start in [0, 1]
    pub t0: f32,
}

impl Sweep {
    /// Collapse the window onto a single pose at `t0 = 0`.
    pub fn reset(&mut self, center: Vec2, angle: f32) {
        self.c0 = center;
        self.c = center;
        self.a0 = angle;
        self.a = angle;
        self.t0 = 0.0;
    }

    #[inline]
    fn window_is_open(&self) -> bool {
        1.0 - self.t0 > f32::MIN_POSITIVE
    }

    /// Body-origin transform at blend factor `alpha` (0 = start pose, 1 = end pose).
    pub fn interpolate(&self, alpha: f32) -> Transform {
        let center = self.c0.lerp(self.c, alpha);
        let angle = (1.0 - alpha) * self.a0 + alpha * self.a;
        self.origin_transform(center, angle)
    }

    /// Body-origin transform at window time `t`.
    /// A collapsed window returns the end pose.
    pub fn transform_at(&self, t: f32) -> Transform {
        if self.window_is_open() {
            let alpha = (t - self.t0) / (1.0 - self.t0);
            self.interpolate(alpha)
        } else {
            self.origin_transform(self.c, self.a)
        }
    }

    /// Center of mass at window time `t`.
    /// A collapsed window returns the end center.
    pub fn center_at(&self, t: f32) -> Vec2 {
        if self.window_is_open() {
            let alpha = (t - self.t0) / (1.0 - self.t0);
            self.c0.lerp(self.c, alpha)
        } else {
            self.c
        }
    }

    /// Move the window start forward to `t`, keeping the end pose.
    /// No-op when `t <= t0` or the window is already collapsed.
    pub fn advance(&mut self, t: f32) {
        if self.t0 < t && self.window_is_open() {
            let alpha = (t - self.t0) / (1.0 - self.t0);
            self.c0 = self.c0.lerp(self.c, alpha);
            self.a0 = (1.0 - alpha) * self.a0 + alpha * self.a;
            self.t0 = t;
        }
    }

    /// Wrap `a0` into [0, 2π) and shift `a` by the same amount.
    pub fn normalize(&mut self) {
        let two_pi = 2.0 * PI;
        let d = two_pi * (self.a0 / two_pi).floor();
        self.a0 -= d;
        self.a -= d;
    }

    /// Shift a center-of-mass pose to the body origin.
    fn origin_transform(&self, center: Vec2, angle: f32) -> Transform {
        let r = Mat22::from_angle(angle);
        Transform::new(center - r.mul_v(self.local_center), r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn sample() -> Sweep {
        Sweep {
            local_center: Vec2::new(0.5, -0.25),
            c0: Vec2::new(1.0, 2.0),
            c: Vec2::new(4.0, -1.0),
            a0: 0.2,
            a: 1.4,
            t0: 0.0,
        }
    }

    fn assert_xf_close(a: &Transform, b: &Transform) {
        assert!((a.position - b.position).length() < EPS, "{:?} vs {:?}", a, b);
        assert!((a.angle() - b.angle()).abs() < EPS, "{:?} vs {:?}", a, b);
    }

    #[test]
    fn endpoints_reproduce_window_poses() {
        let sweep = sample();
        let start = sweep.interpolate(0.0);
        let end = sweep.interpolate(1.0);

        let r0 = Mat22::from_angle(sweep.a0);
        let r1 = Mat22::from_angle(sweep.a);
        assert_eq!(start.position, sweep.c0 - r0.mul_v(sweep.local_center));
        assert_eq!(end.position, sweep.c - r1.mul_v(sweep.local_center));
        assert!((start.angle() - sweep.a0).abs() < EPS);
        assert!((end.angle() - sweep.a).abs() < EPS);
    }

    #[test]
    fn origin_shift_puts_local_center_on_the_blended_center() {
        let sweep = sample();
        let xf = sweep.interpolate(0.3);
        let center = xf.mul(sweep.local_center);
        assert!((center - sweep.c0.lerp(sweep.c, 0.3)).length() < EPS);
    }

    #[test]
    fn advance_keeps_end_pose_and_rebases_start() {
        let mut sweep = sample();
        sweep.t0 = 0.2;
        let t = 0.6;
        let alpha = (t - sweep.t0) / (1.0 - sweep.t0);

        let end_before = sweep.interpolate(1.0);
        let mid_before = sweep.interpolate(alpha);

        sweep.advance(t);

        assert_eq!(sweep.t0, t);
        assert_xf_close(&sweep.interpolate(1.0), &end_before);
        assert_xf_close(&sweep.interpolate(0.0), &mid_before);
    }

    #[test]
    fn advance_backwards_is_noop() {
        let mut sweep = sample();
        sweep.t0 = 0.5;
        let before = sweep;
        sweep.advance(0.5);
        assert_eq!(sweep, before);
        sweep.advance(0.1);
        assert_eq!(sweep, before);
    }

    #[test]
    fn transform_at_matches_absolute_time() {
        let mut sweep = sample();
        let at_07 = sweep.transform_at(0.7);
        sweep.advance(0.4);
        assert_xf_close(&sweep.transform_at(0.7), &at_07);
        assert!((sweep.center_at(0.4) - sweep.c0).length() < EPS);
    }

    #[test]
    fn collapsed_window_returns_end_state() {
        let mut sweep = sample();
        sweep.t0 = 1.0;
        let end = sweep.interpolate(1.0);
        assert_xf_close(&sweep.transform_at(0.3), &end);
        assert_eq!(sweep.center_at(0.3), sweep.c);

        let before = sweep;
        sweep.advance(1.5);
        assert_eq!(sweep, before);
    }

    #[test]
    fn normalize_wraps_both_angles_together() {
        let mut sweep = sample();
        sweep.a0 = 7.0;
        sweep.a = 7.5;
        sweep.normalize();
        assert!(sweep.a0 >= 0.0 && sweep.a0 < 2.0 * PI);
        assert!((sweep.a - sweep.a0 - 0.5).abs() < EPS);
    }
}
