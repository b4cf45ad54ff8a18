use crate::core::math::Vec2;

/// One velocity-constraint row over two bodies: `J * [v1, w1, v2, w2]`
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Jacobian {
    pub linear_a: Vec2,
    pub angular_a: f32,
    pub linear_b: Vec2,
    pub angular_b: f32,
}

impl Jacobian {
    pub fn set_zero(&mut self) {
        *self = Self::default();
    }

    pub fn set(&mut self, linear_a: Vec2, angular_a: f32, linear_b: Vec2, angular_b: f32) {
        self.linear_a = linear_a;
        self.angular_a = angular_a;
        self.linear_b = linear_b;
        self.angular_b = angular_b;
    }

    #[inline]
    pub fn compute(&self, v1: Vec2, w1: f32, v2: Vec2, w2: f32) -> f32 {
        self.linear_a.dot(v1) + self.angular_a * w1 + self.linear_b.dot(v2) + self.angular_b * w2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compute_is_the_weighted_sum() {
        let mut j = Jacobian::default();
        j.set(Vec2::new(1.0, 0.0), 2.0, Vec2::new(0.0, -1.0), 0.5);
        let value = j.compute(Vec2::new(3.0, 9.0), 1.0, Vec2::new(7.0, 4.0), 2.0);
        assert_eq!(value, 3.0 + 2.0 - 4.0 + 1.0);

        j.set_zero();
        assert_eq!(j.compute(Vec2::new(3.0, 9.0), 1.0, Vec2::new(7.0, 4.0), 2.0), 0.0);
    }
}
