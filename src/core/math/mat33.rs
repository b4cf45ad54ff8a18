use super::vec2::Vec2;
use super::vec3::Vec3;

/// 3x3 matrix stored as three columns
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Mat33 {
    pub col1: Vec3,
    pub col2: Vec3,
    pub col3: Vec3,
}

impl Mat33 {
    pub const ZERO: Mat33 = Mat33 {
        col1: Vec3::ZERO,
        col2: Vec3::ZERO,
        col3: Vec3::ZERO,
    };

    pub const fn new(col1: Vec3, col2: Vec3, col3: Vec3) -> Self {
        Self { col1, col2, col3 }
    }

    pub fn set_zero(&mut self) {
        *self = Self::ZERO;
    }

    /// `M * v`
    pub fn mul_v(&self, v: Vec3) -> Vec3 {
        self.col1 * v.x + self.col2 * v.y + self.col3 * v.z
    }

    /// Solve `A * x = b` with Cramer's rule. Singular systems yield zero.
    pub fn solve33(&self, b: Vec3) -> Vec3 {
        let mut det = self.col1.dot(self.col2.cross(self.col3));
        if det != 0.0 {
            det = 1.0 / det;
        }
        Vec3::new(
            det * b.dot(self.col2.cross(self.col3)),
            det * self.col1.dot(b.cross(self.col3)),
            det * self.col1.dot(self.col2.cross(b)),
        )
    }

    /// Solve the upper-left 2x2 block only. Singular systems yield zero.
    pub fn solve22(&self, b: Vec2) -> Vec2 {
        let (a11, a12) = (self.col1.x, self.col2.x);
        let (a21, a22) = (self.col1.y, self.col2.y);
        let mut det = a11 * a22 - a12 * a21;
        if det != 0.0 {
            det = 1.0 / det;
        }
        Vec2::new(det * (a22 * b.x - a12 * b.y), det * (a11 * b.y - a21 * b.x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Mat33 {
        Mat33::new(
            Vec3::new(4.0, 1.0, -2.0),
            Vec3::new(1.0, 3.0, 0.5),
            Vec3::new(-2.0, 0.5, 5.0),
        )
    }

    #[test]
    fn solve33_satisfies_the_system() {
        let m = sample();
        let b = Vec3::new(1.0, -2.0, 3.5);
        let x = m.solve33(b);
        let back = m.mul_v(x);
        assert!((back - b).dot(back - b) < 1e-8);
    }

    #[test]
    fn solve22_uses_upper_left_block() {
        let m = sample();
        let b = Vec2::new(2.0, -1.0);
        let x = m.solve22(b);
        let bx = m.col1.x * x.x + m.col2.x * x.y;
        let by = m.col1.y * x.x + m.col2.y * x.y;
        assert!((bx - b.x).abs() < 1e-5);
        assert!((by - b.y).abs() < 1e-5);
    }

    #[test]
    fn singular_system_yields_zero() {
        let col = Vec3::new(1.0, 2.0, 3.0);
        let m = Mat33::new(col, col, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(m.solve33(Vec3::new(1.0, 1.0, 1.0)), Vec3::ZERO);
        assert_eq!(m.solve22(Vec2::new(1.0, 1.0)), Vec2::ZERO);
    }
}
