use super::vec2::Vec2;

/// 2x2 matrix stored as two columns
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat22 {
    pub col1: Vec2,
    pub col2: Vec2,
}

impl Default for Mat22 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat22 {
    pub const IDENTITY: Mat22 = Mat22 {
        col1: Vec2::new(1.0, 0.0),
        col2: Vec2::new(0.0, 1.0),
    };

    pub const ZERO: Mat22 = Mat22 {
        col1: Vec2::ZERO,
        col2: Vec2::ZERO,
    };

    #[inline]
    pub const fn new(col1: Vec2, col2: Vec2) -> Self {
        Self { col1, col2 }
    }

    /// Rotation matrix `[[cos, -sin], [sin, cos]]`
    pub fn from_angle(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            col1: Vec2::new(c, s),
            col2: Vec2::new(-s, c),
        }
    }

    pub fn set_angle(&mut self, angle: f32) {
        *self = Self::from_angle(angle);
    }

    pub fn set_identity(&mut self) {
        *self = Self::IDENTITY;
    }

    pub fn set_zero(&mut self) {
        *self = Self::ZERO;
    }

    /// Rotation angle encoded in the first column
    pub fn angle(&self) -> f32 {
        self.col1.y.atan2(self.col1.x)
    }

    #[inline]
    pub fn determinant(&self) -> f32 {
        self.col1.x * self.col2.y - self.col2.x * self.col1.y
    }

    /// Matrix inverse. A singular matrix yields the zero matrix.
    pub fn inverse(&self) -> Mat22 {
        let (a, b) = (self.col1.x, self.col2.x);
        let (c, d) = (self.col1.y, self.col2.y);
        let mut det = a * d - b * c;
        if det != 0.0 {
            det = 1.0 / det;
        }
        Mat22 {
            col1: Vec2::new(det * d, -det * c),
            col2: Vec2::new(-det * b, det * a),
        }
    }

    /// Solve `A * x = b` without forming the inverse. Singular systems yield zero.
    pub fn solve(&self, b: Vec2) -> Vec2 {
        let (a11, a12) = (self.col1.x, self.col2.x);
        let (a21, a22) = (self.col1.y, self.col2.y);
        let mut det = a11 * a22 - a12 * a21;
        if det != 0.0 {
            det = 1.0 / det;
        }
        Vec2::new(det * (a22 * b.x - a12 * b.y), det * (a11 * b.y - a21 * b.x))
    }

    /// `M * v`
    #[inline]
    pub fn mul_v(&self, v: Vec2) -> Vec2 {
        Vec2::new(
            self.col1.x * v.x + self.col2.x * v.y,
            self.col1.y * v.x + self.col2.y * v.y,
        )
    }

    /// `M^T * v`
    #[inline]
    pub fn mul_tv(&self, v: Vec2) -> Vec2 {
        Vec2::new(v.dot(self.col1), v.dot(self.col2))
    }

    /// `A * B`
    pub fn mul_m(&self, b: &Mat22) -> Mat22 {
        Mat22::new(self.mul_v(b.col1), self.mul_v(b.col2))
    }

    /// `A^T * B`
    pub fn mul_tm(&self, b: &Mat22) -> Mat22 {
        Mat22::new(
            Vec2::new(self.col1.dot(b.col1), self.col2.dot(b.col1)),
            Vec2::new(self.col1.dot(b.col2), self.col2.dot(b.col2)),
        )
    }

    pub fn transpose(&self) -> Mat22 {
        Mat22::new(
            Vec2::new(self.col1.x, self.col2.x),
            Vec2::new(self.col1.y, self.col2.y),
        )
    }

    pub fn abs(&self) -> Mat22 {
        Mat22::new(self.col1.abs(), self.col2.abs())
    }
}

impl std::ops::Add for Mat22 {
    type Output = Mat22;
    fn add(self, rhs: Mat22) -> Mat22 {
        Mat22::new(self.col1 + rhs.col1, self.col2 + rhs.col2)
    }
}

impl std::ops::Mul<Vec2> for Mat22 {
    type Output = Vec2;
    fn mul(self, rhs: Vec2) -> Vec2 {
        self.mul_v(rhs)
    }
}
