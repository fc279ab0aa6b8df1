use std::ops::{Add, Div, Mul, Neg, Sub};

use serde_tuple::{Deserialize_tuple, Serialize_tuple};

#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize_tuple, Deserialize_tuple)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

pub type Vector = Point;

impl Point {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f64 {
        self.squared_length().sqrt()
    }

    pub fn squared_length(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: Point) -> f64 {
        (other - *self).length()
    }

    /// The point halfway between `self` and `other`.
    pub fn midpoint(&self, other: Point) -> Point {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn dot(&self, other: Vector) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// The z component of the 3D cross product. Positive if `other` is counter-clockwise from
    /// `self` in a y-up system (clockwise on screen, where y points down).
    pub fn cross(&self, other: Vector) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// The signed angle in degrees needed to rotate `self` onto `other`.
    ///
    /// Range is (-180, 180]. Uses `atan2(cross, dot)` so the direction of the rotation survives.
    /// Zero length vectors produce 0.
    pub fn signed_angle_to(&self, other: Vector) -> f64 {
        let angle = self.cross(other).atan2(self.dot(other)).to_degrees();
        if angle <= -180.0 { angle + 360.0 } else { angle }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Point {
    type Output = Point;

    fn div(self, rhs: f64) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for (f64, f64) {
    fn from(value: Point) -> Self {
        (value.x, value.y)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn distance_and_midpoint() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance_to(b), 5.0);
        assert_eq!(b.distance_to(a), 5.0);
        assert_eq!(a.midpoint(b), Point::new(1.5, 2.0));
    }

    #[test]
    fn signed_angle_keeps_direction() {
        let x = Vector::new(10.0, 0.0);
        let y = Vector::new(0.0, 10.0);
        assert_relative_eq!(x.signed_angle_to(y), 90.0);
        assert_relative_eq!(y.signed_angle_to(x), -90.0);
        assert_relative_eq!(x.signed_angle_to(Vector::new(1.0, 1.0)), 45.0);
        assert_eq!(x.signed_angle_to(x * 2.0), 0.0);
    }

    #[test]
    fn opposite_vectors_are_half_a_turn() {
        let x = Vector::new(1.0, 0.0);
        assert_relative_eq!(x.signed_angle_to(-x), 180.0);
        assert_relative_eq!((-x).signed_angle_to(x), 180.0);
    }

    #[test]
    fn zero_vector_has_no_angle() {
        assert_eq!(Vector::ZERO.signed_angle_to(Vector::new(1.0, 0.0)), 0.0);
    }
}
