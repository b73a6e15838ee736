//! Coordinate triple

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Render a real the way it goes on the wire.
///
/// Plain positional decimal with a `.` separator, shortest digits that read
/// back to the same value, and always a fractional part (`-2.0`, not `-2`).
/// Non-finite values come out as `NaN`, `inf` and `-inf`.
pub fn format_real(value: f64) -> String {
    let mut text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        text.push_str(".0");
    }
    text
}

/// A position or offset in the world
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// One step along +y
    pub const fn up() -> Self {
        Self::new(0.0, 1.0, 0.0)
    }

    /// One step along -y
    pub const fn down() -> Self {
        Self::new(0.0, -1.0, 0.0)
    }

    /// One step along +x
    pub const fn east() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    /// One step along -x
    pub const fn west() -> Self {
        Self::new(-1.0, 0.0, 0.0)
    }

    /// One step along +z
    pub const fn south() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    /// One step along -z
    pub const fn north() -> Self {
        Self::new(0.0, 0.0, -1.0)
    }

    /// Integer tile containing this position
    ///
    /// Floors each component, so `-0.5` lands on tile `-1`.
    pub fn floor(self) -> [i64; 3] {
        [
            self.x.floor() as i64,
            self.y.floor() as i64,
            self.z.floor() as i64,
        ]
    }

    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{}",
            format_real(self.x),
            format_real(self.y),
            format_real(self.z)
        )
    }
}

impl From<(f64, f64, f64)> for Vec3 {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(x, y, z)
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<(i32, i32, i32)> for Vec3 {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x.into(), y.into(), z.into())
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Vec3) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, rhs: Vec3) {
        *self = *self - rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elementwise_arithmetic() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(0.5, -1.0, 4.0);
        assert_eq!(a + b, Vec3::new(1.5, 1.0, 7.0));
        assert_eq!(a - b, Vec3::new(0.5, 3.0, -1.0));
        assert_eq!(-a, Vec3::new(-1.0, -2.0, -3.0));

        let mut c = a;
        c += Vec3::up();
        c -= Vec3::east();
        assert_eq!(c, Vec3::new(0.0, 3.0, 3.0));
    }

    #[test]
    fn test_unit_offsets() {
        let units = [
            Vec3::up(),
            Vec3::down(),
            Vec3::east(),
            Vec3::west(),
            Vec3::south(),
            Vec3::north(),
        ];
        for unit in units {
            assert_eq!(unit.length(), 1.0);
        }
        assert_eq!(Vec3::up() + Vec3::down(), Vec3::ZERO);
        assert_eq!(Vec3::north(), -Vec3::south());
    }

    #[test]
    fn test_display() {
        assert_eq!(Vec3::new(1.5, -2.0, 3.25).to_string(), "1.5,-2.0,3.25");
        assert_eq!(Vec3::new(0.0, 64.0, -0.1).to_string(), "0.0,64.0,-0.1");
    }

    #[test]
    fn test_format_real() {
        assert_eq!(format_real(0.1), "0.1");
        assert_eq!(format_real(-2.0), "-2.0");
        assert_eq!(format_real(1e20), "100000000000000000000.0");
        assert_eq!(format_real(f64::NAN), "NaN");
        assert_eq!(format_real(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn test_floor_rounds_toward_negative() {
        assert_eq!(Vec3::new(1.9, -0.5, -3.0).floor(), [1, -1, -3]);
    }
}
