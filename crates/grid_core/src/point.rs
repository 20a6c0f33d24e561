//! Integer lattice coordinates.
//!
//! A [`Point`] is a grid address, never a continuous position; multiply by the
//! owning grid's scale to get into world space.

use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// An immutable integer triple addressing one lattice cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0, z: 0 };

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub const fn splat(v: i32) -> Self {
        Self { x: v, y: v, z: v }
    }

    /// Clamp each component into the inclusive `[min, max]` box.
    pub fn clamp(self, min: Point, max: Point) -> Self {
        Self {
            x: self.x.clamp(min.x, max.x),
            y: self.y.clamp(min.y, max.y),
            z: self.z.clamp(min.z, max.z),
        }
    }

    /// Component-wise product with a world-space scale.
    pub fn to_world(self, scale: Vec3) -> Vec3 {
        Vec3::new(
            self.x as f32 * scale.x,
            self.y as f32 * scale.y,
            self.z as f32 * scale.z,
        )
    }

    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }
}

impl From<IVec3> for Point {
    fn from(v: IVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Point> for IVec3 {
    fn from(p: Point) -> Self {
        IVec3::new(p.x, p.y, p.z)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<i32> for Point {
    type Output = Point;

    fn mul(self, rhs: i32) -> Point {
        Point::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<i32> for Point {
    type Output = Point;

    /// Scalar division. Dividing by zero degrades to [`Point::ZERO`] with a
    /// logged warning instead of panicking; callers on recovery paths rely on
    /// that default.
    fn div(self, rhs: i32) -> Point {
        if rhs == 0 {
            log::warn!("point {:?} divided by zero, returning zero point", self);
            return Point::ZERO;
        }
        Point::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}
