//! Inclusive integer bounds over the X/Z ground plane.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// An inclusive min/max integer box over X and Z.
///
/// The Y channel of [`size`](Bounds2DInt::size) carries the Z extent; terrain
/// code treats it as the raster depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bounds2DInt {
    pub min_x: i32,
    pub min_z: i32,
    pub max_x: i32,
    pub max_z: i32,
}

impl Bounds2DInt {
    pub const fn new(min_x: i32, min_z: i32, max_x: i32, max_z: i32) -> Self {
        Self {
            min_x,
            min_z,
            max_x,
            max_z,
        }
    }

    pub fn min(&self) -> IVec2 {
        IVec2::new(self.min_x, self.min_z)
    }

    pub fn max(&self) -> IVec2 {
        IVec2::new(self.max_x, self.max_z)
    }

    pub fn size(&self) -> IVec2 {
        self.max() - self.min()
    }

    /// Box center, truncated toward zero like the integer midpoint it is.
    pub fn center(&self) -> IVec2 {
        IVec2::new((self.max_x + self.min_x) / 2, (self.max_z + self.min_z) / 2)
    }

    /// Inclusive on all four edges.
    pub fn contains(&self, x: f32, z: f32) -> bool {
        x >= self.min_x as f32 && x <= self.max_x as f32 && z >= self.min_z as f32 && z <= self.max_z as f32
    }
}
