//! Fixed-size 3D point lattice with linear index mapping.
//!
//! The flattening is `x + dims.x * (y + z * dims.y)` — row-major over X, then
//! Y, then Z — and is a bijection with `0..num_points`. Everything that layers
//! on top (voxel state, world positions) leans on that bijection rather than
//! hashing coordinates.

use crate::error::GridError;
use crate::point::Point;
use glam::Vec3;

/// A lattice of `dims.x * dims.y * dims.z` integer points plus a world-space
/// cell scale.
#[derive(Debug, Clone)]
pub struct IndexedGrid {
    dimensions: Point,
    scale: Vec3,
    points: Vec<Point>,
}

impl IndexedGrid {
    /// Create a grid. Dimension components below 1 clamp to 1 (logged); the
    /// point array is filled so `points[i] == point_from_linear_index(i)`.
    pub fn new(dimensions: Point, scale: Vec3) -> Self {
        let dimensions = Self::sanitize_dimensions(dimensions);
        let mut grid = Self {
            dimensions,
            scale,
            points: Vec::new(),
        };
        grid.make_grid();
        grid
    }

    fn sanitize_dimensions(dimensions: Point) -> Point {
        let clamped = dimensions.clamp(Point::splat(1), Point::splat(i32::MAX));
        if clamped != dimensions {
            log::warn!(
                "grid dimensions {:?} below minimum, clamped to {:?}",
                dimensions,
                clamped
            );
        }
        clamped
    }

    /// (Re)allocate the backing array and assign every point its lattice
    /// coordinate. Destroys prior per-point payload.
    fn make_grid(&mut self) {
        let n = self.num_points();
        self.points.clear();
        self.points.reserve_exact(n);
        for i in 0..n {
            self.points.push(self.point_from_linear_index(i));
        }
    }

    pub fn dimensions(&self) -> Point {
        self.dimensions
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn num_points(&self) -> usize {
        (self.dimensions.x as usize) * (self.dimensions.y as usize) * (self.dimensions.z as usize)
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Pure scale mutation; the point array is untouched.
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }

    /// Change dimensions and rebuild. Rare and explicit; all prior per-point
    /// payload is destroyed.
    pub fn set_dimensions(&mut self, dimensions: Point) {
        self.dimensions = Self::sanitize_dimensions(dimensions);
        self.make_grid();
    }

    /// Row-major flattening of an in-range coordinate. The hot path does not
    /// bounds-check; out-of-range input is a caller bug (see
    /// [`try_linear_index`](Self::try_linear_index) for the checked variant).
    #[inline]
    pub fn linear_index(&self, x: i32, y: i32, z: i32) -> usize {
        debug_assert!(self.in_bounds(Point::new(x, y, z)));
        (x + self.dimensions.x * (y + z * self.dimensions.y)) as usize
    }

    /// Exact inverse of [`linear_index`](Self::linear_index) for every index
    /// in `0..num_points`.
    #[inline]
    pub fn point_from_linear_index(&self, index: usize) -> Point {
        let mut index = index as i32;
        let layer = self.dimensions.x * self.dimensions.y;
        let z = index / layer;
        index -= z * layer;
        let y = index / self.dimensions.x;
        let x = index % self.dimensions.x;
        Point::new(x, y, z)
    }

    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0
            && p.y >= 0
            && p.z >= 0
            && p.x < self.dimensions.x
            && p.y < self.dimensions.y
            && p.z < self.dimensions.z
    }

    /// Checked flattening; fails loudly on out-of-range input.
    pub fn try_linear_index(&self, p: Point) -> Result<usize, GridError> {
        if self.in_bounds(p) {
            Ok(self.linear_index(p.x, p.y, p.z))
        } else {
            Err(GridError::OutOfBounds {
                point: p,
                dimensions: self.dimensions,
            })
        }
    }

    /// Checked inverse lookup.
    pub fn try_point_at(&self, index: usize) -> Result<Point, GridError> {
        if index < self.num_points() {
            Ok(self.points[index])
        } else {
            Err(GridError::Lookup {
                index,
                num_points: self.num_points(),
            })
        }
    }

    /// The stored point at a linear index.
    #[inline]
    pub fn point_at(&self, index: usize) -> Point {
        self.points[index]
    }

    /// World-space position of a point: component-wise product with the scale.
    pub fn world_position(&self, p: Point) -> Vec3 {
        p.to_world(self.scale)
    }

    /// World-space position of the point stored at `index`.
    pub fn world_position_at(&self, index: usize) -> Vec3 {
        self.points[index].to_world(self.scale)
    }
}
