//! Occupancy overlay over [`IndexedGrid`].
//!
//! Each lattice point carries one [`VoxelState`], stored in a flat array
//! parallel to the point array and keyed by the linear index. State is seeded
//! by height when the grid is built and mutated only through
//! [`set_state`](PlacementGrid::set_state), the build tool's single write path.
//!
//! All calls are expected on one logical thread; wrap the grid in a lock if a
//! concurrent caller is ever introduced.

use crate::error::GridError;
use crate::indexed_grid::IndexedGrid;
use crate::point::Point;
use glam::Vec3;

/// Occupancy classification of one voxel. The discriminants are bit flags so
/// `FREE` can act as a mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum VoxelState {
    /// No state known; the degraded result of a failed lookup.
    #[default]
    None = 0b000,
    /// Solid ground or a placed object.
    Occupied = 0b001,
    /// Walkable ground surface, open for placement.
    Unoccupied = 0b010,
    /// Open air above the surface.
    Air = 0b100,
}

impl VoxelState {
    /// Mask of states a placement query treats as free.
    pub const FREE: u8 = VoxelState::Unoccupied as u8 | VoxelState::Air as u8;

    /// Membership in the free mask.
    pub fn is_free(self) -> bool {
        (self as u8) & Self::FREE != 0
    }
}

/// Y layer at or below which freshly seeded voxels count as ground.
const GROUND_HEIGHT: i32 = 2;

/// An [`IndexedGrid`] with a per-point [`VoxelState`] overlay.
#[derive(Debug, Clone)]
pub struct PlacementGrid {
    grid: IndexedGrid,
    states: Vec<VoxelState>,
}

impl PlacementGrid {
    /// Build a grid with a uniform cell scale and seed every point's state by
    /// height: below [`GROUND_HEIGHT`] is occupied, at it unoccupied, above it
    /// air.
    pub fn new(dimensions: Point, uniform_scale: f32) -> Self {
        let grid = IndexedGrid::new(dimensions, Vec3::splat(uniform_scale));
        let states = Self::seed_states(&grid);
        Self { grid, states }
    }

    fn seed_states(grid: &IndexedGrid) -> Vec<VoxelState> {
        grid.points()
            .iter()
            .map(|p| {
                if p.y < GROUND_HEIGHT {
                    VoxelState::Occupied
                } else if p.y == GROUND_HEIGHT {
                    VoxelState::Unoccupied
                } else {
                    VoxelState::Air
                }
            })
            .collect()
    }

    pub fn grid(&self) -> &IndexedGrid {
        &self.grid
    }

    pub fn dimensions(&self) -> Point {
        self.grid.dimensions()
    }

    pub fn num_points(&self) -> usize {
        self.grid.num_points()
    }

    /// Rebuild with new dimensions and re-seed every state. Mutations made
    /// since the last build are lost.
    pub fn set_dimensions(&mut self, dimensions: Point) {
        self.grid.set_dimensions(dimensions);
        self.states = Self::seed_states(&self.grid);
    }

    /// Checked state lookup; fails loudly for points the grid never seeded.
    pub fn try_state(&self, p: Point) -> Result<VoxelState, GridError> {
        if self.grid.in_bounds(p) {
            Ok(self.states[self.grid.linear_index(p.x, p.y, p.z)])
        } else {
            Err(GridError::LookupPoint {
                point: p,
                dimensions: self.grid.dimensions(),
            })
        }
    }

    /// State lookup with the lookup failure absorbed: unseeded points log an
    /// error and read as [`VoxelState::None`]. Callers must tolerate `None`.
    pub fn state(&self, p: Point) -> VoxelState {
        match self.try_state(p) {
            Ok(state) => state,
            Err(e) => {
                log::error!("invalid index; no state provided when asked: {e}");
                VoxelState::None
            }
        }
    }

    /// State lookup by linear index: the stored point's world position is
    /// divided by the uniform scale to recover the lattice point, then looked
    /// up. A zero scale degrades to the zero point (see [`Point`] division)
    /// rather than panicking.
    pub fn state_at_index(&self, index: usize) -> VoxelState {
        let world = match self.grid.try_point_at(index) {
            Ok(p) => self.grid.world_position(p),
            Err(e) => {
                log::error!("invalid index; no state provided when asked: {e}");
                return VoxelState::None;
            }
        };
        let p = Point::new(world.x as i32, world.y as i32, world.z as i32)
            / self.grid.scale().x as i32;
        self.state(p)
    }

    pub fn state_at(&self, x: i32, y: i32, z: i32) -> VoxelState {
        self.state(Point::new(x, y, z))
    }

    /// Unconditional state overwrite; any state may replace any other. The
    /// overlay is a UI-driven record of occupancy, not a guarded state
    /// machine. Out-of-range writes are absorbed with a logged error.
    pub fn set_state(&mut self, x: i32, y: i32, z: i32, state: VoxelState) {
        let p = Point::new(x, y, z);
        match self.grid.try_linear_index(p) {
            Ok(i) => self.states[i] = state,
            Err(e) => log::error!("set_state ignored: {e}"),
        }
    }

    /// Row-major flattening, exposed for collaborators that cache indices.
    pub fn linear_index_of(&self, x: i32, y: i32, z: i32) -> usize {
        self.grid.linear_index(x, y, z)
    }

    /// Inverse of [`linear_index_of`](Self::linear_index_of).
    pub fn point_from_linear_index(&self, index: usize) -> Point {
        self.grid.point_from_linear_index(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeding_follows_ground_height() {
        let grid = PlacementGrid::new(Point::new(3, 5, 3), 1.0);
        for i in 0..grid.num_points() {
            let p = grid.point_from_linear_index(i);
            let expected = if p.y < 2 {
                VoxelState::Occupied
            } else if p.y == 2 {
                VoxelState::Unoccupied
            } else {
                VoxelState::Air
            };
            assert_eq!(grid.state(p), expected, "state at {p:?}");
        }
    }

    #[test]
    fn lookup_failure_degrades_to_none() {
        let _ = env_logger::builder().is_test(true).try_init();
        let grid = PlacementGrid::new(Point::new(2, 2, 2), 1.0);
        assert_eq!(grid.state(Point::new(5, 5, 5)), VoxelState::None);
        assert_eq!(grid.state_at_index(999), VoxelState::None);
        assert!(grid.try_state(Point::new(5, 5, 5)).is_err());
    }

    #[test]
    fn set_state_overwrites_unconditionally() {
        let mut grid = PlacementGrid::new(Point::new(3, 4, 3), 1.0);
        assert_eq!(grid.state_at(1, 2, 1), VoxelState::Unoccupied);
        grid.set_state(1, 2, 1, VoxelState::Occupied);
        assert_eq!(grid.state_at(1, 2, 1), VoxelState::Occupied);
        // Any state to any other state, no transition rules.
        grid.set_state(1, 2, 1, VoxelState::Air);
        assert_eq!(grid.state_at(1, 2, 1), VoxelState::Air);
    }

    #[test]
    fn index_round_trip() {
        let grid = PlacementGrid::new(Point::new(4, 3, 5), 2.0);
        for i in 0..grid.num_points() {
            let p = grid.point_from_linear_index(i);
            assert_eq!(grid.linear_index_of(p.x, p.y, p.z), i);
        }
    }

    #[test]
    fn state_by_index_recovers_point_through_scale() {
        let grid = PlacementGrid::new(Point::new(3, 5, 3), 2.0);
        let i = grid.linear_index_of(1, 2, 1);
        assert_eq!(grid.state_at_index(i), VoxelState::Unoccupied);
    }

    #[test]
    fn zero_scale_degrades_to_zero_point() {
        let _ = env_logger::builder().is_test(true).try_init();
        let grid = PlacementGrid::new(Point::new(3, 3, 3), 0.0);
        // Every recovered point collapses to (0,0,0), which seeds Occupied.
        assert_eq!(grid.state_at_index(5), VoxelState::Occupied);
    }

    #[test]
    fn free_mask_covers_unoccupied_and_air() {
        assert!(VoxelState::Unoccupied.is_free());
        assert!(VoxelState::Air.is_free());
        assert!(!VoxelState::Occupied.is_free());
        assert!(!VoxelState::None.is_free());
    }

    #[test]
    fn reseed_on_rebuild() {
        let mut grid = PlacementGrid::new(Point::new(3, 4, 3), 1.0);
        grid.set_state(0, 2, 0, VoxelState::Occupied);
        grid.set_dimensions(Point::new(4, 4, 4));
        assert_eq!(grid.state_at(0, 2, 0), VoxelState::Unoccupied);
    }
}
