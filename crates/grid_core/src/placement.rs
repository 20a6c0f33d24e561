//! Placement records and validity checks.
//!
//! The build tool resolves a screen raycast to a grid coordinate, asks the
//! grid whether the spot is buildable, and on success emits a [`PlacedObject`]
//! record for the transport layer. The wire format is the transport's problem;
//! this is plain data.

use crate::placement_grid::{PlacementGrid, VoxelState};
use crate::point::Point;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// One placed object as handed to the network layer: the entity id the peers
/// map back to a prefab, plus its world position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacedObject {
    pub id: u8,
    pub position: Vec3,
}

impl PlacedObject {
    pub fn new(id: u8, position: Vec3) -> Self {
        Self { id, position }
    }
}

impl PlacementGrid {
    /// Whether the build tool may place at `p`: the voxel must be the ground
    /// surface, not already occupied and not open air.
    pub fn can_place(&self, p: Point) -> bool {
        self.state(p) == VoxelState::Unoccupied
    }

    /// Mark `p` occupied and return the record to hand to the transport
    /// layer, or `None` when the spot is not buildable.
    pub fn place(&mut self, p: Point, id: u8) -> Option<PlacedObject> {
        if !self.can_place(p) {
            return None;
        }
        self.set_state(p.x, p.y, p.z, VoxelState::Occupied);
        Some(PlacedObject::new(id, self.grid().world_position(p)))
    }
}
