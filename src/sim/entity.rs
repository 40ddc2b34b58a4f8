//! Visual entities driven by the animator
//!
//! Entities live in a flat arena indexed by [`EntityId`]. The lattice only
//! ever moves handles around, so an entity is never copied or rebuilt when
//! its sub-cube changes slot.

use glam::{Quat, Vec3};

use crate::cell_coords;
use crate::consts::PART_SCALE;

/// Handle into the entity arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u16);

impl EntityId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Anything the animator can turn in place
pub trait VisualEntity {
    /// Compose a rotation of `angle_degrees` about `axis` (through the cube
    /// center) onto the current transform.
    fn apply_incremental_rotation(&mut self, axis: Vec3, angle_degrees: f32);
}

/// One sub-cube's transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubePart {
    pub position: Vec3,
    pub orientation: Quat,
    pub scale: f32,
}

impl Default for CubePart {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            scale: PART_SCALE,
        }
    }
}

impl CubePart {
    /// Part resting at the grid position of cell `index`
    /// (center sub-cube at the origin)
    pub fn for_cell(index: usize) -> Self {
        Self {
            position: grid_position(index),
            ..Self::default()
        }
    }

    /// Position snapped to the nearest grid point
    pub fn grid_position(&self) -> Vec3 {
        self.position.round()
    }
}

impl VisualEntity for CubePart {
    fn apply_incremental_rotation(&mut self, axis: Vec3, angle_degrees: f32) {
        let rotation = Quat::from_axis_angle(axis.normalize_or_zero(), angle_degrees.to_radians());
        self.position = rotation * self.position;
        self.orientation = (rotation * self.orientation).normalize();
    }
}

/// World-space center of cell `index`
pub fn grid_position(index: usize) -> Vec3 {
    let (i, j, k) = cell_coords(index);
    Vec3::new(i as f32 - 1.0, j as f32 - 1.0, k as f32 - 1.0)
}
