//! Labyrinth Walk - procedural maze with a first-person walker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (maze generation, movement, collisions, pickups)
//! - `session`: Owns a running walk and exports it to the renderer
//! - `renderer`: Grid texture export and the headless minimap
//! - `platform`: Keyboard intents and frame timing
//! - `settings`: Data-driven tunables

pub mod error;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{LabyrinthError, Result};
pub use session::Session;
pub use settings::Settings;

use glam::Vec2;

/// Walk configuration constants
pub mod consts {
    /// Default labyrinth side, in cells
    pub const LAB_SIDE: usize = 15;
    /// Smallest side that still holds one carve cell inside the border
    pub const MIN_LAB_SIDE: usize = 3;
    /// Largest side accepted by the generator
    pub const MAX_LAB_SIDE: usize = 4096;

    /// Half of the world extent covered by the labyrinth floor (world units)
    pub const WORLD_HALF_EXTENT: f32 = 100.0;

    /// Walking speed (world units per second)
    pub const WALK_SPEED: f32 = 15.0;
    /// Turning speed (radians per second)
    pub const TURN_RATE: f32 = std::f32::consts::PI;
    /// Agent bounding radius used by the collision probes
    pub const AGENT_BBOX: f32 = 1.0;
    /// Collision sub-steps per tick; travel beyond this is dropped
    pub const MAX_SUBSTEPS: u32 = 1024;

    /// Rendered item footprint
    pub const ITEM_SIZE: f32 = 1.0;
    /// Pickup distance, in grid cells
    pub const PICKUP_RADIUS: f32 = 1.0;
    /// Random draws before the spawner falls back to a scan
    pub const MAX_SPAWN_ATTEMPTS: u32 = 1024;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    // rem_euclid may round up to TAU for tiny negative inputs
    if wrapped >= PI { wrapped - TAU } else { wrapped }
}

/// Map a world position (x, z) to continuous grid coordinates.
///
/// The floor spans `[-half_extent, half_extent)` on both axes; the result is
/// in `[0, side)` for positions on the floor.
#[inline]
pub fn world_to_grid(pos: Vec2, half_extent: f32, side: usize) -> Vec2 {
    (pos + Vec2::splat(half_extent)) / (2.0 * half_extent) * side as f32
}

/// Inverse of [`world_to_grid`]
#[inline]
pub fn grid_to_world(grid_pos: Vec2, half_extent: f32, side: usize) -> Vec2 {
    grid_pos / side as f32 * (2.0 * half_extent) - Vec2::splat(half_extent)
}

/// Cell holding a continuous grid position, or `None` off the grid
#[inline]
pub fn grid_cell(grid_pos: Vec2, side: usize) -> Option<(usize, usize)> {
    let x = grid_pos.x.floor();
    let z = grid_pos.y.floor();
    let side = side as f32;
    if x >= 0.0 && x < side && z >= 0.0 && z < side {
        Some((x as usize, z as usize))
    } else {
        None
    }
}

/// Cell under a world position, or `None` off the floor
#[inline]
pub fn world_cell(pos: Vec2, half_extent: f32, side: usize) -> Option<(usize, usize)> {
    grid_cell(world_to_grid(pos, half_extent, side), side)
}

/// World position of a cell's center
#[inline]
pub fn cell_center_world(x: usize, z: usize, half_extent: f32, side: usize) -> Vec2 {
    grid_to_world(
        Vec2::new(x as f32 + 0.5, z as f32 + 0.5),
        half_extent,
        side,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_center_maps_to_grid_center() {
        let g = world_to_grid(Vec2::ZERO, 100.0, 15);
        assert!((g.x - 7.5).abs() < 1e-4);
        assert!((g.y - 7.5).abs() < 1e-4);
        assert_eq!(grid_cell(g, 15), Some((7, 7)));
    }

    #[test]
    fn test_grid_world_inverse() {
        let p = Vec2::new(-37.25, 81.5);
        let back = grid_to_world(world_to_grid(p, 100.0, 15), 100.0, 15);
        assert!((back - p).length() < 1e-3);
    }

    #[test]
    fn test_off_grid_is_none() {
        assert_eq!(grid_cell(Vec2::new(-0.01, 3.0), 15), None);
        assert_eq!(grid_cell(Vec2::new(3.0, 15.0), 15), None);
        assert_eq!(world_cell(Vec2::new(100.0, 0.0), 100.0, 15), None);
        assert_eq!(world_cell(Vec2::new(-100.0, -100.0), 100.0, 15), Some((0, 0)));
    }

    #[test]
    fn test_cell_center_round_trip() {
        let c = cell_center_world(3, 11, 100.0, 15);
        assert_eq!(world_cell(c, 100.0, 15), Some((3, 11)));
    }

    #[test]
    fn test_normalize_angle() {
        use std::f32::consts::PI;
        assert!((normalize_angle(2.5 * PI) - PI / 2.0).abs() < 1e-4);
        assert!((normalize_angle(-3.5 * PI) - PI / 2.0).abs() < 1e-4);
        assert!((normalize_angle(-PI / 2.0) + PI / 2.0).abs() < 1e-6);
        assert_eq!(normalize_angle(0.0), 0.0);
    }

    #[test]
    fn test_normalize_huge_angles() {
        use std::f32::consts::PI;
        for angle in [1e8, -1e8, 3.0e9, f32::MAX, -f32::MAX, -1e-9] {
            let a = normalize_angle(angle);
            assert!((-PI..PI).contains(&a), "{angle} -> {a}");
        }
    }
}
