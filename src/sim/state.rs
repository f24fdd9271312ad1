//! Walk state and core simulation types
//!
//! Everything a tick reads or mutates lives here: the labyrinth grid, the
//! walking agent, the current pickup and the spawner's RNG.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::{Cell, Grid};
use crate::error::{LabyrinthError, Result};
use crate::settings::Settings;
use crate::{cell_center_world, grid_to_world, normalize_angle, world_to_grid};

/// The walking agent (first-person camera)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// World position: `x` is world x, `y` is world z
    pub pos: Vec2,
    /// Heading (radians); 0 looks toward -z
    pub theta: f32,
    /// Bounding radius for the collision probes
    pub bbox: f32,
}

impl Agent {
    pub fn new(pos: Vec2, bbox: f32) -> Self {
        Self {
            pos,
            theta: 0.0,
            bbox,
        }
    }

    /// Unit vector the agent walks along when moving forward
    #[inline]
    pub fn forward(&self) -> Vec2 {
        Vec2::new(-self.theta.sin(), -self.theta.cos())
    }

    /// Turn by `delta` radians, keeping the heading in [-π, π)
    pub fn turn(&mut self, delta: f32) {
        self.theta = normalize_angle(self.theta + delta);
    }

    /// Compass bearing in degrees [0, 360), 0 = north (-z), clockwise
    pub fn compass_degrees(&self) -> f32 {
        (-self.theta.to_degrees()).rem_euclid(360.0)
    }

    pub fn pose(&self) -> AgentPose {
        AgentPose {
            pos: self.pos,
            theta: self.theta,
            compass: self.compass_degrees(),
        }
    }
}

/// Agent pose handed to the rendering collaborator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentPose {
    pub pos: Vec2,
    pub theta: f32,
    /// Compass bearing in degrees
    pub compass: f32,
}

/// The pickup sitting in the labyrinth
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Grid column
    pub x: usize,
    /// Grid row
    pub z: usize,
    /// Render width
    pub w: f32,
    /// Render height
    pub h: f32,
}

impl Item {
    /// Center of the item's cell in grid coordinates
    #[inline]
    pub fn grid_center(&self) -> Vec2 {
        Vec2::new(self.x as f32 + 0.5, self.z as f32 + 0.5)
    }

    pub fn pose(&self, half_extent: f32, side: usize) -> ItemPose {
        ItemPose {
            pos: grid_to_world(self.grid_center(), half_extent, side),
            w: self.w,
            h: self.h,
        }
    }
}

/// Item pose handed to the rendering collaborator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemPose {
    /// World position of the item's center
    pub pos: Vec2,
    pub w: f32,
    pub h: f32,
}

/// RNG state wrapper
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    /// Stream used by the item spawner; generation uses its own seeding
    pub const SPAWN_STREAM: u64 = 1;

    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            stream: Self::SPAWN_STREAM,
        }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::new(self.seed, self.stream)
    }
}

/// Complete walk state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct WalkState {
    /// Seed the labyrinth and spawner were built from
    pub seed: u64,
    pub settings: Settings,
    pub grid: Grid,
    pub agent: Agent,
    /// Current pickup; `None` only if the grid has no free cell left
    pub item: Option<Item>,
    /// Items collected so far
    pub collected: u32,
    /// Simulation tick counter (ticks with dt > 0)
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
}

impl WalkState {
    /// Wrap a grid in a fresh walk: agent at the open cell nearest the
    /// center, heading 0, no item yet.
    pub fn new(grid: Grid, settings: Settings, seed: u64) -> Result<Self> {
        if grid.side() != settings.side {
            return Err(LabyrinthError::SideMismatch {
                expected: settings.side,
                actual: grid.side(),
            });
        }
        let (sx, sz) = start_cell(&grid).ok_or(LabyrinthError::NoOpenCells)?;
        let pos = cell_center_world(sx, sz, settings.world_half_extent, grid.side());
        let agent = Agent::new(pos, settings.agent_bbox);

        Ok(Self {
            seed,
            rng: RngState::new(seed).to_rng(),
            settings,
            grid,
            agent,
            item: None,
            collected: 0,
            time_ticks: 0,
        })
    }

    /// Agent position in continuous grid coordinates
    #[inline]
    pub fn agent_grid_pos(&self) -> Vec2 {
        world_to_grid(self.agent.pos, self.settings.world_half_extent, self.grid.side())
    }

    pub fn item_pose(&self) -> Option<ItemPose> {
        self.item
            .map(|item| item.pose(self.settings.world_half_extent, self.grid.side()))
    }
}

/// Open cell closest to the grid center (ties broken row-major)
pub fn start_cell(grid: &Grid) -> Option<(usize, usize)> {
    let center = grid.side() as f32 / 2.0;
    grid.iter()
        .filter(|&(_, _, c)| c == Cell::Open)
        .map(|(x, z, _)| {
            let d = Vec2::new(x as f32 + 0.5 - center, z as f32 + 0.5 - center).length_squared();
            (x, z, d)
        })
        .fold(None, |best: Option<(usize, usize, f32)>, cand| match best {
            Some(b) if b.2 <= cand.2 => Some(b),
            _ => Some(cand),
        })
        .map(|(x, z, _)| (x, z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_forward_vector() {
        let mut agent = Agent::new(Vec2::ZERO, 1.0);
        assert!((agent.forward() - Vec2::new(0.0, -1.0)).length() < 1e-6);
        agent.turn(FRAC_PI_2);
        assert!((agent.forward() - Vec2::new(-1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_compass() {
        let mut agent = Agent::new(Vec2::ZERO, 1.0);
        assert!(agent.compass_degrees().abs() < 1e-4);
        // Turning left (positive theta) faces west
        agent.turn(FRAC_PI_2);
        assert!((agent.compass_degrees() - 270.0).abs() < 1e-3);
        agent.turn(-PI);
        assert!((agent.compass_degrees() - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_start_cell_prefers_center() {
        let grid = Grid::walled(15);
        assert_eq!(start_cell(&grid), Some((7, 7)));

        let mut grid = Grid::walled(15);
        grid.set(7, 7, Cell::Wall);
        let (x, z) = start_cell(&grid).unwrap();
        assert_eq!((x as i32 - 7).abs() + (z as i32 - 7).abs(), 1);

        assert_eq!(start_cell(&Grid::filled(5, Cell::Wall)), None);
    }

    #[test]
    fn test_new_state_places_agent_on_open_cell() {
        let grid = Grid::walled(15);
        let state = WalkState::new(grid, Settings::default(), 9).unwrap();
        let g = state.agent_grid_pos();
        assert_eq!(crate::grid_cell(g, 15), Some((7, 7)));
        assert!(state.agent.pos.length() < 1e-4);
        assert!(state.item.is_none());
    }

    #[test]
    fn test_new_state_rejects_mismatched_side() {
        let err = WalkState::new(Grid::walled(9), Settings::default(), 1).unwrap_err();
        assert!(matches!(
            err,
            LabyrinthError::SideMismatch { expected: 15, actual: 9 }
        ));
        let settings = Settings {
            side: 5,
            ..Default::default()
        };
        let err = WalkState::new(Grid::filled(5, Cell::Wall), settings, 1).unwrap_err();
        assert!(matches!(err, LabyrinthError::NoOpenCells));
    }
}
