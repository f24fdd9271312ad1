//! Deterministic simulation module
//!
//! All labyrinth logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Elapsed time is supplied by the caller, never measured
//! - Stable iteration order (row-major over the grid)
//! - No rendering or platform dependencies

pub mod collision;
pub mod grid;
pub mod maze;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Probe, ProbeSet, probe_walls};
pub use grid::{Cell, Grid};
pub use maze::{MazeParams, generate, generate_seeded, generate_with};
pub use spawn::{check_pickup, spawn_item};
pub use state::{Agent, AgentPose, Item, ItemPose, WalkState};
pub use tick::{TickInput, TickOutcome, tick};
