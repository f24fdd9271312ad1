//! Probe-based wall collision
//!
//! Four short probes stick out of the agent (forward, back, strafe-left,
//! strafe-right). Each probe endpoint is mapped onto the grid with the shared
//! world-to-grid transform; a probe landing on a wall is blocked. Forward and
//! back probes reach `bbox`, strafe probes only `bbox / 4`.

use glam::Vec2;

use super::grid::{Cell, Grid};
use super::state::Agent;
use crate::world_cell;

/// Probe directions, relative to the agent's heading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    Forward,
    Back,
    Left,
    Right,
}

impl Probe {
    pub const ALL: [Probe; 4] = [Probe::Forward, Probe::Back, Probe::Left, Probe::Right];

    /// Unit direction in world space (x, z) for heading `theta`
    #[inline]
    pub fn direction(self, theta: f32) -> Vec2 {
        let (s, c) = theta.sin_cos();
        match self {
            Probe::Forward => Vec2::new(-s, -c),
            Probe::Back => Vec2::new(s, c),
            Probe::Left => Vec2::new(-c, s),
            Probe::Right => Vec2::new(c, -s),
        }
    }

    /// Probe length for an agent of bounding radius `bbox`
    #[inline]
    pub fn reach(self, bbox: f32) -> f32 {
        match self {
            Probe::Forward | Probe::Back => bbox,
            Probe::Left | Probe::Right => bbox / 4.0,
        }
    }

    /// World axis a blocked probe reverts: forward/back undo z, strafe undoes x
    #[inline]
    pub fn axis(self) -> Axis {
        match self {
            Probe::Forward | Probe::Back => Axis::Z,
            Probe::Left | Probe::Right => Axis::X,
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// World axis undone by a blocked probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Z,
}

impl Axis {
    #[inline]
    pub fn component(self, v: Vec2) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Z => v.y,
        }
    }
}

/// Blocked flags for the four probes of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProbeSet {
    blocked: [bool; 4],
}

impl ProbeSet {
    #[inline]
    pub fn is_blocked(&self, probe: Probe) -> bool {
        self.blocked[probe.index()]
    }

    #[inline]
    pub fn any(&self) -> bool {
        self.blocked.iter().any(|&b| b)
    }

    /// Blocked probes in [`Probe::ALL`] order
    pub fn blocked(&self) -> impl Iterator<Item = Probe> + '_ {
        Probe::ALL.into_iter().filter(|&p| self.is_blocked(p))
    }

    /// Probes blocked in either set
    pub fn union(self, other: ProbeSet) -> ProbeSet {
        let mut blocked = self.blocked;
        for (b, o) in blocked.iter_mut().zip(other.blocked) {
            *b |= o;
        }
        ProbeSet { blocked }
    }
}

/// World position of a probe endpoint
#[inline]
pub fn probe_endpoint(agent: &Agent, probe: Probe) -> Vec2 {
    agent.pos + probe.direction(agent.theta) * probe.reach(agent.bbox)
}

/// Test every probe of `agent` against the walls of `grid`.
///
/// Probes that land off the grid are treated as unblocked.
pub fn probe_walls(agent: &Agent, grid: &Grid, half_extent: f32) -> ProbeSet {
    let mut set = ProbeSet::default();
    for probe in Probe::ALL {
        let end = probe_endpoint(agent, probe);
        set.blocked[probe.index()] = world_cell(end, half_extent, grid.side())
            .and_then(|(x, z)| grid.get(x, z))
            .is_some_and(|cell| cell == Cell::Wall);
    }
    set
}

/// Undo the parts of `displacement` that drove the agent into a wall.
///
/// Each blocked probe reverts its own axis ([`Probe::axis`]), but only when
/// the displacement on that axis heads the same way as the probe, so the
/// agent can always back away from a wall. The other axis keeps moving,
/// which makes the agent slide. Returns the displacement that was kept.
pub fn resolve(agent: &mut Agent, displacement: Vec2, probes: &ProbeSet) -> Vec2 {
    let mut kept = displacement;
    for probe in probes.blocked() {
        let dir = probe.direction(agent.theta);
        let axis = probe.axis();
        let moved = axis.component(kept);
        if moved != 0.0 && moved.signum() == axis.component(dir).signum() {
            match axis {
                Axis::X => {
                    agent.pos.x -= moved;
                    kept.x = 0.0;
                }
                Axis::Z => {
                    agent.pos.y -= moved;
                    kept.y = 0.0;
                }
            }
        }
    }
    kept
}

/// Last line of defence after [`resolve`]: the agent's own cell must never be
/// a wall. Tries keeping each axis of the move on its own, then falls back to
/// `start`. Off-grid positions count as passable.
pub fn keep_out_of_walls(agent: &mut Agent, start: Vec2, grid: &Grid, half_extent: f32) {
    let passable = |pos: Vec2| {
        world_cell(pos, half_extent, grid.side())
            .and_then(|(x, z)| grid.get(x, z))
            .is_none_or(Cell::is_passable)
    };
    if passable(agent.pos) {
        return;
    }
    let x_only = Vec2::new(agent.pos.x, start.y);
    let z_only = Vec2::new(start.x, agent.pos.y);
    agent.pos = if passable(x_only) {
        x_only
    } else if passable(z_only) {
        z_only
    } else {
        start
    };
}
