//! Simulation tick
//!
//! One tick per frame: turn, move, push back out of walls, then check the
//! item pickup.

use glam::Vec2;

use super::collision::{ProbeSet, keep_out_of_walls, probe_walls, resolve};
use super::spawn::check_pickup;
use super::state::{AgentPose, Item, WalkState};
use crate::consts::MAX_SUBSTEPS;

/// Input intents for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub turn_left: bool,
    pub turn_right: bool,
    pub forward: bool,
    pub backward: bool,
}

impl TickInput {
    /// True when no intent is held
    pub fn is_idle(&self) -> bool {
        !(self.turn_left || self.turn_right || self.forward || self.backward)
    }
}

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    /// Pose after the tick
    pub pose: AgentPose,
    /// Probes blocked during any movement sub-step (all clear if the agent did not move)
    pub probes: ProbeSet,
    /// Item collected during this tick
    pub collected: Option<Item>,
}

/// Longest distance moved before the probes run again: half a cell, and no
/// more than the agent's bounding radius, so a step can never cross a wall
/// cell.
fn max_step(state: &WalkState) -> f32 {
    let half_cell = state.settings.world_half_extent / state.grid.side() as f32;
    if state.agent.bbox > 0.0 {
        half_cell.min(state.agent.bbox)
    } else {
        half_cell
    }
}

/// Move by `displacement` in sub-steps of at most [`max_step`], resolving
/// collisions after each one. Returns every probe blocked along the way.
fn walk(state: &mut WalkState, displacement: Vec2) -> ProbeSet {
    // Rounding on an exact multiple of the step length must not add a sub-step
    let steps = (displacement.length() / max_step(state) - 1e-3)
        .ceil()
        .clamp(1.0, MAX_SUBSTEPS as f32);
    let step = displacement / steps;
    let half_extent = state.settings.world_half_extent;

    let mut blocked = ProbeSet::default();
    for _ in 0..steps as u32 {
        let start = state.agent.pos;
        state.agent.pos += step;
        let probes = probe_walls(&state.agent, &state.grid, half_extent);
        if probes.any() {
            let kept = resolve(&mut state.agent, step, &probes);
            log::trace!(
                "Blocked {:?}: kept {:?} of {:?}",
                probes.blocked().collect::<Vec<_>>(),
                kept,
                step
            );
        }
        keep_out_of_walls(&mut state.agent, start, &state.grid, half_extent);
        blocked = blocked.union(probes);
    }
    blocked
}

/// Advance the walk by `dt` seconds.
///
/// A non-positive or non-finite `dt` is a no-op.
pub fn tick(state: &mut WalkState, input: &TickInput, dt: f32) -> TickOutcome {
    if !(dt.is_finite() && dt > 0.0) {
        return TickOutcome {
            pose: state.agent.pose(),
            probes: ProbeSet::default(),
            collected: None,
        };
    }

    state.time_ticks += 1;

    // Turn
    let turn = (state.settings.turn_rate * dt).min(f32::MAX);
    if input.turn_left {
        state.agent.turn(turn);
    }
    if input.turn_right {
        state.agent.turn(-turn);
    }

    // Move speculatively, then undo whatever ran into a wall
    let max_travel = max_step(state) * MAX_SUBSTEPS as f32;
    let travel = state.settings.walk_speed * dt;
    if travel > max_travel {
        log::debug!("Clamping {travel} units of travel to {max_travel}");
    }
    let step = travel.min(max_travel);
    let mut displacement = Vec2::ZERO;
    if input.forward {
        displacement += state.agent.forward() * step;
    }
    if input.backward {
        displacement -= state.agent.forward() * step;
    }

    let probes = if displacement == Vec2::ZERO {
        ProbeSet::default()
    } else {
        walk(state, displacement)
    };

    let collected = check_pickup(state);

    TickOutcome {
        pose: state.agent.pose(),
        probes,
        collected,
    }
}
