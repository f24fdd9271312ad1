//! Text minimap
//!
//! Draws the labyrinth top-down with `z = 0` on the first line, so north
//! (-z, compass 0°) points up.

use std::fmt::Write as _;

use super::texels::decode_grid;
use super::{Frame, FrameSink};
use crate::error::Result;
use crate::sim::{AgentPose, Cell, Grid};
use crate::world_cell;

const WALL: char = '#';
const OPEN: char = '.';
const ITEM: char = '*';

/// Arrow for a compass bearing (degrees, 0 = north, clockwise)
pub fn agent_glyph(compass: f32) -> char {
    match ((compass.rem_euclid(360.0) + 45.0) / 90.0) as u32 % 4 {
        0 => '^',
        1 => '>',
        2 => 'v',
        _ => '<',
    }
}

/// Render a grid with the agent overlaid
pub fn render(grid: &Grid, agent: &AgentPose, half_extent: f32) -> String {
    let side = grid.side();
    let agent_cell = world_cell(agent.pos, half_extent, side);
    let mut out = String::with_capacity(side * (side + 1));
    for z in 0..side {
        for x in 0..side {
            let ch = if agent_cell == Some((x, z)) {
                agent_glyph(agent.compass)
            } else {
                match grid.cell_at(x, z) {
                    Cell::Wall => WALL,
                    Cell::Open => OPEN,
                    Cell::Item => ITEM,
                }
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

/// Headless frame sink keeping the last rendered minimap
#[derive(Debug, Default)]
pub struct Minimap {
    last: String,
    frames: u64,
}

impl Minimap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of the most recent frame
    pub fn last(&self) -> &str {
        &self.last
    }

    /// Frames presented so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// One-line status: frame, pose and item position
    pub fn status_line(frame: &Frame<'_>) -> String {
        let mut line = String::new();
        let _ = write!(
            line,
            "pos ({:7.2}, {:7.2}) heading {:5.1}°",
            frame.agent.pos.x, frame.agent.pos.y, frame.agent.compass
        );
        match frame.item {
            Some(item) => {
                let _ = write!(line, " item ({:7.2}, {:7.2})", item.pos.x, item.pos.y);
            }
            None => line.push_str(" item -"),
        }
        line
    }
}

impl FrameSink for Minimap {
    fn present(&mut self, frame: &Frame<'_>) -> Result<()> {
        let grid = decode_grid(frame.texels, frame.side)?;
        self.last = render(&grid, &frame.agent, frame.half_extent);
        self.frames += 1;
        log::trace!("{}", Self::status_line(frame));
        Ok(())
    }
}
