//! Rendering seam
//!
//! The simulation never draws. Each tick it hands a [`Frame`] (grid texture
//! bytes plus agent and item poses) to whatever implements [`FrameSink`]:
//! a GPU renderer in a windowed build, the text [`Minimap`] headless.

pub mod minimap;
pub mod texels;

pub use minimap::Minimap;
pub use texels::{GridTexture, Texel, decode_grid, encode_grid};

use crate::error::Result;
use crate::sim::{AgentPose, ItemPose};

/// Settled snapshot of one tick, ready to draw
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Labyrinth side, in cells
    pub side: usize,
    /// Row-major RGBA8 grid texture
    pub texels: &'a [u8],
    /// Half of the floor extent in world units
    pub half_extent: f32,
    pub agent: AgentPose,
    pub item: Option<ItemPose>,
}

/// Anything that can draw a frame
pub trait FrameSink {
    fn present(&mut self, frame: &Frame<'_>) -> Result<()>;
}
