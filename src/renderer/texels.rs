//! Grid texture encoding
//!
//! The labyrinth is uploaded as a `side x side` RGBA8 texture, one texel per
//! cell in row-major order.

use bytemuck::{Pod, Zeroable};

use crate::error::{LabyrinthError, Result};
use crate::sim::{Cell, Grid};

/// One RGBA8 texel
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct Texel {
    pub rgba: [u8; 4],
}

impl Texel {
    pub const fn new(rgba: [u8; 4]) -> Self {
        Self { rgba }
    }

    pub fn from_cell(cell: Cell) -> Self {
        match cell {
            Cell::Wall => colors::WALL,
            Cell::Open => colors::OPEN,
            Cell::Item => colors::ITEM,
        }
    }

    pub fn to_cell(self) -> Option<Cell> {
        match self {
            colors::WALL => Some(Cell::Wall),
            colors::OPEN => Some(Cell::Open),
            colors::ITEM => Some(Cell::Item),
            _ => None,
        }
    }
}

/// Texel encoding of each cell state
pub mod colors {
    use super::Texel;

    pub const WALL: Texel = Texel::new([255, 255, 255, 255]);
    pub const OPEN: Texel = Texel::new([0, 0, 0, 0]);
    pub const ITEM: Texel = Texel::new([255, 160, 0, 255]);
}

/// Encode a grid into row-major texels
pub fn encode_grid(grid: &Grid) -> Vec<Texel> {
    grid.cells().iter().map(|&c| Texel::from_cell(c)).collect()
}

/// Decode a row-major RGBA8 buffer back into a grid
pub fn decode_grid(bytes: &[u8], side: usize) -> Result<Grid> {
    let expected = side * side * std::mem::size_of::<Texel>();
    if bytes.len() != expected {
        return Err(LabyrinthError::BufferLength {
            expected,
            actual: bytes.len(),
        });
    }
    let cells = bytes
        .chunks_exact(4)
        .enumerate()
        .map(|(index, px)| {
            let texel = Texel::new([px[0], px[1], px[2], px[3]]);
            texel.to_cell().ok_or(LabyrinthError::UnknownTexel {
                index,
                texel: texel.rgba,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Grid::from_cells(cells).ok_or(LabyrinthError::BufferLength {
        expected,
        actual: bytes.len(),
    })
}

/// Texture-side copy of the grid, re-encoded only when the grid changed
#[derive(Debug, Clone, Default)]
pub struct GridTexture {
    texels: Vec<Texel>,
    side: usize,
    revision: Option<u64>,
}

impl GridTexture {
    pub fn new(grid: &Grid) -> Self {
        let mut texture = Self::default();
        texture.sync(grid);
        texture
    }

    /// Bring the texture up to date; returns true if it was re-encoded.
    ///
    /// Tracks a single grid's revisions; call [`GridTexture::invalidate`]
    /// after swapping in a different grid.
    pub fn sync(&mut self, grid: &Grid) -> bool {
        if self.revision == Some(grid.revision()) && self.side == grid.side() {
            return false;
        }
        self.texels = encode_grid(grid);
        self.side = grid.side();
        self.revision = Some(grid.revision());
        log::trace!("Grid texture re-encoded (revision {})", grid.revision());
        true
    }

    /// Forget the cached revision so the next sync re-encodes
    pub fn invalidate(&mut self) {
        self.revision = None;
    }

    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    #[inline]
    pub fn texels(&self) -> &[Texel] {
        &self.texels
    }

    /// Raw bytes ready for a texture upload
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.texels)
    }
}
