//! Square cell grid backing the labyrinth
//!
//! Cells are stored row-major: index = z * side + x.

use serde::{Deserialize, Serialize};

/// State of a single labyrinth cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Open,
    Wall,
    /// Open cell currently holding the pickup
    Item,
}

impl Cell {
    /// Walls are the only cells that block movement
    #[inline]
    pub fn is_passable(self) -> bool {
        self != Cell::Wall
    }
}

/// Labyrinth grid
///
/// Only built through the constructors below, so `cells.len() == side * side`
/// always holds.
#[derive(Debug, Clone)]
pub struct Grid {
    side: usize,
    cells: Vec<Cell>,
    /// Bumped on every mutation so exporters can skip unchanged grids
    revision: u64,
}

impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.side == other.side && self.cells == other.cells
    }
}

impl Eq for Grid {}

impl Grid {
    /// A grid with every cell set to `cell`
    pub fn filled(side: usize, cell: Cell) -> Self {
        Self {
            side,
            cells: vec![cell; side * side],
            revision: 0,
        }
    }

    /// Open interior surrounded by a one-cell wall border
    pub fn walled(side: usize) -> Self {
        let mut grid = Self::filled(side, Cell::Open);
        for i in 0..side {
            grid.set(i, 0, Cell::Wall);
            grid.set(i, side - 1, Cell::Wall);
            grid.set(0, i, Cell::Wall);
            grid.set(side - 1, i, Cell::Wall);
        }
        grid.revision = 0;
        grid
    }

    /// Build a grid from row-major cells; `None` if the count is not a square
    pub fn from_cells(cells: Vec<Cell>) -> Option<Self> {
        let side = (cells.len() as f64).sqrt() as usize;
        if side * side != cells.len() {
            return None;
        }
        Some(Self {
            side,
            cells,
            revision: 0,
        })
    }

    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Mutation counter, ignored by equality
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[inline]
    pub fn in_bounds(&self, x: usize, z: usize) -> bool {
        x < self.side && z < self.side
    }

    #[inline]
    fn index(&self, x: usize, z: usize) -> usize {
        z * self.side + x
    }

    /// Cell at (x, z); panics when out of range
    #[inline]
    pub fn cell_at(&self, x: usize, z: usize) -> Cell {
        assert!(self.in_bounds(x, z), "cell ({x}, {z}) outside {0}x{0} grid", self.side);
        self.cells[self.index(x, z)]
    }

    /// Checked cell lookup
    #[inline]
    pub fn get(&self, x: usize, z: usize) -> Option<Cell> {
        self.in_bounds(x, z).then(|| self.cells[self.index(x, z)])
    }

    /// Set cell at (x, z); panics when out of range
    pub fn set(&mut self, x: usize, z: usize, cell: Cell) {
        assert!(self.in_bounds(x, z), "cell ({x}, {z}) outside {0}x{0} grid", self.side);
        let idx = self.index(x, z);
        if self.cells[idx] != cell {
            self.cells[idx] = cell;
            self.revision += 1;
        }
    }

    /// True for cells on the outer ring
    #[inline]
    pub fn is_border(&self, x: usize, z: usize) -> bool {
        x == 0 || z == 0 || x + 1 == self.side || z + 1 == self.side
    }

    /// Row-major cell slice
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate `(x, z, cell)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        let side = self.side;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| (i % side, i / side, cell))
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Coordinates of every `Open` cell, row-major
    pub fn open_cells(&self) -> Vec<(usize, usize)> {
        self.iter()
            .filter(|&(_, _, c)| c == Cell::Open)
            .map(|(x, z, _)| (x, z))
            .collect()
    }

    /// In-bounds orthogonal neighbors of (x, z)
    pub fn neighbors(&self, x: usize, z: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        const OFFSETS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
        OFFSETS.iter().filter_map(move |&(dx, dz)| {
            let nx = x.checked_add_signed(dx)?;
            let nz = z.checked_add_signed(dz)?;
            self.in_bounds(nx, nz).then_some((nx, nz))
        })
    }

    /// Passable cells reachable from (x, z) through orthogonal moves
    pub fn reachable_from(&self, x: usize, z: usize) -> Vec<bool> {
        let mut seen = vec![false; self.cells.len()];
        if !self.get(x, z).is_some_and(Cell::is_passable) {
            return seen;
        }
        let mut stack = vec![(x, z)];
        seen[self.index(x, z)] = true;
        while let Some((cx, cz)) = stack.pop() {
            for (nx, nz) in self.neighbors(cx, cz) {
                let idx = self.index(nx, nz);
                if !seen[idx] && self.cells[idx].is_passable() {
                    seen[idx] = true;
                    stack.push((nx, nz));
                }
            }
        }
        seen
    }

    /// True when every passable cell can reach every other one
    pub fn is_connected(&self) -> bool {
        let Some((x, z, _)) = self.iter().find(|&(_, _, c)| c.is_passable()) else {
            return true;
        };
        let seen = self.reachable_from(x, z);
        self.cells
            .iter()
            .zip(seen)
            .all(|(c, reached)| !c.is_passable() || reached)
    }
}
