//! Procedural labyrinth generation
//!
//! Carve cells sit on odd coordinates inside the border; the walls between
//! them are opened by a randomized depth-first backtracker. Every carve cell
//! is visited from the frontier, so the open cells always form one connected
//! spanning tree. An optional braid pass then opens extra walls at dead ends,
//! adding loops without ever disconnecting anything.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::grid::{Cell, Grid};
use crate::consts::{MAX_LAB_SIDE, MIN_LAB_SIDE};
use crate::error::{LabyrinthError, Result};

/// Generator knobs beyond the grid side
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MazeParams {
    /// Probability (0..=1) of opening an extra wall at each dead end
    pub braid: f32,
}

/// Generate a perfect labyrinth of the given side from a seed
pub fn generate(side: usize, seed: u64) -> Result<Grid> {
    generate_seeded(side, &MazeParams::default(), seed)
}

/// Generate a labyrinth with explicit parameters from a seed
pub fn generate_seeded(side: usize, params: &MazeParams, seed: u64) -> Result<Grid> {
    let mut rng = Pcg32::seed_from_u64(seed);
    let grid = generate_with(side, params, &mut rng)?;
    log::debug!(
        "Generated {side}x{side} labyrinth (seed {seed}, braid {:.2}, {} open cells)",
        params.braid,
        grid.count(Cell::Open)
    );
    Ok(grid)
}

/// Generate a labyrinth drawing randomness from `rng`
pub fn generate_with<R: Rng>(side: usize, params: &MazeParams, rng: &mut R) -> Result<Grid> {
    if !(MIN_LAB_SIDE..=MAX_LAB_SIDE).contains(&side) {
        return Err(LabyrinthError::InvalidSide {
            side,
            min: MIN_LAB_SIDE,
            max: MAX_LAB_SIDE,
        });
    }
    if !(0.0..=1.0).contains(&params.braid) {
        return Err(LabyrinthError::InvalidBraid(params.braid));
    }

    let mut carver = Carver::new(side);
    carver.backtrack(rng);
    if params.braid > 0.0 {
        carver.braid(params.braid, rng);
    }
    Ok(carver.grid)
}

/// Carve-cell lattice laid over the grid: lattice (i, j) is grid (2i+1, 2j+1)
struct Carver {
    grid: Grid,
    /// Carve cells per axis
    n: usize,
}

impl Carver {
    fn new(side: usize) -> Self {
        Self {
            grid: Grid::filled(side, Cell::Wall),
            n: (side - 1) / 2,
        }
    }

    #[inline]
    fn to_grid(i: usize) -> usize {
        2 * i + 1
    }

    /// Lattice neighbors of (i, j)
    fn lattice_neighbors(&self, i: usize, j: usize) -> impl Iterator<Item = (usize, usize)> {
        let n = self.n;
        let mut out = [None; 4];
        if i > 0 {
            out[0] = Some((i - 1, j));
        }
        if i + 1 < n {
            out[1] = Some((i + 1, j));
        }
        if j > 0 {
            out[2] = Some((i, j - 1));
        }
        if j + 1 < n {
            out[3] = Some((i, j + 1));
        }
        out.into_iter().flatten()
    }

    /// Grid coordinates of the wall between two adjacent lattice cells
    #[inline]
    fn wall_between(a: (usize, usize), b: (usize, usize)) -> (usize, usize) {
        (
            (Self::to_grid(a.0) + Self::to_grid(b.0)) / 2,
            (Self::to_grid(a.1) + Self::to_grid(b.1)) / 2,
        )
    }

    fn open_cell(&mut self, (i, j): (usize, usize)) {
        self.grid.set(Self::to_grid(i), Self::to_grid(j), Cell::Open);
    }

    fn open_between(&mut self, a: (usize, usize), b: (usize, usize)) {
        let (x, z) = Self::wall_between(a, b);
        self.grid.set(x, z, Cell::Open);
    }

    /// Randomized depth-first backtracker from a random start cell
    fn backtrack<R: Rng>(&mut self, rng: &mut R) {
        let n = self.n;
        let mut visited = vec![false; n * n];
        let start = (rng.random_range(0..n), rng.random_range(0..n));
        visited[start.1 * n + start.0] = true;
        self.open_cell(start);

        let mut stack = vec![start];
        let mut options = Vec::with_capacity(4);
        while let Some(&current) = stack.last() {
            options.clear();
            options.extend(
                self.lattice_neighbors(current.0, current.1)
                    .filter(|&(i, j)| !visited[j * n + i]),
            );
            if options.is_empty() {
                stack.pop();
                continue;
            }
            let next = options[rng.random_range(0..options.len())];
            visited[next.1 * n + next.0] = true;
            self.open_between(current, next);
            self.open_cell(next);
            stack.push(next);
        }
    }

    /// Open passages out of dead ends with probability `braid`
    fn braid<R: Rng>(&mut self, braid: f32, rng: &mut R) {
        let mut opened = 0usize;
        let mut closed = Vec::with_capacity(4);
        for j in 0..self.n {
            for i in 0..self.n {
                if !self.is_dead_end(i, j) || !rng.random_bool(f64::from(braid)) {
                    continue;
                }
                closed.clear();
                closed.extend(self.lattice_neighbors(i, j).filter(|&b| {
                    let (x, z) = Self::wall_between((i, j), b);
                    self.grid.cell_at(x, z) == Cell::Wall
                }));
                if closed.is_empty() {
                    continue;
                }
                let other = closed[rng.random_range(0..closed.len())];
                self.open_between((i, j), other);
                opened += 1;
            }
        }
        log::trace!("Braid pass opened {opened} walls");
    }

    /// Carve cell with exactly one open neighbor
    fn is_dead_end(&self, i: usize, j: usize) -> bool {
        let (x, z) = (Self::to_grid(i), Self::to_grid(j));
        self.grid
            .neighbors(x, z)
            .filter(|&(nx, nz)| self.grid.cell_at(nx, nz).is_passable())
            .count()
            == 1
    }
}

/// Number of carve cells that are dead ends (exactly one open neighbor)
pub fn dead_ends(grid: &Grid) -> usize {
    let n = grid.side().saturating_sub(1) / 2;
    (0..n)
        .flat_map(|j| (0..n).map(move |i| (2 * i + 1, 2 * j + 1)))
        .filter(|&(x, z)| {
            grid.cell_at(x, z).is_passable()
                && grid
                    .neighbors(x, z)
                    .filter(|&(nx, nz)| grid.cell_at(nx, nz).is_passable())
                    .count()
                    == 1
        })
        .count()
}
