//! A running walk
//!
//! [`Session`] owns the simulation state plus the cached grid texture, and is
//! the surface a host (browser shell, native window, headless runner) drives
//! once per frame.

use crate::error::Result;
use crate::renderer::{Frame, GridTexture};
use crate::settings::Settings;
use crate::sim::{
    Agent, Grid, Item, MazeParams, TickInput, TickOutcome, WalkState, generate_seeded,
    spawn_item, tick,
};

pub struct Session {
    state: WalkState,
    texture: GridTexture,
}

impl Session {
    /// Generate a fresh labyrinth from `settings` and `seed`
    pub fn generate(settings: Settings, seed: u64) -> Result<Self> {
        settings.validate()?;
        let params = MazeParams {
            braid: settings.braid,
        };
        let grid = generate_seeded(settings.side, &params, seed)?;
        log::info!("Generated {0}x{0} labyrinth (seed {seed})", settings.side);
        Self::start(grid, settings, seed)
    }

    /// Start a walk on a pre-built grid
    pub fn with_grid(grid: Grid, settings: Settings, seed: u64) -> Result<Self> {
        settings.validate()?;
        Self::start(grid, settings, seed)
    }

    /// Place the agent and the first item; `settings` are already validated
    fn start(grid: Grid, settings: Settings, seed: u64) -> Result<Self> {
        let mut state = WalkState::new(grid, settings, seed)?;
        spawn_item(&mut state, None);
        let texture = GridTexture::new(&state.grid);
        Ok(Self { state, texture })
    }

    /// Replace the labyrinth with a new one of the same side.
    ///
    /// The agent returns to the start cell and the collected counter resets.
    pub fn regenerate(&mut self, seed: u64) -> Result<()> {
        let settings = self.state.settings.clone();
        let params = MazeParams {
            braid: settings.braid,
        };
        let grid = generate_seeded(settings.side, &params, seed)?;
        let mut state = WalkState::new(grid, settings, seed)?;
        spawn_item(&mut state, None);
        self.state = state;
        self.texture.invalidate();
        self.texture.sync(&self.state.grid);
        log::info!("Regenerated labyrinth (seed {seed})");
        Ok(())
    }

    /// Advance one frame
    pub fn tick(&mut self, input: &TickInput, dt: f32) -> TickOutcome {
        tick(&mut self.state, input, dt)
    }

    /// Row-major RGBA8 grid texture, re-encoded only if the grid changed
    pub fn export_grid_buffer(&mut self) -> &[u8] {
        self.texture.sync(&self.state.grid);
        self.texture.as_bytes()
    }

    pub fn current_item(&self) -> Option<Item> {
        self.state.item
    }

    /// Snapshot for the rendering collaborator
    pub fn frame(&mut self) -> Frame<'_> {
        self.texture.sync(&self.state.grid);
        Frame {
            side: self.state.grid.side(),
            texels: self.texture.as_bytes(),
            half_extent: self.state.settings.world_half_extent,
            agent: self.state.agent.pose(),
            item: self.state.item_pose(),
        }
    }

    pub fn collected(&self) -> u32 {
        self.state.collected
    }

    pub fn grid(&self) -> &Grid {
        &self.state.grid
    }

    pub fn agent(&self) -> &Agent {
        &self.state.agent
    }

    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    pub fn seed(&self) -> u64 {
        self.state.seed
    }

    pub fn state(&self) -> &WalkState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LabyrinthError;
    use crate::renderer::decode_grid;
    use crate::sim::Cell;
    use glam::Vec2;

    #[test]
    fn test_generate_places_one_item() {
        let session = Session::generate(Settings::default(), 42).unwrap();
        assert_eq!(session.grid().side(), 15);
        assert_eq!(session.grid().count(Cell::Item), 1);
        let item = session.current_item().unwrap();
        assert_eq!(session.grid().cell_at(item.x, item.z), Cell::Item);
        assert_eq!(session.collected(), 0);
    }

    #[test]
    fn test_export_round_trips() {
        let mut session = Session::generate(Settings::default(), 7).unwrap();
        let grid = session.grid().clone();
        let bytes = session.export_grid_buffer();
        assert_eq!(bytes.len(), 15 * 15 * 4);
        assert_eq!(decode_grid(bytes, 15).unwrap(), grid);
    }

    #[test]
    fn test_regenerate_changes_maze() {
        let mut session = Session::generate(Settings::default(), 1).unwrap();
        let before = session.grid().clone();
        session.regenerate(2).unwrap();
        assert_ne!(session.grid(), &before);
        assert_eq!(session.seed(), 2);
        assert_eq!(session.grid().count(Cell::Item), 1);
        let grid = session.grid().clone();
        assert_eq!(decode_grid(session.export_grid_buffer(), 15).unwrap(), grid);
    }

    #[test]
    fn test_with_grid_validation() {
        assert!(matches!(
            Session::with_grid(Grid::walled(9), Settings::default(), 0),
            Err(LabyrinthError::SideMismatch { expected: 15, actual: 9 })
        ));
        assert!(matches!(
            Session::with_grid(Grid::filled(15, Cell::Wall), Settings::default(), 0),
            Err(LabyrinthError::NoOpenCells)
        ));
        let bad = Settings {
            side: 1,
            ..Default::default()
        };
        assert!(matches!(
            Session::generate(bad, 0),
            Err(LabyrinthError::InvalidSide { side: 1, .. })
        ));
        let bad = Settings {
            walk_speed: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            Session::with_grid(Grid::walled(15), bad, 0),
            Err(LabyrinthError::InvalidSetting { name: "walk_speed", .. })
        ));
    }

    #[test]
    fn test_pickup_updates_export() {
        let mut session = Session::with_grid(Grid::walled(15), Settings::default(), 3).unwrap();
        let first = session.current_item().unwrap();
        session.state.grid.set(first.x, first.z, Cell::Open);
        session.state.grid.set(3, 3, Cell::Item);
        session.state.item = Some(Item {
            x: 3,
            z: 3,
            w: 1.0,
            h: 1.0,
        });
        session.state.agent.pos = crate::grid_to_world(Vec2::new(3.5, 3.9), 100.0, 15);

        let out = session.tick(&TickInput::default(), 1.0 / 60.0);
        assert!(out.collected.is_some());
        assert_eq!(session.collected(), 1);
        let next = session.current_item().unwrap();
        assert_ne!((next.x, next.z), (3, 3));

        let decoded = decode_grid(session.export_grid_buffer(), 15).unwrap();
        assert_eq!(decoded.cell_at(3, 3), Cell::Open);
        assert_eq!(decoded.cell_at(next.x, next.z), Cell::Item);
        assert_eq!(decoded.count(Cell::Item), 1);
    }

    #[test]
    fn test_frame_matches_state() {
        let mut session = Session::generate(Settings::default(), 11).unwrap();
        let pose = session.agent().pose();
        let item = session.current_item().unwrap();
        let frame = session.frame();
        assert_eq!(frame.side, 15);
        assert_eq!(frame.agent, pose);
        let item_pose = frame.item.unwrap();
        assert_eq!(
            item_pose.pos,
            crate::cell_center_world(item.x, item.z, 100.0, 15)
        );
    }
}
