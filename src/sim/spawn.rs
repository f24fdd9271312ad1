//! Item spawning and pickup
//!
//! Exactly one item lives in the labyrinth. Walking close enough to it clears
//! its cell and immediately spawns a replacement somewhere else.

use rand::Rng;

use super::grid::Cell;
use super::state::{Item, WalkState};

/// Place a new item on a random open cell, avoiding `exclude` when possible.
///
/// Uses rejection sampling bounded by `max_spawn_attempts`, then falls back
/// to picking among a scan of open cells. Returns `None` only when the grid
/// has no open cell at all.
pub fn spawn_item(state: &mut WalkState, exclude: Option<(usize, usize)>) -> Option<Item> {
    let side = state.grid.side();
    let mut chosen = None;

    for _ in 0..state.settings.max_spawn_attempts {
        let x = state.rng.random_range(0..side);
        let z = state.rng.random_range(0..side);
        if state.grid.cell_at(x, z) == Cell::Open && Some((x, z)) != exclude {
            chosen = Some((x, z));
            break;
        }
    }

    if chosen.is_none() {
        let open = state.grid.open_cells();
        let preferred: Vec<_> = open.iter().copied().filter(|&c| Some(c) != exclude).collect();
        let pool = if preferred.is_empty() { open } else { preferred };
        if pool.is_empty() {
            log::warn!("No open cell left for an item");
            state.item = None;
            return None;
        }
        log::debug!("Item spawn fell back to scanning {} open cells", pool.len());
        chosen = Some(pool[state.rng.random_range(0..pool.len())]);
    }

    let (x, z) = chosen?;
    let item = Item {
        x,
        z,
        w: state.settings.item_size,
        h: state.settings.item_size,
    };
    state.grid.set(x, z, Cell::Item);
    state.item = Some(item);
    log::debug!("Item spawned at ({x}, {z})");
    Some(item)
}

/// Collect the item if the agent is within reach of it.
///
/// Distance is measured in grid cells between the agent and the center of
/// the item's cell. On pickup the cell reverts to `Open` and a new item is
/// spawned elsewhere. Returns the collected item.
pub fn check_pickup(state: &mut WalkState) -> Option<Item> {
    let item = state.item?;
    if state.grid.get(item.x, item.z) != Some(Cell::Item) {
        return None;
    }
    let dist = state.agent_grid_pos().distance(item.grid_center());
    if dist >= state.settings.pickup_radius {
        return None;
    }

    state.grid.set(item.x, item.z, Cell::Open);
    state.item = None;
    state.collected += 1;
    log::info!(
        "Picked up item at ({}, {}) - {} collected",
        item.x,
        item.z,
        state.collected
    );
    spawn_item(state, Some((item.x, item.z)));
    Some(item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::grid::Grid;
    use crate::sim::maze;
    use glam::Vec2;

    fn open_state() -> WalkState {
        WalkState::new(Grid::walled(15), Settings::default(), 77).unwrap()
    }

    fn place_item(state: &mut WalkState, x: usize, z: usize) {
        state.grid.set(x, z, Cell::Item);
        state.item = Some(Item { x, z, w: 1.0, h: 1.0 });
    }

    fn move_agent_to_grid(state: &mut WalkState, g: Vec2) {
        state.agent.pos = crate::grid_to_world(g, state.settings.world_half_extent, 15);
    }

    #[test]
    fn test_spawn_marks_open_cell() {
        let mut state = open_state();
        let item = spawn_item(&mut state, None).unwrap();
        assert_eq!(state.grid.cell_at(item.x, item.z), Cell::Item);
        assert_eq!(state.grid.count(Cell::Item), 1);
        assert!(!state.grid.is_border(item.x, item.z));
        assert_eq!(state.item, Some(item));
        assert!((item.w - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_spawn_on_generated_maze() {
        let grid = maze::generate(15, 42).unwrap();
        let mut state = WalkState::new(grid, Settings::default(), 42).unwrap();
        for _ in 0..20 {
            let item = spawn_item(&mut state, None).unwrap();
            assert_eq!(state.grid.cell_at(item.x, item.z), Cell::Item);
            state.grid.set(item.x, item.z, Cell::Open);
        }
    }

    #[test]
    fn test_spawn_fallback_scan() {
        let settings = Settings {
            side: 5,
            max_spawn_attempts: 0,
            ..Default::default()
        };
        let mut grid = Grid::filled(5, Cell::Wall);
        grid.set(3, 1, Cell::Open);
        grid.set(2, 2, Cell::Open);
        let mut state = WalkState::new(grid, settings, 1).unwrap();
        let item = spawn_item(&mut state, Some((2, 2))).unwrap();
        assert_eq!((item.x, item.z), (3, 1));
    }

    #[test]
    fn test_spawn_reuses_excluded_cell_when_alone() {
        let settings = Settings {
            side: 3,
            ..Default::default()
        };
        let mut state = WalkState::new(Grid::walled(3), settings, 1).unwrap();
        let item = spawn_item(&mut state, Some((1, 1))).unwrap();
        assert_eq!((item.x, item.z), (1, 1));
    }

    #[test]
    fn test_spawn_without_open_cells() {
        let mut state = open_state();
        place_item(&mut state, 4, 4);
        for (x, z) in state.grid.open_cells() {
            state.grid.set(x, z, Cell::Wall);
        }
        state.item = None;
        assert!(spawn_item(&mut state, None).is_none());
        assert!(state.item.is_none());
    }

    #[test]
    fn test_pickup_within_reach() {
        let mut state = open_state();
        place_item(&mut state, 3, 3);
        move_agent_to_grid(&mut state, Vec2::new(3.5, 3.9));

        let collected = check_pickup(&mut state).unwrap();
        assert_eq!((collected.x, collected.z), (3, 3));
        assert_eq!(state.grid.cell_at(3, 3), Cell::Open);
        assert_eq!(state.collected, 1);

        let next = state.item.unwrap();
        assert_ne!((next.x, next.z), (3, 3));
        assert_eq!(state.grid.cell_at(next.x, next.z), Cell::Item);
        assert_eq!(state.grid.count(Cell::Item), 1);
    }

    #[test]
    fn test_no_pickup_out_of_reach() {
        let mut state = open_state();
        place_item(&mut state, 3, 3);
        move_agent_to_grid(&mut state, Vec2::new(4.6, 3.5));
        assert!(check_pickup(&mut state).is_none());
        assert_eq!(state.grid.cell_at(3, 3), Cell::Item);
        assert_eq!(state.collected, 0);
    }

    #[test]
    fn test_no_pickup_when_cell_was_cleared() {
        let mut state = open_state();
        place_item(&mut state, 3, 3);
        state.grid.set(3, 3, Cell::Open);
        move_agent_to_grid(&mut state, Vec2::new(3.5, 3.5));
        assert!(check_pickup(&mut state).is_none());
    }
}
