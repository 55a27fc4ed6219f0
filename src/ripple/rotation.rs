//! Per-tile cumulative spin

use super::grid::{Grid, Tile};

/// Accumulated spin per tile, in whole degrees
///
/// The accumulator never wraps so the rendered flip always turns forward.
/// Cycle position is `get(tile) % cycle`.
#[derive(Debug, Clone)]
pub struct RotationState {
    num_wide: usize,
    degrees: Vec<u32>,
}

impl RotationState {
    pub fn new(grid: &Grid) -> Self {
        Self {
            num_wide: grid.num_wide(),
            degrees: vec![0; grid.area()],
        }
    }

    #[inline]
    fn slot(&self, tile: Tile) -> usize {
        debug_assert!(tile.col < self.num_wide, "tile {} outside rotation table", tile);
        tile.row * self.num_wide + tile.col
    }

    /// Current accumulated spin (0 = never activated)
    pub fn get(&self, tile: Tile) -> u32 {
        self.degrees[self.slot(tile)]
    }

    /// Add one step and return the new total
    pub fn advance(&mut self, tile: Tile, step: u32) -> u32 {
        let slot = self.slot(tile);
        self.degrees[slot] = self.degrees[slot].saturating_add(step);
        self.degrees[slot]
    }

    /// Whole cycles completed
    pub fn cycles(&self, tile: Tile, cycle: u32) -> u32 {
        self.get(tile) / cycle
    }
}
