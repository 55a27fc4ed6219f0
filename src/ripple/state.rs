//! Owned ripple context for one grid generation
//!
//! Everything a rebuild throws away lives here, so a resize is a single
//! replacement of this struct.

use serde::{Deserialize, Serialize};

use super::grid::{Grid, Tile};
use super::policy::Policy;
use super::rotation::RotationState;
use super::waves::{ClickSources, WaveId, WaveTracker};

/// Rebuild counter stamped on every tile the renderer creates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Generation(pub u32);

impl Generation {
    pub fn next(self) -> Self {
        Generation(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a tile is in its ripple lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TilePhase {
    /// Never activated
    Idle,
    /// Mid-cycle; its next finished animation relays the wave
    Activated,
    /// Spin landed on a whole cycle; propagation through it stopped
    Settled,
}

/// Grid, click sources, wave claims and rotation for one generation
#[derive(Debug, Clone)]
pub struct RippleState {
    pub(crate) generation: Generation,
    pub(crate) grid: Grid,
    pub(crate) sources: ClickSources,
    pub(crate) tracker: WaveTracker,
    pub(crate) rotations: RotationState,
}

impl RippleState {
    pub fn new(grid: Grid, generation: Generation) -> Self {
        Self {
            generation,
            tracker: WaveTracker::new(&grid),
            rotations: RotationState::new(&grid),
            sources: ClickSources::new(),
            grid,
        }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn sources(&self) -> &ClickSources {
        &self.sources
    }

    pub fn wave_of(&self, tile: Tile) -> Option<WaveId> {
        self.tracker.wave_of(tile)
    }

    pub fn rotation_of(&self, tile: Tile) -> u32 {
        self.rotations.get(tile)
    }

    pub fn phase_of(&self, tile: Tile, policy: &Policy) -> TilePhase {
        match self.rotations.get(tile) {
            0 => TilePhase::Idle,
            r if policy.is_settled(r) => TilePhase::Settled,
            _ => TilePhase::Activated,
        }
    }

    /// Tiles currently held by `wave`
    pub fn claimed_by(&self, wave: WaveId) -> usize {
        self.tracker.count(wave)
    }
}
