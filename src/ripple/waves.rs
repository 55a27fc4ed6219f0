//! Wave identity: click sources and per-tile wave claims

use serde::{Deserialize, Serialize};

use super::grid::{Grid, Tile};
use crate::settings::ClaimPolicy;

/// One user click. Issued from 1 upward; 0 is never handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WaveId(u32);

impl WaveId {
    #[inline]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for WaveId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Append-only origin table indexed by wave id
#[derive(Debug, Clone)]
pub struct ClickSources {
    /// Slot 0 is the sentinel so ids stay 1-based
    origins: Vec<Option<Tile>>,
}

impl Default for ClickSources {
    fn default() -> Self {
        Self::new()
    }
}

impl ClickSources {
    pub fn new() -> Self {
        Self { origins: vec![None] }
    }

    /// Record a click and hand out its wave id
    pub fn push(&mut self, origin: Tile) -> WaveId {
        let id = u32::try_from(self.origins.len()).unwrap_or(u32::MAX);
        self.origins.push(Some(origin));
        WaveId(id)
    }

    /// Where a wave started
    pub fn origin(&self, wave: WaveId) -> Option<Tile> {
        self.origins.get(wave.0 as usize).copied().flatten()
    }

    /// Number of clicks recorded
    pub fn len(&self) -> usize {
        self.origins.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Most recent wave, if any
    pub fn latest(&self) -> Option<WaveId> {
        (!self.is_empty()).then(|| WaveId((self.origins.len() - 1) as u32))
    }
}

/// Last wave to claim each tile
#[derive(Debug, Clone)]
pub struct WaveTracker {
    num_wide: usize,
    claims: Vec<Option<WaveId>>,
}

impl WaveTracker {
    /// Empty tracker covering every tile of `grid`
    pub fn new(grid: &Grid) -> Self {
        Self {
            num_wide: grid.num_wide(),
            claims: vec![None; grid.area()],
        }
    }

    #[inline]
    fn slot(&self, tile: Tile) -> usize {
        debug_assert!(tile.col < self.num_wide, "tile {} outside tracker", tile);
        tile.row * self.num_wide + tile.col
    }

    /// Wave that currently owns a tile
    pub fn wave_of(&self, tile: Tile) -> Option<WaveId> {
        self.claims[self.slot(tile)]
    }

    /// Claim for `wave` if the tile is unclaimed or held by a later wave
    ///
    /// Returns true when the record changed. An earlier click's front always
    /// takes contested tiles from later ones and is never displaced by them.
    pub fn record_if_newer(&mut self, tile: Tile, wave: WaveId) -> bool {
        let slot = self.slot(tile);
        match self.claims[slot] {
            Some(current) if wave >= current => false,
            _ => {
                self.claims[slot] = Some(wave);
                true
            }
        }
    }

    /// Claim under the given contest policy
    pub fn claim(&mut self, tile: Tile, wave: WaveId, policy: ClaimPolicy) -> bool {
        match policy {
            ClaimPolicy::EarliestWins => self.record_if_newer(tile, wave),
            ClaimPolicy::LatestWins => {
                let slot = self.slot(tile);
                match self.claims[slot] {
                    Some(current) if wave <= current => false,
                    _ => {
                        self.claims[slot] = Some(wave);
                        true
                    }
                }
            }
        }
    }

    /// Unconditional claim for the tile a user clicked
    pub fn assign_origin(&mut self, tile: Tile, wave: WaveId) {
        let slot = self.slot(tile);
        self.claims[slot] = Some(wave);
    }

    /// Number of tiles currently held by `wave`
    pub fn count(&self, wave: WaveId) -> usize {
        self.claims.iter().filter(|c| **c == Some(wave)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> (WaveTracker, ClickSources) {
        let grid = Grid::build(128.0, 128.0, 32);
        (WaveTracker::new(&grid), ClickSources::new())
    }

    #[test]
    fn test_click_sources_are_one_based() {
        let mut sources = ClickSources::new();
        assert!(sources.is_empty());
        assert_eq!(sources.latest(), None);

        let first = sources.push(Tile::new(0, 0));
        let second = sources.push(Tile::new(3, 1));
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 2);
        assert_eq!(sources.len(), 2);
        assert_eq!(sources.origin(first), Some(Tile::new(0, 0)));
        assert_eq!(sources.origin(second), Some(Tile::new(3, 1)));
        assert_eq!(sources.origin(WaveId(0)), None);
        assert_eq!(sources.origin(WaveId(3)), None);
        assert_eq!(sources.latest(), Some(second));
    }

    #[test]
    fn test_record_if_newer_keeps_earliest() {
        let (mut tracker, mut sources) = tracker();
        let w1 = sources.push(Tile::new(0, 0));
        let w2 = sources.push(Tile::new(3, 3));
        let tile = Tile::new(1, 1);

        assert!(tracker.record_if_newer(tile, w2));
        assert_eq!(tracker.wave_of(tile), Some(w2));

        // Same wave again is not a new claim
        assert!(!tracker.record_if_newer(tile, w2));

        // Earlier wave takes it over
        assert!(tracker.record_if_newer(tile, w1));
        assert_eq!(tracker.wave_of(tile), Some(w1));

        // Later wave cannot take it back
        assert!(!tracker.record_if_newer(tile, w2));
        assert_eq!(tracker.wave_of(tile), Some(w1));
    }

    #[test]
    fn test_latest_wins_policy() {
        let (mut tracker, mut sources) = tracker();
        let w1 = sources.push(Tile::new(0, 0));
        let w2 = sources.push(Tile::new(3, 3));
        let tile = Tile::new(2, 2);

        assert!(tracker.claim(tile, w1, ClaimPolicy::LatestWins));
        assert!(tracker.claim(tile, w2, ClaimPolicy::LatestWins));
        assert!(!tracker.claim(tile, w1, ClaimPolicy::LatestWins));
        assert!(!tracker.claim(tile, w2, ClaimPolicy::LatestWins));
        assert_eq!(tracker.wave_of(tile), Some(w2));
    }

    #[test]
    fn test_assign_origin_overrides() {
        let (mut tracker, mut sources) = tracker();
        let w1 = sources.push(Tile::new(0, 0));
        let w2 = sources.push(Tile::new(0, 0));
        let tile = Tile::new(0, 0);

        tracker.assign_origin(tile, w1);
        tracker.assign_origin(tile, w2);
        assert_eq!(tracker.wave_of(tile), Some(w2));
        assert_eq!(tracker.count(w2), 1);
        assert_eq!(tracker.count(w1), 0);
    }
}
