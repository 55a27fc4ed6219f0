//! Tile coordinates and grid topology
//!
//! The grid owns no per-tile data. It sizes the coordinate space from the
//! container and answers bounds/neighbor/index questions for the dense
//! per-tile tables.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Row-major scan of the 3×3 block around a tile, center skipped.
/// Neighbor order drives claim order, so it must stay fixed.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// One grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tile {
    pub row: usize,
    pub col: usize,
}

impl Tile {
    pub const fn new(row: usize, col: usize) -> Self {
        Tile { row, col }
    }

    /// Vector from `origin` to this tile in tile units (x = col, y = row)
    pub fn offset_from(&self, origin: Tile) -> Vec2 {
        Vec2::new(
            self.col as f32 - origin.col as f32,
            self.row as f32 - origin.row as f32,
        )
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Fixed-size tile arrangement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    num_wide: usize,
    num_tall: usize,
    diameter: u32,
}

impl Grid {
    /// Size a grid to fit a container, truncating partial tiles
    ///
    /// Zero, negative or NaN dimensions give an empty grid.
    pub fn build(width: f64, height: f64, diameter: u32) -> Self {
        let fit = |extent: f64| -> usize {
            if diameter == 0 {
                return 0;
            }
            // `as` saturates: negatives and NaN land on 0
            (extent / f64::from(diameter)).floor() as usize
        };
        Self {
            num_wide: fit(width),
            num_tall: fit(height),
            diameter,
        }
    }

    #[inline]
    pub fn num_wide(&self) -> usize {
        self.num_wide
    }

    #[inline]
    pub fn num_tall(&self) -> usize {
        self.num_tall
    }

    #[inline]
    pub fn diameter(&self) -> u32 {
        self.diameter
    }

    /// (num_wide, num_tall)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.num_wide, self.num_tall)
    }

    /// Number of tiles
    pub fn area(&self) -> usize {
        self.num_wide * self.num_tall
    }

    pub fn is_empty(&self) -> bool {
        self.area() == 0
    }

    #[inline]
    pub fn contains(&self, tile: Tile) -> bool {
        tile.row < self.num_tall && tile.col < self.num_wide
    }

    /// Row-major slot for dense per-tile tables
    ///
    /// Panics if the tile is outside the grid.
    #[inline]
    pub fn index(&self, tile: Tile) -> usize {
        assert!(self.contains(tile), "tile {} outside {}x{} grid", tile, self.num_wide, self.num_tall);
        tile.row * self.num_wide + tile.col
    }

    /// In-bounds members of the surrounding 3×3 block, row-major, center excluded
    pub fn neighbors_of(&self, tile: Tile) -> impl Iterator<Item = Tile> + '_ {
        NEIGHBOR_OFFSETS.iter().filter_map(move |&(dr, dc)| {
            let row = tile.row.checked_add_signed(dr)?;
            let col = tile.col.checked_add_signed(dc)?;
            let neighbor = Tile::new(row, col);
            self.contains(neighbor).then_some(neighbor)
        })
    }

    /// Every tile, row-major
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        (0..self.num_tall).flat_map(move |row| (0..self.num_wide).map(move |col| Tile::new(row, col)))
    }

    /// Top-left pixel corner of a tile
    pub fn origin_of(&self, tile: Tile) -> (f32, f32) {
        let d = self.diameter as f32;
        (tile.col as f32 * d, tile.row as f32 * d)
    }
}
