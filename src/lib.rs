//! Rippler - a grid of tiles that ripples outward from every click
//!
//! Core modules:
//! - `ripple`: Deterministic propagation engine (grid, waves, rotation, policy)
//! - `renderer`: Renderer seam (DOM on wasm32, recording everywhere)
//! - `settings`: Variant presets and tunable policy constants
//! - `headless`: Drives a recording renderer to completion without a browser

pub mod error;
pub mod headless;
pub mod renderer;
pub mod ripple;
pub mod settings;

pub use error::ConfigError;
pub use ripple::{Generation, Rippler, Tile, WaveId};
pub use settings::{ClaimPolicy, Settings, SpinAxis, Variant};

use glam::Vec2;

/// Ripple configuration constants
pub mod consts {
    /// Tile radius in CSS pixels
    pub const TILE_RADIUS: u32 = 16;
    /// Tile diameter - the grid pitch
    pub const TILE_DIAMETER: u32 = 2 * TILE_RADIUS;

    /// Spin added per activation (degrees)
    pub const ROTATION_STEP: u32 = 45;
    /// A tile settles each time its spin completes this many degrees
    pub const CYCLE_DEGREES: u32 = 360;

    /// Spin at which the first color is shown
    pub const COLOR_OFFSET: u32 = 90;
    /// Spin between color changes (one half-flip)
    pub const COLOR_INTERVAL: u32 = 180;

    /// CSS transform transition length
    pub const TRANSITION_MS: u32 = 300;

    /// Category20 palette used by the card variant
    pub const CATEGORY20: [&str; 20] = [
        "#1f77b4", "#aec7e8", "#ff7f0e", "#ffbb78", "#2ca02c", "#98df8a", "#d62728",
        "#ff9896", "#9467bd", "#c5b0d5", "#8c564b", "#c49c94", "#e377c2", "#f7b6d2",
        "#7f7f7f", "#c7c7c7", "#bcbd22", "#dbdb8d", "#17becf", "#9edae5",
    ];
}

/// Bearing of a screen-space delta in degrees, in (-180, 180]
///
/// Screen y grows downward, so a positive bearing turns clockwise.
#[inline]
pub fn bearing_degrees(delta: Vec2) -> f32 {
    delta.y.atan2(delta.x).to_degrees()
}
