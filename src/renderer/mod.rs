//! Renderer seam
//!
//! The engine only ever talks to a [`Renderer`]. The DOM implementation
//! exists on wasm32; the recording one backs tests and headless runs.

#[cfg(target_arch = "wasm32")]
pub mod dom;
pub mod recording;

pub use recording::{RecordedTile, RecordingRenderer, RenderCall};

use serde::{Deserialize, Serialize};

use crate::ripple::{Generation, Tile};
use crate::settings::SpinAxis;

/// Where and for which generation a tile element should be created
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TilePlacement {
    pub generation: Generation,
    pub tile: Tile,
    /// Left edge in CSS pixels
    pub left: f32,
    /// Top edge in CSS pixels
    pub top: f32,
    pub diameter: u32,
}

/// Target pose of one tile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// In-plane rotation (degrees): bearing from the wave origin
    pub rotate_z: f32,
    /// Accumulated flip (degrees) about `spin_axis`
    pub spin: f32,
    pub spin_axis: SpinAxis,
    pub translate_x: f32,
    pub translate_y: f32,
}

impl Transform {
    /// CSS `transform` value; translate3d keeps the tile on its own layer
    pub fn to_css(&self) -> String {
        format!(
            "translate3d({}px, {}px, 0) rotate({}deg) {}({}deg)",
            self.translate_x,
            self.translate_y,
            self.rotate_z,
            self.spin_axis.css_function(),
            self.spin
        )
    }
}

/// Surface that shows tiles
pub trait Renderer {
    /// Whatever the surface needs to address one tile later
    type Handle;

    fn create_tile(&mut self, placement: &TilePlacement) -> Self::Handle;

    fn remove_all_tiles(&mut self);

    /// Start animating a tile toward `transform`
    ///
    /// The surface must eventually report completion through
    /// [`Rippler::on_animation_complete`](crate::Rippler::on_animation_complete).
    fn apply_transform(&mut self, handle: &Self::Handle, transform: &Transform);

    fn apply_color(&mut self, handle: &Self::Handle, color: &str);
}
