//! Angle and color policy
//!
//! Pure functions of their inputs; all constants come from [`Settings`].

use super::grid::Tile;
use crate::bearing_degrees;
use crate::settings::{Settings, SpinAxis};

/// Rotation/color rules for one engine
#[derive(Debug, Clone)]
pub struct Policy {
    diameter: f32,
    bearing_offset: f32,
    rotation_step: u32,
    cycle_degrees: u32,
    spin_axis: SpinAxis,
    color_offset: u32,
    color_interval: u32,
    palette: Vec<String>,
}

impl Policy {
    /// Settings must already be validated
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            diameter: settings.tile_diameter as f32,
            bearing_offset: settings.bearing_offset,
            rotation_step: settings.rotation_step,
            cycle_degrees: settings.cycle_degrees,
            spin_axis: settings.spin_axis,
            color_offset: settings.color_offset,
            color_interval: settings.color_interval,
            palette: settings.palette.clone(),
        }
    }

    #[inline]
    pub fn rotation_step(&self) -> u32 {
        self.rotation_step
    }

    #[inline]
    pub fn spin_axis(&self) -> SpinAxis {
        self.spin_axis
    }

    /// In-plane rotation for `target` in a wave that started at `source`
    ///
    /// The bearing from source to target in pixel space, plus the offset.
    /// A wave's own origin has no bearing and gets the bare offset.
    pub fn angle_for(&self, source: Tile, target: Tile) -> f32 {
        if source == target {
            return self.bearing_offset;
        }
        bearing_degrees(target.offset_from(source) * self.diameter) + self.bearing_offset
    }

    /// True once the spin has landed on a whole cycle
    pub fn is_settled(&self, rotation: u32) -> bool {
        rotation % self.cycle_degrees == 0
    }

    /// Palette entry for a spin total, if one applies yet
    pub fn color_for(&self, rotation: u32) -> Option<&str> {
        if self.palette.is_empty() {
            return None;
        }
        let shifted = rotation.checked_sub(self.color_offset)?;
        let index = (shifted / self.color_interval) as usize % self.palette.len();
        Some(&self.palette[index])
    }
}
