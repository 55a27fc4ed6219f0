//! Ripple settings and presets
//!
//! Persisted in LocalStorage on the web. Every policy constant the engine
//! uses lives here so alternative rotation/color schemes are data, not code.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Look-and-feel presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// Round tiles flipping about X, bearing measured from "up", no colors
    Circles,
    /// Square cards flipping about Y and cycling through a palette
    #[default]
    Cards,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Circles => "Circles",
            Variant::Cards => "Cards",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "circles" | "circle" => Some(Variant::Circles),
            "cards" | "card" => Some(Variant::Cards),
            _ => None,
        }
    }

    /// CSS class stamped on each tile element
    pub fn css_class(&self) -> &'static str {
        match self {
            Variant::Circles => "circle",
            Variant::Cards => "card",
        }
    }

    /// Axis the tile flips about
    pub fn spin_axis(&self) -> SpinAxis {
        match self {
            Variant::Circles => SpinAxis::X,
            Variant::Cards => SpinAxis::Y,
        }
    }

    /// Phase added to every bearing (degrees)
    pub fn bearing_offset(&self) -> f32 {
        match self {
            Variant::Circles => 90.0,
            Variant::Cards => 0.0,
        }
    }

    pub fn palette(&self) -> Vec<String> {
        match self {
            Variant::Circles => Vec::new(),
            Variant::Cards => CATEGORY20.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Axis of the per-activation flip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpinAxis {
    X,
    Y,
}

impl SpinAxis {
    /// CSS rotate function for this axis
    pub fn css_function(&self) -> &'static str {
        match self {
            SpinAxis::X => "rotateX",
            SpinAxis::Y => "rotateY",
        }
    }
}

/// How overlapping waves contest a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ClaimPolicy {
    /// A lower (earlier) wave id takes tiles from higher ones, never the reverse
    #[default]
    EarliestWins,
    /// A newer click's front overrides older waves
    LatestWins,
}

/// Ripple settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Preset the remaining fields were derived from
    pub variant: Variant,

    // === Grid ===
    /// Tile pitch in CSS pixels
    pub tile_diameter: u32,

    // === Rotation ===
    /// Degrees of spin added per activation
    pub rotation_step: u32,
    /// Tiles settle when accumulated spin is a multiple of this
    pub cycle_degrees: u32,
    /// Flip axis
    pub spin_axis: SpinAxis,
    /// Phase added to the source-to-tile bearing (degrees)
    pub bearing_offset: f32,

    // === Color ===
    /// Spin at which palette index 0 first shows
    pub color_offset: u32,
    /// Spin per palette step
    pub color_interval: u32,
    /// Ordered colors; empty disables recoloring
    pub palette: Vec<String>,

    // === Waves ===
    pub claim_policy: ClaimPolicy,

    // === Renderer ===
    /// Length of the transform transition
    pub transition_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_variant(Variant::default())
    }
}

impl Settings {
    /// Create settings from a preset
    pub fn from_variant(variant: Variant) -> Self {
        Self {
            variant,
            tile_diameter: TILE_DIAMETER,
            rotation_step: ROTATION_STEP,
            cycle_degrees: CYCLE_DEGREES,
            spin_axis: variant.spin_axis(),
            bearing_offset: variant.bearing_offset(),
            color_offset: COLOR_OFFSET,
            color_interval: COLOR_INTERVAL,
            palette: variant.palette(),
            claim_policy: ClaimPolicy::default(),
            transition_ms: TRANSITION_MS,
        }
    }

    /// Switch preset (updates only the variant-dependent fields)
    pub fn apply_variant(&mut self, variant: Variant) {
        self.variant = variant;
        self.spin_axis = variant.spin_axis();
        self.bearing_offset = variant.bearing_offset();
        self.palette = variant.palette();
    }

    /// Reject settings under which ripples could never settle
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tile_diameter == 0 {
            return Err(ConfigError::ZeroDiameter);
        }
        if self.rotation_step == 0 {
            return Err(ConfigError::ZeroRotationStep);
        }
        if self.cycle_degrees == 0 || self.cycle_degrees % self.rotation_step != 0 {
            return Err(ConfigError::CycleNotMultipleOfStep {
                cycle: self.cycle_degrees,
                step: self.rotation_step,
            });
        }
        if self.color_interval == 0 {
            return Err(ConfigError::ZeroColorInterval);
        }
        Ok(())
    }

    /// Parse and validate settings from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "rippler_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
