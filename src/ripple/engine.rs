//! Ripple propagation engine
//!
//! Two stimuli drive everything: a user activating a tile, and the renderer
//! reporting that a tile's transition finished. Each finished transition may
//! claim neighbors for the tile's wave and re-activate the tile, until its
//! spin lands on a whole cycle.

use super::grid::{Grid, Tile};
use super::policy::Policy;
use super::state::{Generation, RippleState, TilePhase};
use super::waves::WaveId;
use crate::error::ConfigError;
use crate::renderer::{Renderer, TilePlacement, Transform};
use crate::settings::{ClaimPolicy, Settings};

/// Counters for the current generation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RippleStats {
    /// Transforms issued
    pub activations: u64,
    /// Finished transitions that relayed the wave
    pub relays: u64,
    /// Finished transitions that stopped on a whole cycle
    pub settles: u64,
    /// Events from a previous generation
    pub stale_events: u64,
    /// Events for coordinates outside the grid or tiles with no wave
    pub ignored_events: u64,
}

/// Ripple engine bound to a renderer
pub struct Rippler<R: Renderer> {
    settings: Settings,
    policy: Policy,
    state: RippleState,
    renderer: R,
    /// Renderer handles, row-major
    handles: Vec<R::Handle>,
    stats: RippleStats,
}

impl<R: Renderer> Rippler<R> {
    /// Validate settings and lay out the first grid
    pub fn new(settings: Settings, renderer: R, width: f64, height: f64) -> Result<Self, ConfigError> {
        settings.validate()?;
        let policy = Policy::from_settings(&settings);
        let grid = Grid::build(0.0, 0.0, settings.tile_diameter);
        let mut rippler = Self {
            settings,
            policy,
            state: RippleState::new(grid, Generation::default()),
            renderer,
            handles: Vec::new(),
            stats: RippleStats::default(),
        };
        rippler.rebuild(width, height);
        Ok(rippler)
    }

    /// Tear down every tile and start a fresh generation sized to the container
    ///
    /// Returns (num_wide, num_tall).
    pub fn rebuild(&mut self, width: f64, height: f64) -> (usize, usize) {
        let generation = self.state.generation.next();
        let grid = Grid::build(width, height, self.settings.tile_diameter);

        self.renderer.remove_all_tiles();
        self.handles.clear();
        self.handles.reserve(grid.area());
        for tile in grid.tiles() {
            let (left, top) = grid.origin_of(tile);
            let placement = TilePlacement {
                generation,
                tile,
                left,
                top,
                diameter: grid.diameter(),
            };
            self.handles.push(self.renderer.create_tile(&placement));
        }

        let dims = grid.dimensions();
        self.state = RippleState::new(grid, generation);
        self.stats = RippleStats::default();

        log::info!(
            "Grid rebuilt: {}x{} tiles for {}x{} container (generation {})",
            dims.0,
            dims.1,
            width,
            height,
            generation
        );
        dims
    }

    /// A user selected `tile`: start a new wave there
    pub fn on_user_activate(&mut self, generation: Generation, tile: Tile) -> Option<WaveId> {
        if !self.accept(generation, tile) {
            return None;
        }

        let wave = self.state.sources.push(tile);
        self.state.tracker.assign_origin(tile, wave);
        log::info!("Wave {} started at {}", wave, tile);

        self.activate(tile, wave);
        Some(wave)
    }

    /// The renderer finished animating `tile`
    pub fn on_animation_complete(&mut self, generation: Generation, tile: Tile) {
        if !self.accept(generation, tile) {
            return;
        }

        let Some(wave) = self.state.tracker.wave_of(tile) else {
            log::debug!("Transition end on unclaimed tile {}", tile);
            self.stats.ignored_events += 1;
            return;
        };

        let rotation = self.state.rotations.get(tile);
        if self.policy.is_settled(rotation) {
            log::trace!("Tile {} settled at {} degrees (wave {})", tile, rotation, wave);
            self.stats.settles += 1;
            return;
        }
        self.stats.relays += 1;

        // Color tracks the spin the tile just finished showing
        let color = self.policy.color_for(rotation).map(str::to_owned);

        let claim_policy = self.settings.claim_policy;
        let claimed = self.claim_neighbors(tile, wave, claim_policy);
        log::trace!("Tile {} relays wave {} to {} neighbors", tile, wave, claimed.len());

        for neighbor in claimed {
            self.activate(neighbor, wave);
            let spin = self.state.rotations.get(neighbor);
            if let Some(neighbor_color) = self.policy.color_for(spin).map(str::to_owned) {
                self.paint(neighbor, &neighbor_color);
            }
        }

        self.activate(tile, wave);
        if let Some(color) = color {
            self.paint(tile, &color);
        }
    }

    /// Neighbors newly claimed for `wave`, in fixed neighbor order
    fn claim_neighbors(&mut self, tile: Tile, wave: WaveId, claim_policy: ClaimPolicy) -> Vec<Tile> {
        let RippleState { grid, tracker, .. } = &mut self.state;
        grid.neighbors_of(tile)
            .filter(|&neighbor| tracker.claim(neighbor, wave, claim_policy))
            .collect()
    }

    /// Advance a tile's spin and point it away from its wave's origin
    fn activate(&mut self, tile: Tile, wave: WaveId) {
        let Some(source) = self.state.sources.origin(wave) else {
            debug_assert!(false, "wave {} has no click source", wave);
            log::error!("Wave {} has no click source; skipping {}", wave, tile);
            return;
        };

        let spin = self.state.rotations.advance(tile, self.policy.rotation_step());
        let transform = Transform {
            rotate_z: self.policy.angle_for(source, tile),
            spin: spin as f32,
            spin_axis: self.policy.spin_axis(),
            translate_x: 0.0,
            translate_y: 0.0,
        };

        let index = self.state.grid.index(tile);
        self.renderer.apply_transform(&self.handles[index], &transform);
        self.stats.activations += 1;
    }

    fn paint(&mut self, tile: Tile, color: &str) {
        let index = self.state.grid.index(tile);
        self.renderer.apply_color(&self.handles[index], color);
    }

    /// Filter events from old generations and coordinates outside the grid
    fn accept(&mut self, generation: Generation, tile: Tile) -> bool {
        if generation != self.state.generation {
            log::debug!(
                "Dropping event for {} from generation {} (current {})",
                tile,
                generation,
                self.state.generation
            );
            self.stats.stale_events += 1;
            return false;
        }
        if !self.state.grid.contains(tile) {
            log::debug!("Ignoring event for {} outside the grid", tile);
            self.stats.ignored_events += 1;
            return false;
        }
        true
    }

    pub fn generation(&self) -> Generation {
        self.state.generation
    }

    pub fn state(&self) -> &RippleState {
        &self.state
    }

    pub fn grid(&self) -> &Grid {
        &self.state.grid
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    pub fn stats(&self) -> RippleStats {
        self.stats
    }

    pub fn phase_of(&self, tile: Tile) -> TilePhase {
        self.state.phase_of(tile, &self.policy)
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}
