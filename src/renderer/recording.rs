//! In-memory renderer that records every directive
//!
//! Stands in for the browser: each transform puts the tile "in flight"
//! until the driver reports it finished, the way a CSS transition would.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::{Renderer, TilePlacement, Transform};
use crate::ripple::{Generation, Tile};

/// Handle for a recorded tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordedTile {
    pub generation: Generation,
    pub tile: Tile,
}

/// One call the engine made on the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum RenderCall {
    CreateTile { placement: TilePlacement },
    RemoveAllTiles,
    Transform { target: RecordedTile, transform: Transform },
    Color { target: RecordedTile, color: String },
}

#[derive(Debug, Default)]
pub struct RecordingRenderer {
    calls: Vec<RenderCall>,
    /// Tiles with a transition running, oldest first
    in_flight: VecDeque<RecordedTile>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far
    pub fn calls(&self) -> &[RenderCall] {
        &self.calls
    }

    /// Drain the call log
    pub fn take_calls(&mut self) -> Vec<RenderCall> {
        std::mem::take(&mut self.calls)
    }

    /// Only the transform/color directives, in order
    pub fn directives(&self) -> impl Iterator<Item = &RenderCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, RenderCall::Transform { .. } | RenderCall::Color { .. }))
    }

    pub fn in_flight(&self) -> impl Iterator<Item = &RecordedTile> {
        self.in_flight.iter()
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight.is_empty()
    }

    /// Finish the oldest running transition
    pub fn pop_finished(&mut self) -> Option<RecordedTile> {
        self.in_flight.pop_front()
    }

    /// Finish the oldest running transition matching `pred`
    pub fn pop_finished_where<F>(&mut self, mut pred: F) -> Option<RecordedTile>
    where
        F: FnMut(&RecordedTile) -> bool,
    {
        let index = self.in_flight.iter().position(|t| pred(t))?;
        self.in_flight.remove(index)
    }
}

impl Renderer for RecordingRenderer {
    type Handle = RecordedTile;

    fn create_tile(&mut self, placement: &TilePlacement) -> RecordedTile {
        self.calls.push(RenderCall::CreateTile {
            placement: *placement,
        });
        RecordedTile {
            generation: placement.generation,
            tile: placement.tile,
        }
    }

    fn remove_all_tiles(&mut self) {
        self.calls.push(RenderCall::RemoveAllTiles);
        // Removed elements never fire transitionend
        self.in_flight.clear();
    }

    fn apply_transform(&mut self, handle: &RecordedTile, transform: &Transform) {
        self.calls.push(RenderCall::Transform {
            target: *handle,
            transform: *transform,
        });
        // Retargeting a running transition still ends in a single event
        if !self.in_flight.contains(handle) {
            self.in_flight.push_back(*handle);
        }
    }

    fn apply_color(&mut self, handle: &RecordedTile, color: &str) {
        self.calls.push(RenderCall::Color {
            target: *handle,
            color: color.to_string(),
        });
    }
}
