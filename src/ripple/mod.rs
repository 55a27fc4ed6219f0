//! Ripple propagation module
//!
//! All propagation logic lives here. This module must stay deterministic:
//! - No clocks, no randomness
//! - Fixed neighbor order (row-major 3×3 scan)
//! - No rendering or platform dependencies beyond the `Renderer` trait

pub mod engine;
pub mod grid;
pub mod policy;
pub mod rotation;
pub mod state;
pub mod waves;

pub use engine::{RippleStats, Rippler};
pub use grid::{Grid, Tile};
pub use policy::Policy;
pub use rotation::RotationState;
pub use state::{Generation, RippleState, TilePhase};
pub use waves::{ClickSources, WaveId, WaveTracker};
