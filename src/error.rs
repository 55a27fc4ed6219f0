//! Configuration errors

use thiserror::Error;

/// Reasons a [`Settings`](crate::Settings) value cannot drive an engine
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("tile diameter must be non-zero")]
    ZeroDiameter,

    #[error("rotation step must be non-zero")]
    ZeroRotationStep,

    /// The settle check only fires on exact multiples of the cycle
    #[error("cycle of {cycle} degrees is not a multiple of the {step} degree rotation step")]
    CycleNotMultipleOfStep { cycle: u32, step: u32 },

    #[error("color interval must be non-zero")]
    ZeroColorInterval,

    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}
