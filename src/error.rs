//! Error types
//!
//! Only configuration problems are errors. Out-of-order commands and lookups
//! for unknown horses are ignored by the simulation instead.

use thiserror::Error;

/// Configuration rejected while building a pool or schedule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A name or color catalog cannot cover every horse.
    #[error("{catalog} catalog has {available} entries, need {required}")]
    CatalogTooShort {
        catalog: &'static str,
        required: usize,
        available: usize,
    },

    /// A round asks for more horses than the pool holds.
    #[error("round needs {per_round} horses but the pool only has {pool}")]
    RosterExceedsPool { per_round: usize, pool: usize },

    /// Distance table does not have one entry per round.
    #[error("distance table has {available} entries for {rounds} rounds")]
    DistanceCount { rounds: usize, available: usize },

    /// Distances must be positive and strictly increasing by round.
    #[error("distance for round {round} ({distance}) must exceed the previous round ({previous})")]
    DistanceNotIncreasing {
        round: usize,
        distance: u32,
        previous: u32,
    },

    #[error("condition range is empty (min {min} > max {max})")]
    ConditionRange { min: u32, max: u32 },

    #[error("tick interval must be at least 1 ms")]
    ZeroTickInterval,

    /// A speed constant would let a horse stall or run backwards.
    #[error("speed setting {field} must be finite and positive")]
    NonPositiveSpeed { field: &'static str },
}

/// Failure loading settings from disk.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] ConfigError),
}
