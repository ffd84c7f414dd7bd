//! Horse Derby - A multi-round horse race tournament simulation
//!
//! Core modules:
//! - `sim`: Race simulation (horse pool, schedule, per-round stepping, clocks)
//! - `game`: Round sequencing and start/pause/resume/stop control
//! - `settings`: Data-driven race configuration
//! - `format`: Display helpers for a presentation layer

pub mod error;
pub mod format;
pub mod game;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, SettingsError};
pub use game::{GameSnapshot, RaceControl, RaceGame, RaceOutcome};
pub use settings::{RaceSettings, SpeedTuning};

/// Default race configuration constants
pub mod consts {
    /// Horses in the pool
    pub const TOTAL_HORSES: usize = 20;
    /// Horses sampled into each round
    pub const HORSES_PER_ROUND: usize = 10;
    /// Rounds per schedule
    pub const TOTAL_ROUNDS: usize = 6;

    /// Condition bounds (inclusive)
    pub const MIN_CONDITION: u32 = 1;
    pub const MAX_CONDITION: u32 = 100;

    /// Distance for rounds 1..=6
    pub const ROUND_DISTANCES: [u32; TOTAL_ROUNDS] = [1200, 1400, 1600, 1800, 2000, 2200];

    /// Pause between rounds (ms)
    pub const INTER_ROUND_DELAY_MS: u64 = 1500;
    /// Step cadence (ms)
    pub const TICK_INTERVAL_MS: u64 = 50;

    /// Speed formula: distance / SPEED_NORMALIZATION is the base advance
    pub const SPEED_NORMALIZATION: f64 = 10_000.0;
    /// Speed formula: scales one step to roughly one 60 Hz frame
    pub const FRAME_SCALE: f64 = 16.67;
    /// Condition multiplier spans [CONDITION_BASE, CONDITION_BASE + CONDITION_SPAN]
    pub const CONDITION_BASE: f64 = 0.9;
    pub const CONDITION_SPAN: f64 = 0.2;
    /// Random factor spans [RANDOM_BASE, RANDOM_BASE + RANDOM_SPAN)
    pub const RANDOM_BASE: f64 = 0.7;
    pub const RANDOM_SPAN: f64 = 0.6;

    pub const HORSE_NAMES: [&str; TOTAL_HORSES] = [
        "Thunder Bolt",
        "Silver Storm",
        "Golden Flash",
        "Midnight Star",
        "Wild Spirit",
        "Royal Crown",
        "Swift Arrow",
        "Fire Dance",
        "Moon Shadow",
        "Desert Wind",
        "Ocean Wave",
        "Mountain Peak",
        "Lucky Charm",
        "Iron Will",
        "Brave Heart",
        "Dream Catcher",
        "Storm Rider",
        "Phoenix Rise",
        "Diamond Dust",
        "Velvet Thunder",
    ];

    pub const HORSE_COLORS: [&str; TOTAL_HORSES] = [
        "#E74C3C", "#3498DB", "#2ECC71", "#F39C12", "#9B59B6", "#1ABC9C", "#E91E63", "#00BCD4",
        "#FF5722", "#795548", "#607D8B", "#8BC34A", "#FFEB3B", "#673AB7", "#FF9800", "#4CAF50",
        "#03A9F4", "#F44336", "#009688", "#CDDC39",
    ];
}
