//! Race settings
//!
//! Every tunable constant of the tournament lives here so a host can override
//! any subset from JSON. Missing fields fall back to the defaults in
//! [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, SettingsError};

/// Constants of the per-step advance formula
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedTuning {
    /// Base advance is `distance / normalization`
    pub normalization: f64,
    /// Multiplier applied to every step
    pub frame_scale: f64,
    pub condition_base: f64,
    pub condition_span: f64,
    pub random_base: f64,
    pub random_span: f64,
}

impl Default for SpeedTuning {
    fn default() -> Self {
        Self {
            normalization: SPEED_NORMALIZATION,
            frame_scale: FRAME_SCALE,
            condition_base: CONDITION_BASE,
            condition_span: CONDITION_SPAN,
            random_base: RANDOM_BASE,
            random_span: RANDOM_SPAN,
        }
    }
}

impl SpeedTuning {
    /// Condition multiplier, 0.9 at condition 0 up to 1.1 at condition 100
    pub fn condition_multiplier(&self, condition: u32) -> f64 {
        self.condition_base + (condition as f64 / 100.0) * self.condition_span
    }

    /// Random factor for a uniform draw `u` in [0, 1)
    pub fn random_factor(&self, u: f64) -> f64 {
        self.random_base + u * self.random_span
    }

    /// Every step must move a horse forward, or a round never ends.
    /// `min_distance` and `min_condition` describe the slowest possible step.
    pub fn validate(&self, min_distance: u32, min_condition: u32) -> Result<(), ConfigError> {
        let positive = [
            ("normalization", self.normalization),
            ("frame_scale", self.frame_scale),
            ("condition_base", self.condition_base),
            ("random_base", self.random_base),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositiveSpeed { field });
            }
        }
        let spans = [
            ("condition_span", self.condition_span),
            ("random_span", self.random_span),
        ];
        for (field, value) in spans {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::NonPositiveSpeed { field });
            }
        }
        let slowest = self.advance(min_distance, min_condition, 0.0);
        if !slowest.is_finite() || slowest <= 0.0 {
            return Err(ConfigError::NonPositiveSpeed { field: "advance" });
        }
        Ok(())
    }

    /// Distance covered in one step
    pub fn advance(&self, distance: u32, condition: u32, u: f64) -> f64 {
        let base_speed = distance as f64 / self.normalization;
        base_speed * self.condition_multiplier(condition) * self.random_factor(u) * self.frame_scale
    }
}

/// Tournament configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceSettings {
    pub total_horses: usize,
    pub horses_per_round: usize,
    pub total_rounds: usize,
    pub min_condition: u32,
    pub max_condition: u32,
    /// Distance for each round, index 0 is round 1
    pub round_distances: Vec<u32>,
    /// Wait between rounds (ms)
    pub inter_round_delay_ms: u64,
    /// Step cadence (ms)
    pub tick_interval_ms: u64,
    pub speed: SpeedTuning,
    pub horse_names: Vec<String>,
    pub horse_colors: Vec<String>,
}

impl Default for RaceSettings {
    fn default() -> Self {
        Self {
            total_horses: TOTAL_HORSES,
            horses_per_round: HORSES_PER_ROUND,
            total_rounds: TOTAL_ROUNDS,
            min_condition: MIN_CONDITION,
            max_condition: MAX_CONDITION,
            round_distances: ROUND_DISTANCES.to_vec(),
            inter_round_delay_ms: INTER_ROUND_DELAY_MS,
            tick_interval_ms: TICK_INTERVAL_MS,
            speed: SpeedTuning::default(),
            horse_names: HORSE_NAMES.iter().map(|s| s.to_string()).collect(),
            horse_colors: HORSE_COLORS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl RaceSettings {
    /// Distance for a 1-based round number
    pub fn distance_for_round(&self, round_number: usize) -> Option<u32> {
        round_number
            .checked_sub(1)
            .and_then(|i| self.round_distances.get(i))
            .copied()
    }

    /// Check the horse catalogs can cover the pool
    pub fn validate_pool(&self) -> Result<(), ConfigError> {
        if self.horse_names.len() < self.total_horses {
            return Err(ConfigError::CatalogTooShort {
                catalog: "name",
                required: self.total_horses,
                available: self.horse_names.len(),
            });
        }
        if self.horse_colors.len() < self.total_horses {
            return Err(ConfigError::CatalogTooShort {
                catalog: "color",
                required: self.total_horses,
                available: self.horse_colors.len(),
            });
        }
        if self.min_condition > self.max_condition {
            return Err(ConfigError::ConditionRange {
                min: self.min_condition,
                max: self.max_condition,
            });
        }
        Ok(())
    }

    /// Check the distance table and roster size for a pool of `pool_size`
    pub fn validate_schedule(&self, pool_size: usize) -> Result<(), ConfigError> {
        if self.horses_per_round > pool_size {
            return Err(ConfigError::RosterExceedsPool {
                per_round: self.horses_per_round,
                pool: pool_size,
            });
        }
        if self.round_distances.len() < self.total_rounds {
            return Err(ConfigError::DistanceCount {
                rounds: self.total_rounds,
                available: self.round_distances.len(),
            });
        }
        let mut previous = 0;
        for (i, &distance) in self.round_distances[..self.total_rounds].iter().enumerate() {
            if distance <= previous {
                return Err(ConfigError::DistanceNotIncreasing {
                    round: i + 1,
                    distance,
                    previous,
                });
            }
            previous = distance;
        }
        Ok(())
    }

    /// Full validation
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_pool()?;
        self.validate_schedule(self.total_horses)?;
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        let min_distance = self.round_distances[..self.total_rounds]
            .iter()
            .copied()
            .min()
            .unwrap_or(1);
        self.speed.validate(min_distance, self.min_condition)
    }

    /// Parse settings from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}
