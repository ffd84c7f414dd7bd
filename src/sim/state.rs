//! Race data model
//!
//! Horses are created once per pool and shared by `Arc` between the pool,
//! round rosters, live race state and results.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A competitor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Horse {
    /// 1-based, unique within the pool
    pub id: u32,
    pub name: String,
    /// CSS-style hex color
    pub color: String,
    /// Fitness in [min_condition, max_condition], fixed for the pool's lifetime
    pub condition: u32,
}

/// Lifecycle of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundStatus {
    /// Scheduled, not started
    Pending,
    /// Live race state initialized, positions advancing
    Running,
    /// Every horse has finished and results are recorded
    Finished,
}

/// One horse's finish in one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceResult {
    pub horse: Arc<Horse>,
    /// Finishing rank (1 = winner)
    pub position: u32,
    /// Elapsed time since round start (ms)
    pub finish_time: u64,
}

/// One race at a fixed distance with a fixed roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceRound {
    pub round_number: u32,
    pub distance: u32,
    pub horses: Vec<Arc<Horse>>,
    pub status: RoundStatus,
    /// Sorted by rank, empty until finished
    pub results: Vec<RaceResult>,
}

impl RaceRound {
    pub fn is_finished(&self) -> bool {
        self.status == RoundStatus::Finished
    }

    /// Move status forward. Returns false if it would go backwards.
    pub(crate) fn set_status(&mut self, status: RoundStatus) -> bool {
        let allowed = match (self.status, status) {
            (RoundStatus::Pending, _) => true,
            (RoundStatus::Running, RoundStatus::Running | RoundStatus::Finished) => true,
            (RoundStatus::Finished, RoundStatus::Finished) => true,
            _ => false,
        };
        if allowed {
            self.status = status;
        } else {
            log::debug!(
                "Round {} ignoring status change {:?} -> {:?}",
                self.round_number,
                self.status,
                status
            );
        }
        allowed
    }
}

/// The full ordered set of rounds for a playthrough
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RaceSchedule {
    pub rounds: Vec<RaceRound>,
    /// 0-based index of the current round
    pub current_round: usize,
    pub is_generated: bool,
}

impl RaceSchedule {
    pub fn new(rounds: Vec<RaceRound>) -> Self {
        Self {
            rounds,
            current_round: 0,
            is_generated: true,
        }
    }

    pub fn current(&self) -> Option<&RaceRound> {
        self.rounds.get(self.current_round)
    }

    /// True once generated and every round has finished
    pub fn all_completed(&self) -> bool {
        self.is_generated && self.rounds.iter().all(RaceRound::is_finished)
    }

    /// Index of the first round still pending
    pub fn next_pending(&self) -> Option<usize> {
        self.rounds
            .iter()
            .position(|r| r.status == RoundStatus::Pending)
    }

    /// Step the pointer forward, never past the last round
    pub fn advance(&mut self) {
        if self.current_round + 1 < self.rounds.len() {
            self.current_round += 1;
        }
    }
}

/// Per-horse progress while a round runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorseRaceState {
    pub horse: Arc<Horse>,
    /// Distance covered, in [0, distance], never decreases
    pub position: f64,
    pub finished: bool,
    /// Set once on finish (ms since round start)
    pub finish_time: Option<u64>,
    /// Set once on finish
    pub rank: Option<u32>,
}

impl HorseRaceState {
    pub fn new(horse: Arc<Horse>) -> Self {
        Self {
            horse,
            position: 0.0,
            finished: false,
            finish_time: None,
            rank: None,
        }
    }
}
