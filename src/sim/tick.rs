//! Per-round race stepping
//!
//! A [`LiveRace`] owns the progress of every horse in the running round.
//! Each [`LiveRace::step`] advances all unfinished horses once, records
//! finishes, and reports when the whole roster is home.

use rand::Rng;

use super::rng::unit;
use super::state::{HorseRaceState, RaceResult, RaceRound};
use crate::settings::SpeedTuning;

/// Result of a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// At least one horse is still running
    Running,
    /// Every horse has finished; results are final
    Finished,
}

/// Live state of the round currently being raced
#[derive(Debug, Clone)]
pub struct LiveRace {
    round_number: u32,
    distance: u32,
    /// Clock reading when the round started (ms)
    started_at: u64,
    /// One entry per roster horse, in roster order
    horses: Vec<HorseRaceState>,
    finished_count: u32,
    /// Appended in finish order
    results: Vec<RaceResult>,
    steps: u64,
}

impl LiveRace {
    /// Put every horse of `round` at the start line
    pub fn new(round: &RaceRound, started_at: u64) -> Self {
        Self {
            round_number: round.round_number,
            distance: round.distance,
            started_at,
            horses: round
                .horses
                .iter()
                .cloned()
                .map(HorseRaceState::new)
                .collect(),
            finished_count: 0,
            results: Vec::with_capacity(round.horses.len()),
            steps: 0,
        }
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn distance(&self) -> u32 {
        self.distance
    }

    pub fn started_at(&self) -> u64 {
        self.started_at
    }

    pub fn horses(&self) -> &[HorseRaceState] {
        &self.horses
    }

    pub fn finished_count(&self) -> u32 {
        self.finished_count
    }

    /// Steps taken so far (paused ticks don't count)
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn is_complete(&self) -> bool {
        self.finished_count as usize >= self.horses.len()
    }

    /// Results sorted by rank
    pub fn results(&self) -> &[RaceResult] {
        &self.results
    }

    /// Advance every unfinished horse once.
    ///
    /// Horses are evaluated in roster order, so when several cross the line
    /// in the same step the earlier roster entry gets the better rank. They
    /// share the same finish time.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        now_ms: u64,
        rng: &mut R,
        tuning: &SpeedTuning,
    ) -> StepOutcome {
        if self.is_complete() {
            return StepOutcome::Finished;
        }

        self.steps += 1;
        let elapsed = now_ms.saturating_sub(self.started_at);
        let distance = self.distance;

        for i in 0..self.horses.len() {
            if self.horses[i].finished {
                continue;
            }
            let advance = tuning.advance(distance, self.horses[i].horse.condition, unit(rng));
            let id = self.horses[i].horse.id;
            let position = self.horses[i].position + advance;
            self.update_position(id, position);

            if self.horses[i].position >= distance as f64 {
                self.finish_horse(id, elapsed);
            }
        }

        if self.is_complete() {
            self.results.sort_by_key(|r| r.position);
            log::info!(
                "Round {} finished after {} steps ({} ms)",
                self.round_number,
                self.steps,
                elapsed
            );
            StepOutcome::Finished
        } else {
            StepOutcome::Running
        }
    }

    /// Move a horse forward, clamped to the finish line. Unknown ids and
    /// backwards moves are ignored.
    pub fn update_position(&mut self, horse_id: u32, position: f64) {
        let distance = self.distance as f64;
        match self.horses.iter_mut().find(|h| h.horse.id == horse_id) {
            Some(state) => {
                state.position = position.min(distance).max(state.position);
            }
            None => log::debug!("update_position: no horse {} in round", horse_id),
        }
    }

    /// Mark a horse finished with the next rank. Returns the rank, or `None`
    /// for unknown or already finished horses.
    pub fn finish_horse(&mut self, horse_id: u32, finish_time: u64) -> Option<u32> {
        let Some(state) = self.horses.iter_mut().find(|h| h.horse.id == horse_id) else {
            log::debug!("finish_horse: no horse {} in round", horse_id);
            return None;
        };
        if state.finished {
            log::debug!("finish_horse: horse {} already finished", horse_id);
            return None;
        }

        self.finished_count += 1;
        let rank = self.finished_count;
        state.finished = true;
        state.position = self.distance as f64;
        state.finish_time = Some(finish_time);
        state.rank = Some(rank);

        self.results.push(RaceResult {
            horse: state.horse.clone(),
            position: rank,
            finish_time,
        });
        Some(rank)
    }
}

/// Rough speed rating for a horse: a condition factor in [0.5, 1.0] times a
/// random factor in [0.85, 1.15).
pub fn condition_speed<R: Rng + ?Sized>(condition: u32, rng: &mut R) -> f64 {
    let condition_factor = 0.5 + (condition as f64 / 100.0) * 0.5;
    let random_factor = 0.85 + unit(rng) * 0.3;
    condition_factor * random_factor
}
