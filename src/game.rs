//! Tournament controller
//!
//! [`RaceGame`] owns the horse pool, the schedule, the live race and the
//! results history, and sequences rounds one after another. It can be driven
//! two ways:
//! - [`RaceGame::start_racing`] blocks on a [`Clock`] until every remaining
//!   round is run or racing is stopped through a [`RaceControl`] handle
//! - [`RaceGame::begin_racing`] + [`RaceGame::tick`] for hosts that own their
//!   frame loop
//!
//! Commands issued in the wrong state are ignored, never errors.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;

use crate::error::ConfigError;
use crate::settings::RaceSettings;
use crate::sim::clock::Clock;
use crate::sim::rng::RaceRng;
use crate::sim::roster::{build_schedule, generate_pool};
use crate::sim::state::{Horse, HorseRaceState, RaceResult, RaceRound, RaceSchedule, RoundStatus};
use crate::sim::tick::{LiveRace, StepOutcome};

/// Racing/paused flags, shareable with another thread.
///
/// The race loop polls these every tick: paused idles without stepping,
/// not racing abandons the loop.
#[derive(Debug, Clone, Default)]
pub struct RaceControl {
    racing: Arc<AtomicBool>,
    paused: Arc<AtomicBool>,
}

impl RaceControl {
    pub fn is_racing(&self) -> bool {
        self.racing.load(Ordering::SeqCst)
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    pub fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
    }

    pub fn resume(&self) {
        self.paused.store(false, Ordering::SeqCst);
    }

    /// Abandon the current round and stop sequencing
    pub fn stop(&self) {
        self.racing.store(false, Ordering::SeqCst);
        self.paused.store(false, Ordering::SeqCst);
    }

    fn start(&self) {
        self.racing.store(true, Ordering::SeqCst);
        self.paused.store(false, Ordering::SeqCst);
    }
}

/// How a call to [`RaceGame::start_racing`] ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaceOutcome {
    /// No schedule, or already racing
    NotStarted,
    /// Ran through the last round of the schedule
    Completed,
    /// Racing was stopped before the last round finished
    Stopped,
}

/// Where the sequencer is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    /// Next tick starts the first unfinished round at or after `index`
    Starting { index: usize },
    Racing { index: usize },
    /// Waiting between rounds
    Intermission { next: usize, until_ms: u64 },
}

/// Read-only view for a presentation layer
#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot {
    pub seed: u64,
    pub horses: Vec<Arc<Horse>>,
    pub schedule: RaceSchedule,
    /// 1-based
    pub current_round_number: usize,
    pub race_state: Vec<HorseRaceState>,
    pub all_results: Vec<Vec<RaceResult>>,
    pub is_racing: bool,
    pub is_paused: bool,
    pub all_races_completed: bool,
    pub next_available_round: Option<usize>,
}

/// The whole tournament state
#[derive(Debug)]
pub struct RaceGame {
    settings: RaceSettings,
    rng: RaceRng,
    horses: Vec<Arc<Horse>>,
    schedule: RaceSchedule,
    live: Option<LiveRace>,
    all_results: Vec<Vec<RaceResult>>,
    control: RaceControl,
    phase: Phase,
}

impl RaceGame {
    /// New game with an entropy seed
    pub fn new(settings: RaceSettings) -> Result<Self, ConfigError> {
        Self::with_rng(settings, RaceRng::from_entropy())
    }

    /// New game that replays identically for the same seed
    pub fn with_seed(settings: RaceSettings, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(settings, RaceRng::new(seed))
    }

    fn with_rng(settings: RaceSettings, mut rng: RaceRng) -> Result<Self, ConfigError> {
        settings.validate()?;
        let horses = generate_pool(&settings, &mut rng)?;
        log::info!("Game initialized with seed: {}", rng.seed());
        Ok(Self {
            settings,
            rng,
            horses,
            schedule: RaceSchedule::default(),
            live: None,
            all_results: Vec::new(),
            control: RaceControl::default(),
            phase: Phase::Idle,
        })
    }

    // === Commands ===

    /// Build a fresh schedule from the current pool, discarding results.
    /// On error nothing changes.
    pub fn generate_schedule(&mut self) -> Result<(), ConfigError> {
        let rounds = build_schedule(&self.horses, &self.settings, &mut self.rng)?;
        self.schedule = RaceSchedule::new(rounds);
        self.all_results.clear();
        self.live = None;
        self.control.stop();
        self.phase = Phase::Idle;
        log::info!("Schedule generated: {} rounds", self.schedule.rounds.len());
        Ok(())
    }

    /// New pool with new conditions; schedule, live race, results and flags
    /// go back to their initial values. On error nothing changes.
    pub fn reset_game(&mut self) -> Result<(), ConfigError> {
        let horses = generate_pool(&self.settings, &mut self.rng)?;
        self.horses = horses;
        self.schedule = RaceSchedule::default();
        self.live = None;
        self.all_results.clear();
        self.control.stop();
        self.phase = Phase::Idle;
        log::info!("Game reset");
        Ok(())
    }

    /// Replace the settings. They apply from the next reset or schedule.
    pub fn update_settings(&mut self, settings: RaceSettings) -> Result<(), ConfigError> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    /// Run every remaining round, waiting on `clock` between steps and
    /// between rounds. Returns when all rounds are finished or racing is
    /// stopped from a [`RaceControl`] handle.
    pub fn start_racing<C: Clock + ?Sized>(&mut self, clock: &mut C) -> RaceOutcome {
        if !self.begin_racing() {
            return RaceOutcome::NotStarted;
        }
        while self.tick(clock.now_ms()) {
            clock.sleep_ms(self.settings.tick_interval_ms);
        }
        if self.schedule.rounds.last().is_some_and(RaceRound::is_finished) {
            RaceOutcome::Completed
        } else {
            RaceOutcome::Stopped
        }
    }

    /// Switch racing on from the current round. Returns false (and does
    /// nothing) without a schedule or when already racing.
    pub fn begin_racing(&mut self) -> bool {
        if !self.schedule.is_generated {
            log::debug!("start ignored: no schedule");
            return false;
        }
        if self.control.is_racing() {
            log::debug!("start ignored: already racing");
            return false;
        }
        self.control.start();
        self.phase = Phase::Starting {
            index: self.schedule.current_round,
        };
        log::info!("Racing from round {}", self.schedule.current_round + 1);
        true
    }

    /// Advance the sequencer to clock time `now_ms`. Returns whether racing
    /// is still on.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        loop {
            if !self.control.is_racing() {
                if let Phase::Racing { index } = self.phase {
                    log::info!("Round {} abandoned", index + 1);
                }
                self.phase = Phase::Idle;
                return false;
            }

            match self.phase {
                Phase::Idle => {
                    self.control.stop();
                    return false;
                }
                Phase::Starting { index } => {
                    let Some(index) = self.first_unfinished_from(index) else {
                        self.finish_racing();
                        return false;
                    };
                    self.start_round(index, now_ms);
                    return true;
                }
                Phase::Racing { index } => {
                    if self.control.is_paused() {
                        return true;
                    }
                    let outcome = match self.live.as_mut() {
                        Some(live) => live.step(now_ms, &mut self.rng, &self.settings.speed),
                        None => StepOutcome::Finished,
                    };
                    if outcome == StepOutcome::Finished {
                        self.complete_round(index);
                        if index + 1 < self.schedule.rounds.len() {
                            self.phase = Phase::Intermission {
                                next: index + 1,
                                until_ms: now_ms
                                    .saturating_add(self.settings.inter_round_delay_ms),
                            };
                        } else {
                            self.finish_racing();
                            return false;
                        }
                    }
                    return true;
                }
                Phase::Intermission { next, until_ms } => {
                    if now_ms < until_ms {
                        return true;
                    }
                    self.phase = Phase::Starting { index: next };
                }
            }
        }
    }

    pub fn pause_racing(&self) {
        self.control.pause();
    }

    pub fn resume_racing(&self) {
        self.control.resume();
    }

    /// Stop sequencing. A round in flight is abandoned as is; starting
    /// again re-runs it from the start line.
    pub fn stop_racing(&self) {
        self.control.stop();
    }

    /// Move the round pointer forward, clamped to the last round
    pub fn advance_round(&mut self) {
        self.schedule.advance();
    }

    fn first_unfinished_from(&self, index: usize) -> Option<usize> {
        (index..self.schedule.rounds.len()).find(|&i| !self.schedule.rounds[i].is_finished())
    }

    fn start_round(&mut self, index: usize, now_ms: u64) {
        self.schedule.current_round = index;
        let round = &mut self.schedule.rounds[index];
        round.set_status(RoundStatus::Running);
        self.live = Some(LiveRace::new(round, now_ms));
        self.phase = Phase::Racing { index };
        log::info!(
            "Round {} started: {}m, {} horses",
            round.round_number,
            round.distance,
            round.horses.len()
        );
    }

    fn complete_round(&mut self, index: usize) {
        let results = self
            .live
            .take()
            .map(|live| live.results().to_vec())
            .unwrap_or_default();
        let round = &mut self.schedule.rounds[index];
        round.results = results.clone();
        round.set_status(RoundStatus::Finished);
        if let Some(winner) = results.first() {
            log::info!(
                "Round {} won by {} in {} ms",
                round.round_number,
                winner.horse.name,
                winner.finish_time
            );
        }
        self.all_results.push(results);
    }

    fn finish_racing(&mut self) {
        self.control.stop();
        self.phase = Phase::Idle;
        log::info!("Racing finished: {} rounds complete", self.all_results.len());
    }

    // === Accessors ===

    pub fn settings(&self) -> &RaceSettings {
        &self.settings
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Handle for pausing or stopping from another thread
    pub fn control(&self) -> RaceControl {
        self.control.clone()
    }

    pub fn horses(&self) -> &[Arc<Horse>] {
        &self.horses
    }

    pub fn schedule(&self) -> &RaceSchedule {
        &self.schedule
    }

    pub fn rounds(&self) -> &[RaceRound] {
        &self.schedule.rounds
    }

    pub fn is_schedule_generated(&self) -> bool {
        self.schedule.is_generated
    }

    /// 0-based
    pub fn current_round_index(&self) -> usize {
        self.schedule.current_round
    }

    /// 1-based
    pub fn current_round_number(&self) -> usize {
        self.schedule.current_round + 1
    }

    pub fn current_round(&self) -> Option<&RaceRound> {
        self.schedule.current()
    }

    pub fn round_status(&self, index: usize) -> Option<RoundStatus> {
        self.schedule.rounds.get(index).map(|r| r.status)
    }

    pub fn live_race(&self) -> Option<&LiveRace> {
        self.live.as_ref()
    }

    /// Live per-horse progress, empty between rounds
    pub fn race_state(&self) -> &[HorseRaceState] {
        self.live.as_ref().map(LiveRace::horses).unwrap_or(&[])
    }

    /// One entry per completed round, in completion order
    pub fn all_results(&self) -> &[Vec<RaceResult>] {
        &self.all_results
    }

    pub fn is_racing(&self) -> bool {
        self.control.is_racing()
    }

    pub fn is_paused(&self) -> bool {
        self.control.is_paused()
    }

    pub fn all_races_completed(&self) -> bool {
        self.schedule.all_completed()
    }

    pub fn next_available_round(&self) -> Option<usize> {
        self.schedule.next_pending()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            seed: self.seed(),
            horses: self.horses.clone(),
            schedule: self.schedule.clone(),
            current_round_number: self.current_round_number(),
            race_state: self.race_state().to_vec(),
            all_results: self.all_results.clone(),
            is_racing: self.is_racing(),
            is_paused: self.is_paused(),
            all_races_completed: self.all_races_completed(),
            next_available_round: self.next_available_round(),
        }
    }
}
