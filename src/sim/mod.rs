//! Race simulation module
//!
//! Everything that decides who wins lives here:
//! - Seeded RNG only, injected by the caller
//! - Clock-driven timing, never tick counts
//! - Stable iteration order (roster order)
//! - No rendering or platform dependencies

pub mod clock;
pub mod rng;
pub mod roster;
pub mod state;
pub mod tick;

pub use clock::{Clock, ManualClock, SystemClock};
pub use rng::{RaceRng, random_int, shuffle, unit};
pub use roster::{build_schedule, generate_pool, select_round_roster};
pub use state::{Horse, HorseRaceState, RaceResult, RaceRound, RaceSchedule, RoundStatus};
pub use tick::{LiveRace, StepOutcome, condition_speed};
