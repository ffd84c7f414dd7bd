//! Horse pool and schedule generation

use std::sync::Arc;

use rand::Rng;

use super::rng::{random_int, shuffle};
use super::state::{Horse, RaceRound, RoundStatus};
use crate::error::ConfigError;
use crate::settings::RaceSettings;

/// Build the horse pool: ids 1..=N, catalog name and color by position,
/// random condition.
pub fn generate_pool<R: Rng + ?Sized>(
    settings: &RaceSettings,
    rng: &mut R,
) -> Result<Vec<Arc<Horse>>, ConfigError> {
    settings.validate_pool()?;

    let pool = (0..settings.total_horses)
        .map(|i| {
            Arc::new(Horse {
                id: i as u32 + 1,
                name: settings.horse_names[i].clone(),
                color: settings.horse_colors[i].clone(),
                condition: random_int(rng, settings.min_condition, settings.max_condition),
            })
        })
        .collect();
    Ok(pool)
}

/// Sample `per_round` horses without replacement
pub fn select_round_roster<R: Rng + ?Sized>(
    pool: &[Arc<Horse>],
    per_round: usize,
    rng: &mut R,
) -> Result<Vec<Arc<Horse>>, ConfigError> {
    if per_round > pool.len() {
        return Err(ConfigError::RosterExceedsPool {
            per_round,
            pool: pool.len(),
        });
    }
    let mut roster = shuffle(rng, pool);
    roster.truncate(per_round);
    Ok(roster)
}

/// Build every round of the schedule. Rosters are sampled independently per
/// round, so a horse may race in several rounds.
pub fn build_schedule<R: Rng + ?Sized>(
    pool: &[Arc<Horse>],
    settings: &RaceSettings,
    rng: &mut R,
) -> Result<Vec<RaceRound>, ConfigError> {
    settings.validate_schedule(pool.len())?;

    (0..settings.total_rounds)
        .map(|i| {
            Ok::<_, ConfigError>(RaceRound {
                round_number: i as u32 + 1,
                distance: settings.round_distances[i],
                horses: select_round_roster(pool, settings.horses_per_round, rng)?,
                status: RoundStatus::Pending,
                results: Vec::new(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::consts::*;
    use crate::sim::rng::RaceRng;
    use proptest::prelude::*;

    #[test]
    fn test_pool_shape() {
        let mut rng = RaceRng::new(12345);
        let pool = generate_pool(&RaceSettings::default(), &mut rng).unwrap();
        assert_eq!(pool.len(), TOTAL_HORSES);

        let ids: Vec<u32> = pool.iter().map(|h| h.id).collect();
        assert_eq!(ids, (1..=TOTAL_HORSES as u32).collect::<Vec<_>>());

        let colors: HashSet<&str> = pool.iter().map(|h| h.color.as_str()).collect();
        assert_eq!(colors.len(), TOTAL_HORSES);
        assert_eq!(pool[0].name, "Thunder Bolt");
        assert_eq!(pool[19].color, "#CDDC39");
    }

    #[test]
    fn test_pool_rejects_short_catalog() {
        let mut settings = RaceSettings::default();
        settings.horse_names.pop();
        let mut rng = RaceRng::new(1);
        assert!(matches!(
            generate_pool(&settings, &mut rng),
            Err(ConfigError::CatalogTooShort { catalog: "name", .. })
        ));
    }

    #[test]
    fn test_roster_from_pool() {
        let mut rng = RaceRng::new(3);
        let pool = generate_pool(&RaceSettings::default(), &mut rng).unwrap();
        let roster = select_round_roster(&pool, HORSES_PER_ROUND, &mut rng).unwrap();
        assert_eq!(roster.len(), HORSES_PER_ROUND);
        assert_eq!(pool.len(), TOTAL_HORSES);

        let ids: HashSet<u32> = roster.iter().map(|h| h.id).collect();
        assert_eq!(ids.len(), HORSES_PER_ROUND, "sampled without replacement");
        assert!(roster.iter().all(|h| pool.iter().any(|p| Arc::ptr_eq(p, h))));
    }

    #[test]
    fn test_roster_larger_than_pool() {
        let mut rng = RaceRng::new(3);
        let pool = generate_pool(&RaceSettings::default(), &mut rng).unwrap();
        assert_eq!(
            select_round_roster(&pool[..4], 5, &mut rng),
            Err(ConfigError::RosterExceedsPool { per_round: 5, pool: 4 })
        );
    }

    #[test]
    fn test_schedule_distances() {
        let mut rng = RaceRng::new(8);
        let settings = RaceSettings::default();
        let pool = generate_pool(&settings, &mut rng).unwrap();
        let rounds = build_schedule(&pool, &settings, &mut rng).unwrap();
        let distances: Vec<u32> = rounds.iter().map(|r| r.distance).collect();
        assert_eq!(distances, vec![1200, 1400, 1600, 1800, 2000, 2200]);
        for (i, round) in rounds.iter().enumerate() {
            assert_eq!(round.round_number, i as u32 + 1);
            assert_eq!(round.status, RoundStatus::Pending);
            assert!(round.results.is_empty());
        }
    }

    #[test]
    fn test_schedule_rejects_bad_distance_table() {
        let mut rng = RaceRng::new(8);
        let mut settings = RaceSettings::default();
        let pool = generate_pool(&settings, &mut rng).unwrap();
        settings.round_distances.truncate(4);
        assert_eq!(
            build_schedule(&pool, &settings, &mut rng),
            Err(ConfigError::DistanceCount { rounds: 6, available: 4 })
        );
    }

    proptest! {
        #[test]
        fn prop_pool_invariants(seed: u64) {
            let mut rng = RaceRng::new(seed);
            let pool = generate_pool(&RaceSettings::default(), &mut rng).unwrap();
            prop_assert_eq!(pool.len(), TOTAL_HORSES);
            let ids: HashSet<u32> = pool.iter().map(|h| h.id).collect();
            prop_assert_eq!(ids.len(), TOTAL_HORSES);
            prop_assert!(ids.iter().all(|&id| (1..=TOTAL_HORSES as u32).contains(&id)));
            prop_assert!(pool
                .iter()
                .all(|h| (MIN_CONDITION..=MAX_CONDITION).contains(&h.condition)));
        }

        #[test]
        fn prop_schedule_invariants(seed: u64) {
            let mut rng = RaceRng::new(seed);
            let settings = RaceSettings::default();
            let pool = generate_pool(&settings, &mut rng).unwrap();
            let rounds = build_schedule(&pool, &settings, &mut rng).unwrap();
            prop_assert_eq!(rounds.len(), TOTAL_ROUNDS);
            for (i, round) in rounds.iter().enumerate() {
                prop_assert_eq!(round.distance, ROUND_DISTANCES[i]);
                prop_assert_eq!(round.horses.len(), HORSES_PER_ROUND);
                prop_assert!(round.horses.iter().all(|h| pool.contains(h)));
                prop_assert_eq!(round.status, RoundStatus::Pending);
                prop_assert!(round.results.is_empty());
            }
        }
    }
}
