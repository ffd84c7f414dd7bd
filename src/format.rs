//! Display helpers for results and progress bars

use crate::sim::state::RaceResult;

/// Milliseconds as seconds with three decimals, e.g. `1500` -> `"1.500s"`
pub fn format_time(ms: u64) -> String {
    format!("{}.{:03}s", ms / 1000, ms % 1000)
}

/// Number with its English ordinal suffix: `1st`, `2nd`, `11th`, `21st`
pub fn ordinal(n: u32) -> String {
    let suffix = if (11..=13).contains(&(n % 100)) {
        "th"
    } else {
        match n % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        }
    };
    format!("{n}{suffix}")
}

/// Percent of `distance` covered, capped at 100
pub fn calculate_progress(position: f64, distance: f64) -> f64 {
    if distance <= 0.0 {
        return 100.0;
    }
    ((position / distance) * 100.0).min(100.0)
}

/// Copy of `results` ordered by finish time (stable for ties)
pub fn sort_results_by_time(results: &[RaceResult]) -> Vec<RaceResult> {
    let mut sorted = results.to_vec();
    sorted.sort_by_key(|r| r.finish_time);
    sorted
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::sim::state::Horse;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(1000), "1.000s");
        assert_eq!(format_time(1500), "1.500s");
        assert_eq!(format_time(12345), "12.345s");
        assert_eq!(format_time(0), "0.000s");
        assert_eq!(format_time(1001), "1.001s");
        assert_eq!(format_time(1010), "1.010s");
    }

    #[test]
    fn test_ordinal() {
        let cases = [
            (1, "1st"),
            (2, "2nd"),
            (3, "3rd"),
            (4, "4th"),
            (10, "10th"),
            (11, "11th"),
            (12, "12th"),
            (13, "13th"),
            (20, "20th"),
            (21, "21st"),
            (22, "22nd"),
            (23, "23rd"),
            (111, "111th"),
            (101, "101st"),
        ];
        for (n, expected) in cases {
            assert_eq!(ordinal(n), expected);
        }
    }

    #[test]
    fn test_calculate_progress() {
        assert_eq!(calculate_progress(0.0, 1000.0), 0.0);
        assert_eq!(calculate_progress(500.0, 1000.0), 50.0);
        assert_eq!(calculate_progress(1000.0, 1000.0), 100.0);
        assert_eq!(calculate_progress(1500.0, 1000.0), 100.0);
    }

    #[test]
    fn test_sort_results_by_time() {
        let horse = |id| {
            Arc::new(Horse {
                id,
                name: format!("Horse {id}"),
                color: "#FFFFFF".to_string(),
                condition: 50,
            })
        };
        let results = vec![
            RaceResult { horse: horse(1), position: 2, finish_time: 900 },
            RaceResult { horse: horse(2), position: 1, finish_time: 300 },
            RaceResult { horse: horse(3), position: 3, finish_time: 600 },
        ];
        let sorted = sort_results_by_time(&results);
        let times: Vec<u64> = sorted.iter().map(|r| r.finish_time).collect();
        assert_eq!(times, vec![300, 600, 900]);
        assert_eq!(results[0].finish_time, 900);
    }
}
