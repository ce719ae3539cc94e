//! Numeric helpers: one-rep-max estimation, %1RM table, pace and split.
//!
//! None of these fail. Inputs outside the supported range give `None`.

/// Highest rep count for which an estimate is produced
///
/// Epley is linear in reps and overshoots past this point, so higher counts
/// are refused rather than estimated.
pub const MAX_ESTIMABLE_REPS: u32 = 12;

/// Fraction of 1RM that can be lifted for `index + 1` reps
const PERCENT_OF_1RM: [f64; 12] = [
    1.00, // 1
    0.95, // 2
    0.93, // 3
    0.90, // 4
    0.87, // 5
    0.85, // 6
    0.83, // 7
    0.80, // 8
    0.77, // 9
    0.75, // 10
    0.72, // 11
    0.70, // 12
];

/// Value returned for reps outside 1..=12
const PERCENT_FLOOR: f64 = 0.70;

/// Epley estimate: `weight * (1 + reps / 30)`
///
/// Returns `None` unless `weight_kg > 0` and `1 <= reps <= 12`.
pub fn estimate_one_rep_max(weight_kg: f64, reps: u32) -> Option<f64> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return None;
    }
    if !(1..=MAX_ESTIMABLE_REPS).contains(&reps) {
        return None;
    }
    Some(weight_kg * (1.0 + reps as f64 / 30.0))
}

/// Lookup of the fraction of 1RM liftable for `reps`
pub fn reps_to_percent_of_1rm(reps: u32) -> f64 {
    match reps {
        1..=MAX_ESTIMABLE_REPS => PERCENT_OF_1RM[(reps - 1) as usize],
        _ => PERCENT_FLOOR,
    }
}

/// Working load for every rep count in the table
pub fn percentage_table(one_rep_max_kg: f64) -> Vec<(u32, f64)> {
    (1..=MAX_ESTIMABLE_REPS)
        .map(|reps| (reps, one_rep_max_kg * reps_to_percent_of_1rm(reps)))
        .collect()
}

fn seconds_per(distance_m: f64, time_s: f64, unit_m: f64) -> Option<f64> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if !valid(distance_m) || !valid(time_s) {
        return None;
    }
    Some(time_s / (distance_m / unit_m))
}

/// Seconds per kilometre
pub fn pace_seconds_per_km(distance_m: Option<f64>, time_s: Option<f64>) -> Option<f64> {
    seconds_per(distance_m?, time_s?, 1000.0)
}

/// Seconds per 500 metres (rower split)
pub fn split_seconds_per_500m(distance_m: Option<f64>, time_s: Option<f64>) -> Option<f64> {
    seconds_per(distance_m?, time_s?, 500.0)
}

/// Format seconds as `m:ss`, rounded to the nearest second
pub fn format_mm_ss(seconds: f64) -> String {
    let total = seconds.max(0.0).round() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_epley_estimate() {
        let e1rm = estimate_one_rep_max(100.0, 5).unwrap();
        assert!(approx_eq(e1rm, 100.0 * (1.0 + 5.0 / 30.0)));
        assert!((e1rm - 116.67).abs() < 0.01);
    }

    #[test]
    fn test_single_rep_still_uses_formula() {
        let e1rm = estimate_one_rep_max(100.0, 1).unwrap();
        assert!(approx_eq(e1rm, 100.0 * (1.0 + 1.0 / 30.0)));
    }

    #[test]
    fn test_estimate_rejects_out_of_range() {
        assert_eq!(estimate_one_rep_max(100.0, 13), None);
        assert_eq!(estimate_one_rep_max(100.0, 0), None);
        assert_eq!(estimate_one_rep_max(0.0, 5), None);
        assert_eq!(estimate_one_rep_max(-20.0, 5), None);
        assert_eq!(estimate_one_rep_max(f64::NAN, 5), None);
        assert!(estimate_one_rep_max(100.0, 12).is_some());
    }

    #[test]
    fn test_percent_table_endpoints() {
        assert!(approx_eq(reps_to_percent_of_1rm(1), 1.00));
        assert!(approx_eq(reps_to_percent_of_1rm(5), 0.87));
        assert!(approx_eq(reps_to_percent_of_1rm(12), 0.70));
        assert!(approx_eq(reps_to_percent_of_1rm(20), 0.70));
        assert!(approx_eq(reps_to_percent_of_1rm(0), 0.70));
    }

    #[test]
    fn test_percent_table_non_increasing() {
        for reps in 1..MAX_ESTIMABLE_REPS {
            assert!(reps_to_percent_of_1rm(reps) >= reps_to_percent_of_1rm(reps + 1));
        }
    }

    #[test]
    fn test_percentage_table_loads() {
        let table = percentage_table(200.0);
        assert_eq!(table.len(), 12);
        assert_eq!(table[0].0, 1);
        assert!(approx_eq(table[0].1, 200.0));
        assert!(approx_eq(table[9].1, 150.0));
    }

    #[test]
    fn test_pace_and_split() {
        assert!(approx_eq(
            pace_seconds_per_km(Some(5000.0), Some(1500.0)).unwrap(),
            300.0
        ));
        assert!(approx_eq(
            split_seconds_per_500m(Some(2000.0), Some(480.0)).unwrap(),
            120.0
        ));
    }

    #[test]
    fn test_pace_monotonic() {
        let time = 1200.0;
        let mut last = f64::INFINITY;
        for distance in [1000.0, 2000.0, 3000.0, 5000.0, 10_000.0] {
            let pace = pace_seconds_per_km(Some(distance), Some(time)).unwrap();
            let split = split_seconds_per_500m(Some(distance), Some(time)).unwrap();
            assert!(pace < last);
            assert!(approx_eq(split * 2.0, pace));
            last = pace;
        }

        let (mut last_pace, mut last_split) = (0.0, 0.0);
        for time in [600.0, 900.0, 1200.0, 1800.0] {
            let pace = pace_seconds_per_km(Some(3000.0), Some(time)).unwrap();
            let split = split_seconds_per_500m(Some(3000.0), Some(time)).unwrap();
            assert!(pace > last_pace);
            assert!(split > last_split);
            last_pace = pace;
            last_split = split;
        }
    }

    #[test]
    fn test_pace_not_computable() {
        assert_eq!(pace_seconds_per_km(None, Some(100.0)), None);
        assert_eq!(pace_seconds_per_km(Some(1000.0), None), None);
        assert_eq!(pace_seconds_per_km(Some(0.0), Some(100.0)), None);
        assert_eq!(split_seconds_per_500m(Some(1000.0), Some(-1.0)), None);
        assert_eq!(split_seconds_per_500m(Some(1000.0), Some(0.0)), None);
    }

    #[test]
    fn test_format_mm_ss() {
        assert_eq!(format_mm_ss(300.0), "5:00");
        assert_eq!(format_mm_ss(119.6), "2:00");
        assert_eq!(format_mm_ss(65.2), "1:05");
        assert_eq!(format_mm_ss(-3.0), "0:00");
    }
}
