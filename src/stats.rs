//! Hit-count sample statistics and strategy ranking

use serde::{Deserialize, Serialize};

/// Arithmetic mean of a hit-count sample
pub fn mean(sample: &[u32]) -> f64 {
    if sample.is_empty() {
        return 0.0;
    }
    sample.iter().map(|&h| h as f64).sum::<f64>() / sample.len() as f64
}

/// Median of a hit-count sample (average of the two middle values for even n)
pub fn median(sample: &[u32]) -> f64 {
    if sample.is_empty() {
        return 0.0;
    }
    let mut sorted = sample.to_vec();
    sorted.sort_unstable();
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2] as f64
    } else {
        (sorted[n / 2 - 1] as f64 + sorted[n / 2] as f64) / 2.0
    }
}

/// Sample standard deviation (divisor n - 1).
///
/// Callers must ensure the sample holds at least two values; config
/// validation enforces run_count >= 2 before any sample exists.
pub fn sample_std_dev(sample: &[u32]) -> f64 {
    if sample.len() < 2 {
        return 0.0;
    }
    let avg = mean(sample);
    let variance = sample
        .iter()
        .map(|&h| (h as f64 - avg).powi(2))
        .sum::<f64>()
        / (sample.len() - 1) as f64;
    variance.sqrt()
}

/// Nearest-rank percentile: sort ascending, take the value at rank
/// ceil(n * p / 100), 1-indexed. No interpolation between ranks.
/// An empty sample returns the 0 sentinel.
pub fn percentile(sample: &[u32], p: f64) -> u32 {
    if sample.is_empty() {
        return 0;
    }
    let mut sorted = sample.to_vec();
    sorted.sort_unstable();
    let rank = ((sorted.len() as f64 * p) / 100.0).ceil() as usize;
    sorted[rank.clamp(1, sorted.len()) - 1]
}

/// One evaluated attack order: budget-independent aggregates plus the raw
/// sample of simulated hit counts.
///
/// The sample is kept so win rate against any ammo budget is a recount over
/// cached outcomes, never a resimulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluatedStrategy {
    pub path: Vec<String>,
    #[serde(skip)]
    pub sample: Vec<u32>,
    pub avg_hits: f64,
    pub median_hits: f64,
    pub std_dev_hits: f64,
    pub p95_hits: u32,
}

impl EvaluatedStrategy {
    /// Reduce a sample of battle outcomes to its aggregates
    pub fn from_sample(path: Vec<String>, sample: Vec<u32>) -> Self {
        let avg_hits = mean(&sample);
        let median_hits = median(&sample);
        let std_dev_hits = sample_std_dev(&sample);
        let p95_hits = percentile(&sample, 95.0);
        Self {
            path,
            sample,
            avg_hits,
            median_hits,
            std_dev_hits,
            p95_hits,
        }
    }

    /// Number of simulated battles that finished within the ammo budget
    pub fn wins_within(&self, ammo_budget: u32) -> usize {
        self.sample.iter().filter(|&&h| h <= ammo_budget).count()
    }

    /// Win rate in percent for the given ammo budget
    pub fn win_rate(&self, ammo_budget: u32) -> f64 {
        if self.sample.is_empty() {
            return 0.0;
        }
        self.wins_within(ammo_budget) as f64 / self.sample.len() as f64 * 100.0
    }
}

/// One ranked output row handed to the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyRow {
    pub path: Vec<String>,
    pub median_hits: f64,
    pub avg_hits: f64,
    pub std_dev_hits: f64,
    pub p95_hits: u32,
    /// Win rate in percent for the requested ammo budget, one decimal
    pub win_rate: f64,
}

/// Rank evaluated strategies for an ammo budget and keep the best top_n.
///
/// Sort key: higher win rate first, then lower median, then lower mean.
/// Win rates are compared through exact win counts so equal rates never
/// diverge on float noise. The sort is stable, so three-way ties keep
/// enumeration order.
pub fn rank(evaluated: &[EvaluatedStrategy], ammo_budget: u32, top_n: usize) -> Vec<StrategyRow> {
    let mut scored: Vec<(usize, &EvaluatedStrategy)> = evaluated
        .iter()
        .map(|s| (s.wins_within(ammo_budget), s))
        .collect();

    scored.sort_by(|&(wins_a, a), &(wins_b, b)| {
        wins_b
            .cmp(&wins_a)
            .then(a.median_hits.total_cmp(&b.median_hits))
            .then(a.avg_hits.total_cmp(&b.avg_hits))
    });

    scored
        .into_iter()
        .take(top_n)
        .map(|(_, s)| StrategyRow {
            path: s.path.clone(),
            median_hits: s.median_hits,
            avg_hits: s.avg_hits,
            std_dev_hits: s.std_dev_hits,
            p95_hits: s.p95_hits,
            win_rate: (s.win_rate(ammo_budget) * 10.0).round() / 10.0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strategy(name: &str, sample: Vec<u32>) -> EvaluatedStrategy {
        EvaluatedStrategy::from_sample(vec![name.to_string()], sample)
    }

    #[test]
    fn percentile_empty_sample_is_zero() {
        for p in [1.0, 50.0, 95.0, 100.0] {
            assert_eq!(percentile(&[], p), 0);
        }
    }

    #[test]
    fn percentile_singleton_is_the_value() {
        for p in [0.1, 25.0, 50.0, 95.0, 100.0] {
            assert_eq!(percentile(&[42], p), 42);
        }
    }

    #[test]
    fn percentile_100_is_the_max() {
        let sample = vec![9, 3, 7, 1, 5];
        assert_eq!(percentile(&sample, 100.0), 9);
    }

    #[test]
    fn percentile_uses_nearest_rank_without_interpolation() {
        let sample: Vec<u32> = (1..=10).collect();
        // rank ceil(10 * 95 / 100) = 10 -> value 10
        assert_eq!(percentile(&sample, 95.0), 10);
        // rank ceil(10 * 50 / 100) = 5 -> value 5, not 5.5
        assert_eq!(percentile(&sample, 50.0), 5);
        // rank ceil(10 * 91 / 100) = ceil(9.1) = 10
        assert_eq!(percentile(&sample, 91.0), 10);
    }

    #[test]
    fn aggregates_match_known_sample() {
        let s = strategy("A", vec![2, 4, 4, 4, 5, 5, 7, 9]);
        assert!((s.avg_hits - 5.0).abs() < 1e-12);
        assert!((s.median_hits - 4.5).abs() < 1e-12);
        // sample variance of this set is 32/7
        assert!((s.std_dev_hits - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
        assert_eq!(s.p95_hits, 9);
    }

    #[test]
    fn win_rate_recount_matches_fresh_calculation() {
        let sample = vec![10, 20, 30, 40, 50];
        let s = strategy("A", sample.clone());
        for budget in [5, 10, 25, 50, 100] {
            let fresh = sample.iter().filter(|&&h| h <= budget).count() as f64
                / sample.len() as f64
                * 100.0;
            assert_eq!(s.win_rate(budget), fresh);
        }
        assert_eq!(s.wins_within(30), 3);
        assert_eq!(s.win_rate(30), 60.0);
    }

    #[test]
    fn ranking_prefers_win_rate_then_median_then_mean() {
        // a: 2 wins within budget 10; b and c: 3 wins each
        let a = strategy("A", vec![5, 8, 20]);
        // b: median 6, mean 6
        let b = strategy("B", vec![5, 6, 7]);
        // c: median 5, mean 6
        let c = strategy("C", vec![4, 5, 9]);
        let rows = rank(&[a, b, c], 10, 10);
        assert_eq!(rows[0].path, vec!["C"]);
        assert_eq!(rows[1].path, vec!["B"]);
        assert_eq!(rows[2].path, vec!["A"]);
    }

    #[test]
    fn equal_win_rate_and_median_breaks_on_mean() {
        // Same wins (all within budget), same median 5, different means
        let lower_mean = strategy("L", vec![4, 5, 6]);
        let higher_mean = strategy("H", vec![4, 5, 9]);
        let rows = rank(&[higher_mean, lower_mean], 20, 10);
        assert_eq!(rows[0].path, vec!["L"]);
        assert_eq!(rows[1].path, vec!["H"]);
    }

    #[test]
    fn three_way_tie_keeps_enumeration_order() {
        let first = strategy("first", vec![3, 5, 7]);
        let second = strategy("second", vec![3, 5, 7]);
        let third = strategy("third", vec![3, 5, 7]);
        let rows = rank(&[first, second, third], 10, 10);
        let names: Vec<_> = rows.iter().map(|r| r.path[0].as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn rank_truncates_to_top_n() {
        let strategies: Vec<_> = (0..10)
            .map(|i| strategy(&format!("S{}", i), vec![i + 1, i + 2, i + 3]))
            .collect();
        let rows = rank(&strategies, 100, 4);
        assert_eq!(rows.len(), 4);
        // Lowest median first on uniform win rate
        assert_eq!(rows[0].path, vec!["S0"]);
    }

    #[test]
    fn win_rate_rounds_to_one_decimal() {
        // 1 win of 3 samples = 33.333...% -> 33.3
        let s = strategy("A", vec![5, 20, 30]);
        let rows = rank(&[s], 10, 1);
        assert_eq!(rows[0].win_rate, 33.3);
    }
}
