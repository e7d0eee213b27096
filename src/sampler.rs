//! Weighted stratified down-sampling over the ranked locations.

use crate::error::{PipelineError, Result};
use crate::types::{HousingRecord, LocationCount};
use rand::rngs::StdRng;
use rand::seq::{index, SliceRandom};
use rand::SeedableRng;
use std::collections::HashMap;
use tracing::debug;

pub const DEFAULT_TOP_N: usize = 20;
pub const DEFAULT_TARGET_ROWS: usize = 259;
pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_WEIGHTS: [u32; DEFAULT_TOP_N] =
    [4, 3, 2, 2, 2, 2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];

/// Knobs for location bucketing and sampling.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// How many locations keep their name; the rest become "Other".
    pub top_n: usize,
    pub target_rows: usize,
    /// One weight per rank, most frequent location first.
    pub weights: Vec<u32>,
    pub seed: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            target_rows: DEFAULT_TARGET_ROWS,
            weights: DEFAULT_WEIGHTS.to_vec(),
            seed: DEFAULT_SEED,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.weights.len() != self.top_n {
            return Err(PipelineError::InvalidConfig(format!(
                "{} weights given for {} locations",
                self.weights.len(),
                self.top_n
            )));
        }
        if self.weights.iter().map(|w| *w as u64).sum::<u64>() == 0 {
            return Err(PipelineError::InvalidConfig(
                "weights must not sum to zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Split `target` rows across ranks in proportion to `weights`.
///
/// Each quota is floored; the leftover goes entirely to the last rank so the
/// quotas always add up to `target`.
pub fn compute_quotas(target: usize, weights: &[u32]) -> Vec<usize> {
    let total: u64 = weights.iter().map(|w| *w as u64).sum();
    if total == 0 {
        return vec![0; weights.len()];
    }
    let mut quotas: Vec<usize> = weights
        .iter()
        .map(|w| (target as u64 * *w as u64 / total) as usize)
        .collect();
    let assigned: usize = quotas.iter().sum();
    if let Some(last) = quotas.last_mut() {
        *last += target - assigned;
    }
    quotas
}

/// Draw each ranked location's quota without replacement, concatenated in
/// rank order. Every location's draw uses a fresh RNG seeded with `seed`.
pub fn stratified_sample(
    rows: &[HousingRecord],
    ranked: &[LocationCount],
    quotas: &[usize],
    seed: u64,
) -> Result<Vec<HousingRecord>> {
    if ranked.len() < quotas.len() {
        return Err(PipelineError::NotEnoughLocations {
            expected: quotas.len(),
            found: ranked.len(),
        });
    }

    let mut by_location: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, row) in rows.iter().enumerate() {
        by_location.entry(row.location.as_str()).or_default().push(i);
    }

    ranked
        .iter()
        .zip(quotas)
        .try_fold(Vec::new(), |mut acc, (entry, &quota)| {
            let pool = by_location
                .get(entry.location.as_str())
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            if pool.len() < quota {
                return Err(PipelineError::UndersizedLocation {
                    location: entry.location.clone(),
                    available: pool.len(),
                    quota,
                });
            }
            debug!(location = %entry.location, available = pool.len(), quota, "sampling location");
            let mut rng = StdRng::seed_from_u64(seed);
            acc.extend(
                index::sample(&mut rng, pool.len(), quota)
                    .into_iter()
                    .map(|i| rows[pool[i]].clone()),
            );
            Ok(acc)
        })
}

/// One full uniform shuffle with a freshly seeded RNG.
pub fn shuffle_rows(mut rows: Vec<HousingRecord>, seed: u64) -> Vec<HousingRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    rows.shuffle(&mut rng);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Availability;

    fn record(location: &str, price: f64) -> HousingRecord {
        HousingRecord {
            availability: Availability::ReadyToMove,
            location: location.to_string(),
            bedroom: Some(2),
            total_sqft: Some(1000.0),
            bathroom: Some(2.0),
            balcony: None,
            price: Some(price),
            furnishing: None,
            amenities: 0,
        }
    }

    fn ranked(names: &[(&str, usize)]) -> Vec<LocationCount> {
        names
            .iter()
            .map(|(l, c)| LocationCount {
                location: l.to_string(),
                count: *c,
            })
            .collect()
    }

    #[test]
    fn default_quotas_sum_to_target() {
        let quotas = compute_quotas(DEFAULT_TARGET_ROWS, &DEFAULT_WEIGHTS);
        assert_eq!(quotas.len(), 20);
        assert_eq!(quotas.iter().sum::<usize>(), 259);
        assert_eq!(&quotas[..6], &[35, 26, 17, 17, 17, 17]);
        assert!(quotas[6..19].iter().all(|q| *q == 8));
        assert_eq!(quotas[19], 26);
    }

    #[test]
    fn quotas_sum_for_awkward_targets() {
        for target in [0, 1, 7, 28, 29, 100, 1000] {
            let quotas = compute_quotas(target, &DEFAULT_WEIGHTS);
            assert_eq!(quotas.iter().sum::<usize>(), target);
        }
        assert_eq!(compute_quotas(10, &[1, 1, 1]), vec![3, 3, 4]);
    }

    #[test]
    fn config_rejects_mismatched_weights() {
        let config = PipelineConfig {
            weights: vec![1, 2],
            ..PipelineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PipelineError::InvalidConfig(_))
        ));
        assert!(PipelineConfig::default().validate().is_ok());
    }

    #[test]
    fn sample_takes_quota_from_each_location() {
        let rows: Vec<HousingRecord> = (0..10)
            .map(|i| record("a", i as f64))
            .chain((0..5).map(|i| record("b", 100.0 + i as f64)))
            .collect();
        let picked =
            stratified_sample(&rows, &ranked(&[("a", 10), ("b", 5)]), &[4, 5], 42).unwrap();
        assert_eq!(picked.len(), 9);
        assert!(picked[..4].iter().all(|r| r.location == "a"));
        assert!(picked[4..].iter().all(|r| r.location == "b"));

        let mut prices: Vec<u64> = picked[..4].iter().map(|r| r.price.unwrap() as u64).collect();
        prices.sort();
        prices.dedup();
        assert_eq!(prices.len(), 4, "sampling must be without replacement");
    }

    #[test]
    fn sample_is_reproducible() {
        let rows: Vec<HousingRecord> = (0..50).map(|i| record("a", i as f64)).collect();
        let first = stratified_sample(&rows, &ranked(&[("a", 50)]), &[10], 7).unwrap();
        let second = stratified_sample(&rows, &ranked(&[("a", 50)]), &[10], 7).unwrap();
        assert_eq!(first, second);
        assert_eq!(shuffle_rows(first.clone(), 7), shuffle_rows(second, 7));
    }

    #[test]
    fn undersized_location_fails() {
        let rows = vec![record("a", 1.0), record("a", 2.0)];
        let err = stratified_sample(&rows, &ranked(&[("a", 2)]), &[3], 42).unwrap_err();
        match err {
            PipelineError::UndersizedLocation {
                location,
                available,
                quota,
            } => {
                assert_eq!(location, "a");
                assert_eq!(available, 2);
                assert_eq!(quota, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn too_few_locations_fails() {
        let rows = vec![record("a", 1.0)];
        let err = stratified_sample(&rows, &ranked(&[("a", 1)]), &[1, 1], 42).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::NotEnoughLocations {
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn shuffle_keeps_every_row() {
        let rows: Vec<HousingRecord> = (0..30).map(|i| record("a", i as f64)).collect();
        let shuffled = shuffle_rows(rows.clone(), 42);
        assert_eq!(shuffled.len(), rows.len());
        let mut prices: Vec<u64> = shuffled.iter().map(|r| r.price.unwrap() as u64).collect();
        prices.sort();
        assert_eq!(prices, (0..30).collect::<Vec<u64>>());
    }
}
