//! Categorical rewrites for the `availability` and `location` columns.

use crate::types::{Availability, LocationCount};
use std::collections::HashMap;

/// Bucket every location outside the ranked set collapses into.
pub const OTHER_LOCATION: &str = "Other";

const READY_TO_MOVE: &str = "Ready To Move";

const LOCATION_ALIASES: &[(&str, &str)] = &[
    ("Electronics City Phase 1", "Electronic City"),
    ("Electronic City Phase II", "Electronic City"),
    ("7th Phase JP Nagar", "JP Nagar"),
];

/// Anything other than an exact `"Ready To Move"` is treated as still under
/// construction, including a missing value.
pub fn normalize_availability(value: Option<&str>) -> Availability {
    match value {
        Some(READY_TO_MOVE) => Availability::ReadyToMove,
        _ => Availability::UnderConstruction,
    }
}

/// Map a known alias to its canonical location name.
pub fn canonical_location(name: &str) -> &str {
    LOCATION_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(name)
}

/// The `n` most frequent non-empty locations, most frequent first.
///
/// Equal counts keep the order in which the locations first appear.
pub fn rank_locations(column: &[String], n: usize) -> Vec<LocationCount> {
    let mut first_seen: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for location in column.iter().filter(|l| !l.is_empty()) {
        let count = counts.entry(location.as_str()).or_insert(0);
        if *count == 0 {
            first_seen.push(location.as_str());
        }
        *count += 1;
    }

    let mut ranked: Vec<LocationCount> = first_seen
        .into_iter()
        .map(|location| LocationCount {
            location: location.to_string(),
            count: counts[location],
        })
        .collect();
    // `sort_by` is stable, so ties stay in first-appearance order.
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(n);
    ranked
}

/// Keep ranked locations as they are and collapse the rest into `"Other"`.
pub fn bucket_locations(column: Vec<String>, ranked: &[LocationCount]) -> Vec<String> {
    column
        .into_iter()
        .map(|location| {
            if ranked.iter().any(|r| r.location == location) {
                location
            } else {
                OTHER_LOCATION.to_string()
            }
        })
        .collect()
}
