//! Stage wiring: pruned columns in, sampled table out.
//!
//! Every cleaning step is a map over one column; the columns are zipped into
//! records only once all of them are final.

use crate::error::Result;
use crate::normalize::{bucket_locations, canonical_location, normalize_availability, rank_locations};
use crate::sampler::{compute_quotas, shuffle_rows, stratified_sample, PipelineConfig};
use crate::tiers::{amenities_for, furnishing_for};
use crate::types::{HousingRecord, LocationCount, LocationQuota, RawColumns};
use crate::util::{parse_bedroom, parse_f64_safe, parse_total_sqft};
use tracing::info;

/// The cleaned full table plus the ranking it was bucketed with.
#[derive(Debug, Clone)]
pub struct CleanTable {
    pub rows: Vec<HousingRecord>,
    pub ranked: Vec<LocationCount>,
}

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub rows: Vec<HousingRecord>,
    pub quotas: Vec<LocationQuota>,
    pub missing_bedroom: usize,
    pub missing_total_sqft: usize,
}

fn map_column<T>(column: &[Option<String>], f: impl Fn(Option<&str>) -> T) -> Vec<T> {
    column.iter().map(|v| f(v.as_deref())).collect()
}

pub fn clean(cols: &RawColumns, top_n: usize) -> CleanTable {
    let availability = map_column(&cols.availability, normalize_availability);

    let aliased: Vec<String> = map_column(&cols.location, |v| {
        canonical_location(v.unwrap_or_default()).to_string()
    });
    let ranked = rank_locations(&aliased, top_n);
    let location = bucket_locations(aliased, &ranked);

    let bedroom = map_column(&cols.size, parse_bedroom);
    let total_sqft = map_column(&cols.total_sqft, parse_total_sqft);
    let bathroom = map_column(&cols.bath, parse_f64_safe);
    let balcony = map_column(&cols.balcony, parse_f64_safe);
    let price = map_column(&cols.price, parse_f64_safe);

    let furnishing: Vec<_> = price.iter().map(|p| furnishing_for(*p)).collect();
    let amenities: Vec<_> = price.iter().map(|p| amenities_for(*p)).collect();

    let rows = (0..cols.len())
        .map(|i| HousingRecord {
            availability: availability[i],
            location: location[i].clone(),
            bedroom: bedroom[i],
            total_sqft: total_sqft[i],
            bathroom: bathroom[i],
            balcony: balcony[i],
            price: price[i],
            furnishing: furnishing[i],
            amenities: amenities[i],
        })
        .collect();

    CleanTable { rows, ranked }
}

pub fn run(cols: &RawColumns, config: &PipelineConfig) -> Result<PipelineOutput> {
    config.validate()?;

    let table = clean(cols, config.top_n);
    let missing_bedroom = table.rows.iter().filter(|r| r.bedroom.is_none()).count();
    let missing_total_sqft = table.rows.iter().filter(|r| r.total_sqft.is_none()).count();
    info!(
        rows = table.rows.len(),
        ranked = table.ranked.len(),
        missing_bedroom,
        missing_total_sqft,
        "cleaned table"
    );

    let quotas = compute_quotas(config.target_rows, &config.weights);
    let sampled = stratified_sample(&table.rows, &table.ranked, &quotas, config.seed)?;
    let rows = shuffle_rows(sampled, config.seed);
    info!(rows = rows.len(), seed = config.seed, "sampled and shuffled");

    let quotas = table
        .ranked
        .iter()
        .zip(config.weights.iter().zip(&quotas))
        .enumerate()
        .map(|(i, (entry, (weight, quota)))| LocationQuota {
            rank: i + 1,
            location: entry.location.clone(),
            available: entry.count,
            weight: *weight,
            quota: *quota,
        })
        .collect();

    Ok(PipelineOutput {
        rows,
        quotas,
        missing_bedroom,
        missing_total_sqft,
    })
}
