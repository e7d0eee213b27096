use crate::types::Furnishing;

/// Inclusive upper bound of each amenities tier, ascending. Each bucket's
/// lower bound is the previous entry's upper bound (exclusive), starting at 0.
const AMENITY_TIERS: &[(f64, u8)] = &[
    (30.0, 1),
    (40.0, 2),
    (50.0, 3),
    (60.0, 4),
    (70.0, 5),
    (90.0, 6),
    (150.0, 7),
    (300.0, 8),
    (500.0, 9),
    (f64::INFINITY, 10),
];

pub fn furnishing_for(price: Option<f64>) -> Option<Furnishing> {
    let price = price?;
    Some(if price <= 30.0 {
        Furnishing::Unfurnished
    } else if price <= 80.0 {
        Furnishing::SemiFurnished
    } else {
        Furnishing::FullyFurnished
    })
}

/// Tier 0 for non-positive or missing prices.
pub fn amenities_for(price: Option<f64>) -> u8 {
    match price {
        Some(p) if p > 0.0 => AMENITY_TIERS
            .iter()
            .find(|(upper, _)| p <= *upper)
            .map(|(_, tier)| *tier)
            .unwrap_or(0),
        _ => 0,
    }
}
