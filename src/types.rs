use serde::{Deserialize, Serialize};
use std::fmt;
use tabled::Tabled;

/// One input record, every cell kept as optional text until parsed.
///
/// `area_type` and `society` must be present in the header but are never
/// deserialized; that is where those two columns get dropped.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRow {
    pub availability: Option<String>,
    pub location: Option<String>,
    pub size: Option<String>,
    pub total_sqft: Option<String>,
    pub bath: Option<String>,
    #[serde(default)]
    pub balcony: Option<String>,
    pub price: Option<String>,
}

/// The input table after `area_type` and `society` are dropped, stored
/// column-wise so each cleaning pass is a map over one column.
#[derive(Debug, Clone, Default)]
pub struct RawColumns {
    pub availability: Vec<Option<String>>,
    pub location: Vec<Option<String>>,
    pub size: Vec<Option<String>>,
    pub total_sqft: Vec<Option<String>>,
    pub bath: Vec<Option<String>>,
    pub balcony: Vec<Option<String>>,
    pub price: Vec<Option<String>>,
}

impl RawColumns {
    pub fn len(&self) -> usize {
        self.location.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Availability {
    #[serde(rename = "Ready To Move")]
    ReadyToMove,
    #[serde(rename = "Under Construction")]
    UnderConstruction,
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Availability::ReadyToMove => f.write_str("Ready To Move"),
            Availability::UnderConstruction => f.write_str("Under Construction"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Furnishing {
    #[serde(rename = "Unfurnished")]
    Unfurnished,
    #[serde(rename = "Semi Furnished")]
    SemiFurnished,
    #[serde(rename = "Fully Furnished")]
    FullyFurnished,
}

impl fmt::Display for Furnishing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Furnishing::Unfurnished => f.write_str("Unfurnished"),
            Furnishing::SemiFurnished => f.write_str("Semi Furnished"),
            Furnishing::FullyFurnished => f.write_str("Fully Furnished"),
        }
    }
}

/// A cleaned row. Field order is the output column order.
#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct HousingRecord {
    pub availability: Availability,
    pub location: String,
    #[tabled(display_with = "display_opt")]
    pub bedroom: Option<u32>,
    #[tabled(display_with = "display_opt")]
    pub total_sqft: Option<f64>,
    #[tabled(display_with = "display_opt")]
    pub bathroom: Option<f64>,
    #[tabled(display_with = "display_opt")]
    pub balcony: Option<f64>,
    #[tabled(display_with = "display_opt")]
    pub price: Option<f64>,
    #[tabled(display_with = "display_opt")]
    pub furnishing: Option<Furnishing>,
    pub amenities: u8,
}

fn display_opt<T: fmt::Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => String::new(),
    }
}

/// A location and the number of rows it appears in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationCount {
    pub location: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Tabled)]
pub struct LocationQuota {
    #[serde(rename = "Rank")]
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "Location")]
    #[tabled(rename = "Location")]
    pub location: String,
    #[serde(rename = "Rows")]
    #[tabled(rename = "Rows")]
    pub available: usize,
    #[serde(rename = "Weight")]
    #[tabled(rename = "Weight")]
    pub weight: u32,
    #[serde(rename = "Quota")]
    #[tabled(rename = "Quota")]
    pub quota: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub input_rows: usize,
    pub skipped_rows: usize,
    pub missing_bedroom: usize,
    pub missing_total_sqft: usize,
    pub seed: u64,
    pub target_rows: usize,
    pub output_rows: usize,
    pub locations: Vec<LocationQuota>,
}
