//! Row types produced by the aggregation queries and exported as CSV.

use serde::Serialize;

use crate::stats::RoomType;

/// A row type with a fixed CSV header, so empty tables still get one.
pub trait SummaryRow: Serialize {
    const HEADERS: &'static [&'static str];
}

/// `Total_Rents` for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearTotal {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Total_Rents")]
    pub total_rents: u64,
}

impl SummaryRow for YearTotal {
    const HEADERS: &'static [&'static str] = &["Year", "Total_Rents"];
}

/// `Total_Rents` for one (year, room type) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomTypeTotal {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Bedroom_Category")]
    pub room_type: RoomType,
    #[serde(rename = "Total_Rents")]
    pub total_rents: u64,
}

impl SummaryRow for RoomTypeTotal {
    const HEADERS: &'static [&'static str] = &["Year", "Bedroom_Category", "Total_Rents"];
}

/// `Total_Rents` for one (year, borough, room type) triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionTotal {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Borough")]
    pub borough: String,
    #[serde(rename = "Bedroom_Category")]
    pub room_type: RoomType,
    #[serde(rename = "Total_Rents")]
    pub total_rents: u64,
}

impl SummaryRow for RegionTotal {
    const HEADERS: &'static [&'static str] =
        &["Year", "Borough", "Bedroom_Category", "Total_Rents"];
}

/// All-years total for one borough, used to pick the top boroughs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoroughTotal {
    pub borough: String,
    pub total_rents: u64,
}

/// Every table the pipeline derives from the cleaned listings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Summaries {
    pub years: Vec<i32>,
    pub yearly: Vec<YearTotal>,
    pub room_types: Vec<RoomTypeTotal>,
    /// Highest total first.
    pub top_boroughs: Vec<String>,
    pub top_regions: Vec<RegionTotal>,
}
