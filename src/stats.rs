use serde::Serialize;
use std::fmt;

/// Binary rollup of the fine-grained `Bedroom_Category` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum RoomType {
    #[serde(rename = "Entire home")]
    EntireHome,
    #[serde(rename = "Room")]
    Room,
}

impl RoomType {
    /// Maps a category to `Room` when it contains `"Room"` (case-sensitive),
    /// and to `EntireHome` for everything else.
    pub fn from_category(category: &str) -> Self {
        if category.contains("Room") {
            RoomType::Room
        } else {
            RoomType::EntireHome
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RoomType::EntireHome => "Entire home",
            RoomType::Room => "Room",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A cleaned input row. `count_of_rents` has already passed numeric coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRecord {
    pub year: i32,
    pub borough: String,
    pub bedroom_category: String,
    pub count_of_rents: u64,
}

impl ListingRecord {
    pub fn new(year: i32, borough: &str, bedroom_category: &str, count_of_rents: u64) -> Self {
        ListingRecord {
            year,
            borough: borough.to_string(),
            bedroom_category: bedroom_category.to_string(),
            count_of_rents,
        }
    }

    /// The derived `Bedroom_Category_Adjusted` column.
    pub fn room_type(&self) -> RoomType {
        RoomType::from_category(&self.bedroom_category)
    }
}

/// Result of loading and cleaning the input file.
#[derive(Debug, Default)]
pub struct Listings {
    pub records: Vec<ListingRecord>,
    pub rows_read: usize,
}

impl Listings {
    pub fn dropped(&self) -> usize {
        self.rows_read - self.records.len()
    }
}
