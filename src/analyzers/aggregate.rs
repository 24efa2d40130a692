use crate::analyzers::types::{
    BoroughTotal, RegionTotal, RoomTypeTotal, Summaries, YearTotal,
};
use crate::analyzers::utility::{add_rents, distinct_years};
use crate::stats::{ListingRecord, RoomType};
use anyhow::Result;
use std::collections::BTreeMap;
use std::fmt::Debug;
use tracing::debug;

/// Number of boroughs kept for the regional breakdown.
pub const DEFAULT_TOP_BOROUGHS: usize = 3;

/// Sums `Count_of_Rents` per key, ordered by key.
///
/// # Errors
///
/// Returns an error if a group total overflows `u64`.
fn group_sum<'a, I, K, F>(records: I, key: F) -> Result<BTreeMap<K, u64>>
where
    I: IntoIterator<Item = &'a ListingRecord>,
    K: Ord + Debug,
    F: Fn(&'a ListingRecord) -> K,
{
    let mut totals = BTreeMap::new();
    for r in records {
        let total = totals.entry(key(r)).or_default();
        add_rents(total, r.count_of_rents, key(r))?;
    }
    Ok(totals)
}

/// Sums `Count_of_Rents` per year, ordered by year.
pub fn yearly_totals(records: &[ListingRecord]) -> Result<Vec<YearTotal>> {
    let totals = group_sum(records, |r| r.year)?;

    Ok(totals
        .into_iter()
        .map(|(year, total_rents)| YearTotal { year, total_rents })
        .collect())
}

/// Sums `Count_of_Rents` per (year, room type), ordered by year then label.
pub fn room_type_trend(records: &[ListingRecord]) -> Result<Vec<RoomTypeTotal>> {
    let totals = group_sum(records, |r| (r.year, r.room_type()))?;

    Ok(totals
        .into_iter()
        .map(|((year, room_type), total_rents)| RoomTypeTotal {
            year,
            room_type,
            total_rents,
        })
        .collect())
}

/// All-years total per borough, ordered by borough name.
pub fn borough_totals(records: &[ListingRecord]) -> Result<Vec<BoroughTotal>> {
    let totals = group_sum(records, |r| r.borough.as_str())?;

    Ok(totals
        .into_iter()
        .map(|(borough, total_rents)| BoroughTotal {
            borough: borough.to_string(),
            total_rents,
        })
        .collect())
}

/// The `n` boroughs with the largest totals, highest first.
///
/// Equal totals keep alphabetical order. Returns every borough when fewer
/// than `n` exist.
pub fn top_boroughs(records: &[ListingRecord], n: usize) -> Result<Vec<String>> {
    let mut totals = borough_totals(records)?;
    // stable: ties stay in name order
    totals.sort_by(|a, b| b.total_rents.cmp(&a.total_rents));
    totals.truncate(n);
    Ok(totals.into_iter().map(|t| t.borough).collect())
}

/// Sums `Count_of_Rents` per (year, borough, room type) for the given boroughs only.
pub fn top_region_summary(
    records: &[ListingRecord],
    boroughs: &[String],
) -> Result<Vec<RegionTotal>> {
    let selected = records.iter().filter(|r| boroughs.contains(&r.borough));
    let totals = group_sum(selected, |r| (r.year, r.borough.as_str(), r.room_type()))?;

    Ok(totals
        .into_iter()
        .map(|((year, borough, room_type), total_rents)| RegionTotal {
            year,
            borough: borough.to_string(),
            room_type,
            total_rents,
        })
        .collect())
}

impl Summaries {
    /// Runs every aggregation query over the cleaned records.
    pub fn from_listings(records: &[ListingRecord], top_n: usize) -> Result<Self> {
        let top_boroughs = top_boroughs(records, top_n)?;
        debug!(?top_boroughs, "Top boroughs selected");

        Ok(Summaries {
            years: distinct_years(records),
            yearly: yearly_totals(records)?,
            room_types: room_type_trend(records)?,
            top_regions: top_region_summary(records, &top_boroughs)?,
            top_boroughs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::utility::sum_rents;

    fn example_records() -> Vec<ListingRecord> {
        vec![
            ListingRecord::new(2019, "Manhattan", "Entire home/apt", 100),
            ListingRecord::new(2019, "Manhattan", "Private Room", 50),
            ListingRecord::new(2020, "Brooklyn", "Entire home/apt", 30),
        ]
    }

    fn mixed_records() -> Vec<ListingRecord> {
        vec![
            ListingRecord::new(2019, "Manhattan", "Entire home/apt", 400),
            ListingRecord::new(2019, "Brooklyn", "Private Room", 250),
            ListingRecord::new(2019, "Queens", "1 Bedroom", 90),
            ListingRecord::new(2019, "Bronx", "Shared Room", 40),
            ListingRecord::new(2020, "Manhattan", "Private Room", 120),
            ListingRecord::new(2020, "Brooklyn", "Studio", 60),
            ListingRecord::new(2020, "Queens", "Private Room", 35),
            ListingRecord::new(2020, "Staten Island", "Entire home/apt", 10),
            ListingRecord::new(2021, "Bronx", "Entire home/apt", 80),
        ]
    }

    #[test]
    fn test_yearly_totals_example() {
        let totals = yearly_totals(&example_records()).unwrap();
        assert_eq!(
            totals,
            vec![
                YearTotal { year: 2019, total_rents: 150 },
                YearTotal { year: 2020, total_rents: 30 },
            ]
        );
    }

    #[test]
    fn test_room_type_trend_example() {
        let trend = room_type_trend(&example_records()).unwrap();
        assert_eq!(
            trend,
            vec![
                RoomTypeTotal { year: 2019, room_type: RoomType::EntireHome, total_rents: 100 },
                RoomTypeTotal { year: 2019, room_type: RoomType::Room, total_rents: 50 },
                RoomTypeTotal { year: 2020, room_type: RoomType::EntireHome, total_rents: 30 },
            ]
        );
    }

    #[test]
    fn test_grouping_preserves_sum() {
        let records = mixed_records();
        let total = sum_rents(&records).unwrap();

        let yearly: u64 = yearly_totals(&records).unwrap().iter().map(|t| t.total_rents).sum();
        let by_type: u64 = room_type_trend(&records).unwrap().iter().map(|t| t.total_rents).sum();
        let by_borough: u64 = borough_totals(&records).unwrap().iter().map(|t| t.total_rents).sum();

        assert_eq!(yearly, total);
        assert_eq!(by_type, total);
        assert_eq!(by_borough, total);
    }

    #[test]
    fn test_at_most_two_room_types_per_year() {
        let trend = room_type_trend(&mixed_records()).unwrap();
        for year in [2019, 2020, 2021] {
            assert!(trend.iter().filter(|t| t.year == year).count() <= 2);
        }
    }

    #[test]
    fn test_top_boroughs_ordered_by_total() {
        // Manhattan 520, Brooklyn 310, Queens 125, Bronx 120, Staten Island 10
        let top = top_boroughs(&mixed_records(), DEFAULT_TOP_BOROUGHS).unwrap();
        assert_eq!(top, vec!["Manhattan", "Brooklyn", "Queens"]);
    }

    #[test]
    fn test_top_boroughs_fewer_than_n() {
        let top = top_boroughs(&example_records(), DEFAULT_TOP_BOROUGHS).unwrap();
        assert_eq!(top, vec!["Manhattan", "Brooklyn"]);
        assert!(top_boroughs(&[], DEFAULT_TOP_BOROUGHS).unwrap().is_empty());
    }

    #[test]
    fn test_top_boroughs_ties_break_alphabetically() {
        let records = vec![
            ListingRecord::new(2019, "Queens", "Room", 10),
            ListingRecord::new(2019, "Bronx", "Room", 10),
            ListingRecord::new(2019, "Manhattan", "Room", 10),
            ListingRecord::new(2019, "Brooklyn", "Room", 10),
        ];
        let top = top_boroughs(&records, 3).unwrap();
        assert_eq!(top, vec!["Bronx", "Brooklyn", "Manhattan"]);
    }

    #[test]
    fn test_top_region_summary_only_selected_boroughs() {
        let records = mixed_records();
        let top = top_boroughs(&records, 3).unwrap();
        let summary = top_region_summary(&records, &top).unwrap();

        assert!(summary.iter().all(|r| top.contains(&r.borough)));
        assert_eq!(
            summary.first(),
            Some(&RegionTotal {
                year: 2019,
                borough: "Brooklyn".to_string(),
                room_type: RoomType::Room,
                total_rents: 250,
            })
        );
        let total: u64 = summary.iter().map(|r| r.total_rents).sum();
        assert_eq!(total, 520 + 310 + 125);
    }

    #[test]
    fn test_summaries_from_listings() {
        let summaries = Summaries::from_listings(&mixed_records(), DEFAULT_TOP_BOROUGHS).unwrap();

        assert_eq!(summaries.years, vec![2019, 2020, 2021]);
        assert_eq!(summaries.yearly.len(), 3);
        assert_eq!(summaries.top_boroughs.len(), 3);
        assert!(!summaries.top_regions.iter().any(|r| r.borough == "Bronx"));
    }

    #[test]
    fn test_group_total_overflow_is_error() {
        let records = vec![
            ListingRecord::new(2019, "Manhattan", "Room", 10_000_000_000_000_000_000),
            ListingRecord::new(2019, "Brooklyn", "Room", 10_000_000_000_000_000_000),
        ];

        let err = yearly_totals(&records).unwrap_err();
        assert!(err.to_string().contains("overflow"));
        assert!(room_type_trend(&records).is_err());
        assert!(Summaries::from_listings(&records, DEFAULT_TOP_BOROUGHS).is_err());

        // per-borough totals still fit
        assert_eq!(top_boroughs(&records, 3).unwrap(), vec!["Brooklyn", "Manhattan"]);
    }
}
