//! Output formatting and persistence for summary tables.
//!
//! Summaries are logged as JSON at debug level and exported as CSV.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::analyzers::types::SummaryRow;
use csv::WriterBuilder;
use std::fs::File;
use std::path::Path;

/// Logs a value as pretty-printed JSON at debug level.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    debug!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes `rows` to a new CSV file at `path`, replacing any existing file.
///
/// The header comes from [`SummaryRow::HEADERS`] so it is written even when
/// `rows` is empty. No index column is added.
pub fn write_summary<T: SummaryRow>(path: &Path, rows: &[T]) -> Result<()> {
    debug!(path = %path.display(), rows = rows.len(), "Writing summary CSV");

    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;

    let mut writer = WriterBuilder::new()
        .has_headers(false) // header is written from T::HEADERS
        .from_writer(file);

    writer.write_record(T::HEADERS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = rows.len(), "Summary written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::{RegionTotal, RoomTypeTotal, YearTotal};
    use crate::stats::RoomType;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&vec![YearTotal { year: 2019, total_rents: 1 }]).unwrap();
    }

    #[test]
    fn test_write_year_totals() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("total_listings_summary.csv");

        let rows = vec![
            YearTotal { year: 2019, total_rents: 150 },
            YearTotal { year: 2020, total_rents: 30 },
        ];
        write_summary(&path, &rows).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines, vec!["Year,Total_Rents", "2019,150", "2020,30"]);
    }

    #[test]
    fn test_write_room_type_labels() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("adjusted_room_type_summary.csv");

        let rows = vec![
            RoomTypeTotal { year: 2019, room_type: RoomType::EntireHome, total_rents: 100 },
            RoomTypeTotal { year: 2019, room_type: RoomType::Room, total_rents: 50 },
        ];
        write_summary(&path, &rows).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Year,Bedroom_Category,Total_Rents",
                "2019,Entire home,100",
                "2019,Room,50",
            ]
        );
    }

    #[test]
    fn test_empty_table_still_has_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("top_regions_summary.csv");

        write_summary::<RegionTotal>(&path, &[]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim_end(), "Year,Borough,Bedroom_Category,Total_Rents");
    }

    #[test]
    fn test_rewrite_replaces_previous_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("summary.csv");
        let rows = vec![YearTotal { year: 2021, total_rents: 9 }];

        write_summary(&path, &rows).unwrap();
        let first = fs::read(&path).unwrap();
        write_summary(&path, &rows).unwrap();
        let second = fs::read(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_unwritable_path_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("summary.csv");
        let rows: Vec<YearTotal> = vec![];
        assert!(write_summary(&path, &rows).is_err());
    }
}
