//! CSV loader for the bedroom-category listing dataset.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::stats::{ListingRecord, Listings};

/// One raw row. The count stays a string until [`coerce_count`] decides on it.
#[derive(Debug, Deserialize)]
struct RawListing {
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Borough")]
    borough: String,
    #[serde(rename = "Bedroom_Category")]
    bedroom_category: String,
    #[serde(rename = "Count_of_Rents")]
    count_of_rents: String,
}

/// Opens `path` and parses it with [`parse_listings`].
///
/// # Errors
///
/// Returns an error if the file cannot be opened or its schema is malformed.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_listings(path: &Path) -> Result<Listings> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let listings =
        parse_listings(file).with_context(|| format!("parsing {}", path.display()))?;

    info!(
        rows_read = listings.rows_read,
        kept = listings.records.len(),
        dropped = listings.dropped(),
        "Listings loaded"
    );
    Ok(listings)
}

/// Reads listing rows from CSV, dropping rows whose `Count_of_Rents` is not a
/// valid non-negative number.
///
/// # Errors
///
/// Returns an error if a required column is missing or `Year` is not an integer.
pub fn parse_listings<R: Read>(reader: R) -> Result<Listings> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers().context("reading header")?.clone();
    let mut listings = Listings::default();

    for result in rdr.records() {
        let record = result.context("reading listing rows")?;
        // physical line where the record starts; quoted fields may span lines
        let line = record.position().map_or(0, |p| p.line());
        let raw: RawListing = record
            .deserialize(Some(&headers))
            .with_context(|| format!("line {line}"))?;
        listings.rows_read += 1;

        match coerce_count(&raw.count_of_rents) {
            Some(count) => listings.records.push(ListingRecord {
                year: raw.year,
                borough: raw.borough,
                bedroom_category: raw.bedroom_category,
                count_of_rents: count,
            }),
            None => debug!(line, value = %raw.count_of_rents, "Dropping invalid count"),
        }
    }

    Ok(listings)
}

/// Coerces a raw count to a non-negative integer.
///
/// Decimals are truncated toward zero. Empty, non-numeric, non-finite,
/// negative and too-large (`>= 2^64`) values yield `None`.
pub fn coerce_count(raw: &str) -> Option<u64> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(n) = value.parse::<u64>() {
        return Some(n);
    }

    match value.parse::<f64>() {
        // u64::MAX as f64 rounds up to 2^64, which itself does not fit
        Ok(f) if f.is_finite() && f >= 0.0 && f < u64::MAX as f64 => Some(f.trunc() as u64),
        _ => None,
    }
}
