use anyhow::{Result, anyhow};
use std::collections::BTreeSet;
use std::fmt::Debug;

use crate::stats::ListingRecord;

/// Sorted distinct years present in `records`.
pub fn distinct_years(records: &[ListingRecord]) -> Vec<i32> {
    records
        .iter()
        .map(|r| r.year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Adds `count` to `total`, failing instead of wrapping when the sum no
/// longer fits in a `u64`.
pub fn add_rents<K: Debug>(total: &mut u64, count: u64, key: K) -> Result<()> {
    *total = total
        .checked_add(count)
        .ok_or_else(|| anyhow!("Total_Rents overflow for {:?}", key))?;
    Ok(())
}

/// Sum of `Count_of_Rents` over `records`.
pub fn sum_rents(records: &[ListingRecord]) -> Result<u64> {
    let mut total = 0u64;
    for r in records {
        add_rents(&mut total, r.count_of_rents, "all listings")?;
    }
    Ok(total)
}
