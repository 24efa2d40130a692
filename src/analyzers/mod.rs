//! Grouping queries over the cleaned listings.
//!
//! Every query sums `Count_of_Rents` over a key and returns rows ordered by
//! that key, so repeated runs produce identical tables.

pub mod aggregate;
pub mod types;
pub mod utility;
