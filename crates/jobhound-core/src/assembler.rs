//! Final ordering of extracted records.

use std::cmp::Reverse;

use tracing::info;

use crate::types::{JobRecord, ResultSet};

/// Truncate to `target`, then sort newest first.
///
/// The sort is stable: records sharing a date, and undated records, keep
/// their encounter order. Undated records go after every dated one.
pub fn assemble(mut records: Vec<JobRecord>, target: usize) -> ResultSet {
    records.truncate(target);
    // `None < Some(_)`, so reversing puts undated records last.
    records.sort_by_key(|r| Reverse(r.date_posted));

    let set = ResultSet::new(records);
    info!(
        count = set.len(),
        dated = set.dated_count(),
        "Collected {} jobs",
        set.len()
    );
    set
}
