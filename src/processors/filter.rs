use crate::models::{CovidRecord, DateWindow};

/// Rows whose date falls inside `window`, in their original order.
pub fn filter_by_date(records: &[CovidRecord], window: &DateWindow) -> Vec<CovidRecord> {
    records
        .iter()
        .filter(|r| window.contains(r.date))
        .cloned()
        .collect()
}

/// Rows belonging to `location`, in their original order.
pub fn filter_by_location(records: &[CovidRecord], location: &str) -> Vec<CovidRecord> {
    records
        .iter()
        .filter(|r| r.location == location)
        .cloned()
        .collect()
}
