use crate::models::CovidRecord;
use std::collections::BTreeMap;

/// The most recent row for each location.
///
/// Rows are stable-sorted by date ascending and the last row seen for a
/// location wins, so among rows sharing a location and date the one inserted
/// last is kept. Output is ordered by location name.
pub fn latest_per_location(records: &[CovidRecord]) -> Vec<CovidRecord> {
    let mut by_date: Vec<&CovidRecord> = records.iter().collect();
    by_date.sort_by_key(|r| r.date);

    let mut latest: BTreeMap<&str, &CovidRecord> = BTreeMap::new();
    for record in by_date {
        latest.insert(record.location.as_str(), record);
    }

    latest.into_values().cloned().collect()
}

/// Distinct locations in ascending order.
pub fn distinct_locations(records: &[CovidRecord]) -> Vec<String> {
    let mut locations: Vec<String> = records.iter().map(|r| r.location.clone()).collect();
    locations.sort();
    locations.dedup();
    locations
}
