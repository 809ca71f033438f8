use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};
use crate::models::CovidRecord;

/// Inclusive `[start, end]` date window. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(DashboardError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Smallest window covering every record, or `None` for an empty table.
    pub fn spanning(records: &[CovidRecord]) -> Option<Self> {
        let start = records.iter().map(|r| r.date).min()?;
        let end = records.iter().map(|r| r.date).max()?;
        Some(Self { start, end })
    }

    /// Build a window from optional bounds, filling a missing side from the
    /// table's own date span. A filled side never crosses the given one, so
    /// only two explicit bounds can form a reversed range.
    pub fn resolve(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        records: &[CovidRecord],
    ) -> Result<Self> {
        match (start, end, Self::spanning(records)) {
            (Some(start), Some(end), _) => Self::new(start, end),
            (Some(start), None, Some(span)) => Self::new(start, start.max(span.end)),
            (None, Some(end), Some(span)) => Self::new(end.min(span.start), end),
            (None, None, Some(span)) => Ok(span),
            (Some(only), None, None) | (None, Some(only), None) => Self::new(only, only),
            (None, None, None) => Err(DashboardError::MissingData(
                "date range for an empty dataset".to_string(),
            )),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl std::fmt::Display for DateWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} → {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, d).unwrap()
    }

    fn record(d: u32) -> CovidRecord {
        CovidRecord::new(day(d), "India".to_string(), 100, 1)
    }

    #[test]
    fn test_reversed_range_is_rejected() {
        let err = DateWindow::new(day(10), day(2)).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidDateRange { .. }));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let window = DateWindow::new(day(2), day(4)).unwrap();
        assert!(window.contains(day(2)));
        assert!(window.contains(day(4)));
        assert!(!window.contains(day(1)));
        assert!(!window.contains(day(5)));
        assert_eq!(window.num_days(), 3);
    }

    #[test]
    fn test_resolve_fills_missing_bounds() {
        let records = vec![record(3), record(9), record(5)];

        let full = DateWindow::resolve(None, None, &records).unwrap();
        assert_eq!((full.start(), full.end()), (day(3), day(9)));

        let open_end = DateWindow::resolve(Some(day(4)), None, &records).unwrap();
        assert_eq!((open_end.start(), open_end.end()), (day(4), day(9)));

        let open_start = DateWindow::resolve(None, Some(day(6)), &records).unwrap();
        assert_eq!((open_start.start(), open_start.end()), (day(3), day(6)));
    }

    #[test]
    fn test_resolve_single_bound_beyond_data() {
        let records = vec![record(3), record(9)];

        let after = DateWindow::resolve(Some(day(20)), None, &records).unwrap();
        assert_eq!((after.start(), after.end()), (day(20), day(20)));

        let before = DateWindow::resolve(None, Some(day(1)), &records).unwrap();
        assert_eq!((before.start(), before.end()), (day(1), day(1)));

        assert!(DateWindow::resolve(Some(day(20)), Some(day(1)), &records).is_err());
    }

    #[test]
    fn test_resolve_on_empty_table() {
        assert!(DateWindow::resolve(None, None, &[]).is_err());

        let single = DateWindow::resolve(Some(day(7)), None, &[]).unwrap();
        assert_eq!((single.start(), single.end()), (day(7), day(7)));
    }

    #[test]
    fn test_display() {
        let window = DateWindow::new(day(1), day(31)).unwrap();
        assert_eq!(window.to_string(), "2020-01-01 → 2020-01-31");
    }
}
