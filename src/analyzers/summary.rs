use crate::models::{CovidRecord, DateWindow};
use crate::processors::latest_per_location;
use serde::Serialize;

/// Headline metrics shown above the charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryMetrics {
    pub rows: usize,
    pub locations: usize,
    pub window: DateWindow,
    pub total_cases: u64,
    pub total_deaths: u64,
}

impl SummaryMetrics {
    /// `filtered` is the date-filtered table, `latest` its latest-per-location
    /// reduction. Totals sum the latest rows, since counts are cumulative.
    pub fn compute(filtered: &[CovidRecord], latest: &[CovidRecord], window: DateWindow) -> Self {
        Self {
            rows: filtered.len(),
            locations: latest.len(),
            window,
            total_cases: latest.iter().map(|r| r.total_cases).sum(),
            total_deaths: latest.iter().map(|r| r.total_deaths).sum(),
        }
    }

    pub fn case_fatality_rate(&self) -> Option<f64> {
        if self.total_cases == 0 {
            None
        } else {
            Some(self.total_deaths as f64 / self.total_cases as f64)
        }
    }

    pub fn summary(&self) -> String {
        let cfr = self
            .case_fatality_rate()
            .map(|r| format!("{:.2}%", r * 100.0))
            .unwrap_or_else(|| "n/a".to_string());

        format!(
            "Rows: {}\nCountries: {}\nDate Range: {}\nLatest Cases: {}\nLatest Deaths: {}\nFatality Rate: {}",
            group_thousands(self.rows as u64),
            self.locations,
            self.window,
            group_thousands(self.total_cases),
            group_thousands(self.total_deaths),
            cfr
        )
    }
}

/// Dataset-wide overview used by the `info` command.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetOverview {
    pub rows: usize,
    pub span: Option<DateWindow>,
    pub per_location: Vec<LocationOverview>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationOverview {
    pub location: String,
    pub rows: usize,
    pub first_date: chrono::NaiveDate,
    pub last_date: chrono::NaiveDate,
    pub latest_cases: u64,
    pub latest_deaths: u64,
}

impl DatasetOverview {
    pub fn compute(records: &[CovidRecord]) -> Self {
        let per_location = latest_per_location(records)
            .into_iter()
            .map(|latest| {
                let dates: Vec<_> = records
                    .iter()
                    .filter(|r| r.location == latest.location)
                    .map(|r| r.date)
                    .collect();
                LocationOverview {
                    rows: dates.len(),
                    first_date: dates.iter().copied().min().unwrap_or(latest.date),
                    last_date: latest.date,
                    latest_cases: latest.total_cases,
                    latest_deaths: latest.total_deaths,
                    location: latest.location,
                }
            })
            .collect();

        Self {
            rows: records.len(),
            span: DateWindow::spanning(records),
            per_location,
        }
    }

    pub fn summary(&self) -> String {
        let mut summary = format!("Dataset Summary:\n- Total rows: {}\n", self.rows);

        match &self.span {
            Some(span) => summary.push_str(&format!(
                "- Date span: {} ({} days)\n",
                span,
                span.num_days()
            )),
            None => summary.push_str("- Date span: (empty)\n"),
        }

        summary.push_str(&format!("- Locations: {}\n", self.per_location.len()));
        for loc in &self.per_location {
            summary.push_str(&format!(
                "  {:<12} {:>5} rows  {} → {}  latest cases={} deaths={}\n",
                loc.location,
                loc.rows,
                loc.first_date,
                loc.last_date,
                group_thousands(loc.latest_cases),
                group_thousands(loc.latest_deaths)
            ));
        }

        summary
    }
}

/// `1234567` → `1,234,567`
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, d).unwrap()
    }

    fn records() -> Vec<CovidRecord> {
        vec![
            CovidRecord::new(day(1), "India".to_string(), 100, 1),
            CovidRecord::new(day(2), "India".to_string(), 300, 3),
            CovidRecord::new(day(3), "USA".to_string(), 1_000, 20),
        ]
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_summary_metrics() {
        let records = records();
        let latest = latest_per_location(&records);
        let window = DateWindow::new(day(1), day(3)).unwrap();

        let metrics = SummaryMetrics::compute(&records, &latest, window);

        assert_eq!(metrics.rows, 3);
        assert_eq!(metrics.locations, 2);
        assert_eq!(metrics.total_cases, 1_300);
        assert_eq!(metrics.total_deaths, 23);
        assert!(metrics.summary().contains("Countries: 2"));
        assert!(metrics.summary().contains("2020-01-01 → 2020-01-03"));
    }

    #[test]
    fn test_summary_metrics_empty() {
        let window = DateWindow::new(day(1), day(3)).unwrap();
        let metrics = SummaryMetrics::compute(&[], &[], window);

        assert_eq!(metrics.rows, 0);
        assert_eq!(metrics.locations, 0);
        assert_eq!(metrics.case_fatality_rate(), None);
        assert!(metrics.summary().contains("Fatality Rate: n/a"));
    }

    #[test]
    fn test_dataset_overview() {
        let overview = DatasetOverview::compute(&records());

        assert_eq!(overview.rows, 3);
        assert_eq!(overview.per_location.len(), 2);

        let india = &overview.per_location[0];
        assert_eq!(india.location, "India");
        assert_eq!(india.rows, 2);
        assert_eq!(india.first_date, day(1));
        assert_eq!(india.last_date, day(2));
        assert_eq!(india.latest_cases, 300);

        assert!(DatasetOverview::compute(&[]).summary().contains("(empty)"));
    }
}
