use crate::analyzers::SummaryMetrics;
use crate::error::{DashboardError, Result};
use crate::models::{CovidRecord, DateWindow};
use crate::processors::{
    distinct_locations, filter_by_date, filter_by_location, latest_per_location, top_n,
};
use crate::utils::constants::{DEFAULT_PREVIEW_ROWS, DEFAULT_TOP_N};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

/// User selections driving one render pass.
#[derive(Debug, Clone)]
pub struct DashboardRequest {
    pub window: DateWindow,
    pub top_n: usize,
    pub location: Option<String>,
    pub preview_rows: usize,
}

impl DashboardRequest {
    pub fn new(window: DateWindow) -> Self {
        Self {
            window,
            top_n: DEFAULT_TOP_N,
            location: None,
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_location(mut self, location: Option<String>) -> Self {
        self.location = location;
        self
    }

    pub fn with_preview_rows(mut self, preview_rows: usize) -> Self {
        self.preview_rows = preview_rows;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarEntry {
    pub location: String,
    pub total_cases: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelinePoint {
    pub date: NaiveDate,
    pub total_cases: u64,
    pub total_deaths: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timeline {
    pub location: String,
    pub points: Vec<TimelinePoint>,
}

/// One point on the log-log cases/deaths scatter. `size` is `total_cases`
/// relative to the largest bubble, in `(0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bubble {
    pub location: String,
    pub total_cases: u64,
    pub total_deaths: u64,
    pub size: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub summary: SummaryMetrics,
    pub top_n: usize,
    pub top_locations: Vec<BarEntry>,
    pub locations: Vec<String>,
    pub timeline: Option<Timeline>,
    pub bubbles: Vec<Bubble>,
    pub preview: Vec<CovidRecord>,
    pub preview_total: usize,
}

impl DashboardView {
    pub fn is_empty(&self) -> bool {
        self.summary.rows == 0
    }
}

/// Run the full pipeline for one request. An empty filtered table yields an
/// empty view rather than an error.
pub fn build_dashboard(records: &[CovidRecord], request: &DashboardRequest) -> Result<DashboardView> {
    let filtered = filter_by_date(records, &request.window);
    let latest = latest_per_location(&filtered);
    let locations = distinct_locations(&filtered);

    debug!(
        window = %request.window,
        filtered = filtered.len(),
        locations = locations.len(),
        "built pipeline tables"
    );

    let top_locations = top_n(&latest, request.top_n)
        .into_iter()
        .map(|r| BarEntry {
            location: r.location,
            total_cases: r.total_cases,
        })
        .collect();

    let selected = match &request.location {
        Some(location) if locations.contains(location) => Some(location.clone()),
        Some(location) => return Err(DashboardError::UnknownLocation(location.clone())),
        None => locations.first().cloned(),
    };
    let timeline = selected.map(|location| location_timeline(&filtered, &location));

    Ok(DashboardView {
        summary: SummaryMetrics::compute(&filtered, &latest, request.window),
        top_n: request.top_n,
        top_locations,
        locations,
        timeline,
        bubbles: bubbles(&latest),
        preview: filtered.iter().take(request.preview_rows).cloned().collect(),
        preview_total: filtered.len(),
    })
}

/// Every row of `location`, date ascending.
pub fn location_timeline(records: &[CovidRecord], location: &str) -> Timeline {
    let mut rows = filter_by_location(records, location);
    rows.sort_by_key(|r| r.date);

    Timeline {
        location: location.to_string(),
        points: rows
            .into_iter()
            .map(|r| TimelinePoint {
                date: r.date,
                total_cases: r.total_cases,
                total_deaths: r.total_deaths,
            })
            .collect(),
    }
}

/// Latest rows with positive counts on both axes, sized by `total_cases`.
pub fn bubbles(latest: &[CovidRecord]) -> Vec<Bubble> {
    let plottable: Vec<&CovidRecord> = latest
        .iter()
        .filter(|r| r.is_plottable_on_log_scale())
        .collect();

    let max_cases = plottable.iter().map(|r| r.total_cases).max().unwrap_or(0);

    plottable
        .into_iter()
        .map(|r| Bubble {
            location: r.location.clone(),
            total_cases: r.total_cases,
            total_deaths: r.total_deaths,
            size: r.total_cases as f64 / max_cases as f64,
        })
        .collect()
}
