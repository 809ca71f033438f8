use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One observation of a location's cumulative counts on a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CovidRecord {
    pub date: NaiveDate,

    #[validate(length(min = 1))]
    pub location: String,

    pub total_cases: u64,

    pub total_deaths: u64,
}

impl CovidRecord {
    pub fn new(date: NaiveDate, location: String, total_cases: u64, total_deaths: u64) -> Self {
        Self {
            date,
            location,
            total_cases,
            total_deaths,
        }
    }

    /// Both counts positive, so the record can sit on a log-log scatter.
    pub fn is_plottable_on_log_scale(&self) -> bool {
        self.total_cases > 0 && self.total_deaths > 0
    }
}
