use crate::error::{DashboardError, Result};
use crate::models::CovidRecord;
use crate::utils::constants::{
    SYNTHETIC_CASES_MAX, SYNTHETIC_CASES_MIN, SYNTHETIC_DAYS, SYNTHETIC_DEATHS_MAX,
    SYNTHETIC_DEATHS_MIN, SYNTHETIC_LOCATIONS, SYNTHETIC_START_DATE,
};
use chrono::{Duration, NaiveDate};
use rand::Rng;

/// Placeholder dataset: consecutive days split into equal contiguous blocks,
/// one block per location, with uniformly random cumulative counts.
#[derive(Debug, Clone)]
pub struct SyntheticGenerator {
    start: NaiveDate,
    days: usize,
    locations: Vec<String>,
}

impl SyntheticGenerator {
    pub fn new(start: NaiveDate, days: usize, locations: Vec<String>) -> Self {
        Self {
            start,
            days,
            locations,
        }
    }

    /// 600 days from 2020-01-01 over India, USA and UK (200 days each).
    pub fn standard() -> Result<Self> {
        let (year, month, day) = SYNTHETIC_START_DATE;
        let start = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            DashboardError::InvalidFormat(format!(
                "Invalid synthetic start date {}-{}-{}",
                year, month, day
            ))
        })?;

        Ok(Self::new(
            start,
            SYNTHETIC_DAYS,
            SYNTHETIC_LOCATIONS.iter().map(|l| l.to_string()).collect(),
        ))
    }

    /// Days assigned to each location. A remainder goes to the last one.
    pub fn block_len(&self) -> usize {
        if self.locations.is_empty() {
            0
        } else {
            (self.days / self.locations.len()).max(1)
        }
    }

    pub fn generate<R: Rng>(&self, rng: &mut R) -> Vec<CovidRecord> {
        if self.locations.is_empty() {
            return Vec::new();
        }

        let block = self.block_len();
        let last = self.locations.len() - 1;

        (0..self.days)
            .map(|i| {
                let location = &self.locations[(i / block).min(last)];
                CovidRecord::new(
                    self.start + Duration::days(i as i64),
                    location.clone(),
                    rng.gen_range(SYNTHETIC_CASES_MIN..SYNTHETIC_CASES_MAX),
                    rng.gen_range(SYNTHETIC_DEATHS_MIN..SYNTHETIC_DEATHS_MAX),
                )
            })
            .collect()
    }
}
