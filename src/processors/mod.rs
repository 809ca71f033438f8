pub mod aggregator;
pub mod filter;
pub mod ranking;

pub use aggregator::{distinct_locations, latest_per_location};
pub use filter::{filter_by_date, filter_by_location};
pub use ranking::top_n;
