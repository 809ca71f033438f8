pub mod summary;

pub use summary::{group_thousands, DatasetOverview, LocationOverview, SummaryMetrics};
