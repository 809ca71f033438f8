/// Synthetic dataset layout
pub const SYNTHETIC_START_DATE: (i32, u32, u32) = (2020, 1, 1);
pub const SYNTHETIC_DAYS: usize = 600;
pub const SYNTHETIC_LOCATIONS: [&str; 3] = ["India", "USA", "UK"];

/// Synthetic value ranges (half-open)
pub const SYNTHETIC_CASES_MIN: u64 = 100;
pub const SYNTHETIC_CASES_MAX: u64 = 100_000;
pub const SYNTHETIC_DEATHS_MIN: u64 = 1;
pub const SYNTHETIC_DEATHS_MAX: u64 = 2_000;

/// Column names, shared by the cache artifact and the CSV export
pub const COL_DATE: &str = "date";
pub const COL_LOCATION: &str = "location";
pub const COL_TOTAL_CASES: &str = "total_cases";
pub const COL_TOTAL_DEATHS: &str = "total_deaths";
pub const COLUMNS: [&str; 4] = [COL_DATE, COL_LOCATION, COL_TOTAL_CASES, COL_TOTAL_DEATHS];

/// File names
pub const DEFAULT_CACHE_FILE: &str = "covid.parquet";
pub const DEFAULT_CONFIG_FILE: &str = "covid-dashboard.toml";
pub const EXPORT_FILE_NAME: &str = "covid_filtered.csv";
pub const EXPORT_MIME_TYPE: &str = "text/csv";

/// Top-N slider bounds
pub const TOP_N_MIN: usize = 5;
pub const TOP_N_MAX: usize = 30;
pub const DEFAULT_TOP_N: usize = 10;

/// Presentation defaults
pub const DEFAULT_PREVIEW_ROWS: usize = 50;
pub const BAR_CHART_WIDTH: usize = 40;

/// Parquet defaults
pub const DEFAULT_ROW_GROUP_SIZE: usize = 10000;
pub const ENV_PREFIX: &str = "COVID_DASHBOARD";

/// Parquet compression options
pub const COMPRESSION_SNAPPY: &str = "snappy";
pub const COMPRESSION_GZIP: &str = "gzip";
pub const COMPRESSION_LZ4: &str = "lz4";
pub const COMPRESSION_ZSTD: &str = "zstd";
pub const COMPRESSION_NONE: &str = "none";
