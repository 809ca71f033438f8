use crate::error::Result;
use crate::utils::constants::{
    DEFAULT_CACHE_FILE, DEFAULT_CONFIG_FILE, DEFAULT_PREVIEW_ROWS, DEFAULT_TOP_N, ENV_PREFIX,
};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use validator::Validate;

/// Settings layered as defaults, then a TOML file, then `COVID_DASHBOARD_*`
/// environment variables.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DashboardConfig {
    pub cache_path: PathBuf,

    pub compression: String,

    pub seed: Option<u64>,

    #[validate(range(min = 5, max = 30))]
    pub top_n: usize,

    #[validate(range(min = 1))]
    pub preview_rows: usize,
}

impl DashboardConfig {
    /// Load settings. An explicit `path` must exist; otherwise
    /// `covid-dashboard.toml` in the working directory is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, environment())
    }

    fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self> {
        let file_source = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = Config::builder()
            .set_default("cache_path", DEFAULT_CACHE_FILE)?
            .set_default("compression", "snappy")?
            .set_default("top_n", DEFAULT_TOP_N as i64)?
            .set_default("preview_rows", DEFAULT_PREVIEW_ROWS as i64)?
            .add_source(file_source)
            .add_source(env)
            .build()?;

        let config: DashboardConfig = settings.try_deserialize()?;
        config.validate()?;

        debug!(?config, "loaded configuration");
        Ok(config)
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX).try_parsing(true)
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            cache_path: PathBuf::from(DEFAULT_CACHE_FILE),
            compression: "snappy".to_string(),
            seed: None,
            top_n: DEFAULT_TOP_N,
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_is_valid() {
        let config = DashboardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.top_n, 10);
        assert_eq!(config.cache_path, PathBuf::from("covid.parquet"));
    }

    #[test]
    fn test_load_from_file() -> Result<()> {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dashboard.toml");
        std::fs::write(
            &path,
            "cache_path = \"data/cache.parquet\"\ncompression = \"zstd\"\nseed = 42\ntop_n = 15\n",
        )?;

        let config = DashboardConfig::load(Some(&path))?;

        assert_eq!(config.cache_path, PathBuf::from("data/cache.parquet"));
        assert_eq!(config.compression, "zstd");
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.top_n, 15);
        assert_eq!(config.preview_rows, 50);
        Ok(())
    }

    #[test]
    fn test_env_overrides_file_and_defaults() -> Result<()> {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dashboard.toml");
        std::fs::write(&path, "compression = \"gzip\"\ntop_n = 15\n")?;

        let vars = config::Map::from([
            ("COVID_DASHBOARD_TOP_N".to_string(), "20".to_string()),
            ("COVID_DASHBOARD_SEED".to_string(), "9".to_string()),
        ]);
        let config = DashboardConfig::load_with_env(Some(&path), environment().source(Some(vars)))?;

        assert_eq!(config.top_n, 20);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.compression, "gzip");
        assert_eq!(config.preview_rows, 50);
        Ok(())
    }

    #[test]
    fn test_env_value_is_validated() {
        let vars = config::Map::from([("COVID_DASHBOARD_TOP_N".to_string(), "40".to_string())]);
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dashboard.toml");
        std::fs::write(&path, "").unwrap();

        assert!(DashboardConfig::load_with_env(Some(&path), environment().source(Some(vars))).is_err());
    }

    #[test]
    fn test_out_of_range_top_n_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dashboard.toml");
        std::fs::write(&path, "top_n = 31\n").unwrap();

        assert!(DashboardConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        assert!(DashboardConfig::load(Some(&temp_dir.path().join("nope.toml"))).is_err());
    }
}
