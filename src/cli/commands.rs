use crate::analyzers::DatasetOverview;
use crate::cli::args::{Cli, Commands, DateRangeArgs};
use crate::error::{DashboardError, Result};
use crate::models::{CovidRecord, DateWindow};
use crate::presentation::{build_dashboard, render_json, render_text, DashboardRequest};
use crate::processors::filter_by_date;
use crate::provider::{DatasetCache, DatasetSource, ParquetFileBackend, SyntheticGenerator};
use crate::settings::DashboardConfig;
use crate::utils::progress::ProgressReporter;
use crate::writers::csv_download;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

pub fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.verbose, cli.log_file.as_deref())?;

    let mut config = DashboardConfig::load(cli.config.as_deref())?;
    if let Some(cache) = cli.cache {
        config.cache_path = cache;
    }

    match cli.command {
        Commands::Dashboard {
            range,
            top_n,
            location,
            preview_rows,
            json,
        } => {
            let cache = open_cache(&config)?;
            let records = load_dataset(&cache, json)?;
            let window = resolve_window(&range, records)?;

            let request = DashboardRequest::new(window)
                .with_top_n(top_n.unwrap_or(config.top_n))
                .with_location(location)
                .with_preview_rows(preview_rows.unwrap_or(config.preview_rows));

            let view = build_dashboard(records, &request)?;

            if json {
                println!("{}", render_json(&view)?);
            } else {
                println!("{}", render_text(&view));
            }
        }

        Commands::Export { range, output } => {
            let cache = open_cache(&config)?;
            let records = load_dataset(&cache, false)?;
            let window = resolve_window(&range, records)?;

            let filtered = filter_by_date(records, &window);
            let download = csv_download(&filtered)?;
            let path = output.unwrap_or_else(|| PathBuf::from(download.file_name));

            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(&path, &download.bytes)?;

            info!(path = %path.display(), rows = filtered.len(), "exported filtered rows");
            println!(
                "Exported {} rows ({}) to {} [{}, {} bytes]",
                filtered.len(),
                window,
                path.display(),
                download.mime_type,
                download.bytes.len()
            );
        }

        Commands::Info { sample } => {
            let cache = open_cache(&config)?;
            let backend = cache.backend();

            if !backend.exists() {
                println!(
                    "No cache artifact at {} - run `covid-dashboard generate` to create it",
                    backend.path().display()
                );
                return Ok(());
            }

            println!("Analyzing cache artifact: {}", backend.path().display());

            let file_info = backend.writer().get_file_info(backend.path())?;
            let records = cache.get_or_create()?;

            println!("\n{}", DatasetOverview::compute(records).summary());
            println!("File Details:");
            println!("{}", file_info.summary());

            if sample > 0 {
                let sample_records = backend.writer().read_sample_records(backend.path(), sample)?;
                println!("\nSample Records (showing {} records):", sample_records.len());
                for (i, record) in sample_records.iter().enumerate() {
                    println!(
                        "{}. {} on {}: cases={}, deaths={}",
                        i + 1,
                        record.location,
                        record.date,
                        record.total_cases,
                        record.total_deaths
                    );
                }
            }
        }

        Commands::Generate { force, seed } => {
            if seed.is_some() {
                config.seed = seed;
            }

            let mut cache = open_cache(&config)?;
            let progress = ProgressReporter::new_spinner("Preparing dataset...", false);

            let rows = if force {
                cache.regenerate()?.len()
            } else {
                cache.get_or_create()?.len()
            };

            if let Some(seed) = unused_seed(seed, cache.last_source()) {
                warn!(seed, "cache artifact already exists, seed unused; pass --force to regenerate");
            }

            let outcome = match cache.last_source() {
                Some(DatasetSource::Backend) => "Existing cache artifact kept",
                _ => "Synthesized dataset",
            };
            progress.finish_with_message(&format!(
                "{}: {} rows at {}",
                outcome,
                rows,
                cache.backend().path().display()
            ));
        }
    }

    Ok(())
}

fn open_cache(config: &DashboardConfig) -> Result<DatasetCache<ParquetFileBackend>> {
    let backend = ParquetFileBackend::new(&config.cache_path).with_compression(&config.compression)?;
    debug!(path = %config.cache_path.display(), "opening dataset cache");

    Ok(DatasetCache::new(backend, SyntheticGenerator::standard()?).with_seed(config.seed))
}

fn load_dataset(cache: &DatasetCache<ParquetFileBackend>, silent: bool) -> Result<&[CovidRecord]> {
    let progress = ProgressReporter::new_spinner("Loading dataset...", silent);
    let records = cache.get_or_create()?;
    progress.finish_and_clear();
    Ok(records)
}

/// A `--seed` only takes effect when the dataset is synthesized.
fn unused_seed(seed: Option<u64>, source: Option<DatasetSource>) -> Option<u64> {
    match source {
        Some(DatasetSource::Synthesized) => None,
        _ => seed,
    }
}

fn resolve_window(range: &DateRangeArgs, records: &[CovidRecord]) -> Result<DateWindow> {
    DateWindow::resolve(range.start, range.end, records)
}

fn init_tracing(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let result = match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    result.map_err(|e| DashboardError::Config(format!("Failed to initialise logging: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_unused_when_artifact_kept() {
        assert_eq!(unused_seed(Some(4), Some(DatasetSource::Backend)), Some(4));
        assert_eq!(unused_seed(Some(4), Some(DatasetSource::Synthesized)), None);
        assert_eq!(unused_seed(None, Some(DatasetSource::Backend)), None);
    }
}
