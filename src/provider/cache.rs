use crate::error::Result;
use crate::models::CovidRecord;
use crate::provider::backend::CacheBackend;
use crate::provider::synthetic::SyntheticGenerator;
use once_cell::unsync::OnceCell;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::Cell;
use tracing::{debug, info};

/// Where the table returned by [`DatasetCache::get_or_create`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetSource {
    Memo,
    Backend,
    Synthesized,
}

/// Memoized dataset provider.
///
/// The first call reads the backend, synthesizing and storing a table when
/// the backend is empty. Later calls return the memoized table without
/// touching storage.
pub struct DatasetCache<B: CacheBackend> {
    backend: B,
    generator: SyntheticGenerator,
    seed: Option<u64>,
    memo: OnceCell<Vec<CovidRecord>>,
    last_source: Cell<Option<DatasetSource>>,
}

impl<B: CacheBackend> DatasetCache<B> {
    pub fn new(backend: B, generator: SyntheticGenerator) -> Self {
        Self {
            backend,
            generator,
            seed: None,
            memo: OnceCell::new(),
            last_source: Cell::new(None),
        }
    }

    /// Seed the synthetic generator. Without a seed it draws from entropy.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Source of the most recent [`get_or_create`](Self::get_or_create) result.
    pub fn last_source(&self) -> Option<DatasetSource> {
        self.last_source.get()
    }

    pub fn get_or_create(&self) -> Result<&[CovidRecord]> {
        if let Some(records) = self.memo.get() {
            debug!(rows = records.len(), "dataset served from memo");
            self.last_source.set(Some(DatasetSource::Memo));
            return Ok(records);
        }

        let records = self.memo.get_or_try_init(|| self.load_or_synthesize())?;
        Ok(records)
    }

    /// Drop both the memo and the stored table, then synthesize afresh.
    pub fn regenerate(&mut self) -> Result<&[CovidRecord]> {
        info!(backend = %self.backend.describe(), "regenerating dataset");
        self.backend.clear()?;
        self.memo = OnceCell::new();
        self.get_or_create()
    }

    fn load_or_synthesize(&self) -> Result<Vec<CovidRecord>> {
        if let Some(records) = self.backend.load()? {
            info!(
                backend = %self.backend.describe(),
                rows = records.len(),
                "loaded cached dataset"
            );
            self.last_source.set(Some(DatasetSource::Backend));
            return Ok(records);
        }

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let records = self.generator.generate(&mut rng);
        self.backend.store(&records)?;

        info!(
            backend = %self.backend.describe(),
            rows = records.len(),
            seeded = self.seed.is_some(),
            "synthesized dataset"
        );
        self.last_source.set(Some(DatasetSource::Synthesized));
        Ok(records)
    }
}
