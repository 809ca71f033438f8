use crate::error::Result;
use crate::models::CovidRecord;
use crate::writers::ParquetWriter;
use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Storage behind a [`DatasetCache`](super::DatasetCache).
pub trait CacheBackend {
    /// The stored table, or `None` when nothing has been stored yet.
    fn load(&self) -> Result<Option<Vec<CovidRecord>>>;

    fn store(&self, records: &[CovidRecord]) -> Result<()>;

    /// Forget the stored table. Clearing an empty backend is not an error.
    fn clear(&self) -> Result<()>;

    fn describe(&self) -> String;
}

/// Keeps the table in process memory. Counts loads so callers can tell
/// whether storage was touched.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    slot: RefCell<Option<Vec<CovidRecord>>>,
    loads: Cell<usize>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<CovidRecord>) -> Self {
        Self {
            slot: RefCell::new(Some(records)),
            loads: Cell::new(0),
        }
    }

    pub fn load_count(&self) -> usize {
        self.loads.get()
    }
}

impl CacheBackend for MemoryBackend {
    fn load(&self) -> Result<Option<Vec<CovidRecord>>> {
        self.loads.set(self.loads.get() + 1);
        Ok(self.slot.borrow().clone())
    }

    fn store(&self, records: &[CovidRecord]) -> Result<()> {
        *self.slot.borrow_mut() = Some(records.to_vec());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.slot.borrow_mut().take();
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}

/// The cache artifact: a single Parquet file. Its absence means "not cached".
pub struct ParquetFileBackend {
    path: PathBuf,
    writer: ParquetWriter,
}

impl ParquetFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writer: ParquetWriter::new(),
        }
    }

    pub fn with_compression(mut self, compression: &str) -> Result<Self> {
        self.writer = self.writer.with_compression(compression)?;
        Ok(self)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn writer(&self) -> &ParquetWriter {
        &self.writer
    }
}

impl CacheBackend for ParquetFileBackend {
    fn load(&self) -> Result<Option<Vec<CovidRecord>>> {
        if !self.exists() {
            debug!(path = %self.path.display(), "no cache artifact");
            return Ok(None);
        }

        let records = self.writer.read_records(&self.path)?;
        debug!(path = %self.path.display(), rows = records.len(), "read cache artifact");
        Ok(Some(records))
    }

    fn store(&self, records: &[CovidRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        self.writer.write_records(records, &self.path)?;
        debug!(path = %self.path.display(), rows = records.len(), "wrote cache artifact");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
