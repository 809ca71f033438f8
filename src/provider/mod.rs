pub mod backend;
pub mod cache;
pub mod synthetic;

pub use backend::{CacheBackend, MemoryBackend, ParquetFileBackend};
pub use cache::{DatasetCache, DatasetSource};
pub use synthetic::SyntheticGenerator;
