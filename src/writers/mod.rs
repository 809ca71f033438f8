pub mod csv_writer;
pub mod parquet_writer;

pub use csv_writer::{csv_download, parse_csv_bytes, to_csv_bytes, CsvDownload};
pub use parquet_writer::{ParquetFileInfo, ParquetWriter};
