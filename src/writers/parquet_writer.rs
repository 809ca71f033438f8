use crate::error::{DashboardError, Result};
use crate::models::CovidRecord;
use crate::utils::constants::{
    COL_DATE, COL_LOCATION, COL_TOTAL_CASES, COL_TOTAL_DEATHS, COMPRESSION_GZIP, COMPRESSION_LZ4,
    COMPRESSION_NONE, COMPRESSION_SNAPPY, COMPRESSION_ZSTD, DEFAULT_ROW_GROUP_SIZE,
};
use arrow::array::*;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::Datelike;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, GzipLevel};
use parquet::file::properties::WriterProperties;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

/// `NaiveDate::num_days_from_ce()` of 1970-01-01, the Date32 epoch.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

pub struct ParquetWriter {
    compression: Compression,
    row_group_size: usize,
}

impl ParquetWriter {
    pub fn new() -> Self {
        Self {
            compression: Compression::SNAPPY,
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
        }
    }

    pub fn with_compression(mut self, compression: &str) -> Result<Self> {
        self.compression = match compression.to_lowercase().as_str() {
            COMPRESSION_SNAPPY => Compression::SNAPPY,
            COMPRESSION_GZIP => Compression::GZIP(GzipLevel::default()),
            COMPRESSION_LZ4 => Compression::LZ4,
            COMPRESSION_ZSTD => Compression::ZSTD(parquet::basic::ZstdLevel::default()),
            COMPRESSION_NONE => Compression::UNCOMPRESSED,
            _ => {
                return Err(DashboardError::Config(format!(
                    "Unsupported compression: {}",
                    compression
                )))
            }
        };
        Ok(self)
    }

    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Write records to a Parquet file. An empty table still produces a
    /// valid file carrying the schema.
    pub fn write_records(&self, records: &[CovidRecord], path: &Path) -> Result<()> {
        let schema = self.create_schema();
        let file = File::create(path)?;
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut writer = ArrowWriter::try_new(file, schema.clone(), Some(props))?;

        for chunk in records.chunks(self.row_group_size.max(1)) {
            let batch = self.records_to_batch(chunk, schema.clone())?;
            writer.write(&batch)?;
        }

        writer.close()?;
        Ok(())
    }

    /// Arrow schema of the cache artifact
    fn create_schema(&self) -> Arc<Schema> {
        let fields = vec![
            Field::new(COL_DATE, DataType::Date32, false),
            Field::new(COL_LOCATION, DataType::Utf8, false),
            Field::new(COL_TOTAL_CASES, DataType::UInt64, false),
            Field::new(COL_TOTAL_DEATHS, DataType::UInt64, false),
        ];

        Arc::new(Schema::new(fields))
    }

    fn records_to_batch(&self, records: &[CovidRecord], schema: Arc<Schema>) -> Result<RecordBatch> {
        let dates: Vec<i32> = records
            .iter()
            .map(|r| r.date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE)
            .collect();
        let locations: Vec<&str> = records.iter().map(|r| r.location.as_str()).collect();
        let cases: Vec<u64> = records.iter().map(|r| r.total_cases).collect();
        let deaths: Vec<u64> = records.iter().map(|r| r.total_deaths).collect();

        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Date32Array::from(dates)),
                Arc::new(StringArray::from(locations)),
                Arc::new(UInt64Array::from(cases)),
                Arc::new(UInt64Array::from(deaths)),
            ],
        )?;

        Ok(batch)
    }

    /// Read every record back, in file order.
    pub fn read_records(&self, path: &Path) -> Result<Vec<CovidRecord>> {
        self.read_sample_records(path, usize::MAX)
    }

    /// Read at most `limit` records from the start of the file.
    pub fn read_sample_records(&self, path: &Path, limit: usize) -> Result<Vec<CovidRecord>> {
        let file = File::open(path)?;
        let parquet_reader = ParquetRecordBatchReaderBuilder::try_new(file)?
            .with_batch_size(limit.clamp(1, 8192))
            .build()?;

        let mut records = Vec::new();

        for batch_result in parquet_reader {
            let batch = batch_result?;

            let dates = column_as::<Date32Array>(&batch, COL_DATE)?;
            let locations = column_as::<StringArray>(&batch, COL_LOCATION)?;
            let cases = column_as::<UInt64Array>(&batch, COL_TOTAL_CASES)?;
            let deaths = column_as::<UInt64Array>(&batch, COL_TOTAL_DEATHS)?;

            let remaining = limit - records.len();
            for i in 0..batch.num_rows().min(remaining) {
                let date = dates.value_as_date(i).ok_or_else(|| {
                    DashboardError::InvalidFormat("Invalid date in Parquet file".to_string())
                })?;

                records.push(CovidRecord::new(
                    date,
                    locations.value(i).to_string(),
                    cases.value(i),
                    deaths.value(i),
                ));
            }

            if records.len() >= limit {
                break;
            }
        }

        Ok(records)
    }

    /// Get file statistics
    pub fn get_file_info(&self, path: &Path) -> Result<ParquetFileInfo> {
        use parquet::file::reader::{FileReader, SerializedFileReader};

        let file = File::open(path)?;
        let reader = SerializedFileReader::new(file)?;
        let metadata = reader.metadata();

        let row_groups = metadata.num_row_groups();
        let total_rows = metadata.file_metadata().num_rows();
        let file_size = std::fs::metadata(path)?.len();

        let row_group_sizes = (0..row_groups)
            .map(|i| metadata.row_group(i).num_rows())
            .collect();

        let compression = if row_groups > 0 && metadata.row_group(0).num_columns() > 0 {
            metadata.row_group(0).column(0).compression()
        } else {
            self.compression
        };

        Ok(ParquetFileInfo {
            total_rows,
            row_groups: row_groups as i32,
            row_group_sizes,
            file_size,
            compression,
        })
    }
}

fn column_as<'a, T: 'static>(batch: &'a RecordBatch, name: &str) -> Result<&'a T> {
    batch
        .column_by_name(name)
        .ok_or_else(|| DashboardError::InvalidFormat(format!("Missing column '{}'", name)))?
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| DashboardError::InvalidFormat(format!("Invalid {} column type", name)))
}

impl Default for ParquetWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct ParquetFileInfo {
    pub total_rows: i64,
    pub row_groups: i32,
    pub row_group_sizes: Vec<i64>,
    pub file_size: u64,
    pub compression: Compression,
}

impl ParquetFileInfo {
    pub fn summary(&self) -> String {
        let avg_rows = if self.row_groups > 0 {
            self.total_rows as f64 / self.row_groups as f64
        } else {
            0.0
        };

        format!(
            "Parquet File Summary:\n\
            - Total rows: {}\n\
            - Row groups: {}\n\
            - File size: {:.2} KB\n\
            - Compression: {:?}\n\
            - Avg rows per group: {:.0}",
            self.total_rows,
            self.row_groups,
            self.file_size as f64 / 1024.0,
            self.compression,
            avg_rows
        )
    }
}
