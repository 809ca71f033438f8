use crate::error::{DashboardError, Result};
use crate::models::CovidRecord;
use crate::utils::constants::{COLUMNS, EXPORT_FILE_NAME, EXPORT_MIME_TYPE};
use tracing::debug;
use validator::Validate;

/// A ready-to-serve download: file name, MIME type and payload.
#[derive(Debug, Clone)]
pub struct CsvDownload {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Encode records as UTF-8 CSV with a header row and no index column.
pub fn to_csv_bytes(records: &[CovidRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(Vec::new());

    for record in records {
        writer.serialize(record)?;
    }

    // serialize() only emits the header alongside the first row
    if records.is_empty() {
        writer.write_record(COLUMNS)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| DashboardError::Io(e.into_error()))?;
    debug!(rows = records.len(), bytes = bytes.len(), "encoded CSV payload");

    Ok(bytes)
}

/// Decode a payload produced by [`to_csv_bytes`].
pub fn parse_csv_bytes(bytes: &[u8]) -> Result<Vec<CovidRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes);

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: CovidRecord = row?;
        record.validate()?;
        records.push(record);
    }

    Ok(records)
}

/// Package the filtered table for download.
pub fn csv_download(records: &[CovidRecord]) -> Result<CsvDownload> {
    Ok(CsvDownload {
        file_name: EXPORT_FILE_NAME,
        mime_type: EXPORT_MIME_TYPE,
        bytes: to_csv_bytes(records)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn sample_records() -> Vec<CovidRecord> {
        vec![
            CovidRecord::new(
                NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                "India".to_string(),
                500,
                3,
            ),
            CovidRecord::new(
                NaiveDate::from_ymd_opt(2020, 7, 19).unwrap(),
                "USA".to_string(),
                99_999,
                1_999,
            ),
        ]
    }

    #[test]
    fn test_csv_layout() -> Result<()> {
        let text = String::from_utf8(to_csv_bytes(&sample_records())?).unwrap();

        assert_eq!(
            text,
            "date,location,total_cases,total_deaths\n\
             2020-01-01,India,500,3\n\
             2020-07-19,USA,99999,1999\n"
        );
        Ok(())
    }

    #[test]
    fn test_empty_table_still_has_header() -> Result<()> {
        let text = String::from_utf8(to_csv_bytes(&[])?).unwrap();
        assert_eq!(text, "date,location,total_cases,total_deaths\n");
        assert!(parse_csv_bytes(text.as_bytes())?.is_empty());
        Ok(())
    }

    #[test]
    fn test_location_with_comma_is_quoted() -> Result<()> {
        let records = vec![CovidRecord::new(
            NaiveDate::from_ymd_opt(2020, 2, 2).unwrap(),
            "Korea, South".to_string(),
            10,
            1,
        )];

        let bytes = to_csv_bytes(&records)?;
        assert!(String::from_utf8_lossy(&bytes).contains("\"Korea, South\""));
        assert_eq!(parse_csv_bytes(&bytes)?, records);
        Ok(())
    }

    #[test]
    fn test_edge_whitespace_in_location_survives() -> Result<()> {
        let records = vec![CovidRecord::new(
            NaiveDate::from_ymd_opt(2020, 3, 3).unwrap(),
            " Saint Lucia ".to_string(),
            42,
            2,
        )];

        assert_eq!(parse_csv_bytes(&to_csv_bytes(&records)?)?, records);
        Ok(())
    }

    #[test]
    fn test_parse_rejects_blank_location() {
        let payload = b"date,location,total_cases,total_deaths\n2020-01-01,,1,1\n";
        assert!(parse_csv_bytes(payload).is_err());
    }

    #[test]
    fn test_download_metadata() -> Result<()> {
        let download = csv_download(&sample_records())?;
        assert_eq!(download.file_name, "covid_filtered.csv");
        assert_eq!(download.mime_type, "text/csv");
        assert!(!download.bytes.is_empty());
        Ok(())
    }
}
