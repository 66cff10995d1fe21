//! In-memory CSV rendering of scraped records.

use pricewatch_core::{ProductRecord, FIELD_NAMES};

use crate::error::ReportError;

/// Attachment name used when uploading the export.
pub const REPORT_FILE_NAME: &str = "scraped_data.csv";

/// Renders `records` as comma-separated UTF-8 text.
///
/// The header row is always written, so an empty slice produces a
/// header-only export. Rows are `\n`-terminated and follow slice order; values
/// containing commas or quotes are quoted per RFC 4180.
///
/// # Errors
///
/// Returns [`ReportError::Csv`] if a record cannot be serialized, or
/// [`ReportError::CsvEncoding`] if the writer's buffer is not UTF-8.
pub fn to_csv(records: &[ProductRecord]) -> Result<String, ReportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(FIELD_NAMES)?;
    for record in records {
        writer.serialize(record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ReportError::Csv(e.into_error().into()))?;
    Ok(String::from_utf8(bytes)?)
}
