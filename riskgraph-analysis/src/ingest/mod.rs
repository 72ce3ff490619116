//! CSV ingestion for the three relationship tables.
//!
//! Rows are read as raw bytes and decoded leniently; a row that fails a
//! field parse becomes a non-fatal `IngestError` in the report while the
//! rest of the file keeps loading.

pub mod collection;
pub mod control;
pub mod guarantee;
pub mod normalize;
pub mod report;

pub use collection::CollectionReader;
pub use control::ControlReader;
pub use guarantee::GuaranteeReader;
pub use normalize::normalize_account_id;
pub use report::{IngestReport, Ingested, SkipReason};

use std::fs::File;
use std::path::Path;

use csv::{ByteRecord, Reader, ReaderBuilder};
use riskgraph_core::errors::IngestError;

/// Open `path` as a headered, flexible-width CSV reader.
pub(crate) fn open_csv(path: &Path) -> Result<Reader<File>, IngestError> {
    let file = File::open(path).map_err(|e| IngestError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(csv_reader(file))
}

pub(crate) fn csv_reader<R: std::io::Read>(reader: R) -> Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader)
}

/// Iterate raw records, turning reader failures into a fatal `IngestError::Csv`.
pub(crate) fn for_each_record<R: std::io::Read>(
    reader: &mut Reader<R>,
    source: &str,
    mut f: impl FnMut(u64, &ByteRecord),
) -> Result<(), IngestError> {
    let mut record = ByteRecord::new();
    loop {
        match reader.read_byte_record(&mut record) {
            Ok(true) => {
                let line = record.position().map(|p| p.line()).unwrap_or(0);
                f(line, &record);
            }
            Ok(false) => return Ok(()),
            Err(e) => {
                return Err(IngestError::Csv {
                    path: source.to_string(),
                    message: e.to_string(),
                })
            }
        }
    }
}

/// Decode field `index`, dropping invalid UTF-8 sequences and trimming.
pub(crate) fn field(record: &ByteRecord, index: usize) -> Option<String> {
    record.get(index).map(|bytes| {
        String::from_utf8_lossy(bytes)
            .replace(char::REPLACEMENT_CHARACTER, "")
            .trim()
            .to_string()
    })
}

/// Decode field `index` or report it missing.
pub(crate) fn required(record: &ByteRecord, index: usize, line: u64) -> Result<String, IngestError> {
    field(record, index).ok_or(IngestError::MissingColumn {
        line,
        column: index,
    })
}

/// Parse a numeric field or report it malformed.
pub(crate) fn parse_number<T: std::str::FromStr>(
    raw: &str,
    line: u64,
    name: &'static str,
) -> Result<T, IngestError> {
    raw.parse::<T>().map_err(|_| IngestError::MalformedField {
        line,
        field: name,
        value: raw.to_string(),
    })
}
