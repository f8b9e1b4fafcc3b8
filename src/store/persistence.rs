//! CSV-backed record store.

use super::{RecordSheet, RecordStore};
use crate::error::StorageError;
use crate::types::{Item, CANONICAL_FIELDS};
use std::path::Path;

const DELIMITER: u8 = b',';

/// Reads and writes leaf record files as comma-separated text.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvRecordStore;

impl CsvRecordStore {
    pub fn new() -> Self {
        CsvRecordStore
    }
}

impl RecordStore for CsvRecordStore {
    fn read_sheet(&self, path: &Path) -> Result<Option<RecordSheet>, StorageError> {
        if !path.exists() {
            return Ok(None);
        }

        let mut reader = match csv::ReaderBuilder::new()
            .delimiter(DELIMITER)
            .flexible(true)
            .from_path(path)
        {
            Ok(reader) => reader,
            Err(e) if is_not_found(&e) => return Ok(None),
            Err(e) => return Err(StorageError::CsvError(e)),
        };

        let header: Vec<String> = reader
            .byte_headers()?
            .iter()
            .map(|h| String::from_utf8_lossy(h).into_owned())
            .collect();

        // Column index per schema field; rows with a foreign header read best-effort.
        let columns: Vec<(&str, Option<usize>)> = CANONICAL_FIELDS
            .iter()
            .map(|field| (*field, header.iter().position(|h| h == field)))
            .collect();

        let mut rows = Vec::new();
        for record in reader.byte_records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            let mut item = Item::default();
            for (field, column) in &columns {
                let value = column
                    .and_then(|idx| record.get(idx))
                    .map(|raw| String::from_utf8_lossy(raw).into_owned())
                    .unwrap_or_default();
                item.set_field(field, value);
            }
            rows.push((line, item));
        }

        Ok(Some(RecordSheet { header, rows }))
    }

    fn write(&self, path: &Path, items: &[Item], fields: &[String]) -> Result<(), StorageError> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(DELIMITER)
            .from_path(path)?;
        writer.write_record(fields)?;
        for item in items {
            writer.write_record(fields.iter().map(|f| item.field(f)))?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn is_not_found(err: &csv::Error) -> bool {
    matches!(err.kind(), csv::ErrorKind::Io(io) if io.kind() == std::io::ErrorKind::NotFound)
}
