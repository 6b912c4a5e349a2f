//! Positional row mapping.

use things_core::Thing;
use things_store::{Field, Record, StoreError};

/// Number of columns in a Thing row.
pub const THING_COLUMN_COUNT: usize = 7;

/// Reads a Thing from a row in `THING_COLUMNS` order.
///
/// A `NULL` or empty description becomes `None`. Any other missing or
/// non-text column is a malformed record.
pub fn thing_from_record(record: &Record) -> Result<Thing, StoreError> {
    if record.len() < THING_COLUMN_COUNT {
        return Err(StoreError::malformed(format!(
            "expected {THING_COLUMN_COUNT} columns, got {}",
            record.len()
        )));
    }

    Ok(Thing {
        id: text(record, 0, "id")?,
        name: text(record, 1, "name")?,
        description: record[2].as_str().filter(|d| !d.is_empty()).map(ToOwned::to_owned),
        created_at: text(record, 3, "created_at")?,
        updated_at: text(record, 4, "updated_at")?,
        created_by: text(record, 5, "created_by")?,
        updated_by: text(record, 6, "updated_by")?,
    })
}

/// Reads every row of a result.
pub fn things_from_records(records: &[Record]) -> Result<Vec<Thing>, StoreError> {
    records.iter().map(thing_from_record).collect()
}

fn text(record: &Record, index: usize, column: &str) -> Result<String, StoreError> {
    record
        .get(index)
        .and_then(Field::as_str)
        .map(ToOwned::to_owned)
        .ok_or_else(|| StoreError::malformed(format!("column {column} is not text")))
}
