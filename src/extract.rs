use crate::error::{Error, Result};
use crate::filter::{FilterResult, HasField, RecordFilter};
use crate::types::{Record, REC_ID_FIELD};
use serde_json::Value;

/// Collect the `rec_id` of every record kept by `filter`, in input order.
///
/// A kept record without `rec_id` is an error.
pub fn extract_ids<F: RecordFilter>(records: &[Record], filter: &F) -> Result<Vec<Value>> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| filter.should_keep(record) == FilterResult::Keep)
        .map(|(index, record)| {
            record.rec_id().cloned().ok_or_else(|| Error::MissingField {
                field: REC_ID_FIELD.to_string(),
                index,
            })
        })
        .collect()
}

/// Identifiers of records that carry an `error` field
pub fn extract_error_ids(records: &[Record]) -> Result<Vec<Value>> {
    extract_ids(records, &HasField::error())
}
