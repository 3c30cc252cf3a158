use crate::types::Record;

/// Filter result indicating whether a record should be kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterResult {
    Keep,
    FilterOut,
}

impl From<bool> for FilterResult {
    fn from(keep: bool) -> Self {
        if keep {
            FilterResult::Keep
        } else {
            FilterResult::FilterOut
        }
    }
}

/// Filter trait for selecting records
pub trait RecordFilter {
    fn should_keep(&self, record: &Record) -> FilterResult;
}

/// Keeps records that carry a given field, whatever its value
#[derive(Debug, Clone)]
pub struct HasField {
    field: String,
}

impl HasField {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Records marked with an `error` field
    pub fn error() -> Self {
        Self::new(crate::types::ERROR_FIELD)
    }
}

impl RecordFilter for HasField {
    fn should_keep(&self, record: &Record) -> FilterResult {
        record.contains(&self.field).into()
    }
}
