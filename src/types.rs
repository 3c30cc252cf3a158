use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::fmt;
use std::path::PathBuf;

/// Field holding the website a record was evaluated for
pub const WEBSITE_FIELD: &str = "website";
/// Field correlating a record with the dataset index
pub const REC_ID_FIELD: &str = "rec_id";
/// Field whose presence marks a failed evaluation
pub const ERROR_FIELD: &str = "error";
/// Ground-truth label of the evaluated website
pub const LABEL_FIELD: &str = "label";

/// One evaluated entity from a results file.
///
/// Records are not schema-enforced: any JSON object is accepted and its
/// fields are written back in the order they were read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Set a field, replacing any existing value in place
    pub fn insert(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(field.into(), value)
    }

    /// Raw `website` value, if present
    pub fn website(&self) -> Option<&Value> {
        self.get(WEBSITE_FIELD)
    }

    pub fn rec_id(&self) -> Option<&Value> {
        self.get(REC_ID_FIELD)
    }

    pub fn set_rec_id(&mut self, rec_id: impl Into<String>) {
        self.insert(REC_ID_FIELD, Value::String(rec_id.into()));
    }
}

impl TryFrom<Value> for Record {
    type Error = serde_json::Error;

    fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
        serde_json::from_value(value)
    }
}

/// Outcome of an enrichment pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EnrichSummary {
    /// Records in the collection
    pub total: usize,
    /// Records that received a `rec_id` from the lookup table
    pub enriched: usize,
}

/// Outcome of merging result shards
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeSummary {
    pub shards: usize,
    pub records: usize,
    pub output: PathBuf,
}

/// Decimal bound of a shard's `rec_id` range.
///
/// Kept as the digits from the file name so ranges of any size still order
/// numerically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeBound(String);

impl RangeBound {
    /// Accepts ASCII digits only
    pub fn parse(digits: &str) -> Option<Self> {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self(digits.to_string()))
    }

    fn significant(&self) -> &str {
        let trimmed = self.0.trim_start_matches('0');
        if trimmed.is_empty() {
            "0"
        } else {
            trimmed
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Ord for RangeBound {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (self.significant(), other.significant());
        a.len()
            .cmp(&b.len())
            .then_with(|| a.cmp(b))
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for RangeBound {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for RangeBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One `results-<from>-<to>.json` file found in a results directory
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Shard {
    /// Lower bound of the `rec_id` range
    pub from: RangeBound,
    /// Upper bound of the `rec_id` range
    pub to: RangeBound,
    pub path: PathBuf,
}
