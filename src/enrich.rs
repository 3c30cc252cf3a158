//! Joining results with the dataset index on `website`.

use crate::error::{Error, Result};
use crate::types::{EnrichSummary, Record, REC_ID_FIELD, WEBSITE_FIELD};
use serde_json::Value;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// In-memory `website -> rec_id` mapping built from the index CSV
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupTable {
    entries: HashMap<String, String>,
}

impl LookupTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from CSV with a header row naming `website` and `rec_id`.
    ///
    /// Other columns are ignored. When a website appears more than once the
    /// last row wins; a repeated column name resolves to its last occurrence.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let names: Vec<&str> = headers.iter().collect();

        let column = |name: &str| {
            names
                .iter()
                .rposition(|h| *h == name)
                .ok_or_else(|| Error::MissingColumn(name.to_string()))
        };
        let website_idx = column(WEBSITE_FIELD)?;
        let rec_id_idx = column(REC_ID_FIELD)?;

        let mut table = Self::new();
        for row in csv_reader.records() {
            let row = row?;
            // Rows are length-checked against the header by the reader
            let (Some(website), Some(rec_id)) = (row.get(website_idx), row.get(rec_id_idx)) else {
                continue;
            };
            table.insert(website, rec_id);
        }

        Ok(table)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let table = Self::from_reader(File::open(path)?)?;
        debug!(path = %path.display(), entries = table.len(), "loaded lookup table");
        Ok(table)
    }

    pub fn insert(&mut self, website: impl Into<String>, rec_id: impl Into<String>) {
        self.entries.insert(website.into(), rec_id.into());
    }

    pub fn get(&self, website: &str) -> Option<&str> {
        self.entries.get(website).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LookupTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (website, rec_id) in iter {
            table.insert(website, rec_id);
        }
        table
    }
}

/// Set `rec_id` on every record whose `website` is in the table.
///
/// Records without a matching website are left untouched.
pub fn enrich_records(records: &mut [Record], table: &LookupTable) -> EnrichSummary {
    let mut summary = EnrichSummary {
        total: records.len(),
        enriched: 0,
    };

    for (index, record) in records.iter_mut().enumerate() {
        let rec_id = match record.website() {
            Some(Value::String(website)) => table.get(website).map(str::to_owned),
            Some(other) => {
                warn!(index, website = %other, "website is not a string, leaving record unchanged");
                None
            }
            None => None,
        };

        if let Some(rec_id) = rec_id {
            record.set_rec_id(rec_id);
            summary.enriched += 1;
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(value: Value) -> Vec<Record> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_table_from_csv_any_column_order() {
        let csv = "rec_id,url,website\n1,https://a.com/x,a.com\n2,https://b.com/,b.com\n";
        let table = LookupTable::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("a.com"), Some("1"));
        assert_eq!(table.get("b.com"), Some("2"));
        assert_eq!(table.get("c.com"), None);
    }

    #[test]
    fn test_duplicate_website_last_row_wins() {
        let csv = "website,rec_id\na.com,1\na.com,7\n";
        let table = LookupTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.get("a.com"), Some("7"));
    }

    #[test]
    fn test_repeated_header_uses_last_column() {
        let csv = "website,rec_id,rec_id\na.com,1,9\n";
        let table = LookupTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.get("a.com"), Some("9"));
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let csv = "website,label\na.com,phishing\n";
        match LookupTable::from_reader(csv.as_bytes()) {
            Err(Error::MissingColumn(column)) => assert_eq!(column, "rec_id"),
            other => panic!("expected missing column, got {:?}", other),
        }
    }

    #[test]
    fn test_ragged_row_is_an_error() {
        let csv = "website,rec_id\na.com\n";
        assert!(matches!(
            LookupTable::from_reader(csv.as_bytes()),
            Err(Error::Csv(_))
        ));
    }

    #[test]
    fn test_enrich_example_scenario() {
        let mut data = records(json!([
            {"website": "a.com"},
            {"website": "b.com", "error": "timeout", "rec_id": "X"}
        ]));
        let table: LookupTable = [("a.com", "1"), ("b.com", "2")].into_iter().collect();

        let summary = enrich_records(&mut data, &table);

        assert_eq!(summary, EnrichSummary { total: 2, enriched: 2 });
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!([
                {"website": "a.com", "rec_id": "1"},
                {"website": "b.com", "error": "timeout", "rec_id": "2"}
            ])
        );
    }

    #[test]
    fn test_unmatched_records_pass_through() {
        let input = json!([
            {"url": "https://nowhere"},
            {"website": "z.com", "rec_id": "old"},
            {"website": 12}
        ]);
        let mut data = records(input.clone());
        let table: LookupTable = [("a.com", "1")].into_iter().collect();

        let summary = enrich_records(&mut data, &table);

        assert_eq!(summary.enriched, 0);
        assert_eq!(serde_json::to_value(&data).unwrap(), input);
    }

    #[test]
    fn test_enrich_is_idempotent() {
        let mut once = records(json!([
            {"website": "a.com", "score": 0.4},
            {"website": "q.com"}
        ]));
        let table: LookupTable = [("a.com", "1")].into_iter().collect();

        enrich_records(&mut once, &table);
        let mut twice = once.clone();
        enrich_records(&mut twice, &table);

        assert_eq!(once, twice);
    }
}
