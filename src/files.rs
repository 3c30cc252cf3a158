//! Reading and writing results files.

use crate::error::Result;
use crate::types::Record;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::io::{BufReader, Write};
use std::path::Path;
use tracing::debug;

/// Indentation used when writing JSON output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// Two spaces, as written by the evaluation runner
    Two,
    /// Four spaces, as written by the post-processing commands
    Four,
}

impl Indent {
    fn as_bytes(self) -> &'static [u8] {
        match self {
            Indent::Two => b"  ",
            Indent::Four => b"    ",
        }
    }
}

/// Load a record collection from a JSON array file
pub fn read_records(path: &Path) -> Result<Vec<Record>> {
    let file = fs::File::open(path)?;
    let records: Vec<Record> = serde_json::from_reader(BufReader::new(file))?;
    debug!(path = %path.display(), records = records.len(), "read records");
    Ok(records)
}

/// Serialize a value as pretty-printed JSON text
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T, indent: Indent) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write a value as pretty-printed JSON, creating parent directories as needed
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T, indent: Indent) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let text = to_pretty_json(value, indent)?;
    let mut file = fs::File::create(path)?;
    file.write_all(text.as_bytes())?;
    file.flush()?;
    debug!(path = %path.display(), bytes = text.len(), "wrote json");
    Ok(())
}
