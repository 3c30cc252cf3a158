//! Combining sharded `results-<from>-<to>.json` files.

use crate::error::{Error, Result};
use crate::files::read_records;
use crate::types::{RangeBound, Record, Shard};
use jwalk::WalkDir;
use regex::Regex;
use std::path::Path;
use tracing::debug;

const SHARD_PATTERN: &str = r"^results-(\d+)-(\d+)\.json$";

/// Parse a shard file name into its `(from, to)` range
fn parse_shard_name(re: &Regex, name: &str) -> Option<(RangeBound, RangeBound)> {
    let caps = re.captures(name)?;
    let from = RangeBound::parse(caps.get(1)?.as_str())?;
    let to = RangeBound::parse(caps.get(2)?.as_str())?;
    Some((from, to))
}

/// Find shard files directly inside `dir`, ordered by their numeric range
pub fn discover_shards(dir: &Path) -> Result<Vec<Shard>> {
    let re = Regex::new(SHARD_PATTERN)?;
    let mut shards = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if let Some((from, to)) = parse_shard_name(&re, &name) {
            shards.push(Shard {
                from,
                to,
                path: entry.path(),
            });
        }
    }

    shards.sort();
    debug!(dir = %dir.display(), shards = shards.len(), "discovered shards");
    Ok(shards)
}

/// Concatenate the records of every shard, in order
pub fn merge_shards(shards: &[Shard]) -> Result<Vec<Record>> {
    let mut merged = Vec::new();
    for shard in shards {
        let records = read_records(&shard.path).map_err(|e| Error::Shard {
            path: shard.path.clone(),
            source: Box::new(e),
        })?;
        merged.extend(records);
    }
    Ok(merged)
}
