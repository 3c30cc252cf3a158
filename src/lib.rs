//! Post-processing for phishing detector evaluation results.
//!
//! Evaluation runs write their findings as JSON arrays of records. This
//! library merges sharded result files, joins records with the dataset index
//! to attach `rec_id`, extracts the identifiers of records that failed, and
//! sweeps detector score thresholds.

pub mod config;
pub mod enrich;
pub mod error;
pub mod extract;
pub mod files;
pub mod filter;
pub mod merge;
pub mod processor;
pub mod roc;
pub mod types;

pub use config::{
    EnrichConfig, EnrichConfigBuilder, EvaluateConfig, EvaluateConfigBuilder, ExtractConfig,
    ExtractConfigBuilder, MergeConfig, MergeConfigBuilder,
};
pub use enrich::{enrich_records, LookupTable};
pub use error::{Error, Result};
pub use extract::{extract_error_ids, extract_ids};
pub use filter::{FilterResult, HasField, RecordFilter};
pub use merge::{discover_shards, merge_shards};
pub use processor::ResultsProcessor;
pub use roc::{best_by_accuracy, roc_curve, Detector, DetectorEvaluation, RocPoint, Sample};
pub use types::{EnrichSummary, MergeSummary, RangeBound, Record, Shard};

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::config::{
        EnrichConfigBuilder, EvaluateConfigBuilder, ExtractConfigBuilder, MergeConfigBuilder,
    };
    pub use crate::error::{Error, Result};
    pub use crate::processor::ResultsProcessor;
    pub use crate::roc::{Detector, DetectorEvaluation, RocPoint};
    pub use crate::types::{EnrichSummary, MergeSummary, Record};
}
