use crate::config::{EnrichConfig, EvaluateConfig, ExtractConfig, MergeConfig};
use crate::enrich::{enrich_records, LookupTable};
use crate::error::Result;
use crate::extract::extract_error_ids;
use crate::files::{read_records, write_json, Indent};
use crate::merge::{discover_shards, merge_shards};
use crate::roc::{Detector, DetectorEvaluation};
use crate::types::{EnrichSummary, MergeSummary};
use serde_json::Value;
use tracing::info;

/// Runs each post-processing command as a read-transform-write pass
pub struct ResultsProcessor;

impl ResultsProcessor {
    /// Read the results file and collect the `rec_id` of every errored record
    pub fn collect_errors(config: &ExtractConfig) -> Result<Vec<Value>> {
        let records = read_records(&config.input)?;
        let ids = extract_error_ids(&records)?;

        info!(
            records = records.len(),
            errors = ids.len(),
            "extracted errored records"
        );

        Ok(ids)
    }

    /// Write collected identifiers to the configured output, if any
    pub fn write_errors(config: &ExtractConfig, ids: &[Value]) -> Result<()> {
        if let Some(output) = &config.output {
            write_json(output, ids, Indent::Four)?;
        }
        Ok(())
    }

    /// Collect errored identifiers and write them out in one pass
    pub fn extract_errors(config: &ExtractConfig) -> Result<Vec<Value>> {
        let ids = Self::collect_errors(config)?;
        Self::write_errors(config, &ids)?;
        Ok(ids)
    }

    /// Join the results file with the index CSV and write the full collection
    pub fn enrich(config: &EnrichConfig) -> Result<EnrichSummary> {
        let mut records = read_records(&config.results)?;
        let table = LookupTable::from_path(&config.index)?;

        let summary = enrich_records(&mut records, &table);
        info!(
            total = summary.total,
            enriched = summary.enriched,
            index_entries = table.len(),
            "enriched records"
        );

        write_json(&config.output, &records, Indent::Four)?;
        Ok(summary)
    }

    /// Concatenate every shard in the results directory into one file
    pub fn merge(config: &MergeConfig) -> Result<MergeSummary> {
        let shards = discover_shards(&config.dir)?;
        let merged = merge_shards(&shards)?;

        info!(shards = shards.len(), records = merged.len(), "merged shards");

        write_json(&config.output, &merged, Indent::Two)?;
        Ok(MergeSummary {
            shards: shards.len(),
            records: merged.len(),
            output: config.output.clone(),
        })
    }

    /// Sweep thresholds for every detector and write best point and curve files
    pub fn evaluate(config: &EvaluateConfig) -> Result<Vec<DetectorEvaluation>> {
        let records = read_records(&config.results)?;

        let mut evaluations = Vec::with_capacity(Detector::ALL.len());
        for detector in Detector::ALL {
            let evaluation = DetectorEvaluation::evaluate(&records, detector);
            info!(
                detector = detector.name(),
                thresholds = evaluation.curve.len(),
                best_accuracy = evaluation.best.map(|p| p.accuracy).unwrap_or(0.0),
                "evaluated detector"
            );
            evaluations.push(evaluation);
        }

        for evaluation in &evaluations {
            let path = config.output_dir.join(evaluation.detector.best_file_name());
            write_json(&path, &evaluation.best_json(), Indent::Two)?;
        }
        for evaluation in &evaluations {
            let path = config.output_dir.join(evaluation.detector.curve_file_name());
            write_json(&path, &evaluation.curve, Indent::Two)?;
        }

        Ok(evaluations)
    }
}
