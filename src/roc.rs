//! Threshold sweep over detector scores.
//!
//! Each distinct score is tried as a decision threshold; a record is predicted
//! phishing when its score is at or above the threshold. Every ratio treats a
//! zero denominator as one, so empty classes yield 0 rather than NaN.

use crate::types::{Record, LABEL_FIELD};
use serde::Serialize;
use serde_json::{json, Value};
use std::cmp::Ordering;

/// Label value marking a positive sample
pub const PHISHING_LABEL: &str = "phishing";

/// Detectors whose scores are recorded in the results file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Detector {
    StaticContent,
    Url,
}

impl Detector {
    pub const ALL: [Detector; 2] = [Detector::StaticContent, Detector::Url];

    pub fn name(self) -> &'static str {
        match self {
            Detector::StaticContent => "StaticContentDetector",
            Detector::Url => "UrlDetector",
        }
    }

    /// Record field holding this detector's score
    pub fn score_field(self) -> &'static str {
        match self {
            Detector::StaticContent => "staticContentScore",
            Detector::Url => "urlScore",
        }
    }

    fn file_prefix(self) -> &'static str {
        match self {
            Detector::StaticContent => "content",
            Detector::Url => "url",
        }
    }

    /// File receiving the best-accuracy point
    pub fn best_file_name(self) -> String {
        format!("{}_roc_auc_results.json", self.file_prefix())
    }

    /// File receiving the full curve
    pub fn curve_file_name(self) -> String {
        format!("{}_roc_curve_data.json", self.file_prefix())
    }
}

/// Ground truth and score for one record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub positive: bool,
    pub score: f64,
}

impl Sample {
    /// Non-numeric, zero or missing scores count as 0
    pub fn from_record(record: &Record, detector: Detector) -> Self {
        let positive = record
            .get(LABEL_FIELD)
            .and_then(Value::as_str)
            .is_some_and(|label| label == PHISHING_LABEL);
        let score = record
            .get(detector.score_field())
            .and_then(Value::as_f64)
            .unwrap_or(0.0);
        Self { positive, score }
    }
}

/// Confusion counts and derived rates at one threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RocPoint {
    pub threshold: f64,
    pub tpr: f64,
    pub fpr: f64,
    pub tp: usize,
    pub fp: usize,
    pub tn: usize,
    #[serde(rename = "fn")]
    pub fn_: usize,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        numerator
    } else {
        numerator / denominator
    }
}

impl RocPoint {
    fn at(threshold: f64, samples: &[Sample]) -> Self {
        let (mut tp, mut fp, mut tn, mut fn_) = (0usize, 0usize, 0usize, 0usize);
        for sample in samples {
            match (sample.positive, sample.score >= threshold) {
                (true, true) => tp += 1,
                (true, false) => fn_ += 1,
                (false, true) => fp += 1,
                (false, false) => tn += 1,
            }
        }

        let tpr = ratio(tp as f64, (tp + fn_) as f64);
        let fpr = ratio(fp as f64, (fp + tn) as f64);
        let accuracy = ratio((tp + tn) as f64, (tp + fp + tn + fn_) as f64);
        let precision = ratio(tp as f64, (tp + fp) as f64);
        let recall = tpr;
        let f1 = ratio(2.0 * (precision * recall), precision + recall);

        Self {
            threshold,
            tpr,
            fpr,
            tp,
            fp,
            tn,
            fn_,
            accuracy,
            precision,
            recall,
            f1,
        }
    }
}

/// One point per distinct score, highest threshold first
pub fn roc_curve(samples: &[Sample]) -> Vec<RocPoint> {
    let mut thresholds: Vec<f64> = samples.iter().map(|s| s.score).collect();
    thresholds.sort_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));
    thresholds.dedup();

    thresholds
        .into_iter()
        .map(|threshold| RocPoint::at(threshold, samples))
        .collect()
}

/// First point with the highest accuracy; `None` when no point beats 0
pub fn best_by_accuracy(curve: &[RocPoint]) -> Option<&RocPoint> {
    let mut best: Option<&RocPoint> = None;
    let mut best_accuracy = 0.0;
    for point in curve {
        if point.accuracy > best_accuracy {
            best_accuracy = point.accuracy;
            best = Some(point);
        }
    }
    best
}

/// Curve and best point for one detector
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorEvaluation {
    pub detector: Detector,
    pub curve: Vec<RocPoint>,
    pub best: Option<RocPoint>,
}

impl DetectorEvaluation {
    pub fn evaluate(records: &[Record], detector: Detector) -> Self {
        let samples: Vec<Sample> = records
            .iter()
            .map(|record| Sample::from_record(record, detector))
            .collect();
        let curve = roc_curve(&samples);
        let best = best_by_accuracy(&curve).copied();
        Self {
            detector,
            curve,
            best,
        }
    }

    /// Best point as written to disk; a bare zero accuracy when none was found
    pub fn best_json(&self) -> Value {
        match &self.best {
            Some(point) => json!(point),
            None => json!({ "accuracy": 0 }),
        }
    }
}
