use anyhow::Context;
use clap::{Parser, Subcommand};
use detector_results::config::defaults;
use detector_results::prelude::*;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Post-process phishing detector evaluation results
#[derive(Parser, Debug)]
#[command(name = "detector-results")]
#[command(about = "Merge, enrich and inspect detector evaluation results")]
#[command(version)]
struct Args {
    /// Log debug events to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the rec_id of every record that has an error field
    ExtractErrors {
        /// Results file to scan
        #[arg(short, long, default_value = defaults::RESULTS_WITH_REC_ID)]
        input: PathBuf,

        /// File to write the rec_id list to
        #[arg(short, long, default_value = defaults::WEBSITES_WITH_ERRORS)]
        output: PathBuf,

        /// Only print the list, do not write the output file
        #[arg(long)]
        no_output: bool,
    },

    /// Add rec_id from the dataset index to matching results
    Enrich {
        /// Results file to enrich
        #[arg(short, long, default_value = defaults::RESULTS)]
        results: PathBuf,

        /// CSV index with website and rec_id columns
        #[arg(short, long, default_value = defaults::INDEX_CSV)]
        index: PathBuf,

        /// File to write the enriched results to
        #[arg(short, long, default_value = defaults::RESULTS_WITH_REC_ID)]
        output: PathBuf,
    },

    /// Merge results-<from>-<to>.json shards into a single results file
    Merge {
        /// Directory containing the shards
        #[arg(short, long, default_value = defaults::GENERATED_DIR)]
        dir: PathBuf,

        /// Merged output file (default: <dir>/results.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Sweep score thresholds for each detector and save ROC curve data
    Evaluate {
        /// Results file with label and detector scores
        #[arg(short, long, default_value = defaults::RESULTS)]
        results: PathBuf,

        /// Directory for the result and curve files
        #[arg(short, long, default_value = defaults::GENERATED_DIR)]
        output_dir: PathBuf,
    },
}

fn print_available_commands() {
    println!("Available commands:");
    println!("  extract-errors  List the rec_id of every record that has an error field");
    println!("  enrich          Add rec_id from the dataset index to matching results");
    println!("  merge           Merge results-<from>-<to>.json shards into a single results file");
    println!("  evaluate        Sweep score thresholds for each detector and save ROC curve data");
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "detector_results=debug"
    } else {
        "detector_results=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run_extract_command(input: PathBuf, output: PathBuf, no_output: bool) -> anyhow::Result<()> {
    let mut builder = ExtractConfigBuilder::new(&input);
    builder = if no_output {
        builder.no_output()
    } else {
        builder.output(output)
    };
    let config = builder.build()?;

    let ids = ResultsProcessor::collect_errors(&config)
        .with_context(|| format!("Failed to extract errors from {}", input.display()))?;

    println!("Websites with errors:");
    println!("{}", serde_json::to_string(&ids)?);

    if let Some(output) = &config.output {
        ResultsProcessor::write_errors(&config, &ids)
            .with_context(|| format!("Failed to write {}", output.display()))?;
    }

    Ok(())
}

fn run_enrich_command(results: PathBuf, index: PathBuf, output: PathBuf) -> anyhow::Result<()> {
    let config = EnrichConfigBuilder::new(&results, &index)
        .output(&output)
        .build()?;

    ResultsProcessor::enrich(&config).with_context(|| {
        format!(
            "Failed to enrich {} with {}",
            results.display(),
            index.display()
        )
    })?;

    println!("Updated JSON data written to {}", output.display());
    Ok(())
}

fn run_merge_command(dir: PathBuf, output: Option<PathBuf>) -> anyhow::Result<()> {
    let mut builder = MergeConfigBuilder::new(&dir);
    if let Some(output) = output {
        builder = builder.output(output);
    }
    let config = builder.build()?;

    let summary = ResultsProcessor::merge(&config)
        .with_context(|| format!("Failed to merge shards in {}", dir.display()))?;

    println!("Merged results written to {}", summary.output.display());
    Ok(())
}

fn print_best(evaluation: &DetectorEvaluation) {
    let name = evaluation.detector.name();
    match &evaluation.best {
        Some(best) => {
            println!(
                "{} - Best Threshold: {}, Best Accuracy: {}",
                name, best.threshold, best.accuracy
            );
            println!(
                "    TP: {}, FP: {}, TN: {}, FN: {}, Precision: {}, Recall: {}, F1: {}",
                best.tp, best.fp, best.tn, best.fn_, best.precision, best.recall, best.f1
            );
        }
        None => println!("{} - No threshold with accuracy above 0", name),
    }
}

fn run_evaluate_command(results: PathBuf, output_dir: PathBuf) -> anyhow::Result<()> {
    let config = EvaluateConfigBuilder::new(&results)
        .output_dir(&output_dir)
        .build()?;

    let evaluations = ResultsProcessor::evaluate(&config)
        .with_context(|| format!("Failed to evaluate detectors on {}", results.display()))?;

    for evaluation in &evaluations {
        print_best(evaluation);
    }
    println!("ROC AUC results and curve data saved for both detectors.");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    match args.command {
        Some(Command::ExtractErrors {
            input,
            output,
            no_output,
        }) => run_extract_command(input, output, no_output),
        Some(Command::Enrich {
            results,
            index,
            output,
        }) => run_enrich_command(results, index, output),
        Some(Command::Merge { dir, output }) => run_merge_command(dir, output),
        Some(Command::Evaluate {
            results,
            output_dir,
        }) => run_evaluate_command(results, output_dir),
        None => {
            print_available_commands();
            Ok(())
        }
    }
}
