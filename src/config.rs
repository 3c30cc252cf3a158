use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Default locations, relative to the invocation directory
pub mod defaults {
    pub const RESULTS: &str = "generated/results.json";
    pub const INDEX_CSV: &str = "data/index.csv";
    pub const RESULTS_WITH_REC_ID: &str = "generated/results_with_rec_id.json";
    pub const WEBSITES_WITH_ERRORS: &str = "generated/websites_with_errors.json";
    pub const GENERATED_DIR: &str = "generated";
    pub const MERGED_FILE_NAME: &str = "results.json";
}

fn require_file(path: &Path, what: &str) -> Result<()> {
    if !path.is_file() {
        return Err(Error::Config(format!(
            "{} does not exist: {}",
            what,
            path.display()
        )));
    }
    Ok(())
}

/// Configuration for the error extractor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    pub input: PathBuf,
    /// Where to write the identifier array; `None` only prints it
    pub output: Option<PathBuf>,
}

impl ExtractConfig {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: Some(PathBuf::from(defaults::WEBSITES_WITH_ERRORS)),
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_file(&self.input, "Results file")
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self::new(defaults::RESULTS_WITH_REC_ID)
    }
}

/// Builder for [`ExtractConfig`]
#[derive(Debug, Clone, Default)]
pub struct ExtractConfigBuilder {
    config: ExtractConfig,
}

impl ExtractConfigBuilder {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            config: ExtractConfig::new(input),
        }
    }

    pub fn output(mut self, output: impl Into<PathBuf>) -> Self {
        self.config.output = Some(output.into());
        self
    }

    /// Print the identifiers without writing them to a file
    pub fn no_output(mut self) -> Self {
        self.config.output = None;
        self
    }

    pub fn build(self) -> Result<ExtractConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Configuration for the record enricher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichConfig {
    pub results: PathBuf,
    pub index: PathBuf,
    pub output: PathBuf,
}

impl EnrichConfig {
    pub fn new(results: impl Into<PathBuf>, index: impl Into<PathBuf>) -> Self {
        Self {
            results: results.into(),
            index: index.into(),
            output: PathBuf::from(defaults::RESULTS_WITH_REC_ID),
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_file(&self.results, "Results file")?;
        require_file(&self.index, "Index CSV")
    }
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self::new(defaults::RESULTS, defaults::INDEX_CSV)
    }
}

/// Builder for [`EnrichConfig`]
#[derive(Debug, Clone, Default)]
pub struct EnrichConfigBuilder {
    config: EnrichConfig,
}

impl EnrichConfigBuilder {
    pub fn new(results: impl Into<PathBuf>, index: impl Into<PathBuf>) -> Self {
        Self {
            config: EnrichConfig::new(results, index),
        }
    }

    pub fn output(mut self, output: impl Into<PathBuf>) -> Self {
        self.config.output = output.into();
        self
    }

    pub fn build(self) -> Result<EnrichConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Configuration for merging result shards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeConfig {
    pub dir: PathBuf,
    pub output: PathBuf,
}

impl MergeConfig {
    /// Output defaults to `results.json` inside the shard directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let output = dir.join(defaults::MERGED_FILE_NAME);
        Self { dir, output }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.dir.exists() {
            return Err(Error::Config(format!(
                "Results directory does not exist: {}",
                self.dir.display()
            )));
        }

        if !self.dir.is_dir() {
            return Err(Error::Config(format!(
                "Results directory is not a directory: {}",
                self.dir.display()
            )));
        }

        Ok(())
    }
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self::new(defaults::GENERATED_DIR)
    }
}

/// Builder for [`MergeConfig`]
#[derive(Debug, Clone, Default)]
pub struct MergeConfigBuilder {
    config: MergeConfig,
}

impl MergeConfigBuilder {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            config: MergeConfig::new(dir),
        }
    }

    pub fn output(mut self, output: impl Into<PathBuf>) -> Self {
        self.config.output = output.into();
        self
    }

    pub fn build(self) -> Result<MergeConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Configuration for the detector threshold evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluateConfig {
    pub results: PathBuf,
    /// Directory receiving the per-detector result and curve files
    pub output_dir: PathBuf,
}

impl EvaluateConfig {
    pub fn new(results: impl Into<PathBuf>) -> Self {
        Self {
            results: results.into(),
            output_dir: PathBuf::from(defaults::GENERATED_DIR),
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_file(&self.results, "Results file")
    }
}

impl Default for EvaluateConfig {
    fn default() -> Self {
        Self::new(defaults::RESULTS)
    }
}

/// Builder for [`EvaluateConfig`]
#[derive(Debug, Clone, Default)]
pub struct EvaluateConfigBuilder {
    config: EvaluateConfig,
}

impl EvaluateConfigBuilder {
    pub fn new(results: impl Into<PathBuf>) -> Self {
        Self {
            config: EvaluateConfig::new(results),
        }
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn build(self) -> Result<EvaluateConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
