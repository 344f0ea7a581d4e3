use std::path::Path;

use anyhow::Context;
use logmerge_core::DriverConfig;
use logmerge_sources::{DelayRange, OutputFormat};
use serde::{Deserialize, Serialize};

use crate::cli::RunArgs;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    #[default]
    Sync,
    Async,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Text,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        }
    }
}

/// Settings for `logmerge run`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub mode: RunMode,
    pub sources: usize,
    pub entries_per_source: usize,
    pub seed: u64,
    /// Simulated latency of each async pull. Ignored in sync mode.
    pub delay: DelayRange,
    pub format: Format,
    pub driver: DriverConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            mode: RunMode::Sync,
            sources: 5,
            entries_per_source: 100,
            seed: 0,
            delay: DelayRange::default(),
            format: Format::Text,
            driver: DriverConfig::default(),
        }
    }
}

impl RunConfig {
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("invalid run configuration")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&text)
    }

    /// Resolve the effective configuration: file (if any), then flags.
    pub fn resolve(args: &RunArgs) -> anyhow::Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply(args);
        Ok(config)
    }

    fn apply(&mut self, args: &RunArgs) {
        if let Some(mode) = args.mode {
            self.mode = mode;
        }
        if let Some(sources) = args.sources {
            self.sources = sources;
        }
        if let Some(entries) = args.entries {
            self.entries_per_source = entries;
        }
        if let Some(seed) = args.seed {
            self.seed = seed;
        }
        if args.min_delay_ms.is_some() || args.max_delay_ms.is_some() {
            self.delay = DelayRange::new(
                args.min_delay_ms.unwrap_or(self.delay.min_ms),
                args.max_delay_ms.unwrap_or(self.delay.max_ms),
            );
        }
        if let Some(format) = args.format {
            self.format = format;
        }
    }
}
