//! Command-line interface.

use std::fs;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::info;

use crate::data::TableReader;
use crate::error::{Result, RuleError};
use crate::eval::UnknownPolicy;
use crate::merge::EmitPolicy;
use crate::pipeline::{referenced_items, save_rules, PipelineConfig, PipelineResult, PipelineRunner};
use crate::rule::parse_rules;

#[derive(Debug, Parser)]
#[command(name = "rulemerge")]
#[command(version, about = "Prune and generalize a classification rule set against a labeled table", long_about = None)]
pub struct Cli {
    /// Labeled dataset (header row, one column per item)
    #[arg(long)]
    pub data: PathBuf,

    /// Rule file, one `a AND NOT b => label` rule per line
    #[arg(long)]
    pub rules: PathBuf,

    /// Where to write the compressed rule set
    #[arg(short, long, default_value = "output/compressed_ruleset.txt")]
    pub output: PathBuf,

    /// Target column in the dataset
    #[arg(long, default_value = "donor_is_old")]
    pub target: String,

    /// Consequent written to the output (defaults to the target column)
    #[arg(long)]
    pub label: Option<String>,

    /// Dataset field delimiter
    #[arg(long, default_value_t = '\t')]
    pub delimiter: char,

    /// Ranking weight of confidence (support gets 1 - alpha)
    #[arg(long, default_value_t = 0.8)]
    pub alpha: f64,

    #[arg(long, default_value_t = 0.1)]
    pub min_support: f64,

    #[arg(long, default_value_t = 0.15)]
    pub min_confidence: f64,

    /// Merge iteration cap (the loop stops once more pops than this have run)
    #[arg(long, default_value_t = 10_000)]
    pub max_iterations: usize,

    /// Confidence ratio at which a general rule prunes a specific one
    #[arg(long, default_value_t = 0.98)]
    pub prune_tolerance: f64,

    /// How a missing value and a false literal in the same row combine
    #[arg(long, value_enum, default_value = "first-cause")]
    pub unknown_policy: PolicyArg,

    /// Also emit rules produced by generalization (by default a merged
    /// antecedent is already seen when it is finalized and is dropped)
    #[arg(long)]
    pub keep_generalized: bool,

    /// Score the initial rules on all cores
    #[arg(long)]
    pub parallel: bool,

    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum PolicyArg {
    /// The first literal that is not true decides (unknown or false)
    #[default]
    FirstCause,
    /// Unknown only when no literal is false
    FalseDominates,
}

impl From<PolicyArg> for UnknownPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::FirstCause => UnknownPolicy::FirstCause,
            PolicyArg::FalseDominates => UnknownPolicy::FalseDominates,
        }
    }
}

impl Cli {
    /// Pipeline configuration from the parsed arguments.
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::default()
            .with_alpha(self.alpha)
            .with_min_support(self.min_support)
            .with_min_confidence(self.min_confidence)
            .with_max_iterations(self.max_iterations)
            .with_prune_tolerance(self.prune_tolerance)
            .with_unknown_policy(self.unknown_policy.into())
            .with_emit_policy(if self.keep_generalized {
                EmitPolicy::Distinct
            } else {
                EmitPolicy::Unseen
            })
            .with_parallel(self.parallel)
            .with_label(self.label.clone().unwrap_or_else(|| self.target.clone()))
    }

    fn delimiter_byte(&self) -> Result<u8> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| RuleError::Config(format!("delimiter must be ASCII, got {:?}", self.delimiter)))
    }
}

/// Reads the inputs, runs the pipeline and writes the output file.
pub fn run(cli: &Cli) -> Result<PipelineResult> {
    let config = cli.pipeline_config();
    config.validate().map_err(RuleError::Config)?;

    let text = fs::read_to_string(&cli.rules)?;
    let antecedents = parse_rules(&text)?;
    info!(path = %cli.rules.display(), rules = antecedents.len(), "parsed rules");

    let table = TableReader::new(&cli.target)
        .with_delimiter(cli.delimiter_byte()?)
        .with_columns(referenced_items(&antecedents))
        .read_path(&cli.data)?;
    info!(path = %cli.data.display(), rows = table.len(), "loaded dataset");

    let result = PipelineRunner::run(antecedents, &table, &config)?;
    save_rules(&cli.output, &result.rules, &config.label)?;
    Ok(result)
}
