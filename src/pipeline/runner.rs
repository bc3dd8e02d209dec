//! End-to-end compression run.
//!
//! # Stages
//!
//! 1. Drop duplicate antecedents (first occurrence wins)
//! 2. Score every antecedent against the table
//! 3. Keep rules meeting both thresholds
//! 4. Prune overly specific rules
//! 5. Generalize by antecedent intersection
//! 6. Rank by the confidence/support blend
//!
//! Each stage takes a rule collection by value and returns a new one.

use std::collections::{BTreeSet, HashSet};

use tracing::info;

use super::config::PipelineConfig;
use crate::data::Table;
use crate::error::{Result, RuleError};
use crate::eval::score_antecedents;
use crate::merge::MergeRunner;
use crate::prune::prune_overly_specific;
use crate::rank::{RankedRule, Ranker};
use crate::rule::{parse_rules, Antecedent};

/// Result of a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// Final rules, highest score first.
    pub rules: Vec<RankedRule>,
    /// Antecedents given as input.
    pub input: usize,
    /// Distinct antecedents after dropping duplicates.
    pub distinct: usize,
    /// Rules meeting both thresholds.
    pub qualified: usize,
    /// Rules surviving redundancy pruning.
    pub pruned: usize,
    /// Merge iterations executed.
    pub merge_iterations: usize,
    /// Successful generalizations.
    pub merges: usize,
    /// Whether the merge iteration cap cut the run short.
    pub truncated: bool,
}

/// Every item name referenced by `antecedents`, sorted.
///
/// Useful to restrict dataset loading to the columns that matter.
pub fn referenced_items<'a>(antecedents: impl IntoIterator<Item = &'a Antecedent>) -> BTreeSet<String> {
    antecedents
        .into_iter()
        .flat_map(|a| a.literals().map(|l| l.item().to_string()))
        .collect()
}

/// Keeps the first occurrence of every antecedent.
pub fn dedup_antecedents(antecedents: Vec<Antecedent>) -> Vec<Antecedent> {
    let mut seen = HashSet::with_capacity(antecedents.len());
    antecedents
        .into_iter()
        .filter(|a| seen.insert(a.clone()))
        .collect()
}

/// Pipeline runner.
pub struct PipelineRunner;

impl PipelineRunner {
    /// Runs every stage on already-parsed antecedents.
    ///
    /// Fails only if `config` is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_rulemerge::data::{Table, Truth};
    /// use u_rulemerge::pipeline::{PipelineConfig, PipelineRunner};
    /// use u_rulemerge::rule::parse_rules;
    ///
    /// let rows = (0..10)
    ///     .map(|i| vec![Truth::from(i < 6), Truth::from(i < 5)])
    ///     .collect();
    /// let table = Table::from_rows(vec!["age_gt_50".into(), "target".into()], rows, "target").unwrap();
    ///
    /// let antecedents = parse_rules("age_gt_50 => target").unwrap();
    /// let result = PipelineRunner::run(antecedents, &table, &PipelineConfig::default()).unwrap();
    /// assert_eq!(result.rules.len(), 1);
    /// assert!((result.rules[0].rule.support() - 0.5).abs() < 1e-10);
    /// ```
    pub fn run(
        antecedents: Vec<Antecedent>,
        table: &Table,
        config: &PipelineConfig,
    ) -> Result<PipelineResult> {
        config.validate().map_err(RuleError::Config)?;

        let input = antecedents.len();
        let antecedents = dedup_antecedents(antecedents);
        let distinct = antecedents.len();

        let scored = score_antecedents(antecedents, table, config.unknown_policy, config.parallel);
        let qualified: Vec<_> = scored
            .into_iter()
            .filter(|r| r.stats().meets(config.min_support, config.min_confidence))
            .collect();
        info!(
            input,
            distinct,
            qualified = qualified.len(),
            rows = table.len(),
            "scored rules"
        );

        let qualified_count = qualified.len();
        let pruned = prune_overly_specific(qualified, &config.prune_config());
        info!(kept = pruned.len(), "pruned overly specific rules");

        let pruned_count = pruned.len();
        let merged = MergeRunner::run(pruned, table, &config.merge_config());
        info!(
            rules = merged.rules.len(),
            merges = merged.merges,
            iterations = merged.iterations,
            "merged rules"
        );

        let rules = Ranker::weighted(config.alpha).rank(merged.rules);

        Ok(PipelineResult {
            rules,
            input,
            distinct,
            qualified: qualified_count,
            pruned: pruned_count,
            merge_iterations: merged.iterations,
            merges: merged.merges,
            truncated: merged.truncated,
        })
    }

    /// Parses rule text and runs every stage.
    pub fn run_text(text: &str, table: &Table, config: &PipelineConfig) -> Result<PipelineResult> {
        let antecedents = parse_rules(text)?;
        Self::run(antecedents, table, config)
    }
}
