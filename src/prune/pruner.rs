//! Pairwise subset check over a rule collection.

use tracing::debug;

use super::config::PruneConfig;
use crate::rule::Rule;

/// Whether some rule in `collection` makes `rule` redundant.
///
/// That is: its antecedent is a strict subset of `rule`'s and its
/// confidence is at least `tolerance * rule.confidence()`.
pub fn is_overly_specific(rule: &Rule, collection: &[Rule], tolerance: f64) -> bool {
    collection.iter().any(|general| {
        general.antecedent().is_strict_subset(rule.antecedent())
            && general.confidence() >= tolerance * rule.confidence()
    })
}

/// Drops every overly specific rule, keeping survivors in input order.
///
/// Every rule is judged against the full input collection, so a rule
/// that is itself pruned still prunes its specializations. Statistics are
/// not recomputed. Runs in O(n^2) subset checks.
pub fn prune_overly_specific(rules: Vec<Rule>, config: &PruneConfig) -> Vec<Rule> {
    let redundant: Vec<bool> = rules
        .iter()
        .map(|rule| is_overly_specific(rule, &rules, config.tolerance))
        .collect();

    let before = rules.len();
    let kept: Vec<Rule> = rules
        .into_iter()
        .zip(redundant)
        .filter_map(|(rule, drop)| (!drop).then_some(rule))
        .collect();
    debug!(before, after = kept.len(), "pruned overly specific rules");
    kept
}
