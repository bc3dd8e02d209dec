//! Ranking criteria and ranked output.

use crate::rule::Rule;

/// A scoring criterion over rules.
///
/// Criteria return `f64` scores where **higher is better**; a
/// [`super::Ranker`] combines them into one weighted score.
///
/// # Examples
///
/// ```ignore
/// // Prefer short antecedents.
/// struct Brevity;
///
/// impl RankingCriterion for Brevity {
///     fn name(&self) -> &str { "Brevity" }
///     fn score(&self, rule: &Rule) -> f64 {
///         1.0 / (1.0 + rule.antecedent().len() as f64)
///     }
/// }
/// ```
pub trait RankingCriterion: Send + Sync {
    /// Returns the name of this criterion.
    fn name(&self) -> &str;

    /// Computes the score of the given rule. Higher scores rank first.
    fn score(&self, rule: &Rule) -> f64;
}

/// Scores a rule by its confidence.
#[derive(Debug, Clone, Copy, Default)]
pub struct Confidence;

impl RankingCriterion for Confidence {
    fn name(&self) -> &str {
        "Confidence"
    }

    fn score(&self, rule: &Rule) -> f64 {
        rule.confidence()
    }
}

/// Scores a rule by its support.
#[derive(Debug, Clone, Copy, Default)]
pub struct Support;

impl RankingCriterion for Support {
    fn name(&self) -> &str {
        "Support"
    }

    fn score(&self, rule: &Rule) -> f64 {
        rule.support()
    }
}

/// A rule with its combined ranking score.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedRule {
    pub rule: Rule,
    pub score: f64,
}
