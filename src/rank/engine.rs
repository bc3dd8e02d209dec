//! Weighted criteria engine.

use std::cmp::Ordering;

use super::types::{Confidence, RankedRule, RankingCriterion, Support};
use crate::rule::Rule;

/// A criterion paired with its weight.
struct WeightedCriterion {
    criterion: Box<dyn RankingCriterion>,
    weight: f64,
}

/// Engine combining weighted criteria into one score and sorting by it.
///
/// # Examples
///
/// ```
/// use u_rulemerge::rank::Ranker;
///
/// let ranker = Ranker::weighted(0.8);
/// assert_eq!(ranker.criterion_names(), vec!["Confidence", "Support"]);
/// ```
pub struct Ranker {
    criteria: Vec<WeightedCriterion>,
}

impl Ranker {
    /// Creates an engine with no criteria (every score is 0).
    pub fn new() -> Self {
        Self {
            criteria: Vec::new(),
        }
    }

    /// `alpha * confidence + (1 - alpha) * support`.
    pub fn weighted(alpha: f64) -> Self {
        Self::new()
            .with_criterion(Confidence, alpha)
            .with_criterion(Support, 1.0 - alpha)
    }

    /// Adds a criterion with the given weight.
    pub fn with_criterion<C: RankingCriterion + 'static>(mut self, criterion: C, weight: f64) -> Self {
        self.criteria.push(WeightedCriterion {
            criterion: Box::new(criterion),
            weight,
        });
        self
    }

    /// Returns the names of all criteria in order.
    pub fn criterion_names(&self) -> Vec<&str> {
        self.criteria.iter().map(|wc| wc.criterion.name()).collect()
    }

    /// Weighted sum of all criteria for one rule.
    pub fn score(&self, rule: &Rule) -> f64 {
        self.criteria
            .iter()
            .map(|wc| wc.weight * wc.criterion.score(rule))
            .sum()
    }

    /// Scores `rules` and sorts them by score, highest first.
    ///
    /// The sort is stable: equal scores keep their input order.
    pub fn rank(&self, rules: Vec<Rule>) -> Vec<RankedRule> {
        let mut ranked: Vec<RankedRule> = rules
            .into_iter()
            .map(|rule| RankedRule {
                score: self.score(&rule),
                rule,
            })
            .collect();
        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        ranked
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new()
    }
}

/// Ranks rules with the standard confidence/support blend.
pub fn rank_rules(rules: Vec<Rule>, alpha: f64) -> Vec<RankedRule> {
    Ranker::weighted(alpha).rank(rules)
}
