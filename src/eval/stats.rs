//! Support and confidence computation.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::evaluator::CompiledAntecedent;
use super::types::UnknownPolicy;
use crate::data::{Table, Truth};
use crate::rule::{Antecedent, Rule, RuleStats};

/// Computes support and confidence of `antecedent` in one pass over `table`.
///
/// - `support = hits_on_target / table.len()`, where rows evaluating to
///   unknown still count in the denominator;
/// - `confidence = hits_on_target / hits`, or `0.0` when no row is
///   determinately matched.
///
/// A row whose target value is missing never counts as a target hit.
/// An empty table yields all-zero statistics.
///
/// # Examples
///
/// ```
/// use u_rulemerge::data::{Table, Truth};
/// use u_rulemerge::eval::{rule_stats, UnknownPolicy};
/// use u_rulemerge::rule::{Antecedent, Literal};
///
/// let rows = (0..10)
///     .map(|i| vec![Truth::from(i < 6), Truth::from(i < 5)])
///     .collect();
/// let table = Table::from_rows(vec!["age_gt_50".into(), "target".into()], rows, "target").unwrap();
/// let stats = rule_stats(
///     &Antecedent::new([Literal::positive("age_gt_50")]),
///     &table,
///     UnknownPolicy::FirstCause,
/// );
/// assert!((stats.support - 0.5).abs() < 1e-10);
/// assert!((stats.confidence - 5.0 / 6.0).abs() < 1e-10);
/// ```
pub fn rule_stats(antecedent: &Antecedent, table: &Table, policy: UnknownPolicy) -> RuleStats {
    let compiled = CompiledAntecedent::new(antecedent, table, policy);

    let mut hits = 0usize;
    let mut hits_on_target = 0usize;
    for row in 0..table.len() {
        if compiled.evaluate(table.values(row)) == Truth::True {
            hits += 1;
            if table.target(row).is_true() {
                hits_on_target += 1;
            }
        }
    }

    let support = if table.is_empty() {
        0.0
    } else {
        hits_on_target as f64 / table.len() as f64
    };
    let confidence = if hits > 0 {
        hits_on_target as f64 / hits as f64
    } else {
        0.0
    };
    RuleStats {
        support,
        confidence,
    }
}

/// Scores one antecedent into a [`Rule`].
pub fn score_rule(antecedent: Antecedent, table: &Table, policy: UnknownPolicy) -> Rule {
    let stats = rule_stats(&antecedent, table, policy);
    Rule::new(antecedent, stats)
}

/// Scores many antecedents, preserving input order.
///
/// With the `parallel` feature enabled and `parallel = true`, antecedents
/// are scored concurrently with rayon; the table is only read. Without the
/// feature the flag is ignored.
pub fn score_antecedents(
    antecedents: Vec<Antecedent>,
    table: &Table,
    policy: UnknownPolicy,
    parallel: bool,
) -> Vec<Rule> {
    if parallel {
        return score_parallel(antecedents, table, policy);
    }
    antecedents
        .into_iter()
        .map(|a| score_rule(a, table, policy))
        .collect()
}

#[cfg(feature = "parallel")]
fn score_parallel(antecedents: Vec<Antecedent>, table: &Table, policy: UnknownPolicy) -> Vec<Rule> {
    antecedents
        .into_par_iter()
        .map(|a| score_rule(a, table, policy))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn score_parallel(antecedents: Vec<Antecedent>, table: &Table, policy: UnknownPolicy) -> Vec<Rule> {
    score_antecedents(antecedents, table, policy, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Literal;
    use proptest::prelude::*;

    fn table(columns: &[&str], rows: Vec<Vec<Truth>>, target: &str) -> Table {
        Table::from_rows(columns.iter().map(|c| c.to_string()).collect(), rows, target).unwrap()
    }

    fn pos(item: &str) -> Literal {
        Literal::positive(item)
    }

    #[test]
    fn test_age_example() {
        // age_gt_50 true for rows 1-6, target true for rows 1-5.
        let rows = (0..10)
            .map(|i| vec![Truth::from(i < 6), Truth::from(i < 5)])
            .collect();
        let t = table(&["age_gt_50", "target"], rows, "target");
        let s = rule_stats(&Antecedent::new([pos("age_gt_50")]), &t, UnknownPolicy::FirstCause);
        assert!((s.support - 0.5).abs() < 1e-10);
        assert!((s.confidence - 5.0 / 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_unknown_rows_excluded_from_confidence_only() {
        // A true everywhere; B missing in 3 of 10 rows, false elsewhere.
        // Target true in rows 0..5 (two of which have B missing).
        let rows = (0..10)
            .map(|i| {
                let b = if (3..6).contains(&i) { Truth::Unknown } else { Truth::False };
                vec![Truth::True, b, Truth::from(i < 5)]
            })
            .collect();
        let t = table(&["A", "B", "y"], rows, "y");
        let a = Antecedent::new([pos("A"), Literal::negative("B")]);
        let s = rule_stats(&a, &t, UnknownPolicy::FirstCause);
        // Matched rows: 0,1,2,6,7,8,9 (7 rows); target hits among them: 0,1,2.
        assert!((s.support - 3.0 / 10.0).abs() < 1e-10);
        assert!((s.confidence - 3.0 / 7.0).abs() < 1e-10);
    }

    #[test]
    fn test_no_match_gives_zero() {
        let rows = vec![vec![Truth::False, Truth::True]; 4];
        let t = table(&["a", "y"], rows, "y");
        let s = rule_stats(&Antecedent::new([pos("a")]), &t, UnknownPolicy::FirstCause);
        assert_eq!(s, RuleStats::default());
    }

    #[test]
    fn test_unknown_target_is_not_a_hit() {
        let rows = vec![
            vec![Truth::True, Truth::Unknown],
            vec![Truth::True, Truth::True],
        ];
        let t = table(&["a", "y"], rows, "y");
        let s = rule_stats(&Antecedent::new([pos("a")]), &t, UnknownPolicy::FirstCause);
        assert!((s.support - 0.5).abs() < 1e-10);
        assert!((s.confidence - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_empty_table() {
        let t = table(&["a", "y"], vec![], "y");
        let s = rule_stats(&Antecedent::new([pos("a")]), &t, UnknownPolicy::FirstCause);
        assert_eq!(s, RuleStats::default());
    }

    #[test]
    fn test_empty_antecedent_matches_everything() {
        let rows = vec![
            vec![Truth::Unknown, Truth::True],
            vec![Truth::True, Truth::False],
        ];
        let t = table(&["a", "y"], rows, "y");
        let s = rule_stats(&Antecedent::default(), &t, UnknownPolicy::FirstCause);
        assert!((s.support - 0.5).abs() < 1e-10);
        assert!((s.confidence - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_score_antecedents_keeps_order() {
        let rows = vec![vec![Truth::True, Truth::False, Truth::True]; 3];
        let t = table(&["a", "b", "y"], rows, "y");
        let input = vec![
            Antecedent::new([pos("b")]),
            Antecedent::new([pos("a")]),
        ];
        for parallel in [false, true] {
            let rules = score_antecedents(input.clone(), &t, UnknownPolicy::FirstCause, parallel);
            assert_eq!(rules[0].antecedent(), &input[0]);
            assert!((rules[0].confidence() - 0.0).abs() < 1e-10);
            assert!((rules[1].confidence() - 1.0).abs() < 1e-10);
        }
    }

    fn truth() -> impl Strategy<Value = Truth> {
        prop_oneof![Just(Truth::True), Just(Truth::False), Just(Truth::Unknown)]
    }

    proptest! {
        #[test]
        fn prop_stats_in_unit_interval(
            rows in prop::collection::vec(prop::collection::vec(truth(), 3), 1..40),
            negate in any::<(bool, bool)>(),
        ) {
            let t = table(&["a", "b", "y"], rows, "y");
            let lit = |item: &str, neg: bool| if neg { Literal::negative(item) } else { pos(item) };
            let a = Antecedent::new([lit("a", negate.0), lit("b", negate.1)]);
            for policy in [UnknownPolicy::FirstCause, UnknownPolicy::FalseDominates] {
                let s = rule_stats(&a, &t, policy);
                prop_assert!((0.0..=1.0).contains(&s.support));
                prop_assert!((0.0..=1.0).contains(&s.confidence));
                prop_assert!(s.support <= s.confidence + 1e-12 || s.confidence == 0.0);
            }
        }
    }
}
