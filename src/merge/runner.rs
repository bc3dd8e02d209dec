//! Merge loop execution.
//!
//! # Algorithm
//!
//! 1. Seed a double-ended work queue with the input rules, in order
//! 2. At each iteration:
//!    a. Pop the head candidate `C`
//!    b. Scan the rest of the queue left to right; for each `D` form
//!       `C ∩ D`, skipping empty or already-seen intersections
//!    c. The first intersection that meets both thresholds is marked seen,
//!       replaces `C` and `D`, and is pushed to the front of the queue
//!    d. If no partner qualifies, `C` is final and is emitted if its
//!       antecedent is not already seen (see [`EmitPolicy`])
//! 3. Terminate when the queue is empty or more than `max_iterations`
//!    pops have happened

use std::collections::{HashSet, VecDeque};

use tracing::{debug, warn};

use super::config::{EmitPolicy, MergeConfig};
use crate::data::Table;
use crate::eval::rule_stats;
use crate::rule::{Antecedent, Rule};

/// Result of a merge run.
#[derive(Debug, Clone)]
pub struct MergeResult {
    /// Final rules, distinct by antecedent, in emission order.
    pub rules: Vec<Rule>,
    /// Outer iterations executed.
    pub iterations: usize,
    /// Number of successful generalizations.
    pub merges: usize,
    /// Whether the iteration cap stopped the run with work left.
    pub truncated: bool,
}

/// State of one merge run.
///
/// All bookkeeping (work queue, seen antecedents, results) lives here, so
/// independent runs never share state.
#[derive(Debug)]
pub struct MergeSession<'a> {
    table: &'a Table,
    config: MergeConfig,
    queue: VecDeque<Rule>,
    /// Antecedents already generalized to or emitted; never derived again.
    seen: HashSet<Antecedent>,
    /// Antecedents already in `results` (used by [`EmitPolicy::Distinct`]).
    emitted: HashSet<Antecedent>,
    /// Intersections known to miss the thresholds. Scores are a pure
    /// function of the antecedent, so a miss is never re-scored.
    rejected: HashSet<Antecedent>,
    results: Vec<Rule>,
    iterations: usize,
    merges: usize,
}

impl<'a> MergeSession<'a> {
    pub fn new(rules: Vec<Rule>, table: &'a Table, config: MergeConfig) -> Self {
        Self {
            table,
            config,
            queue: rules.into(),
            seen: HashSet::new(),
            emitted: HashSet::new(),
            rejected: HashSet::new(),
            results: Vec::new(),
            iterations: 0,
            merges: 0,
        }
    }

    /// Candidates still waiting in the queue.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn is_seen(&self, antecedent: &Antecedent) -> bool {
        self.seen.contains(antecedent)
    }

    /// Rules finalized so far.
    pub fn results(&self) -> &[Rule] {
        &self.results
    }

    fn budget_left(&self) -> bool {
        self.iterations <= self.config.max_iterations
    }

    /// Performs one outer iteration. Returns `false` if the queue was empty.
    pub fn step(&mut self) -> bool {
        let Some(current) = self.queue.pop_front() else {
            return false;
        };
        self.iterations += 1;

        let mut kept = VecDeque::with_capacity(self.queue.len());
        let mut merged = None;
        while let Some(candidate) = self.queue.pop_front() {
            let joint = current.antecedent().intersection(candidate.antecedent());
            if joint.is_empty() || self.seen.contains(&joint) || self.rejected.contains(&joint) {
                kept.push_back(candidate);
                continue;
            }

            let stats = rule_stats(&joint, self.table, self.config.unknown_policy);
            if stats.meets(self.config.min_support, self.config.min_confidence) {
                debug!(
                    left = %current.antecedent(),
                    right = %candidate.antecedent(),
                    merged = %joint,
                    support = stats.support,
                    confidence = stats.confidence,
                    "generalized rule pair"
                );
                self.seen.insert(joint.clone());
                merged = Some(Rule::new(joint, stats));
                break;
            }
            self.rejected.insert(joint);
            kept.push_back(candidate);
        }

        kept.append(&mut self.queue);
        self.queue = kept;

        match merged {
            Some(rule) => {
                self.merges += 1;
                self.queue.push_front(rule);
            }
            None => self.finalize(current),
        }
        true
    }

    fn finalize(&mut self, rule: Rule) {
        let unseen = self.seen.insert(rule.antecedent().clone());
        let emit = match self.config.emit_policy {
            EmitPolicy::Unseen => unseen,
            EmitPolicy::Distinct => self.emitted.insert(rule.antecedent().clone()),
        };
        if emit {
            self.results.push(rule);
        }
    }

    /// Runs until the queue is empty or the iteration cap is exceeded.
    pub fn run(mut self) -> MergeResult {
        while self.budget_left() && self.step() {}

        let truncated = !self.queue.is_empty();
        if truncated {
            warn!(
                iterations = self.iterations,
                pending = self.queue.len(),
                "merge stopped at iteration cap"
            );
        }
        MergeResult {
            rules: self.results,
            iterations: self.iterations,
            merges: self.merges,
            truncated,
        }
    }
}

/// Generalization merge runner.
pub struct MergeRunner;

impl MergeRunner {
    /// Merges `rules` against `table`.
    ///
    /// Input rules are assumed to already meet the thresholds (they are
    /// emitted unchanged when nothing generalizes them); every synthesized
    /// rule is verified before it enters the queue. With the default
    /// [`EmitPolicy::Unseen`], a merged pair leaves the output entirely.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_rulemerge::data::{Table, Truth};
    /// use u_rulemerge::eval::{score_rule, UnknownPolicy};
    /// use u_rulemerge::merge::{EmitPolicy, MergeConfig, MergeRunner};
    /// use u_rulemerge::rule::parse_rules;
    ///
    /// let rows = vec![vec![Truth::True; 4]; 5];
    /// let columns = ["a", "b", "c", "y"].iter().map(|s| s.to_string()).collect();
    /// let table = Table::from_rows(columns, rows, "y").unwrap();
    ///
    /// let rules = parse_rules("a AND b => y\na AND c => y")
    ///     .unwrap()
    ///     .into_iter()
    ///     .map(|a| score_rule(a, &table, UnknownPolicy::FirstCause))
    ///     .collect::<Vec<_>>();
    ///
    /// let result = MergeRunner::run(rules.clone(), &table, &MergeConfig::default());
    /// assert_eq!(result.merges, 1);
    /// assert!(result.rules.is_empty());
    ///
    /// let config = MergeConfig::default().with_emit_policy(EmitPolicy::Distinct);
    /// let result = MergeRunner::run(rules, &table, &config);
    /// assert_eq!(result.rules[0].antecedent().to_string(), "a");
    /// ```
    pub fn run(rules: Vec<Rule>, table: &Table, config: &MergeConfig) -> MergeResult {
        MergeSession::new(rules, table, *config).run()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Truth;
    use crate::eval::{score_rule, UnknownPolicy};
    use crate::rule::parse_rules;

    const T: Truth = Truth::True;
    const F: Truth = Truth::False;

    fn table(columns: &[&str], rows: Vec<Vec<Truth>>) -> Table {
        Table::from_rows(columns.iter().map(|c| c.to_string()).collect(), rows, "y").unwrap()
    }

    /// Every item and the target true on every row.
    fn all_true(items: &[&str]) -> Table {
        let mut columns = items.to_vec();
        columns.push("y");
        table(&columns, vec![vec![T; columns.len()]; 4])
    }

    fn rules(text: &str, table: &Table) -> Vec<Rule> {
        parse_rules(text)
            .unwrap()
            .into_iter()
            .map(|a| score_rule(a, table, UnknownPolicy::FirstCause))
            .collect()
    }

    fn distinct() -> MergeConfig {
        MergeConfig::default().with_emit_policy(EmitPolicy::Distinct)
    }

    fn names(rules: &[Rule]) -> Vec<String> {
        rules.iter().map(|r| r.antecedent().to_string()).collect()
    }

    #[test]
    fn test_pair_generalizes() {
        let t = all_true(&["a", "b", "c"]);
        let result = MergeRunner::run(rules("a AND b => y\na AND c => y", &t), &t, &MergeConfig::default());
        // {a} replaces both parents but is already seen when it is finalized.
        assert!(result.rules.is_empty());
        assert_eq!(result.merges, 1);
        assert_eq!(result.iterations, 2);
        assert!(!result.truncated);
    }

    #[test]
    fn test_distinct_policy_emits_generalization() {
        let t = all_true(&["a", "b", "c"]);
        let result = MergeRunner::run(rules("a AND b => y\na AND c => y", &t), &t, &distinct());
        assert_eq!(names(&result.rules), vec!["a"]);
        assert_eq!(result.merges, 1);
        assert!((result.rules[0].confidence() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_threshold_blocks_generalization() {
        // {a} alone matches a row with a false target: confidence 0.5.
        let t = table(
            &["a", "b", "c", "y"],
            vec![vec![T, T, T, T], vec![T, F, F, F]],
        );
        let config = MergeConfig::default().with_min_confidence(0.9);
        let result = MergeRunner::run(rules("a AND b => y\na AND c => y", &t), &t, &config);
        assert_eq!(names(&result.rules), vec!["a AND b", "a AND c"]);
        assert_eq!(result.merges, 0);
    }

    #[test]
    fn test_empty_intersection_is_skipped() {
        let t = all_true(&["a", "b"]);
        let result = MergeRunner::run(rules("a => y\nb => y", &t), &t, &MergeConfig::default());
        assert_eq!(names(&result.rules), vec!["a", "b"]);
    }

    #[test]
    fn test_chained_generalization() {
        let t = all_true(&["a", "b", "c", "d", "e"]);
        let input = rules("a AND b AND c => y\na AND b AND d => y\na AND e => y", &t);
        let result = MergeRunner::run(input.clone(), &t, &MergeConfig::default());
        assert!(result.rules.is_empty());
        assert_eq!(result.merges, 2);
        assert_eq!(result.iterations, 3);

        let result = MergeRunner::run(input, &t, &distinct());
        assert_eq!(names(&result.rules), vec!["a"]);
    }

    #[test]
    fn test_seen_intersection_not_rederived() {
        // {a} is derived from the first pair; {a} ∩ {a,d} = {a} is then
        // already seen, so {a,d} survives on its own.
        let t = all_true(&["a", "b", "c", "d"]);
        let input = rules("a AND b => y\na AND c => y\na AND d => y", &t);
        let result = MergeRunner::run(input.clone(), &t, &MergeConfig::default());
        assert_eq!(names(&result.rules), vec!["a AND d"]);

        let result = MergeRunner::run(input, &t, &distinct());
        assert_eq!(names(&result.rules), vec!["a", "a AND d"]);
    }

    #[test]
    fn test_skipped_candidates_keep_order() {
        // `c` and `d` share nothing with `a AND b`; `a AND e` is the partner.
        let t = all_true(&["a", "b", "c", "d", "e"]);
        let input = rules("a AND b => y\nc => y\nd => y\na AND e => y", &t);
        let result = MergeRunner::run(input.clone(), &t, &MergeConfig::default());
        assert_eq!(names(&result.rules), vec!["c", "d"]);

        // {a} goes ahead of the skipped candidates.
        let result = MergeRunner::run(input, &t, &distinct());
        assert_eq!(names(&result.rules), vec!["a", "c", "d"]);
    }

    #[test]
    fn test_results_are_distinct() {
        let t = all_true(&["a", "b"]);
        let input = rules("a => y\nb => y\na => y\nb => y", &t);
        let result = MergeRunner::run(input, &t, &distinct());
        let mut seen = HashSet::new();
        for r in &result.rules {
            assert!(seen.insert(r.antecedent().clone()));
        }
        assert_eq!(names(&result.rules), vec!["a", "b"]);
    }

    #[test]
    fn test_results_meet_thresholds() {
        let t = table(
            &["a", "b", "c", "y"],
            vec![
                vec![T, T, F, T],
                vec![T, F, T, T],
                vec![T, F, F, F],
                vec![F, T, T, T],
            ],
        );
        let config = MergeConfig::default()
            .with_min_support(0.25)
            .with_min_confidence(0.6);
        let input: Vec<Rule> = rules("a AND b => y\na AND c => y\nb AND c => y", &t)
            .into_iter()
            .filter(|r| r.stats().meets(config.min_support, config.min_confidence))
            .collect();
        let result = MergeRunner::run(input, &t, &config);
        assert!(!result.rules.is_empty());
        for r in &result.rules {
            assert!(r.stats().meets(config.min_support, config.min_confidence));
        }
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let t = table(
            &["a", "b", "c", "d", "y"],
            vec![
                vec![T, T, T, F, T],
                vec![T, T, F, T, T],
                vec![F, T, T, T, F],
                vec![T, F, T, T, F],
            ],
        );
        let config = MergeConfig::default().with_min_confidence(0.6);
        let input = rules("a AND b AND c => y\na AND b AND d => y\nc AND d => y", &t);
        let first = MergeRunner::run(input, &t, &config);
        let second = MergeRunner::run(first.rules.clone(), &t, &config);
        assert_eq!(second.rules, first.rules);
        assert_eq!(second.merges, 0);
    }

    #[test]
    fn test_iteration_cap_truncates() {
        let t = all_true(&["a", "b", "c"]);
        let config = MergeConfig::default().with_max_iterations(1);
        let result = MergeRunner::run(rules("a => y\nb => y\nc => y", &t), &t, &config);
        assert_eq!(result.iterations, 2);
        assert!(result.truncated);
        assert_eq!(names(&result.rules), vec!["a", "b"]);
    }

    #[test]
    fn test_cap_allows_one_extra_pop() {
        let t = all_true(&["a", "b", "c"]);
        let input = rules("a => y\nb => y\nc => y", &t);

        let config = MergeConfig::default().with_max_iterations(2);
        let result = MergeRunner::run(input.clone(), &t, &config);
        assert_eq!(result.iterations, 3);
        assert!(!result.truncated);
        assert_eq!(names(&result.rules), vec!["a", "b", "c"]);

        let config = MergeConfig::default().with_max_iterations(0);
        let result = MergeRunner::run(input, &t, &config);
        assert_eq!(result.iterations, 1);
        assert!(result.truncated);
        assert_eq!(names(&result.rules), vec!["a"]);
    }

    #[test]
    fn test_empty_input_antecedent_handled_like_any_other() {
        let t = all_true(&["a"]);
        let input = vec![
            score_rule(Antecedent::default(), &t, UnknownPolicy::FirstCause),
            score_rule(Antecedent::new([crate::rule::Literal::positive("a")]), &t, UnknownPolicy::FirstCause),
        ];
        let result = MergeRunner::run(input, &t, &MergeConfig::default());
        assert_eq!(result.rules.len(), 2);
        assert!(result.rules[0].antecedent().is_empty());
    }

    #[test]
    fn test_session_step_by_step() {
        let t = all_true(&["a", "b", "c"]);
        let mut session = MergeSession::new(
            rules("a AND b => y\na AND c => y", &t),
            &t,
            MergeConfig::default(),
        );
        assert_eq!(session.pending(), 2);
        assert!(session.step());
        // The pair was replaced by its generalization.
        assert_eq!(session.pending(), 1);
        assert!(session.is_seen(&Antecedent::new([crate::rule::Literal::positive("a")])));
        assert!(session.results().is_empty());
        assert!(session.step());
        // {a} is final but already seen, so nothing is emitted.
        assert!(session.results().is_empty());
        assert_eq!(session.pending(), 0);
        assert!(!session.step());
        assert_eq!(session.iterations(), 2);
    }

    #[test]
    fn test_sessions_are_independent() {
        let t = all_true(&["a", "b", "c"]);
        let input = rules("a AND b => y\na AND c => y", &t);
        let first = MergeRunner::run(input.clone(), &t, &MergeConfig::default());
        let second = MergeRunner::run(input, &t, &MergeConfig::default());
        assert_eq!(first.rules, second.rules);
    }
}
