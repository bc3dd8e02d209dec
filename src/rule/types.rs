//! Literals, antecedents and scored rules.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

/// Keyword that negates a literal in rule text.
pub const NOT_PREFIX: &str = "NOT ";

/// Separator between literals in rule text.
pub const AND_SEPARATOR: &str = "AND";

/// Separator between antecedent and consequent in rule text.
pub const IMPLIES: &str = "=>";

/// A named boolean condition, optionally negated.
///
/// Literals order by their rendered text (`NOT b` sorts before `a`,
/// `a` before `b`), which is the canonical order used both for
/// evaluation and for output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Literal {
    item: String,
    negated: bool,
}

impl Literal {
    /// Creates the literal `item`.
    pub fn positive(item: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            negated: false,
        }
    }

    /// Creates the literal `NOT item`.
    pub fn negative(item: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            negated: true,
        }
    }

    /// The referenced item (column) name.
    pub fn item(&self) -> &str {
        &self.item
    }

    /// Whether the literal is `NOT item`.
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    fn sort_key(&self) -> impl Iterator<Item = u8> + '_ {
        let prefix: &[u8] = if self.negated {
            NOT_PREFIX.as_bytes()
        } else {
            b""
        };
        prefix.iter().copied().chain(self.item.bytes())
    }
}

impl Ord for Literal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key()
            .cmp(other.sort_key())
            .then(self.negated.cmp(&other.negated))
    }
}

impl PartialOrd for Literal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "{NOT_PREFIX}{}", self.item)
        } else {
            f.write_str(&self.item)
        }
    }
}

/// A conjunction of unique literals.
///
/// Iteration is always in canonical literal order. Two antecedents are
/// the same rule iff their literal sets are equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Antecedent {
    literals: BTreeSet<Literal>,
}

impl Antecedent {
    /// Creates an antecedent from literals; duplicates collapse.
    pub fn new(literals: impl IntoIterator<Item = Literal>) -> Self {
        Self {
            literals: literals.into_iter().collect(),
        }
    }

    /// Literals in canonical order.
    pub fn literals(&self) -> impl ExactSizeIterator<Item = &Literal> + '_ {
        self.literals.iter()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// An empty antecedent matches every row.
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn contains(&self, literal: &Literal) -> bool {
        self.literals.contains(literal)
    }

    pub fn is_subset(&self, other: &Antecedent) -> bool {
        self.literals.is_subset(&other.literals)
    }

    /// `self ⊂ other` and `self != other`.
    pub fn is_strict_subset(&self, other: &Antecedent) -> bool {
        self.literals.len() < other.literals.len() && self.is_subset(other)
    }

    /// The generalization keeping only the literals shared with `other`.
    pub fn intersection(&self, other: &Antecedent) -> Antecedent {
        Antecedent {
            literals: self
                .literals
                .intersection(&other.literals)
                .cloned()
                .collect(),
        }
    }
}

impl FromIterator<Literal> for Antecedent {
    fn from_iter<I: IntoIterator<Item = Literal>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl fmt::Display for Antecedent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, literal) in self.literals.iter().enumerate() {
            if i > 0 {
                write!(f, " {AND_SEPARATOR} ")?;
            }
            write!(f, "{literal}")?;
        }
        Ok(())
    }
}

/// Support and confidence of an antecedent against one dataset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleStats {
    /// Fraction of all rows where the antecedent holds and the target is true.
    pub support: f64,
    /// Fraction of rows where the antecedent holds for which the target is true.
    pub confidence: f64,
}

impl RuleStats {
    /// Both thresholds met (inclusive).
    pub fn meets(&self, min_support: f64, min_confidence: f64) -> bool {
        self.support >= min_support && self.confidence >= min_confidence
    }
}

/// An antecedent paired with the statistics computed for it.
///
/// A rule is never re-scored in place: generalizing an antecedent
/// produces a new `Rule`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rule {
    antecedent: Antecedent,
    stats: RuleStats,
}

impl Rule {
    pub fn new(antecedent: Antecedent, stats: RuleStats) -> Self {
        Self { antecedent, stats }
    }

    pub fn antecedent(&self) -> &Antecedent {
        &self.antecedent
    }

    pub fn stats(&self) -> RuleStats {
        self.stats
    }

    pub fn support(&self) -> f64 {
        self.stats.support
    }

    pub fn confidence(&self) -> f64 {
        self.stats.confidence
    }

    /// `alpha * confidence + (1 - alpha) * support`.
    pub fn score(&self, alpha: f64) -> f64 {
        alpha * self.stats.confidence + (1.0 - alpha) * self.stats.support
    }

    pub fn into_antecedent(self) -> Antecedent {
        self.antecedent
    }
}
