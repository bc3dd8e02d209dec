//! Three-valued antecedent evaluation against a single row.

use super::types::UnknownPolicy;
use crate::data::{Row, Table, Truth};
use crate::rule::{Antecedent, Literal};

/// Truth of one literal given the value of its item.
fn literal_truth(negated: bool, value: Truth) -> Truth {
    match (value, negated) {
        (Truth::Unknown, _) => Truth::Unknown,
        (Truth::True, false) | (Truth::False, true) => Truth::True,
        (Truth::True, true) | (Truth::False, false) => Truth::False,
    }
}

/// Folds per-literal truths (in canonical order) into the antecedent's truth.
///
/// The iterator is consumed lazily, so `FirstCause` stops reading the row
/// at the first non-true literal.
fn resolve(truths: impl Iterator<Item = Truth>, policy: UnknownPolicy) -> Truth {
    match policy {
        UnknownPolicy::FirstCause => {
            for t in truths {
                if t != Truth::True {
                    return t;
                }
            }
            Truth::True
        }
        UnknownPolicy::FalseDominates => {
            let mut unknown = false;
            for t in truths {
                match t {
                    Truth::False => return Truth::False,
                    Truth::Unknown => unknown = true,
                    Truth::True => {}
                }
            }
            if unknown {
                Truth::Unknown
            } else {
                Truth::True
            }
        }
    }
}

/// Evaluates `antecedent` on one row.
///
/// Literals are visited in canonical order. An empty antecedent is `True`.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use u_rulemerge::data::Truth;
/// use u_rulemerge::eval::{evaluate, UnknownPolicy};
/// use u_rulemerge::rule::{Antecedent, Literal};
///
/// let a = Antecedent::new([Literal::positive("a"), Literal::negative("b")]);
/// let row: HashMap<&str, bool> = [("a", true), ("b", false)].into_iter().collect();
/// assert_eq!(evaluate(&a, &row, UnknownPolicy::FirstCause), Truth::True);
/// ```
pub fn evaluate<R: Row + ?Sized>(antecedent: &Antecedent, row: &R, policy: UnknownPolicy) -> Truth {
    resolve(
        antecedent
            .literals()
            .map(|l| literal_truth(l.is_negated(), row.value(l.item()))),
        policy,
    )
}

/// An antecedent with item names resolved to [`Table`] column positions.
///
/// Evaluating a compiled antecedent over a row slice gives the same result
/// as [`evaluate`] on the corresponding [`crate::data::TableRow`], without
/// any name lookups in the row loop.
#[derive(Debug, Clone)]
pub struct CompiledAntecedent {
    terms: Vec<(Option<usize>, bool)>,
    policy: UnknownPolicy,
}

impl CompiledAntecedent {
    pub fn new(antecedent: &Antecedent, table: &Table, policy: UnknownPolicy) -> Self {
        let terms = antecedent
            .literals()
            .map(|l: &Literal| (table.column_index(l.item()), l.is_negated()))
            .collect();
        Self { terms, policy }
    }

    /// Evaluates against one row's values (as returned by [`Table::values`]).
    pub fn evaluate(&self, values: &[Truth]) -> Truth {
        resolve(
            self.terms.iter().map(|&(column, negated)| {
                let value = column.map_or(Truth::Unknown, |c| values[c]);
                literal_truth(negated, value)
            }),
            self.policy,
        )
    }
}
