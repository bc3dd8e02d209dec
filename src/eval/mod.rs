//! Rule evaluation against a dataset.
//!
//! Two layers:
//!
//! - **Row evaluation** ([`evaluate`]): three-valued truth of one
//!   antecedent on one row, visiting literals in canonical order.
//! - **Statistics** ([`rule_stats`]): support and confidence of one
//!   antecedent over a whole [`crate::data::Table`], in a single pass.
//!
//! Statistics dominate the cost of a run (every merge candidate is scored),
//! so table scans use [`CompiledAntecedent`], which resolves item names to
//! column positions once per antecedent.

mod evaluator;
mod stats;
mod types;

pub use evaluator::{evaluate, CompiledAntecedent};
pub use stats::{rule_stats, score_antecedents, score_rule};
pub use types::UnknownPolicy;
