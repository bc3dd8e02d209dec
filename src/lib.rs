//! Rule-set compression for boolean classification rules.
//!
//! Takes candidate rules of the form `a AND NOT b => label` and a labeled
//! boolean table, and produces a smaller, more general rule set:
//!
//! - **Evaluation**: three-valued (true / false / unknown) antecedent
//!   matching, with support and confidence computed in one table pass.
//! - **Pruning**: drops rules whose strictly more general counterpart
//!   reaches nearly the same confidence.
//! - **Merging**: greedy, queue-driven generalization by antecedent
//!   intersection, keeping only generalizations that clear the
//!   support and confidence thresholds.
//! - **Ranking**: weighted blend of confidence and support.
//!
//! # Architecture
//!
//! Every stage is a pure function from a rule collection to a new rule
//! collection; the dataset is loaded once and only read. Parsing, dataset
//! loading and file output sit at the edges ([`rule::parse_rules`],
//! [`data::TableReader`], [`pipeline::save_rules`]).

pub mod cli;
pub mod data;
pub mod error;
pub mod eval;
pub mod merge;
pub mod pipeline;
pub mod prune;
pub mod rank;
pub mod rule;

pub use error::{Result, RuleError};
