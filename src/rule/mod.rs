//! Classification rules.
//!
//! A rule is a conjunction of (possibly negated) boolean literals implying
//! a fixed target label. Antecedents are sets: literal order in the source
//! text carries no meaning, and all iteration happens in one canonical
//! order (lexicographic by rendered literal text).

mod parse;
mod types;

pub use parse::{format_rule, parse_rule_line, parse_rules};
pub use types::{Antecedent, Literal, Rule, RuleStats, AND_SEPARATOR, IMPLIES, NOT_PREFIX};
