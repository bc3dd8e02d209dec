//! Redundancy pruning.
//!
//! A rule is *overly specific* when a strictly more general rule in the
//! same collection (its antecedent a strict subset) reaches nearly the same
//! confidence. The extra literals buy no predictive gain, so the specific
//! rule is dropped and the general one kept.

mod config;
mod pruner;

pub use config::PruneConfig;
pub use pruner::{is_overly_specific, prune_overly_specific};
