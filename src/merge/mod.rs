//! Greedy rule generalization.
//!
//! Rules are combined by intersecting their antecedents: the shared
//! literals form a more general rule, which replaces both parents when it
//! still clears the support and confidence thresholds. Generalized rules
//! go back to the front of the work queue so they can be generalized again
//! immediately.
//!
//! The search is greedy and bounded: only the first qualifying partner of
//! each candidate is used, and queue order decides which merges are found.
//! The result depends on input order but is fully deterministic for a
//! given input.

mod config;
mod runner;

pub use config::{EmitPolicy, MergeConfig};
pub use runner::{MergeResult, MergeRunner, MergeSession};
