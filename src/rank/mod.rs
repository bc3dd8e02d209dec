//! Rule scoring and ranking.
//!
//! Rules are ranked by a weighted sum of criteria. The standard ranking
//! ([`Ranker::weighted`]) blends confidence and support:
//!
//! ```text
//! score = alpha * confidence + (1 - alpha) * support
//! ```
//!
//! Output order is score descending; equal scores keep their input order.

mod engine;
mod types;

pub use engine::{rank_rules, Ranker};
pub use types::{Confidence, RankedRule, RankingCriterion, Support};
