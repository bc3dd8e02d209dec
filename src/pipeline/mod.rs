//! Rule-set compression pipeline.
//!
//! Composes the stages into one run:
//! parse → score → filter → prune → merge → rank → write.
//! The run is deterministic: identical inputs and configuration produce
//! byte-identical rule files.

mod config;
mod output;
mod runner;

pub use config::PipelineConfig;
pub use output::{save_rules, write_rules};
pub use runner::{dedup_antecedents, referenced_items, PipelineResult, PipelineRunner};
