//! Crate error type.

use thiserror::Error;

/// Errors raised while loading inputs or configuring a run.
///
/// Scoring, pruning, merging and ranking are total functions and never
/// fail; only the I/O edges and configuration validation produce errors.
#[derive(Error, Debug)]
pub enum RuleError {
    #[error("rule parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("dataset has no column named `{0}`")]
    MissingColumn(String),

    #[error("dataset has more than one column named `{0}`")]
    DuplicateColumn(String),

    #[error("dataset line {line}, column `{column}`: cannot read `{value}` as a boolean")]
    InvalidCell {
        line: usize,
        column: String,
        value: String,
    },

    #[error("row {row} has {found} values, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("dataset error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, RuleError>;
