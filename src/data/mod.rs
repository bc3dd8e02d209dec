//! Labeled boolean datasets.
//!
//! Every cell is ternary (true / false / unknown). A dataset is loaded once
//! and then only read; nothing downstream mutates it.

mod reader;
mod types;

pub use reader::{parse_cell, TableReader};
pub use types::{Row, Table, TableRow, Truth};
