//! Delimited-text dataset loading.

use std::collections::BTreeSet;
use std::io;
use std::path::Path;

use tracing::debug;

use super::types::{Table, Truth};
use crate::error::{Result, RuleError};

/// Reads one cell as a ternary value.
///
/// Missing markers read as `Unknown`; boolean words and numbers
/// (non-zero = true) read as determinate values. Anything else is `None`.
pub fn parse_cell(raw: &str) -> Option<Truth> {
    match raw.trim() {
        "" | "NA" | "N/A" | "NaN" | "nan" | "NULL" | "null" | "None" | "<NA>" => {
            Some(Truth::Unknown)
        }
        "true" | "True" | "TRUE" | "yes" | "Yes" | "YES" => Some(Truth::True),
        "false" | "False" | "FALSE" | "no" | "No" | "NO" => Some(Truth::False),
        other => other.parse::<f64>().ok().map(|x| {
            if x.is_nan() {
                Truth::Unknown
            } else {
                Truth::from(x != 0.0)
            }
        }),
    }
}

/// Loads a header-first delimited file into a [`Table`].
///
/// # Examples
///
/// ```
/// use u_rulemerge::data::{TableReader, Truth};
///
/// let tsv = "id\tage_gt_50\tdonor_is_old\nx1\t1\t1\nx2\t\t0\n";
/// let table = TableReader::new("donor_is_old")
///     .with_columns(["age_gt_50"])
///     .read(tsv.as_bytes())
///     .unwrap();
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.values(1)[0], Truth::Unknown);
/// ```
#[derive(Debug, Clone)]
pub struct TableReader {
    target: String,
    delimiter: u8,
    columns: Option<BTreeSet<String>>,
}

impl TableReader {
    /// Creates a tab-delimited reader with the given target column.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            delimiter: b'\t',
            columns: None,
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Restricts loading to these columns (the target is always loaded).
    ///
    /// Other columns are skipped unparsed, so free-text columns do not
    /// fail the load. Names absent from the header simply read as unknown.
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn read_path(&self, path: impl AsRef<Path>) -> Result<Table> {
        let file = std::fs::File::open(path.as_ref())?;
        self.read(io::BufReader::new(file))
    }

    pub fn read<R: io::Read>(&self, reader: R) -> Result<Table> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .from_reader(reader);

        let header = rdr.headers()?.clone();
        let selected: Vec<usize> = header
            .iter()
            .enumerate()
            .filter(|(_, name)| {
                *name == self.target
                    || self.columns.as_ref().is_none_or(|set| set.contains(*name))
            })
            .map(|(i, _)| i)
            .collect();
        let columns: Vec<String> = selected.iter().map(|&i| header[i].to_string()).collect();

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            let line = record.position().map_or(0, |p| p.line() as usize);
            let mut values = Vec::with_capacity(selected.len());
            for (&i, name) in selected.iter().zip(&columns) {
                let raw = record.get(i).unwrap_or_default();
                let value = parse_cell(raw).ok_or_else(|| RuleError::InvalidCell {
                    line,
                    column: name.clone(),
                    value: raw.to_string(),
                })?;
                values.push(value);
            }
            rows.push(values);
        }

        debug!(
            rows = rows.len(),
            columns = columns.len(),
            skipped = header.len() - columns.len(),
            "dataset loaded"
        );
        Table::from_rows(columns, rows, &self.target)
    }
}
