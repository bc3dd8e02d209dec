//! Ternary values, row access and the in-memory table.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use crate::error::{Result, RuleError};

/// A three-valued truth: missing data is `Unknown`, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Truth {
    True,
    False,
    #[default]
    Unknown,
}

impl Truth {
    pub fn is_true(self) -> bool {
        self == Truth::True
    }
}

impl From<bool> for Truth {
    fn from(b: bool) -> Self {
        if b {
            Truth::True
        } else {
            Truth::False
        }
    }
}

impl From<Option<bool>> for Truth {
    fn from(b: Option<bool>) -> Self {
        b.map_or(Truth::Unknown, Truth::from)
    }
}

/// Read access to one dataset row by item name.
///
/// An item the row does not carry reads as [`Truth::Unknown`].
pub trait Row {
    fn value(&self, item: &str) -> Truth;
}

impl<K, S> Row for HashMap<K, bool, S>
where
    K: Borrow<str> + Hash + Eq,
    S: BuildHasher,
{
    fn value(&self, item: &str) -> Truth {
        self.get(item).copied().into()
    }
}

impl<K: Borrow<str> + Ord> Row for BTreeMap<K, bool> {
    fn value(&self, item: &str) -> Truth {
        self.get(item).copied().into()
    }
}

/// An immutable, row-oriented boolean table with one target column.
///
/// The target column is also readable as an ordinary item.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<Truth>>,
    target: usize,
}

impl Table {
    /// Builds a table from column names and rows of values.
    ///
    /// Fails if a column name repeats, `target` is not one of `columns`,
    /// or a row's width does not match the header.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<Truth>>, target: &str) -> Result<Self> {
        let mut index = HashMap::with_capacity(columns.len());
        for (i, name) in columns.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(RuleError::DuplicateColumn(name.clone()));
            }
        }
        let target = *index
            .get(target)
            .ok_or_else(|| RuleError::MissingColumn(target.to_string()))?;
        if let Some((row, values)) = rows
            .iter()
            .enumerate()
            .find(|(_, values)| values.len() != columns.len())
        {
            return Err(RuleError::RowWidth {
                row,
                expected: columns.len(),
                found: values.len(),
            });
        }
        Ok(Self {
            columns,
            index,
            rows,
            target,
        })
    }

    /// Total number of rows, including rows with missing values.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn target_name(&self) -> &str {
        &self.columns[self.target]
    }

    /// Column position of `item`, if the table has it.
    pub fn column_index(&self, item: &str) -> Option<usize> {
        self.index.get(item).copied()
    }

    /// Target value of row `row`.
    pub fn target(&self, row: usize) -> Truth {
        self.rows[row][self.target]
    }

    /// Raw values of row `row`, in column order.
    pub fn values(&self, row: usize) -> &[Truth] {
        &self.rows[row]
    }

    pub fn row(&self, row: usize) -> TableRow<'_> {
        TableRow { table: self, row }
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = TableRow<'_>> + '_ {
        (0..self.rows.len()).map(move |row| self.row(row))
    }
}

/// Borrowed view of one [`Table`] row.
#[derive(Debug, Clone, Copy)]
pub struct TableRow<'a> {
    table: &'a Table,
    row: usize,
}

impl TableRow<'_> {
    pub fn target(&self) -> Truth {
        self.table.target(self.row)
    }
}

impl Row for TableRow<'_> {
    fn value(&self, item: &str) -> Truth {
        self.table
            .column_index(item)
            .map_or(Truth::Unknown, |c| self.table.rows[self.row][c])
    }
}
