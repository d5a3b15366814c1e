use crate::Value;

use std::{collections::VecDeque, ops};

/// The backend's forward-only sequence of rows, grouped into result sets.
///
/// Reading is destructive: rows are taken in order, and advancing to the
/// next result set discards whatever remains of the current one.
#[derive(Debug, Default)]
pub struct Cursor {
    sets: VecDeque<ResultSet>,
}

impl Cursor {
    pub fn new(sets: Vec<ResultSet>) -> Self {
        Self { sets: sets.into() }
    }

    pub fn single(set: ResultSet) -> Self {
        Self::new(vec![set])
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Column names of the current result set, in declaration order.
    pub fn columns(&self) -> &[String] {
        self.sets.front().map(|set| &set.columns[..]).unwrap_or(&[])
    }

    /// Takes the next row of the current result set.
    pub fn next_row(&mut self) -> Option<Row> {
        self.sets.front_mut()?.rows.pop_front()
    }

    /// Advances to the next result set, discarding the current one.
    /// Returns `false` once no further result set exists.
    pub fn next_result_set(&mut self) -> bool {
        self.sets.pop_front();
        !self.sets.is_empty()
    }
}

/// One result set: ordered columns plus the rows that carry them.
#[derive(Debug, Default, Clone)]
pub struct ResultSet {
    columns: Vec<String>,
    rows: VecDeque<Row>,
}

impl ResultSet {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: VecDeque::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn push_row(&mut self, values: Vec<Value>) {
        debug_assert_eq!(values.len(), self.columns.len());
        self.rows.push_back(Row::from_vec(values));
    }

    /// Chainable `push_row`, for drivers that script their responses.
    pub fn row(mut self, values: Vec<Value>) -> Self {
        self.push_row(values);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Row values, positionally aligned with the result set's columns.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Row {
    pub values: Vec<Value>,
}

impl Row {
    pub fn from_vec(values: Vec<Value>) -> Self {
        Self { values }
    }
}

impl ops::Deref for Row {
    type Target = [Value];

    fn deref(&self) -> &Self::Target {
        &self.values[..]
    }
}

impl ops::DerefMut for Row {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.values[..]
    }
}

impl IntoIterator for Row {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}
