use crate::Value;

use sprocket_core::driver::Cursor;

/// A generic tabular result: ordered columns inferred from the cursor,
/// optionally restricted to an allow-list.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Reads the current result set to exhaustion. The allow-list filters
    /// the column declaration and per-row extraction through the same
    /// index set, so column count and value count always agree.
    pub(crate) fn read(cursor: &mut Cursor, allow: Option<&[&str]>) -> Table {
        let declared = cursor.columns().to_vec();
        let keep: Vec<usize> = match allow {
            Some(allow) => declared
                .iter()
                .enumerate()
                .filter(|(_, column)| allow.contains(&column.as_str()))
                .map(|(index, _)| index)
                .collect(),
            None => (0..declared.len()).collect(),
        };

        let columns = keep.iter().map(|&index| declared[index].clone()).collect();

        let mut rows = Vec::new();
        while let Some(row) = cursor.next_row() {
            rows.push(
                keep.iter()
                    .map(|&index| row.get(index).cloned().unwrap_or(Value::Null))
                    .collect(),
            );
        }

        Table { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value at `row` under the named column.
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.get(index)
    }
}
