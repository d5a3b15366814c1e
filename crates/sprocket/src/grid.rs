use sprocket_core::driver::Cursor;
use sprocket_core::{Result, Value};

/// A paged result following the two-result-set convention: the first
/// result set carries the page's rows, the second a single total count.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid<T> {
    pub rows: T,
    pub total_rows: i64,
}

impl<T> Grid<T> {
    pub fn new(rows: T, total_rows: i64) -> Self {
        Self { rows, total_rows }
    }
}

impl<T: Default> Default for Grid<T> {
    fn default() -> Self {
        Self::new(T::default(), 0)
    }
}

/// Advances past the data result set and reads the total row count: the
/// first column of the first row of the next result set, 0 when no such
/// result set or row exists.
pub(crate) fn total_rows(cursor: &mut Cursor) -> Result<i64> {
    if !cursor.next_result_set() {
        return Ok(0);
    }
    match cursor.next_row() {
        Some(row) => match row.first() {
            Some(Value::Null) | None => Ok(0),
            Some(value) => value.clone().to_i64(),
        },
        None => Ok(0),
    }
}
