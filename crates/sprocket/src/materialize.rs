use crate::{schema::ModelSchema, Model};

use sprocket_core::driver::{Cursor, Row};
use sprocket_core::{Error, Result};

/// Reads the current result set's next row into a single model instance.
/// Zero rows is its own condition, distinct from an execution failure.
pub(crate) fn one<M: Model>(
    schema: &ModelSchema<M>,
    cursor: &mut Cursor,
    procedure: &str,
) -> Result<M> {
    let columns = cursor.columns().to_vec();
    match cursor.next_row() {
        Some(row) => from_row(schema, &columns, row),
        None => Err(Error::empty_result(procedure)),
    }
}

/// Reads the current result set to exhaustion into model instances.
pub(crate) fn many<M: Model>(schema: &ModelSchema<M>, cursor: &mut Cursor) -> Result<Vec<M>> {
    let columns = cursor.columns().to_vec();
    let mut models = Vec::new();
    while let Some(row) = cursor.next_row() {
        models.push(from_row(schema, &columns, row)?);
    }
    Ok(models)
}

/// Column-to-field matching is case-sensitive exact: unmatched columns are
/// ignored, unmatched fields keep their default value. Null values assign
/// the field's absent representation through its setter.
fn from_row<M: Model>(schema: &ModelSchema<M>, columns: &[String], row: Row) -> Result<M> {
    let mut model = M::default();
    for (column, value) in columns.iter().zip(row) {
        let Some(field) = schema.field(column) else {
            continue;
        };
        (field.set)(&mut model, value)?;
    }
    Ok(model)
}
