use sprocket_core::driver::Cursor;
use sprocket_core::{Error, Result, Value};

/// Error code reported when the execution collaborator fails.
pub const EXECUTION_FAILURE_CODE: &str = "-1";

/// Fixed message surfaced to callers in place of backend failure detail.
pub const EXECUTION_FAILURE_MESSAGE: &str = "The operation could not be completed.";

/// Error code reported when a single-row read yields no rows.
pub const EMPTY_RESULT_CODE: &str = "-2";

pub const EMPTY_RESULT_MESSAGE: &str = "No matching record was found.";

/// Error code reported when strict binding finds absent parameters.
pub const MISSING_PARAMETERS_CODE: &str = "-3";

const DEFAULT_TEXT: &str = "-";

/// The uniform success/failure/information record every operation returns.
///
/// Populated from the recognized output columns of the first row of a
/// procedure's result set; columns absent from the cursor leave the
/// corresponding field at its default.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResponseInformation {
    pub id_value: i64,
    pub has_error: bool,
    pub error_code: String,
    pub error_message: String,
    pub information_message: String,
    pub row_guid: String,
}

impl Default for ResponseInformation {
    fn default() -> Self {
        Self {
            id_value: -1,
            has_error: false,
            error_code: DEFAULT_TEXT.to_owned(),
            error_message: DEFAULT_TEXT.to_owned(),
            information_message: DEFAULT_TEXT.to_owned(),
            row_guid: DEFAULT_TEXT.to_owned(),
        }
    }
}

impl ResponseInformation {
    /// Reads the recognized output columns from the first row of the
    /// current result set. Output columns match case-insensitively, the
    /// way ADO-style readers resolve names.
    pub(crate) fn from_cursor(cursor: &mut Cursor) -> Result<Self> {
        let columns = cursor.columns().to_vec();
        let mut response = Self::default();
        let Some(row) = cursor.next_row() else {
            return Ok(response);
        };

        for (column, value) in columns.iter().zip(row) {
            if value.is_null() {
                continue;
            }
            match column.to_lowercase().as_str() {
                "idvalue" => response.id_value = value.to_i64()?,
                "haserror" => response.has_error = output_bool(value)?,
                "errorcode" => response.error_code = value.to_string()?,
                "errormessage" => response.error_message = value.to_string()?,
                "informationmessage" => response.information_message = value.to_string()?,
                "_rowguid" | "rowguid" => response.row_guid = value.to_string()?,
                _ => {}
            }
        }
        Ok(response)
    }

    /// The fixed envelope surfaced when the execution collaborator fails;
    /// the original detail goes to the error sink only.
    pub fn execution_failure() -> Self {
        Self {
            has_error: true,
            error_code: EXECUTION_FAILURE_CODE.to_owned(),
            error_message: EXECUTION_FAILURE_MESSAGE.to_owned(),
            ..Self::default()
        }
    }

    /// The envelope for a single-row read that found no rows.
    pub fn empty_result() -> Self {
        Self {
            has_error: true,
            error_code: EMPTY_RESULT_CODE.to_owned(),
            error_message: EMPTY_RESULT_MESSAGE.to_owned(),
            ..Self::default()
        }
    }

    /// The envelope for a strict binding that found absent parameters.
    pub fn missing_parameters(names: &[String]) -> Self {
        Self {
            has_error: true,
            error_code: MISSING_PARAMETERS_CODE.to_owned(),
            error_message: format!("Missing parameters: {}", names.join(", ")),
            ..Self::default()
        }
    }
}

/// Backends surface booleans as native bools or as bit columns.
fn output_bool(value: Value) -> Result<bool> {
    match value {
        Value::Bool(value) => Ok(value),
        Value::I32(value) => Ok(value != 0),
        Value::I64(value) => Ok(value != 0),
        other => Err(Error::type_conversion(other, "bool")),
    }
}
