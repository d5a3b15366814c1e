use chrono::{DateTime, Utc};

use crate::Value;

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value)
    }
}

impl TryFrom<Value> for DateTime<Utc> {
    type Error = crate::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::DateTime(value) => Ok(value),
            _ => Err(crate::Error::type_conversion(value, "DateTime<Utc>")),
        }
    }
}
