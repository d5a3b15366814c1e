use sprocket::{FieldValue, Result, Value};

#[derive(Debug, Default, Clone, PartialEq, sprocket::Model)]
#[field(rename_all = "PascalCase")]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub email: Option<String>,
}

/// Paging filter with an audit field that callers exclude from binding.
#[derive(Debug, Default, sprocket::Model)]
#[field(rename_all = "PascalCase")]
pub struct GridFilter {
    pub name: String,
    pub page: i32,
    pub audit_user: String,
}

#[derive(Debug, Default, Clone, PartialEq, sprocket::Model)]
#[field(rename_all = "PascalCase")]
pub struct ContactCard {
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Two composite branches exposing the same `Email` leaf; the branch
/// visited second wins during flattening.
#[derive(Debug, Default, sprocket::Model)]
#[field(rename_all = "PascalCase")]
pub struct Registration {
    pub name: String,
    pub home: ContactCard,
    pub work: ContactCard,
    #[field(scalar)]
    pub status: Status,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    #[default]
    Active,
    Disabled,
}

impl FieldValue for Status {
    fn to_value(&self) -> Value {
        Value::I32(*self as i32)
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::I32(0) | Value::Null => Ok(Status::Active),
            Value::I32(1) => Ok(Status::Disabled),
            other => Err(sprocket::Error::type_conversion(other, "Status")),
        }
    }
}
