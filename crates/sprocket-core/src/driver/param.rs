use crate::Value;

/// An execution-ready parameter: the descriptor-matched name (prefix
/// included) and the value to bind, with [`Value::Null`] as the explicit
/// null marker. Built fresh per call, never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundParameter {
    pub name: String,
    pub value: Value,
}

impl BoundParameter {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn null(name: impl Into<String>) -> Self {
        Self::new(name, Value::Null)
    }
}
