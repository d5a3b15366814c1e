use crate::Value;

use sprocket_core::driver::BoundParameter;

/// An ad-hoc, ordered name/value parameter list. Names may be supplied
/// with or without the backend prefix; the prefix is applied on execution.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Params {
    entries: Vec<(String, Value)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chainable insert.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.entries.push((name.into(), value.into()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Prefixes every name and hands the list over in caller order.
    pub(crate) fn to_bound(&self, prefix: &str) -> Vec<BoundParameter> {
        self.entries
            .iter()
            .map(|(name, value)| {
                BoundParameter::new(crate::binder::qualify(prefix, name), value.clone())
            })
            .collect()
    }
}
