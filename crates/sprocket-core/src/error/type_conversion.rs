use crate::Value;

/// Error when a value cannot be converted to the requested field type
/// during materialization. Materialization assumes compatible types and
/// does not validate them defensively, so this propagates to the caller.
#[derive(Debug)]
pub(super) struct TypeConversionError {
    pub(super) value: Value,
    pub(super) target: &'static str,
}

impl TypeConversionError {
    pub(super) fn new(value: Value, target: &'static str) -> Self {
        TypeConversionError { value, target }
    }
}

impl std::error::Error for TypeConversionError {}

impl core::fmt::Display for TypeConversionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "cannot convert {} to {}", self.value.type_name(), self.target)
    }
}
