/// Error when the strict-binding path finds declared parameters with no
/// corresponding caller-supplied key. Binding fails before execution.
#[derive(Debug)]
pub(super) struct MissingParametersError {
    names: Vec<String>,
}

impl MissingParametersError {
    pub(super) fn new(names: Vec<String>) -> Self {
        MissingParametersError { names }
    }

    pub(super) fn names(&self) -> &[String] {
        &self.names
    }
}

impl std::error::Error for MissingParametersError {}

impl core::fmt::Display for MissingParametersError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "Missing parameters: {}", self.names.join(", "))
    }
}
