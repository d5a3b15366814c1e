/// Error raised by the execution collaborator during execute or read.
///
/// Carries the full backend detail. Operations forward that detail to the
/// error sink and surface a fixed generic message to callers instead.
#[derive(Debug)]
pub(super) struct ExecutionError {
    pub(super) detail: String,
}

impl ExecutionError {
    pub(super) fn new(detail: String) -> Self {
        ExecutionError { detail }
    }
}

impl std::error::Error for ExecutionError {}

impl core::fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "execution failed: {}", self.detail)
    }
}
