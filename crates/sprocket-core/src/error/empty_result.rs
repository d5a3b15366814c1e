/// Error when a single-row read yields no rows.
///
/// Not an execution failure; callers receive a specific code/message pair.
#[derive(Debug)]
pub(super) struct EmptyResultError {
    pub(super) procedure: String,
}

impl EmptyResultError {
    pub(super) fn new(procedure: String) -> Self {
        EmptyResultError { procedure }
    }
}

impl std::error::Error for EmptyResultError {}

impl core::fmt::Display for EmptyResultError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "no rows returned: {}", self.procedure)
    }
}
