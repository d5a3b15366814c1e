/// Error for unusable engine configuration, e.g. a connection string that
/// matches no known backend kind.
#[derive(Debug)]
pub(super) struct ConfigurationError {
    pub(super) detail: String,
}

impl ConfigurationError {
    pub(super) fn new(detail: String) -> Self {
        ConfigurationError { detail }
    }
}

impl std::error::Error for ConfigurationError {}

impl core::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid configuration: {}", self.detail)
    }
}
