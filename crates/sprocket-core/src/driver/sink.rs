/// Receives the full detail of execution failures. Append-only, one
/// destination per operation kind, never consulted for control flow.
pub trait ErrorSink: Send + Sync + 'static {
    /// `operation` names the operation kind and selects the destination;
    /// `detail` carries the full failure text.
    fn record(&self, operation: &str, detail: &str);
}

/// The default sink: routes failure detail through the `log` facade with a
/// per-operation target.
#[derive(Debug, Default)]
pub struct LogSink;

impl ErrorSink for LogSink {
    fn record(&self, operation: &str, detail: &str) {
        log::error!(target: "sprocket", "{operation}: {detail}");
    }
}
