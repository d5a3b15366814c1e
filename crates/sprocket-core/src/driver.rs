mod backend;
pub use backend::{Backend, BackendKind};

mod cursor;
pub use cursor::{Cursor, ResultSet, Row};

mod metadata;
pub use metadata::{CatalogSource, MetadataSource, ParameterDescriptor};

mod param;
pub use param::BoundParameter;

mod sink;
pub use sink::{ErrorSink, LogSink};

use crate::{async_trait, Result};

use std::fmt::Debug;

/// Provides connections to a concrete backend.
///
/// The physical open/execute/close semantics live behind this trait; the
/// engine never touches a backend SDK directly.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// The backend strategy for this driver: parameter prefix and catalog
    /// query text. Selected once per call.
    fn backend(&self) -> &'static Backend;

    /// Open a new connection. Each invocation uses exactly one connection
    /// and releases it before returning; pooling, if any, happens here.
    async fn connect(&self) -> Result<Box<dyn Connection>>;
}

#[async_trait]
pub trait Connection: Send {
    /// Execute a stored procedure by name with bound parameters.
    async fn call(&mut self, procedure: &str, parameters: &[BoundParameter]) -> Result<Cursor>;

    /// Execute backend catalog text. Used only for parameter discovery.
    async fn query(&mut self, sql: &str, parameters: &[BoundParameter]) -> Result<Cursor>;

    /// Release the underlying resources. Reached on every exit path.
    async fn close(&mut self) -> Result<()>;
}
