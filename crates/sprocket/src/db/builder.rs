use super::Db;
use crate::{catalog::ParameterCatalog, schema::TypeSchemas};

use sprocket_core::driver::{CatalogSource, Driver, ErrorSink, LogSink, MetadataSource};
use sprocket_core::{Cache, Error, MemoryCache, Result};

use std::sync::Arc;

/// Assembles a [`Db`]. The driver is required; every other collaborator
/// has a process-wide default.
#[derive(Default)]
pub struct Builder {
    driver: Option<Arc<dyn Driver>>,
    metadata: Option<Arc<dyn MetadataSource>>,
    cache: Option<Arc<dyn Cache>>,
    sink: Option<Arc<dyn ErrorSink>>,
}

impl Builder {
    pub fn driver(mut self, driver: impl Driver) -> Self {
        self.driver = Some(Arc::new(driver));
        self
    }

    /// Replaces the default catalog-backed metadata source.
    pub fn metadata_source(mut self, metadata: impl MetadataSource) -> Self {
        self.metadata = Some(Arc::new(metadata));
        self
    }

    /// Replaces the default process-wide in-memory cache.
    pub fn cache(mut self, cache: impl Cache) -> Self {
        self.cache = Some(Arc::new(cache));
        self
    }

    /// Replaces the default log-facade error sink.
    pub fn error_sink(mut self, sink: impl ErrorSink) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    pub fn build(self) -> Result<Db> {
        let driver = self
            .driver
            .ok_or_else(|| Error::configuration("a driver is required"))?;
        let cache = self
            .cache
            .unwrap_or_else(|| Arc::new(MemoryCache::new()));
        let metadata = self
            .metadata
            .unwrap_or_else(|| Arc::new(CatalogSource::new(driver.clone())));
        let sink = self.sink.unwrap_or_else(|| Arc::new(LogSink));

        Ok(Db {
            driver,
            catalog: ParameterCatalog::new(cache.clone(), metadata),
            schemas: TypeSchemas::new(cache),
            sink,
        })
    }
}
