use super::{Backend, BoundParameter, Connection, Driver};
use crate::{async_trait, Result, Value};

use std::sync::Arc;

/// Metadata for one declared stored-procedure parameter, as listed by the
/// backend catalog. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    /// Parameter name, backend prefix included.
    pub name: String,

    /// True when null is permitted for this parameter.
    pub nullable: bool,
}

impl ParameterDescriptor {
    pub fn new(name: impl Into<String>, nullable: bool) -> Self {
        Self {
            name: name.into(),
            nullable,
        }
    }
}

/// Lists a procedure's declared parameters from the backend's catalog views.
#[async_trait]
pub trait MetadataSource: Send + Sync + 'static {
    async fn parameters(&self, procedure: &str) -> Result<Vec<ParameterDescriptor>>;
}

/// The default metadata source: runs the backend strategy's catalog query
/// over a fresh driver connection.
#[derive(Debug)]
pub struct CatalogSource {
    driver: Arc<dyn Driver>,
}

impl CatalogSource {
    pub fn new(driver: Arc<dyn Driver>) -> Self {
        Self { driver }
    }

    async fn read(
        connection: &mut dyn Connection,
        backend: &Backend,
        procedure: &str,
    ) -> Result<Vec<ParameterDescriptor>> {
        let name_parameter = [BoundParameter::new(
            format!("{}procedure", backend.parameter_prefix),
            Value::String(procedure.to_owned()),
        )];

        let mut cursor = connection
            .query(backend.parameter_catalog_query, &name_parameter)
            .await?;

        let mut descriptors = Vec::new();
        while let Some(mut row) = cursor.next_row() {
            if row.len() < 2 {
                crate::bail!(
                    "catalog row for {procedure} has {} columns, expected 2",
                    row.len()
                );
            }
            let nullable = match &row[1] {
                Value::Bool(value) => *value,
                Value::I32(value) => *value != 0,
                Value::I64(value) => *value != 0,
                _ => true,
            };
            let name = std::mem::take(&mut row[0]).to_string()?;

            // Descriptor names always carry the backend prefix, whether or
            // not the catalog stores it.
            let name = if name.starts_with(backend.parameter_prefix) {
                name
            } else {
                format!("{}{}", backend.parameter_prefix, name)
            };

            descriptors.push(ParameterDescriptor::new(name, nullable));
        }

        Ok(descriptors)
    }
}

#[async_trait]
impl MetadataSource for CatalogSource {
    async fn parameters(&self, procedure: &str) -> Result<Vec<ParameterDescriptor>> {
        let backend = self.driver.backend();
        let mut connection = self.driver.connect().await?;

        let result = Self::read(&mut *connection, backend, procedure).await;
        let closed = connection.close().await;

        let descriptors = result?;
        closed?;
        Ok(descriptors)
    }
}
