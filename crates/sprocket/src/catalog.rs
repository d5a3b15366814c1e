use sprocket_core::driver::{MetadataSource, ParameterDescriptor};
use sprocket_core::{Cache, Result};

use std::{collections::HashMap, sync::Arc};

/// A procedure's declared parameters plus a case-insensitive name index.
/// Immutable once fetched.
#[derive(Debug)]
pub struct ProcedureParameters {
    descriptors: Vec<ParameterDescriptor>,
    by_lower: HashMap<String, usize>,
}

impl ProcedureParameters {
    pub fn new(descriptors: Vec<ParameterDescriptor>) -> Self {
        let mut by_lower = HashMap::with_capacity(descriptors.len());
        for (index, descriptor) in descriptors.iter().enumerate() {
            by_lower.insert(descriptor.name.to_lowercase(), index);
        }
        Self {
            descriptors,
            by_lower,
        }
    }

    /// Descriptors in declaration order.
    pub fn descriptors(&self) -> &[ParameterDescriptor] {
        &self.descriptors
    }

    /// Case-insensitive lookup by full parameter name, prefix included.
    pub fn find(&self, name: &str) -> Option<&ParameterDescriptor> {
        self.by_lower
            .get(&name.to_lowercase())
            .map(|&index| &self.descriptors[index])
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

/// Per-procedure parameter lists, fetched through the metadata collaborator
/// and memoized under the procedure name.
///
/// There is no invalidation path: a procedure whose signature changes after
/// first resolution keeps its cached signature for the process lifetime.
#[derive(Clone)]
pub struct ParameterCatalog {
    cache: Arc<dyn Cache>,
    metadata: Arc<dyn MetadataSource>,
}

impl ParameterCatalog {
    pub fn new(cache: Arc<dyn Cache>, metadata: Arc<dyn MetadataSource>) -> Self {
        Self { cache, metadata }
    }

    pub async fn resolve(&self, procedure: &str) -> Result<Arc<ProcedureParameters>> {
        if let Some(entry) = self.cache.get(procedure) {
            if let Ok(parameters) = entry.downcast::<ProcedureParameters>() {
                return Ok(parameters);
            }
        }

        let descriptors = self.metadata.parameters(procedure).await?;
        let parameters = Arc::new(ProcedureParameters::new(descriptors));
        self.cache.set(procedure, parameters.clone());
        Ok(parameters)
    }
}
