use crate::{FieldDescriptor, Model};

use sprocket_core::Cache;

use std::{collections::HashMap, sync::Arc};

/// The field table of one model type plus its name indexes. Built once per
/// type, immutable afterwards, shared through the cache for the process
/// lifetime.
pub struct ModelSchema<M: 'static> {
    fields: &'static [FieldDescriptor<M>],
    by_name: HashMap<&'static str, usize>,
    by_lower: HashMap<String, usize>,
}

impl<M: Model> ModelSchema<M> {
    fn build() -> Self {
        let fields = M::FIELDS;
        let mut by_name = HashMap::with_capacity(fields.len());
        let mut by_lower = HashMap::with_capacity(fields.len());
        for (index, field) in fields.iter().enumerate() {
            by_name.insert(field.name, index);
            by_lower.insert(field.name.to_lowercase(), index);
        }
        Self {
            fields,
            by_name,
            by_lower,
        }
    }

    pub fn fields(&self) -> &'static [FieldDescriptor<M>] {
        self.fields
    }

    /// Exact-name lookup, used for column-to-field materialization.
    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor<M>> {
        self.by_name.get(name).map(|&index| &self.fields[index])
    }

    /// Case-insensitive lookup, used for name-based parameter building.
    pub fn field_ci(&self, name: &str) -> Option<&'static FieldDescriptor<M>> {
        self.by_lower
            .get(&name.to_lowercase())
            .map(|&index| &self.fields[index])
    }
}

/// Per-model-type schemas, memoized through the injected cache under the
/// fully-qualified type name.
#[derive(Clone)]
pub struct TypeSchemas {
    cache: Arc<dyn Cache>,
}

impl TypeSchemas {
    pub fn new(cache: Arc<dyn Cache>) -> Self {
        Self { cache }
    }

    /// Check-then-populate without an atomic read-through: two concurrent
    /// misses may both build the table, but the builds are structurally
    /// identical, so the duplicate population is wasted work rather than
    /// corruption.
    pub fn of<M: Model>(&self) -> Arc<ModelSchema<M>> {
        let key = std::any::type_name::<M>();
        if let Some(entry) = self.cache.get(key) {
            if let Ok(schema) = entry.downcast::<ModelSchema<M>>() {
                return schema;
            }
        }

        let schema = Arc::new(ModelSchema::<M>::build());
        self.cache.set(key, schema.clone());
        schema
    }
}
