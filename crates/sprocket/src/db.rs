mod builder;
pub use builder::Builder;

mod exec;
mod grid;
mod query;

use crate::{
    binder,
    catalog::ParameterCatalog,
    schema::{ModelSchema, TypeSchemas},
    Model, Params, ResponseInformation,
};

use sprocket_core::driver::{BoundParameter, Driver, ErrorSink};
use sprocket_core::{Connection, Error, Result, Value};

use std::sync::Arc;

/// Handle to the invocation engine. Cheap to clone; all state is shared.
///
/// Every operation runs the same sequence: resolve and bind parameters,
/// open one connection, execute, read, close. The connection is released
/// on every exit path, success or failure.
#[derive(Clone)]
pub struct Db {
    driver: Arc<dyn Driver>,
    catalog: ParameterCatalog,
    schemas: TypeSchemas,
    sink: Arc<dyn ErrorSink>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Builds an ad-hoc parameter list from a subset of a model's fields.
    /// A name that resolves to no field, or to an absent value, appends
    /// the explicit null marker.
    pub fn params_from<M: Model>(&self, model: &M, names: &[&str]) -> Params {
        let schema = self.schemas.of::<M>();
        let mut params = Params::new();
        for name in names {
            match schema.field_ci(name) {
                Some(field) => {
                    // a composite is not addressable as a single parameter
                    let value = match (field.get)(model) {
                        Value::Record(_) => Value::Null,
                        value => value,
                    };
                    params.push(field.name, value);
                }
                None => params.push(*name, Value::Null),
            }
        }
        params
    }

    fn prefix(&self) -> &'static str {
        self.driver.backend().parameter_prefix
    }

    fn schema_of<M: Model>(&self) -> Arc<ModelSchema<M>> {
        self.schemas.of::<M>()
    }

    /// Binds a model against the procedure's declared parameters.
    async fn bind<M: Model>(
        &self,
        procedure: &str,
        model: &M,
        exclude: &[&str],
    ) -> Result<Vec<BoundParameter>> {
        let parameters = self.catalog.resolve(procedure).await?;
        let schema = self.schemas.of::<M>();
        Ok(binder::bind_model(
            &schema,
            model,
            &parameters,
            self.prefix(),
            exclude,
        ))
    }

    async fn connect(&self) -> Result<Box<dyn Connection>> {
        self.driver.connect().await
    }

    /// Releases the connection unconditionally. Every operation funnels
    /// its result through here, so the closed state is reached on success
    /// and failure alike.
    async fn finish<T>(mut connection: Box<dyn Connection>, result: Result<T>) -> Result<T> {
        if let Err(err) = connection.close().await {
            log::warn!(target: "sprocket", "connection close failed: {err}");
        }
        result
    }

    /// Converts an operation failure into the caller-facing envelope.
    ///
    /// Empty-result and missing-parameter failures map to their specific
    /// envelopes. Mapping and configuration failures stay fatal and
    /// propagate. Everything else is an execution failure: the full detail
    /// goes to the sink, the caller sees the fixed generic envelope.
    fn recover(
        &self,
        operation: &str,
        procedure: &str,
        err: Error,
    ) -> Result<ResponseInformation> {
        if err.is_empty_result() {
            return Ok(ResponseInformation::empty_result());
        }
        if let Some(names) = err.missing_parameter_names() {
            return Ok(ResponseInformation::missing_parameters(names));
        }
        if err.is_type_conversion() || err.is_configuration() {
            return Err(err);
        }
        self.sink.record(operation, &format!("{procedure}: {err}"));
        Ok(ResponseInformation::execution_failure())
    }
}
