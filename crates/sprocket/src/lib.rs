mod binder;

pub mod catalog;
pub use catalog::{ParameterCatalog, ProcedureParameters};

pub mod db;
pub use db::Db;

mod grid;
pub use grid::Grid;

mod materialize;

mod model;
pub use model::{record_of, FieldDescriptor, FieldTy, FieldValue, Model};

mod params;
pub use params::Params;

pub mod response;
pub use response::ResponseInformation;

pub mod schema;
pub use schema::{ModelSchema, TypeSchemas};

mod table;
pub use table::Table;

pub use sprocket_macros::Model;

pub use sprocket_core::{
    driver, Cache, CacheValue, Connection, Error, MemoryCache, Result, Value,
};

#[doc(hidden)]
pub mod macro_support {
    pub use crate::model::{FieldDescriptor, FieldTy, FieldValue, Model};
    pub use sprocket_core::{Error, Result, Value};

    pub fn field_value<T: FieldValue>(value: &T) -> Value {
        value.to_value()
    }

    pub fn from_value<T: FieldValue>(value: Value) -> Result<T> {
        T::from_value(value)
    }

    pub fn composite_value<M: Model>(model: &M) -> Value {
        crate::model::record_of(model)
    }

    pub fn composite_mismatch(value: Value, target: &'static str) -> Error {
        Error::type_conversion(value, target)
    }
}
