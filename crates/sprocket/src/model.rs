use crate::{Error, Result, Value};

use std::fmt;

/// A bindable model: a `Default`-constructible struct carrying a static
/// field-descriptor table, usually generated by `#[derive(Model)]`.
///
/// The table is built once at compile time and never re-derived; the
/// engine memoizes a name-indexed view of it per process (see
/// [`crate::TypeSchemas`]).
pub trait Model: Default + Send + Sync + 'static {
    /// One descriptor per accessible field, in declaration order.
    const FIELDS: &'static [FieldDescriptor<Self>];
}

/// Describes one model field: the name it binds under, its shape, and the
/// accessor pair the binder and materializer go through.
pub struct FieldDescriptor<M> {
    pub name: &'static str,
    pub ty: FieldTy,
    pub get: fn(&M) -> Value,
    pub set: fn(&mut M, Value) -> Result<()>,
}

impl<M> fmt::Debug for FieldDescriptor<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTy {
    /// Bound directly: primitives, strings, enumerations, scalar newtypes.
    Primitive,

    /// Neither primitive, enumeration, nor string. Never bound as a whole;
    /// flattened recursively during binding.
    Composite,
}

/// The named record a composite field contributes to flattening.
pub fn record_of<M: Model>(model: &M) -> Value {
    Value::Record(
        M::FIELDS
            .iter()
            .map(|field| (field.name.to_owned(), (field.get)(model)))
            .collect(),
    )
}

/// Conversion between a field's Rust type and backend values.
///
/// `from_value(Value::Null)` yields the field's absent representation:
/// `None` for options, the zero value for plain scalars. Anything else
/// that does not line up is a fatal conversion error; materialization
/// assumes compatible types and does not validate them defensively.
pub trait FieldValue: Sized {
    fn to_value(&self) -> Value;
    fn from_value(value: Value) -> Result<Self>;
}

impl FieldValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Bool(value) => Ok(value),
            Value::Null => Ok(false),
            other => Err(Error::type_conversion(other, "bool")),
        }
    }
}

impl FieldValue for i16 {
    fn to_value(&self) -> Value {
        Value::I32(*self as i32)
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::I32(value) => {
                i16::try_from(value).map_err(|_| Error::type_conversion(Value::I32(value), "i16"))
            }
            Value::Null => Ok(0),
            other => Err(Error::type_conversion(other, "i16")),
        }
    }
}

impl FieldValue for i32 {
    fn to_value(&self) -> Value {
        Value::I32(*self)
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::I32(value) => Ok(value),
            Value::Null => Ok(0),
            other => Err(Error::type_conversion(other, "i32")),
        }
    }
}

impl FieldValue for i64 {
    fn to_value(&self) -> Value {
        Value::I64(*self)
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::I64(value) => Ok(value),
            Value::I32(value) => Ok(value as i64),
            Value::Null => Ok(0),
            other => Err(Error::type_conversion(other, "i64")),
        }
    }
}

impl FieldValue for u32 {
    fn to_value(&self) -> Value {
        Value::I64(*self as i64)
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::I64(value) => {
                u32::try_from(value).map_err(|_| Error::type_conversion(Value::I64(value), "u32"))
            }
            Value::I32(value) => {
                u32::try_from(value).map_err(|_| Error::type_conversion(Value::I32(value), "u32"))
            }
            Value::Null => Ok(0),
            other => Err(Error::type_conversion(other, "u32")),
        }
    }
}

impl FieldValue for f32 {
    fn to_value(&self) -> Value {
        Value::F64(*self as f64)
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::F64(value) => Ok(value as f32),
            Value::Null => Ok(0.0),
            other => Err(Error::type_conversion(other, "f32")),
        }
    }
}

impl FieldValue for f64 {
    fn to_value(&self) -> Value {
        Value::F64(*self)
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::F64(value) => Ok(value),
            Value::Null => Ok(0.0),
            other => Err(Error::type_conversion(other, "f64")),
        }
    }
}

impl FieldValue for String {
    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::String(value) => Ok(value),
            Value::Null => Ok(String::new()),
            other => Err(Error::type_conversion(other, "String")),
        }
    }
}

impl FieldValue for Vec<u8> {
    fn to_value(&self) -> Value {
        Value::Bytes(self.clone())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Bytes(value) => Ok(value),
            Value::Null => Ok(Vec::new()),
            other => Err(Error::type_conversion(other, "Vec<u8>")),
        }
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(value) => value.to_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            value => Ok(Some(T::from_value(value)?)),
        }
    }
}

#[cfg(feature = "chrono")]
impl FieldValue for chrono::DateTime<chrono::Utc> {
    fn to_value(&self) -> Value {
        Value::DateTime(*self)
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::DateTime(value) => Ok(value),
            Value::Null => Ok(Self::UNIX_EPOCH),
            other => Err(Error::type_conversion(other, "DateTime<Utc>")),
        }
    }
}
