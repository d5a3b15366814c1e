mod configuration;
mod empty_result;
mod execution;
mod missing_parameters;
mod type_conversion;

use configuration::ConfigurationError;
use empty_result::EmptyResultError;
use execution::ExecutionError;
use missing_parameters::MissingParametersError;
use type_conversion::TypeConversionError;

use crate::Value;

/// Returns early with a formatted ad-hoc error.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Creates a formatted ad-hoc error.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error that can occur in Sprocket.
pub struct Error {
    kind: Box<ErrorKind>,
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Configuration(ConfigurationError),
    EmptyResult(EmptyResultError),
    Execution(ExecutionError),
    MissingParameters(MissingParametersError),
    TypeConversion(TypeConversionError),
}

impl Error {
    pub fn from_args(args: core::fmt::Arguments<'_>) -> Self {
        match args.as_str() {
            Some(s) => Self::from(ErrorKind::Anyhow(anyhow::Error::msg(s))),
            None => Self::from(ErrorKind::Anyhow(anyhow::Error::msg(args.to_string()))),
        }
    }

    /// A failure raised by the execution collaborator during execute or read.
    pub fn execution(detail: impl Into<String>) -> Self {
        Self::from(ErrorKind::Execution(ExecutionError::new(detail.into())))
    }

    /// A single-row read yielded no rows.
    pub fn empty_result(procedure: impl Into<String>) -> Self {
        Self::from(ErrorKind::EmptyResult(EmptyResultError::new(
            procedure.into(),
        )))
    }

    /// The strict-binding path found declared parameters with no caller key.
    pub fn missing_parameters(names: Vec<String>) -> Self {
        Self::from(ErrorKind::MissingParameters(MissingParametersError::new(
            names,
        )))
    }

    /// A column or field type mismatch during materialization. Fatal.
    pub fn type_conversion(value: Value, target: &'static str) -> Self {
        Self::from(ErrorKind::TypeConversion(TypeConversionError::new(
            value, target,
        )))
    }

    /// Unusable engine configuration, e.g. an unrecognized connection string.
    pub fn configuration(detail: impl Into<String>) -> Self {
        Self::from(ErrorKind::Configuration(ConfigurationError::new(
            detail.into(),
        )))
    }

    pub fn is_empty_result(&self) -> bool {
        matches!(*self.kind, ErrorKind::EmptyResult(_))
    }

    pub fn is_execution(&self) -> bool {
        matches!(*self.kind, ErrorKind::Execution(_))
    }

    pub fn is_type_conversion(&self) -> bool {
        matches!(*self.kind, ErrorKind::TypeConversion(_))
    }

    pub fn is_configuration(&self) -> bool {
        matches!(*self.kind, ErrorKind::Configuration(_))
    }

    /// Absent parameter names when this is a strict-binding failure.
    pub fn missing_parameter_names(&self) -> Option<&[String]> {
        match &*self.kind {
            ErrorKind::MissingParameters(err) => Some(err.names()),
            _ => None,
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &*self.kind {
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match &*self.kind {
            ErrorKind::Anyhow(err) => core::fmt::Display::fmt(err, f),
            ErrorKind::Configuration(err) => core::fmt::Display::fmt(err, f),
            ErrorKind::EmptyResult(err) => core::fmt::Display::fmt(err, f),
            ErrorKind::Execution(err) => core::fmt::Display::fmt(err, f),
            ErrorKind::MissingParameters(err) => core::fmt::Display::fmt(err, f),
            ErrorKind::TypeConversion(err) => core::fmt::Display::fmt(err, f),
        }
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            f.debug_struct("Error").field("kind", &self.kind).finish()
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            kind: Box::new(kind),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}
