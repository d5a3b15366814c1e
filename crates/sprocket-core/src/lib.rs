pub mod cache;
pub use cache::{Cache, CacheValue, MemoryCache};

pub mod driver;
pub use driver::Connection;

mod error;
pub use error::Error;

mod value;
pub use value::Value;

#[cfg(feature = "chrono")]
mod value_chrono;

/// A Result type alias that uses Sprocket's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
