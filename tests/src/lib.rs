pub mod models;
pub mod stub;

pub use models::{ContactCard, Customer, GridFilter, Registration, Status};
pub use stub::{CallRecord, RecordingSink, StubDriver, StubMetadata};

use sprocket::Db;

/// Builds an engine over the scripted driver and metadata source.
pub fn db(driver: StubDriver, metadata: StubMetadata) -> Db {
    Db::builder()
        .driver(driver)
        .metadata_source(metadata)
        .build()
        .expect("engine builds")
}

/// Routes engine logging to the test output when RUST_LOG is set.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
