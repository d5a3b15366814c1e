use std::sync::atomic::Ordering;

use pretty_assertions::assert_eq;
use sprocket::driver::ResultSet;
use sprocket::{Db, Value};
use tests::{db, Customer, StubDriver, StubMetadata};

fn ok_row() -> ResultSet {
    ResultSet::new(vec!["IdValue".into()]).row(vec![Value::I64(1)])
}

#[tokio::test]
async fn parameter_metadata_is_fetched_once_per_procedure() {
    let driver = StubDriver::new().returns("usp_CustomerInsert", vec![ok_row()]);
    let metadata = StubMetadata::new().procedure("usp_CustomerInsert", vec![("@Name", false)]);
    let fetches = metadata.fetches();
    let db = db(driver, metadata);

    let model = Customer {
        name: "Bob".into(),
        ..Default::default()
    };
    db.exec("usp_CustomerInsert", &model).await.unwrap();
    db.exec("usp_CustomerInsert", &model).await.unwrap();
    db.exec("usp_CustomerInsert", &model).await.unwrap();

    assert_eq!(fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_resolutions_converge_on_one_cached_value() {
    let driver = StubDriver::new().returns("usp_CustomerInsert", vec![ok_row()]);
    let calls = driver.calls();
    let metadata = StubMetadata::new().procedure("usp_CustomerInsert", vec![("@Name", false)]);
    let fetches = metadata.fetches();
    let db = db(driver, metadata);

    let mut handles = Vec::new();
    for _ in 0..8 {
        let db = db.clone();
        handles.push(tokio::spawn(async move {
            let model = Customer {
                name: "Bob".into(),
                ..Default::default()
            };
            db.exec("usp_CustomerInsert", &model).await.unwrap()
        }));
    }
    for handle in handles {
        let response = handle.await.unwrap();
        assert!(!response.has_error);
    }

    // racing misses may each fetch, but the stored value never diverges:
    // once the cache is warm no further fetch happens
    let after_race = fetches.load(Ordering::SeqCst);
    assert!((1..=8).contains(&after_race));

    let model = Customer {
        name: "Bob".into(),
        ..Default::default()
    };
    db.exec("usp_CustomerInsert", &model).await.unwrap();
    assert_eq!(fetches.load(Ordering::SeqCst), after_race);

    // every call bound the same declared parameter set
    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 9);
    for call in calls.iter() {
        let names: Vec<_> = call
            .parameters
            .iter()
            .map(|parameter| parameter.name.as_str())
            .collect();
        assert_eq!(names, vec!["@Name"]);
    }
}

#[tokio::test]
async fn default_metadata_source_reads_the_backend_catalog() {
    let driver = StubDriver::new()
        .returns("usp_CustomerInsert", vec![ok_row()])
        .catalog(
            "usp_CustomerInsert",
            vec![("@Name", false), ("@Age", false)],
        );
    let calls = driver.calls();
    let opened = driver.opened();
    let closed = driver.closed();

    // no explicit metadata source: the engine derives one from the driver
    let db = Db::builder().driver(driver).build().unwrap();

    let model = Customer {
        name: "Bob".into(),
        age: 30,
        ..Default::default()
    };
    let response = db.exec("usp_CustomerInsert", &model).await.unwrap();
    assert!(!response.has_error);

    let calls = calls.lock().unwrap();
    let names: Vec<_> = calls[0]
        .parameters
        .iter()
        .map(|parameter| parameter.name.as_str())
        .collect();
    assert_eq!(names, vec!["@Name", "@Age"]);

    // one connection for the catalog lookup, one for the call; both closed
    assert_eq!(opened.load(Ordering::SeqCst), 2);
    assert_eq!(closed.load(Ordering::SeqCst), 2);
}
