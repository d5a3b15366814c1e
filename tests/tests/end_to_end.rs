use std::sync::atomic::Ordering;

use pretty_assertions::assert_eq;
use sprocket::driver::ResultSet;
use sprocket::{Grid, Params, Value};
use tests::{db, Customer, GridFilter, StubDriver, StubMetadata};

fn response_row(id: i64) -> ResultSet {
    ResultSet::new(vec!["IdValue".into(), "HasError".into()])
        .row(vec![Value::I64(id), Value::Bool(false)])
}

#[tokio::test]
async fn insert_binds_declared_parameters_and_reads_envelope() {
    tests::init_logging();

    let driver = StubDriver::new().returns("usp_CustomerInsert", vec![response_row(5)]);
    let calls = driver.calls();
    let db = db(
        driver,
        StubMetadata::new()
            .procedure("usp_CustomerInsert", vec![("@Name", false), ("@Age", false)]),
    );

    let model = Customer {
        id: 0,
        name: "Bob".into(),
        age: 30,
        email: None,
    };
    let response = db.exec("usp_CustomerInsert", &model).await.unwrap();

    assert_eq!(response.id_value, 5);
    assert!(!response.has_error);
    // the model is binding input only; nothing writes back into it
    assert_eq!(model.name, "Bob");
    assert_eq!(model.age, 30);

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].procedure, "usp_CustomerInsert");
    let names: Vec<_> = calls[0]
        .parameters
        .iter()
        .map(|parameter| parameter.name.as_str())
        .collect();
    assert_eq!(names, vec!["@Name", "@Age"]);
    assert_eq!(calls[0].parameters[0].value, Value::from("Bob"));
    assert_eq!(calls[0].parameters[1].value, Value::I32(30));
}

#[tokio::test]
async fn strict_update_fails_before_execution_when_parameters_are_missing() {
    let driver = StubDriver::new();
    let calls = driver.calls();
    let opened = driver.opened();
    let db = db(
        driver,
        StubMetadata::new()
            .procedure("usp_CustomerUpdate", vec![("@Name", false), ("@Email", false)]),
    );

    let params = Params::new().set("Name", "Bob");
    let response = db.exec_strict("usp_CustomerUpdate", &params).await.unwrap();

    assert!(response.has_error);
    assert_eq!(response.error_code, "-3");
    assert_eq!(response.error_message, "Missing parameters: @Email");

    // no call reaches the driver, no connection is even opened
    assert!(calls.lock().unwrap().is_empty());
    assert_eq!(opened.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn single_row_read_with_no_rows_reports_empty_result() {
    #[derive(Debug, Default, sprocket::Model)]
    #[field(rename_all = "PascalCase")]
    struct ById {
        id: i64,
    }

    let columns = ResultSet::new(vec![
        "Id".into(),
        "Name".into(),
        "Age".into(),
        "Email".into(),
    ]);
    let driver = StubDriver::new().returns("usp_CustomerGet", vec![columns]);
    let db = db(
        driver,
        StubMetadata::new().procedure("usp_CustomerGet", vec![("@Id", false)]),
    );

    let (response, model): (_, Customer) =
        db.first("usp_CustomerGet", &ById { id: 9 }).await.unwrap();

    assert!(response.has_error);
    assert_eq!(response.error_code, "-2");
    assert_eq!(model, Customer::default());
}

#[tokio::test]
async fn grid_reads_rows_and_total_and_skips_excluded_filter_fields() {
    let rows = ResultSet::new(vec!["Id".into(), "Name".into(), "Age".into()])
        .row(vec![Value::I64(1), Value::from("a"), Value::I32(21)])
        .row(vec![Value::I64(2), Value::from("b"), Value::I32(22)])
        .row(vec![Value::I64(3), Value::from("c"), Value::I32(23)]);
    let total = ResultSet::new(vec!["TotalRows".into()]).row(vec![Value::I32(42)]);

    let driver = StubDriver::new().returns("usp_CustomerGrid", vec![rows, total]);
    let calls = driver.calls();
    let db = db(
        driver,
        StubMetadata::new().procedure(
            "usp_CustomerGrid",
            vec![("@Name", true), ("@Page", false), ("@AuditUser", true)],
        ),
    );

    let filter = GridFilter {
        name: "a".into(),
        page: 1,
        audit_user: "svc".into(),
    };
    let (response, grid): (_, Grid<Vec<Customer>>) = db
        .grid_excluding("usp_CustomerGrid", &filter, &["AuditUser"])
        .await
        .unwrap();

    assert!(!response.has_error);
    assert_eq!(grid.rows.len(), 3);
    assert_eq!(grid.total_rows, 42);
    assert_eq!(grid.rows[0].name, "a");
    assert_eq!(grid.rows[2].age, 23);

    let calls = calls.lock().unwrap();
    let names: Vec<_> = calls[0]
        .parameters
        .iter()
        .map(|parameter| parameter.name.as_str())
        .collect();
    assert_eq!(names, vec!["@Name", "@Page"]);
}

#[tokio::test]
async fn grid_without_second_result_set_totals_zero() {
    let rows = ResultSet::new(vec!["Id".into(), "Name".into(), "Age".into()]).row(vec![
        Value::I64(1),
        Value::from("a"),
        Value::I32(21),
    ]);
    let driver = StubDriver::new().returns("usp_CustomerGrid", vec![rows]);
    let db = db(
        driver,
        StubMetadata::new().procedure("usp_CustomerGrid", vec![("@Name", true), ("@Page", false)]),
    );

    let filter = GridFilter {
        name: "a".into(),
        page: 1,
        audit_user: String::new(),
    };
    let (_, grid): (_, Grid<Vec<Customer>>) =
        db.grid("usp_CustomerGrid", &filter).await.unwrap();

    assert_eq!(grid.rows.len(), 1);
    assert_eq!(grid.total_rows, 0);
}

#[tokio::test]
async fn grid_table_applies_the_column_allow_list() {
    let rows = ResultSet::new(vec!["Id".into(), "Name".into(), "Secret".into()])
        .row(vec![Value::I64(1), Value::from("a"), Value::from("x")])
        .row(vec![Value::I64(2), Value::from("b"), Value::from("y")]);
    let total = ResultSet::new(vec!["TotalRows".into()]).row(vec![Value::I64(7)]);

    let driver = StubDriver::new().returns("usp_CustomerGrid", vec![rows, total]);
    let db = db(
        driver,
        StubMetadata::new().procedure("usp_CustomerGrid", vec![("@Name", true), ("@Page", false)]),
    );

    let filter = GridFilter {
        name: "a".into(),
        page: 1,
        audit_user: String::new(),
    };
    let (_, grid) = db
        .grid_table("usp_CustomerGrid", &filter, Some(&["Id", "Name"]))
        .await
        .unwrap();

    assert_eq!(grid.total_rows, 7);
    assert_eq!(grid.rows.columns(), &["Id", "Name"]);
    assert_eq!(grid.rows.len(), 2);
    assert_eq!(grid.rows.value(1, "Name"), Some(&Value::from("b")));
    assert_eq!(grid.rows.value(0, "Secret"), None);
}
