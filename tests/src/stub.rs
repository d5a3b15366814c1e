use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use sprocket::driver::{
    Backend, BoundParameter, Cursor, Driver, ErrorSink, MetadataSource, ParameterDescriptor,
    ResultSet,
};
use sprocket::{Connection, Result, Value};
use sprocket_core::async_trait;

/// A scripted driver: maps procedure names to canned result sets and
/// records every call for assertions. Connections count their opens and
/// closes so tests can assert release on every exit path.
#[derive(Debug, Default)]
pub struct StubDriver {
    scripts: HashMap<String, Script>,
    catalog: HashMap<String, Vec<ParameterDescriptor>>,
    calls: Arc<Mutex<Vec<CallRecord>>>,
    opened: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
}

#[derive(Debug, Clone)]
enum Script {
    Sets(Vec<ResultSet>),
    Fail(String),
}

/// One recorded procedure call.
#[derive(Debug, Clone)]
pub struct CallRecord {
    pub procedure: String,
    pub parameters: Vec<BoundParameter>,
}

impl StubDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts `procedure` to produce the given result sets.
    pub fn returns(mut self, procedure: &str, sets: Vec<ResultSet>) -> Self {
        self.scripts.insert(procedure.into(), Script::Sets(sets));
        self
    }

    /// Scripts `procedure` to fail with a backend error.
    pub fn fails(mut self, procedure: &str, detail: &str) -> Self {
        self.scripts
            .insert(procedure.into(), Script::Fail(detail.into()));
        self
    }

    /// Scripts the backend catalog rows for `procedure`, served through
    /// `Connection::query` for the default metadata source.
    pub fn catalog(mut self, procedure: &str, parameters: Vec<(&str, bool)>) -> Self {
        self.catalog.insert(
            procedure.into(),
            parameters
                .into_iter()
                .map(|(name, nullable)| ParameterDescriptor::new(name, nullable))
                .collect(),
        );
        self
    }

    /// Handle to the call log; keep it before handing the driver over.
    pub fn calls(&self) -> Arc<Mutex<Vec<CallRecord>>> {
        self.calls.clone()
    }

    pub fn opened(&self) -> Arc<AtomicUsize> {
        self.opened.clone()
    }

    pub fn closed(&self) -> Arc<AtomicUsize> {
        self.closed.clone()
    }
}

#[async_trait]
impl Driver for StubDriver {
    fn backend(&self) -> &'static Backend {
        &Backend::SQL_SERVER
    }

    async fn connect(&self) -> Result<Box<dyn Connection>> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(StubConnection {
            scripts: self.scripts.clone(),
            catalog: self.catalog.clone(),
            calls: self.calls.clone(),
            closed: self.closed.clone(),
        }))
    }
}

#[derive(Debug)]
pub struct StubConnection {
    scripts: HashMap<String, Script>,
    catalog: HashMap<String, Vec<ParameterDescriptor>>,
    calls: Arc<Mutex<Vec<CallRecord>>>,
    closed: Arc<AtomicUsize>,
}

#[async_trait]
impl Connection for StubConnection {
    async fn call(&mut self, procedure: &str, parameters: &[BoundParameter]) -> Result<Cursor> {
        self.calls
            .lock()
            .expect("failed to acquire call log lock")
            .push(CallRecord {
                procedure: procedure.to_owned(),
                parameters: parameters.to_vec(),
            });

        match self.scripts.get(procedure) {
            Some(Script::Sets(sets)) => Ok(Cursor::new(sets.clone())),
            Some(Script::Fail(detail)) => Err(sprocket::Error::execution(detail.clone())),
            None => Ok(Cursor::empty()),
        }
    }

    async fn query(&mut self, _sql: &str, parameters: &[BoundParameter]) -> Result<Cursor> {
        // catalog lookups arrive with the procedure name as the only parameter
        let procedure = parameters
            .first()
            .and_then(|parameter| parameter.value.as_str())
            .unwrap_or_default()
            .to_owned();

        let mut set = ResultSet::new(vec!["name".into(), "is_nullable".into()]);
        for descriptor in self.catalog.get(&procedure).cloned().unwrap_or_default() {
            set.push_row(vec![
                Value::String(descriptor.name),
                Value::Bool(descriptor.nullable),
            ]);
        }
        Ok(Cursor::single(set))
    }

    async fn close(&mut self) -> Result<()> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// A metadata source that serves canned descriptor lists and counts
/// fetches, for cache idempotency assertions.
#[derive(Debug, Default)]
pub struct StubMetadata {
    parameters: HashMap<String, Vec<ParameterDescriptor>>,
    fetches: Arc<AtomicUsize>,
}

impl StubMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn procedure(mut self, name: &str, parameters: Vec<(&str, bool)>) -> Self {
        self.parameters.insert(
            name.into(),
            parameters
                .into_iter()
                .map(|(name, nullable)| ParameterDescriptor::new(name, nullable))
                .collect(),
        );
        self
    }

    pub fn fetches(&self) -> Arc<AtomicUsize> {
        self.fetches.clone()
    }
}

#[async_trait]
impl MetadataSource for StubMetadata {
    async fn parameters(&self, procedure: &str) -> Result<Vec<ParameterDescriptor>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.parameters.get(procedure).cloned().unwrap_or_default())
    }
}

/// An error sink that stores what it receives.
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: Arc<Mutex<Vec<(String, String)>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Arc<Mutex<Vec<(String, String)>>> {
        self.records.clone()
    }
}

impl ErrorSink for RecordingSink {
    fn record(&self, operation: &str, detail: &str) {
        self.records
            .lock()
            .expect("failed to acquire sink lock")
            .push((operation.to_owned(), detail.to_owned()));
    }
}
