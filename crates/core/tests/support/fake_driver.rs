use std::{cell::RefCell, collections::VecDeque, error::Error as StdError, fmt, rc::Rc};

use connprobe_core::{
    BoxError, Connection, ConnectionConfig, CredentialProvider, Credentials, Driver, Row,
    RowCursor, Value,
};

pub const OPEN_EVENT: &str = "open";
pub const QUERY_EVENT: &str = "query";
pub const CURSOR_CLOSE_EVENT: &str = "cursor.close";
pub const CONNECTION_CLOSE_EVENT: &str = "connection.close";

#[derive(Debug, Default)]
struct FakeDriverState {
    rows: Vec<FakeRow>,
    fail_on_open: Option<String>,
    fail_on_query: Option<String>,
    fail_on_close: Option<String>,
    events: Vec<String>,
    queries: Vec<String>,
    last_credentials: Option<Credentials>,
}

#[derive(Debug, Clone)]
enum FakeRow {
    Row(Row),
    Error(String),
}

/// Records every open, query and close so tests can assert on resource release.
#[derive(Debug, Default, Clone)]
pub struct FakeDriver {
    state: Rc<RefCell<FakeDriverState>>,
}

#[allow(dead_code)]
impl FakeDriver {
    pub fn with_version_rows(versions: &[&str]) -> Self {
        let driver = Self::default();
        for version in versions {
            driver.push_row(vec![Value::Bytes(version.as_bytes().to_vec())]);
        }
        driver
    }

    pub fn push_row(&self, row: Row) {
        self.state.borrow_mut().rows.push(FakeRow::Row(row));
    }

    pub fn push_row_error(&self, message: impl Into<String>) {
        self.state
            .borrow_mut()
            .rows
            .push(FakeRow::Error(message.into()));
    }

    pub fn set_fail_on_open(&self, message: impl Into<String>) {
        self.state.borrow_mut().fail_on_open = Some(message.into());
    }

    pub fn set_fail_on_query(&self, message: impl Into<String>) {
        self.state.borrow_mut().fail_on_query = Some(message.into());
    }

    pub fn set_fail_on_close(&self, message: impl Into<String>) {
        self.state.borrow_mut().fail_on_close = Some(message.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.state.borrow().events.clone()
    }

    pub fn queries(&self) -> Vec<String> {
        self.state.borrow().queries.clone()
    }

    pub fn last_credentials(&self) -> Option<Credentials> {
        self.state.borrow().last_credentials.clone()
    }

    pub fn count(&self, event: &str) -> usize {
        self.state
            .borrow()
            .events
            .iter()
            .filter(|recorded| recorded.as_str() == event)
            .count()
    }
}

impl Driver for FakeDriver {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn open(
        &self,
        _config: &ConnectionConfig,
        credentials: &Credentials,
    ) -> Result<Box<dyn Connection>, BoxError> {
        let mut state = self.state.borrow_mut();
        if let Some(message) = &state.fail_on_open {
            return Err(boxed_error(message.clone()));
        }

        state.events.push(OPEN_EVENT.to_string());
        state.last_credentials = Some(credentials.clone());
        Ok(Box::new(FakeConnection {
            state: Rc::clone(&self.state),
        }))
    }
}

struct FakeConnection {
    state: Rc<RefCell<FakeDriverState>>,
}

impl Connection for FakeConnection {
    fn query(&mut self, sql: &str) -> Result<Box<dyn RowCursor + '_>, BoxError> {
        let mut state = self.state.borrow_mut();
        state.events.push(QUERY_EVENT.to_string());
        state.queries.push(sql.to_string());
        if let Some(message) = &state.fail_on_query {
            return Err(boxed_error(message.clone()));
        }

        Ok(Box::new(FakeCursor {
            state: Rc::clone(&self.state),
            rows: state.rows.iter().cloned().collect(),
        }))
    }

    fn close(&mut self) -> Result<(), BoxError> {
        let mut state = self.state.borrow_mut();
        state.events.push(CONNECTION_CLOSE_EVENT.to_string());
        match &state.fail_on_close {
            Some(message) => Err(boxed_error(message.clone())),
            None => Ok(()),
        }
    }
}

struct FakeCursor {
    state: Rc<RefCell<FakeDriverState>>,
    rows: VecDeque<FakeRow>,
}

impl RowCursor for FakeCursor {
    fn next_row(&mut self) -> Option<Result<Row, BoxError>> {
        match self.rows.pop_front()? {
            FakeRow::Row(row) => Some(Ok(row)),
            FakeRow::Error(message) => Some(Err(boxed_error(message))),
        }
    }

    fn close(&mut self) -> Result<(), BoxError> {
        self.state
            .borrow_mut()
            .events
            .push(CURSOR_CLOSE_EVENT.to_string());
        Ok(())
    }
}

/// Credential provider that always fails, standing in for an unreachable secret store.
#[derive(Debug)]
pub struct FailingCredentials(pub &'static str);

impl CredentialProvider for FailingCredentials {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn resolve(&self, _config: &ConnectionConfig) -> Result<Credentials, BoxError> {
        Err(boxed_error(self.0))
    }
}

#[allow(dead_code)]
pub fn sample_config() -> ConnectionConfig {
    ConnectionConfig::new("u", "p", "localhost", 3306, "test")
        .unwrap_or_else(|error| panic!("sample config must be valid: {error}"))
}

#[derive(Debug)]
struct FakeSourceError(String);

impl fmt::Display for FakeSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl StdError for FakeSourceError {}

fn boxed_error(message: impl Into<String>) -> BoxError {
    Box::new(FakeSourceError(message.into()))
}
