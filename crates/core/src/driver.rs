use crate::{BoxError, ConnectionConfig, Credentials, ScanError};

/// A single column value as decoded by a driver.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bytes(Vec<u8>),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
}

pub type Row = Vec<Value>;

pub trait Driver {
    fn name(&self) -> &'static str;

    /// Builds the connection descriptor and returns a handle for it.
    ///
    /// Drivers may defer the network round-trip until the first query.
    fn open(
        &self,
        config: &ConnectionConfig,
        credentials: &Credentials,
    ) -> Result<Box<dyn Connection>, BoxError>;
}

pub trait Connection {
    fn query(&mut self, sql: &str) -> Result<Box<dyn RowCursor + '_>, BoxError>;
    fn close(&mut self) -> Result<(), BoxError>;
}

pub trait RowCursor {
    fn next_row(&mut self) -> Option<Result<Row, BoxError>>;
    fn close(&mut self) -> Result<(), BoxError>;
}

/// Reads the only column of `row` as a string.
pub fn scan_string(row: &[Value]) -> Result<String, ScanError> {
    let [value] = row else {
        return Err(ScanError::ColumnCount { actual: row.len() });
    };

    match value {
        Value::Null => Err(ScanError::Null),
        Value::Bytes(bytes) => String::from_utf8(bytes.clone()).map_err(|_| ScanError::InvalidUtf8),
        Value::Int(value) => Ok(value.to_string()),
        Value::UInt(value) => Ok(value.to_string()),
        Value::Float(value) => Ok(value.to_string()),
        Value::Text(value) => Ok(value.clone()),
    }
}
