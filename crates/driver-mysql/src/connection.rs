use std::io;

use connprobe_core::{BoxError, Connection, Row, RowCursor, Value};
use mysql::{Conn, Opts, QueryResult, Text, prelude::Queryable};
use tracing::debug;

const CLOSED_CONNECTION_MESSAGE: &str = "mysql connection is already closed";

/// Holds validated options and connects on the first query.
pub(crate) struct MysqlConnection {
    opts: Opts,
    descriptor: String,
    conn: Option<Conn>,
    closed: bool,
}

impl MysqlConnection {
    pub(crate) fn new(opts: Opts, descriptor: String) -> Self {
        Self {
            opts,
            descriptor,
            conn: None,
            closed: false,
        }
    }

    fn session(&mut self) -> Result<&mut Conn, BoxError> {
        if self.closed {
            return Err(Box::new(io::Error::other(CLOSED_CONNECTION_MESSAGE)));
        }
        if self.conn.is_none() {
            debug!(descriptor = %self.descriptor, "establishing mysql session");
            self.conn = Some(Conn::new(self.opts.clone())?);
        }

        self.conn
            .as_mut()
            .ok_or_else(|| Box::new(io::Error::other(CLOSED_CONNECTION_MESSAGE)) as BoxError)
    }
}

impl Connection for MysqlConnection {
    fn query(&mut self, sql: &str) -> Result<Box<dyn RowCursor + '_>, BoxError> {
        let result = self.session()?.query_iter(sql)?;
        Ok(Box::new(MysqlRows {
            result: Some(result),
        }))
    }

    fn close(&mut self) -> Result<(), BoxError> {
        self.closed = true;
        if let Some(conn) = self.conn.take() {
            debug!(descriptor = %self.descriptor, "closing mysql session");
            drop(conn);
        }
        Ok(())
    }
}

struct MysqlRows<'c> {
    result: Option<QueryResult<'c, 'c, 'c, Text>>,
}

impl RowCursor for MysqlRows<'_> {
    fn next_row(&mut self) -> Option<Result<Row, BoxError>> {
        let next = self.result.as_mut()?.next()?;
        Some(
            next.map(|row| convert_row(&row))
                .map_err(BoxError::from),
        )
    }

    fn close(&mut self) -> Result<(), BoxError> {
        // Dropping the result drains any unread rows from the wire.
        drop(self.result.take());
        Ok(())
    }
}

fn convert_row(row: &mysql::Row) -> Row {
    convert_columns((0..row.len()).map(|index| row.as_ref(index)))
}

/// A column already moved out of the row reads as `NULL` so the row keeps its width.
fn convert_columns<'a>(columns: impl Iterator<Item = Option<&'a mysql::Value>>) -> Row {
    columns
        .map(|column| column.map_or(Value::Null, convert_value))
        .collect()
}

pub(crate) fn convert_value(value: &mysql::Value) -> Value {
    match value {
        mysql::Value::NULL => Value::Null,
        mysql::Value::Bytes(bytes) => Value::Bytes(bytes.clone()),
        mysql::Value::Int(value) => Value::Int(*value),
        mysql::Value::UInt(value) => Value::UInt(*value),
        mysql::Value::Float(value) => Value::Float(f64::from(*value)),
        mysql::Value::Double(value) => Value::Float(*value),
        temporal => Value::Text(temporal.as_sql(false).trim_matches('\'').to_string()),
    }
}
