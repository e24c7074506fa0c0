use std::io::Write;

use tracing::{debug, info, warn};

use crate::{
    BoxError, ConnectError, Connection, ConnectionConfig, CredentialProvider, Driver, EXIT_SUCCESS,
    Result, Row, RowCursor, StaticCredentials, driver::scan_string, version::parse_server_version,
};

pub const DIAGNOSTIC_QUERY: &str = "SELECT version()";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeReport {
    /// Last version string read, `None` when the query produced no rows.
    pub version: Option<String>,
    pub rows: usize,
}

/// Opens one connection, runs [`DIAGNOSTIC_QUERY`] and reports each row to `out`.
///
/// The probe keeps no state between runs besides the output sink.
pub struct ConnectivityProbe<'a, W> {
    driver: &'a dyn Driver,
    credentials: &'a dyn CredentialProvider,
    out: W,
}

impl<'a, W: Write> ConnectivityProbe<'a, W> {
    pub fn new(driver: &'a dyn Driver, out: W) -> Self {
        Self {
            driver,
            credentials: &StaticCredentials,
            out,
        }
    }

    #[must_use]
    pub fn with_credentials(mut self, provider: &'a dyn CredentialProvider) -> Self {
        self.credentials = provider;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn run(&mut self, config: &ConnectionConfig) -> Result<ProbeReport> {
        let driver = self.driver;
        let provider = self.credentials;

        debug!(provider = provider.name(), "resolving credentials");
        let credentials = provider.resolve(config).map_err(|source| {
            self.fail(ConnectError::SessionFailed {
                provider: provider.name(),
                source,
            })
        })?;

        info!(
            driver = driver.name(),
            host = config.host(),
            port = config.port(),
            database = config.database(),
            "connecting"
        );
        let connection = driver.open(config, &credentials).map_err(|source| {
            self.fail(ConnectError::OpenFailed {
                driver: driver.name(),
                source,
            })
        })?;
        let mut connection = ConnectionGuard::new(connection);

        info!(sql = DIAGNOSTIC_QUERY, "querying");
        let cursor = connection
            .query(DIAGNOSTIC_QUERY)
            .map_err(|source| self.fail(query_failed(source)))?;
        let mut cursor = CursorGuard::new(cursor);

        let mut report = ProbeReport::default();
        while let Some(next) = cursor.next_row() {
            let row = next.map_err(|source| self.fail(query_failed(source)))?;
            let version = self.scan(&row, report.rows)?;

            self.print_line(&format!("Connected to MySQL version: {version}"));
            if let Some(parsed) = parse_server_version(&version) {
                debug!(
                    major = parsed.major,
                    minor = parsed.minor,
                    patch = parsed.patch,
                    "parsed server version"
                );
            }

            report.rows += 1;
            report.version = Some(version);
        }

        cursor.close();
        connection.close();
        info!(rows = report.rows, "probe finished");

        Ok(report)
    }

    fn scan(&mut self, row: &Row, row_index: usize) -> Result<String> {
        scan_string(row).map_err(|source| {
            self.fail(ConnectError::ScanFailed {
                row_index,
                source: Box::new(source),
            })
        })
    }

    fn fail(&mut self, error: ConnectError) -> ConnectError {
        self.print_line(&format!("Error {error}"));
        error
    }

    fn print_line(&mut self, line: &str) {
        if let Err(error) = writeln!(self.out, "{line}") {
            warn!(%error, "failed to write probe output");
        }
    }
}

/// Maps the outcome of [`ConnectivityProbe::run`] to a process exit code.
#[must_use]
pub fn exit_code(result: &Result<ProbeReport>) -> u8 {
    match result {
        Ok(_) => EXIT_SUCCESS,
        Err(error) => error.exit_code(),
    }
}

fn query_failed(source: BoxError) -> ConnectError {
    ConnectError::QueryFailed {
        sql: DIAGNOSTIC_QUERY.to_string(),
        source,
    }
}

/// Closes the connection when dropped unless [`ConnectionGuard::close`] ran first.
struct ConnectionGuard {
    connection: Box<dyn Connection>,
    closed: bool,
}

impl ConnectionGuard {
    fn new(connection: Box<dyn Connection>) -> Self {
        Self {
            connection,
            closed: false,
        }
    }

    fn query(&mut self, sql: &str) -> std::result::Result<Box<dyn RowCursor + '_>, BoxError> {
        self.connection.query(sql)
    }

    fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        if let Err(error) = self.connection.close() {
            warn!(%error, "failed to close database connection");
        }
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.release();
    }
}

struct CursorGuard<'c> {
    cursor: Box<dyn RowCursor + 'c>,
    closed: bool,
}

impl<'c> CursorGuard<'c> {
    fn new(cursor: Box<dyn RowCursor + 'c>) -> Self {
        Self {
            cursor,
            closed: false,
        }
    }

    fn next_row(&mut self) -> Option<std::result::Result<Row, BoxError>> {
        self.cursor.next_row()
    }

    fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        if let Err(error) = self.cursor.close() {
            warn!(%error, "failed to close result cursor");
        }
    }
}

impl Drop for CursorGuard<'_> {
    fn drop(&mut self) {
        self.release();
    }
}
