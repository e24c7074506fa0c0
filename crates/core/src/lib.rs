mod config;
mod credentials;
mod driver;
mod error;
mod probe;
mod version;

pub use config::{ConnectionConfig, Secret};
pub use credentials::{CredentialProvider, Credentials, StaticCredentials};
pub use driver::{Connection, Driver, Row, RowCursor, Value, scan_string};
pub use error::{
    BoxError, ConfigError, ConnectError, EXIT_FAILURE, EXIT_SUCCESS, Result, ScanError, Stage,
};
pub use probe::{ConnectivityProbe, DIAGNOSTIC_QUERY, ProbeReport, exit_code};
pub use version::{Version, parse_server_version};
