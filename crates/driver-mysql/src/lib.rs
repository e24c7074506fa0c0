mod connection;
mod descriptor;

use connprobe_core::{BoxError, Connection, ConnectionConfig, Credentials, Driver};
use mysql::{Opts, OptsBuilder};
use tracing::debug;

use crate::connection::MysqlConnection;
pub use crate::descriptor::{connection_descriptor, redacted_descriptor};

#[derive(Debug, Default, Clone, Copy)]
pub struct MysqlDriver;

impl Driver for MysqlDriver {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn open(
        &self,
        config: &ConnectionConfig,
        credentials: &Credentials,
    ) -> Result<Box<dyn Connection>, BoxError> {
        let url = connection_descriptor(config, credentials)?;
        let descriptor = redacted_descriptor(&url);
        debug!(%descriptor, "parsed mysql connection descriptor");

        let opts = Opts::from_url(url.as_str()).map_err(|source| Box::new(source) as BoxError)?;
        let opts = match config.connect_timeout() {
            Some(timeout) => Opts::from(
                OptsBuilder::from_opts(opts)
                    .tcp_connect_timeout(Some(timeout))
                    .read_timeout(Some(timeout))
                    .write_timeout(Some(timeout)),
            ),
            None => opts,
        };

        Ok(Box::new(MysqlConnection::new(opts, descriptor)))
    }
}
