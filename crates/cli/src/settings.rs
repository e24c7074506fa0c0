use std::{path::Path, time::Duration};

use connprobe_core::{ConfigError, ConnectionConfig};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::{
    cli::ConnectionArgs,
    error_presentation::{CliError, CliResult},
};

const ENV_PREFIX: &str = "CONNPROBE_";
const ENV_NUMERIC_FIELDS: &[&str] = &["port", "timeout"];

/// Connection settings merged from the config file, `CONNPROBE_*` variables and flags,
/// in increasing order of precedence.
///
/// User, password, host and database reach this struct through clap's `env` support,
/// so their environment values are kept byte for byte. Only the numeric fields are
/// read from the environment by figment.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub(crate) struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) database: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) timeout: Option<u64>,
}

impl Settings {
    pub(crate) fn load(args: &ConnectionArgs) -> CliResult<Self> {
        let mut figment = Figment::new();
        if let Some(path) = &args.config {
            ensure_config_file(path)?;
            figment = figment.merge(Toml::file(path));
        }

        figment
            .merge(Env::prefixed(ENV_PREFIX).only(ENV_NUMERIC_FIELDS))
            .merge(Serialized::defaults(Self::from_args(args)))
            .extract::<Self>()
            .map_err(|source| CliError::Settings(Box::new(source)))
    }

    fn from_args(args: &ConnectionArgs) -> Self {
        Self {
            user: args.user.clone(),
            password: args.password.clone(),
            host: args.host.clone(),
            port: args.port,
            database: args.database.clone(),
            timeout: args.timeout,
        }
    }

    pub(crate) fn into_config(self) -> CliResult<ConnectionConfig> {
        let user = self.user.ok_or_else(|| missing("user"))?;
        let password = self.password.ok_or_else(|| missing("password"))?;
        let host = self.host.ok_or_else(|| missing("host"))?;
        let port = self.port.ok_or_else(|| missing("port"))?;
        let database = self.database.ok_or_else(|| missing("database"))?;

        let config = ConnectionConfig::new(user, password, host, port, database)?;
        Ok(config.with_connect_timeout(self.timeout.map(Duration::from_secs)))
    }
}

fn ensure_config_file(path: &Path) -> CliResult<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(CliError::MissingConfigFile {
            path: path.to_path_buf(),
        })
    }
}

fn missing(field: &'static str) -> CliError {
    CliError::Config(ConfigError::EmptyField { field })
}
