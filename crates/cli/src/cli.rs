#[cfg(feature = "mysql")]
use std::path::PathBuf;

#[cfg(feature = "mysql")]
use clap::Args;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "connprobe",
    version,
    about = "Check database connectivity by reporting the server version"
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Probe a MySQL-compatible server with `SELECT version()`
    #[cfg(feature = "mysql")]
    Mysql(ConnectionArgs),
}

#[cfg(feature = "mysql")]
#[derive(Debug, Args)]
pub(crate) struct ConnectionArgs {
    /// TOML file with user, password, host, port, database and timeout
    #[arg(long, value_name = "PATH", env = "CONNPROBE_CONFIG")]
    pub(crate) config: Option<PathBuf>,

    #[arg(long, value_name = "HOST", env = "CONNPROBE_HOST")]
    pub(crate) host: Option<String>,

    #[arg(long, short = 'P', value_name = "PORT")]
    pub(crate) port: Option<u16>,

    #[arg(long, short = 'u', value_name = "USER", env = "CONNPROBE_USER")]
    pub(crate) user: Option<String>,

    #[arg(
        long,
        short = 'p',
        value_name = "PASSWORD",
        env = "CONNPROBE_PASSWORD",
        hide_env_values = true
    )]
    pub(crate) password: Option<String>,

    #[arg(long, short = 'd', value_name = "DATABASE", env = "CONNPROBE_DATABASE")]
    pub(crate) database: Option<String>,

    /// Connect, read and write timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub(crate) timeout: Option<u64>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub(crate) log_level: String,
}
