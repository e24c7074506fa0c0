use std::{fmt, path::PathBuf};

use connprobe_core::ConfigError;
use miette::Report;

const SETTINGS_CONTEXT: &str = "while loading connection settings";
const CONFIG_FILE_CONTEXT: &str = "while reading config file";

pub(crate) const EXIT_USAGE: u8 = 2;

pub(crate) type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug)]
pub(crate) enum CliError {
    MissingConfigFile {
        path: PathBuf,
    },
    Settings(Box<figment::Error>),
    Config(ConfigError),
}

impl From<ConfigError> for CliError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingConfigFile { path } => {
                write!(f, "config file `{}` does not exist", path.display())
            }
            Self::Settings(source) => write!(f, "{source}"),
            Self::Config(source) => write!(f, "{source}"),
        }
    }
}

pub(crate) fn render_runtime_error(error: CliError) -> String {
    match error {
        CliError::MissingConfigFile { path } => {
            let context = format!("{CONFIG_FILE_CONTEXT} `{}`", path.display());
            let source = std::io::Error::new(std::io::ErrorKind::NotFound, "file does not exist");
            format!("[config] {}", report_with_context(source, context))
        }
        CliError::Settings(source) => {
            format!("[config] {}", report_with_context(*source, SETTINGS_CONTEXT))
        }
        CliError::Config(source) => {
            format!("[config] {}", report_with_context(source, SETTINGS_CONTEXT))
        }
    }
}

fn report_with_context<E, C>(source: E, context: C) -> Report
where
    E: std::error::Error + Send + Sync + 'static,
    C: Into<String>,
{
    let anyhow_error = anyhow::Error::new(source).context(context.into());
    miette::miette!("{anyhow_error:#}")
}
