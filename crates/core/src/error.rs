use std::{error::Error as StdError, fmt};

pub type BoxError = Box<dyn StdError + Send + Sync>;

pub type Result<T> = std::result::Result<T, ConnectError>;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("connection field `{field}` must not be empty")]
    EmptyField { field: &'static str },
    #[error("connection port must be in 1..=65535")]
    InvalidPort,
}

/// Step of a probe run that an error is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Session,
    Open,
    Query,
    Scan,
}

impl Stage {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Session => "creating AWS session",
            Self::Open => "connecting to database",
            Self::Query => "executing query",
            Self::Scan => "scanning rows",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("creating AWS session: {source}")]
    SessionFailed {
        provider: &'static str,
        #[source]
        source: BoxError,
    },
    #[error("connecting to database: {source}")]
    OpenFailed {
        driver: &'static str,
        #[source]
        source: BoxError,
    },
    #[error("executing query: {source}")]
    QueryFailed {
        sql: String,
        #[source]
        source: BoxError,
    },
    #[error("scanning rows: {source}")]
    ScanFailed {
        row_index: usize,
        #[source]
        source: BoxError,
    },
}

impl ConnectError {
    #[must_use]
    pub fn stage(&self) -> Stage {
        match self {
            Self::SessionFailed { .. } => Stage::Session,
            Self::OpenFailed { .. } => Stage::Open,
            Self::QueryFailed { .. } => Stage::Query,
            Self::ScanFailed { .. } => Stage::Scan,
        }
    }

    /// Process exit code for a run that ended with this error.
    ///
    /// A failed session step ends the run early without signalling failure.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::SessionFailed { .. } => EXIT_SUCCESS,
            Self::OpenFailed { .. } | Self::QueryFailed { .. } | Self::ScanFailed { .. } => {
                EXIT_FAILURE
            }
        }
    }
}

/// Why a column value could not be read as a version string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    #[error("expected 1 column in result row, got {actual}")]
    ColumnCount { actual: usize },
    #[error("converting NULL to string is unsupported")]
    Null,
    #[error("column value is not valid UTF-8")]
    InvalidUtf8,
}
