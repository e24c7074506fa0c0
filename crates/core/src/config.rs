use std::{fmt, time::Duration};

use crate::ConfigError;

/// Password or other connection secret. Never rendered by `Debug` or `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Fully populated connection settings for a single probe run.
///
/// All fields are validated once in [`ConnectionConfig::new`] and are
/// read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    user: String,
    password: Secret,
    host: String,
    port: u16,
    database: String,
    connect_timeout: Option<Duration>,
}

impl ConnectionConfig {
    pub fn new(
        user: impl Into<String>,
        password: impl Into<Secret>,
        host: impl Into<String>,
        port: u16,
        database: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            user: user.into(),
            password: password.into(),
            host: host.into(),
            port,
            database: database.into(),
            connect_timeout: None,
        };
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.connect_timeout = timeout.filter(|timeout| !timeout.is_zero());
        self
    }

    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    #[must_use]
    pub fn password(&self) -> &Secret {
        &self.password
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    #[must_use]
    pub fn database(&self) -> &str {
        &self.database
    }

    #[must_use]
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("user", self.user.trim().is_empty()),
            ("password", self.password.is_empty()),
            ("host", self.host.trim().is_empty()),
            ("database", self.database.trim().is_empty()),
        ];
        if let Some((field, _)) = fields.into_iter().find(|(_, empty)| *empty) {
            return Err(ConfigError::EmptyField { field });
        }
        if self.port == 0 {
            return Err(ConfigError::InvalidPort);
        }

        Ok(())
    }
}
