use crate::{BoxError, ConnectionConfig, Secret};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: Secret,
}

/// Supplies the secrets a driver authenticates with.
pub trait CredentialProvider {
    fn name(&self) -> &'static str;
    fn resolve(&self, config: &ConnectionConfig) -> Result<Credentials, BoxError>;
}

/// Uses the user and password already present in the connection config.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticCredentials;

impl CredentialProvider for StaticCredentials {
    fn name(&self) -> &'static str {
        "static"
    }

    fn resolve(&self, config: &ConnectionConfig) -> Result<Credentials, BoxError> {
        Ok(Credentials {
            user: config.user().to_string(),
            password: config.password().clone(),
        })
    }
}
