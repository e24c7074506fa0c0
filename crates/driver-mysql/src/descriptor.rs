use std::io;

use connprobe_core::{BoxError, ConnectionConfig, Credentials};
use url::Url;

const SCHEME_BASE: &str = "mysql://localhost";
const REDACTED_PASSWORD: &str = "***";

/// Formats `mysql://<user>:<password>@<host>:<port>/<database>`.
///
/// User, password and database are percent-encoded; IPv6 literals are bracketed.
pub fn connection_descriptor(
    config: &ConnectionConfig,
    credentials: &Credentials,
) -> Result<Url, BoxError> {
    let mut url = Url::parse(SCHEME_BASE)?;

    url.set_host(Some(&host_component(config.host())))?;
    url.set_port(Some(config.port()))
        .map_err(|()| component_error("port"))?;
    url.set_username(&credentials.user)
        .map_err(|()| component_error("user"))?;
    url.set_password(Some(credentials.password.expose()))
        .map_err(|()| component_error("password"))?;
    url.path_segments_mut()
        .map_err(|()| component_error("database"))?
        .clear()
        .push(config.database());

    Ok(url)
}

/// Same descriptor with the password replaced, suitable for logs.
#[must_use]
pub fn redacted_descriptor(url: &Url) -> String {
    let mut redacted = url.clone();
    if redacted.password().is_some() && redacted.set_password(Some(REDACTED_PASSWORD)).is_err() {
        return format!("mysql://{}", url.host_str().unwrap_or_default());
    }
    redacted.to_string()
}

fn host_component(host: &str) -> String {
    let host = host.trim();
    if host.contains(':') && !host.starts_with('[') {
        format!("[{host}]")
    } else {
        host.to_string()
    }
}

fn component_error(component: &str) -> BoxError {
    Box::new(io::Error::other(format!(
        "cannot set {component} on mysql connection descriptor"
    )))
}
