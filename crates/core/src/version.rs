use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Parses the leading `major.minor.patch` of a server version string such as
/// `8.0.34-log` or `10.11.6-MariaDB-1:10.11.6+maria~ubu2204`.
pub fn parse_server_version(raw: &str) -> Option<Version> {
    let mut parts = raw.split_whitespace().next()?.split('.');
    let major = parse_version_component(parts.next()?)?;
    let minor = parts.next().and_then(parse_version_component).unwrap_or(0);
    let patch = parts.next().and_then(parse_version_component).unwrap_or(0);

    Some(Version {
        major,
        minor,
        patch,
    })
}

fn parse_version_component(raw: &str) -> Option<u16> {
    let digits = raw
        .chars()
        .take_while(|ch| ch.is_ascii_digit())
        .collect::<String>();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<u16>().ok()
}

#[cfg(test)]
mod tests {
    use super::{Version, parse_server_version};

    #[test]
    fn parses_mysql_and_mariadb_version_strings() {
        assert_eq!(
            parse_server_version("8.0.34"),
            Some(Version {
                major: 8,
                minor: 0,
                patch: 34,
            })
        );
        assert_eq!(
            parse_server_version("8.0.34-log"),
            Some(Version {
                major: 8,
                minor: 0,
                patch: 34,
            })
        );
        assert_eq!(
            parse_server_version("10.11.6-MariaDB-1:10.11.6+maria~ubu2204"),
            Some(Version {
                major: 10,
                minor: 11,
                patch: 6,
            })
        );
    }

    #[test]
    fn missing_components_default_to_zero() {
        assert_eq!(
            parse_server_version("9"),
            Some(Version {
                major: 9,
                minor: 0,
                patch: 0,
            })
        );
    }

    #[test]
    fn non_numeric_versions_do_not_parse() {
        assert_eq!(parse_server_version(""), None);
        assert_eq!(parse_server_version("unknown"), None);
    }
}
