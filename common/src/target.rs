//! # Dependency Target Model
//!
//! Parses raw dependency descriptors (`tcp://db:5432`, `mysql://alice@db/`,
//! `https://api.local/health`, ...) into typed [`Target`] values.
//!
//! Parsing is the only way to construct a `Target`; after that the value is
//! read-only and owned by the retry loop probing it. Every descriptor is
//! parsed before any probe starts, so a bad protocol is a construction-time
//! error, never a runtime surprise.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

/// Default port the mysql driver assumes when the authority omits one.
pub const MYSQL_DEFAULT_PORT: u16 = 3306;

/// The protocol families this tool knows how to probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    Tcp,
    Udp,
    Http,
    Https,
    Mysql,
    Postgres,
}

impl Protocol {
    /// Matches a descriptor scheme case-sensitively. `TCP` is not `tcp`.
    fn from_scheme(scheme: &str) -> Option<Self> {
        match scheme {
            "tcp" => Some(Self::Tcp),
            "udp" => Some(Self::Udp),
            "http" => Some(Self::Http),
            "https" => Some(Self::Https),
            "mysql" => Some(Self::Mysql),
            "postgres" => Some(Self::Postgres),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tcp => "tcp",
            Self::Udp => "udp",
            Self::Http => "http",
            Self::Https => "https",
            Self::Mysql => "mysql",
            Self::Postgres => "postgres",
        }
    }

    /// Port filled in when the authority does not name one.
    ///
    /// Only mysql carries an implicit default; every other protocol keeps
    /// whatever the descriptor said, including nothing at all.
    pub fn default_port(&self) -> Option<u16> {
        match self {
            Self::Mysql => Some(MYSQL_DEFAULT_PORT),
            _ => None,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Userinfo lifted verbatim from the descriptor authority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: Option<String>,
}

/// One parsed dependency endpoint.
#[derive(Debug, Clone)]
pub struct Target {
    pub protocol: Protocol,
    pub host: String,
    pub port: Option<u16>,
    pub credentials: Option<Credentials>,
    /// The descriptor as the user wrote it, kept for log lines and for the
    /// HTTP probe, which requests the full original URI.
    pub raw: String,
}

/// Why a descriptor could not become a [`Target`].
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unable to parse: {raw}")]
    InvalidDescriptor {
        raw: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Invalid host protocol provided: {scheme}")]
    UnsupportedProtocol { scheme: String },
}

impl Target {
    /// Parses one dependency descriptor.
    ///
    /// The scheme is taken from the raw text, not from the normalized URI,
    /// because URI parsers lowercase schemes and the recognized set is
    /// matched case-sensitively.
    pub fn parse(descriptor: &str) -> Result<Self, ParseError> {
        let uri = Url::parse(descriptor).map_err(|source| ParseError::InvalidDescriptor {
            raw: descriptor.to_string(),
            source,
        })?;

        let raw_scheme = descriptor.split(':').next().unwrap_or_default();
        let protocol = Protocol::from_scheme(raw_scheme).ok_or_else(|| {
            ParseError::UnsupportedProtocol {
                scheme: raw_scheme.to_string(),
            }
        })?;

        Ok(Self {
            protocol,
            host: uri.host_str().unwrap_or_default().to_string(),
            port: uri.port().or(protocol.default_port()),
            credentials: parse_credentials(&uri),
            raw: descriptor.to_string(),
        })
    }

    /// `host:port` as dialed by the stream probe. A missing port is left
    /// off and surfaces as a dial error on the first attempt.
    pub fn endpoint(&self) -> String {
        match self.port {
            Some(port) => format!("{}:{}", self.host, port),
            None => self.host.clone(),
        }
    }
}

impl FromStr for Target {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn parse_credentials(uri: &Url) -> Option<Credentials> {
    let user = uri.username();
    if user.is_empty() && uri.password().is_none() {
        return None;
    }
    Some(Credentials {
        user: user.to_string(),
        password: uri.password().map(str::to_string),
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_recognizes_every_documented_scheme() {
        let cases = [
            ("tcp://db:5432", Protocol::Tcp),
            ("udp://statsd:8125", Protocol::Udp),
            ("http://api.local/health", Protocol::Http),
            ("https://api.local/health", Protocol::Https),
            ("mysql://db/", Protocol::Mysql),
            ("postgres://db/", Protocol::Postgres),
        ];

        for (descriptor, expected) in cases {
            let target = Target::parse(descriptor).unwrap();
            assert_eq!(target.protocol, expected, "descriptor: {descriptor}");
            assert_eq!(target.raw, descriptor);
        }
    }

    #[test]
    fn parse_takes_host_and_port_from_the_authority() {
        let target = Target::parse("tcp://queue.internal:6379").unwrap();
        assert_eq!(target.host, "queue.internal");
        assert_eq!(target.port, Some(6379));
        assert_eq!(target.endpoint(), "queue.internal:6379");
    }

    #[test]
    fn parse_fills_the_mysql_default_port() {
        let target = Target::parse("mysql://db/").unwrap();
        assert_eq!(target.port, Some(MYSQL_DEFAULT_PORT));

        let target = Target::parse("mysql://db:3307/").unwrap();
        assert_eq!(target.port, Some(3307));
    }

    #[test]
    fn parse_leaves_other_ports_absent() {
        let target = Target::parse("tcp://db").unwrap();
        assert_eq!(target.port, None);
        assert_eq!(target.endpoint(), "db");

        let target = Target::parse("postgres://db/").unwrap();
        assert_eq!(target.port, None);
    }

    #[test]
    fn parse_extracts_userinfo_verbatim() {
        let target = Target::parse("postgres://bob:pw@dbhost:5433/").unwrap();
        assert_eq!(
            target.credentials,
            Some(Credentials {
                user: "bob".to_string(),
                password: Some("pw".to_string()),
            })
        );

        let target = Target::parse("mysql://alice@db:3307/").unwrap();
        assert_eq!(
            target.credentials,
            Some(Credentials {
                user: "alice".to_string(),
                password: None,
            })
        );

        let target = Target::parse("tcp://db:5432").unwrap();
        assert_eq!(target.credentials, None);
    }

    #[test]
    fn parse_rejects_unrecognized_schemes() {
        let err = Target::parse("redis://cache:6379").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnsupportedProtocol { scheme } if scheme == "redis"
        ));
    }

    #[test]
    fn parse_matches_schemes_case_sensitively() {
        let err = Target::parse("TCP://db:5432").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnsupportedProtocol { scheme } if scheme == "TCP"
        ));
    }

    #[test]
    fn parse_rejects_malformed_descriptors() {
        assert!(matches!(
            Target::parse("not a descriptor"),
            Err(ParseError::InvalidDescriptor { .. })
        ));
        assert!(matches!(
            Target::parse("://db:5432"),
            Err(ParseError::InvalidDescriptor { .. })
        ));
    }
}
