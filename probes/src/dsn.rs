//! Connection-string rendering for database targets.
//!
//! This is string assembly for the minimal credential/host/port shape the
//! tool supports, not a full DSN grammar: no query parameters, no IPv6
//! bracket handling beyond what the host component already contains.

use std::fmt::Write;

use thiserror::Error;
use waitr_common::target::{MYSQL_DEFAULT_PORT, Protocol, Target};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DsnError {
    #[error("no dsn form for protocol: {0}")]
    UnsupportedProtocol(&'static str),
}

/// Renders the driver connection string for a mysql or postgres target.
pub fn build(target: &Target) -> Result<String, DsnError> {
    match target.protocol {
        Protocol::Mysql => Ok(mysql(target)),
        Protocol::Postgres => Ok(postgres(target)),
        other => Err(DsnError::UnsupportedProtocol(other.as_str())),
    }
}

/// `[user[:password]@]tcp(host:port)/`
fn mysql(target: &Target) -> String {
    let mut dsn = String::new();

    if let Some(credentials) = &target.credentials {
        dsn.push_str(&credentials.user);
        if let Some(password) = &credentials.password {
            dsn.push(':');
            dsn.push_str(password);
        }
        dsn.push('@');
    }

    let port = target.port.unwrap_or(MYSQL_DEFAULT_PORT);
    let _ = write!(dsn, "tcp({}:{})/", target.host, port);
    dsn
}

/// `[user=.. [password=..] ]host=..[ port=..] sslmode=disable`
///
/// Fields are space-joined with absent ones simply missing; TLS is never
/// negotiated by this builder.
fn postgres(target: &Target) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(credentials) = &target.credentials {
        parts.push(format!("user={}", credentials.user));
        if let Some(password) = &credentials.password {
            parts.push(format!("password={password}"));
        }
    }

    parts.push(format!("host={}", target.host));
    if let Some(port) = target.port {
        parts.push(format!("port={port}"));
    }
    parts.push("sslmode=disable".to_string());

    parts.join(" ")
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
