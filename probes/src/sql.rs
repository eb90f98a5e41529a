//! Database liveness for `mysql://` and `postgres://` targets.
//!
//! Reachable means the server both accepts a connection and answers a
//! ping. A server that accepts TCP but cannot ping yet (still starting up)
//! is a transient failure like any other. Every attempt closes its
//! connection before reporting, so retries never accumulate connections.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::Connection;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlSslMode};
use sqlx::postgres::{PgConnectOptions, PgConnection, PgSslMode};
use tokio::time::timeout;
use waitr_common::target::{MYSQL_DEFAULT_PORT, Protocol, Target};

use crate::{Probe, ProbeOutcome, dsn};

/// Connect-and-ping strategy for the two supported database protocols.
///
/// The drivers take structured connect options assembled from the target
/// fields (they only parse URL-form connection strings); the rendered DSN
/// from [`dsn::build`] is the attempt's logged connection identity.
pub struct SqlProbe;

#[async_trait]
impl Probe for SqlProbe {
    async fn attempt(&self, target: &Target, attempt_timeout: Duration) -> ProbeOutcome {
        let dsn = match dsn::build(target) {
            Ok(dsn) => dsn,
            Err(err) => return ProbeOutcome::unreachable(err.to_string()),
        };

        match timeout(attempt_timeout, connect_and_ping(target)).await {
            Ok(Ok(())) => ProbeOutcome::Reachable,
            Ok(Err(err)) => ProbeOutcome::unreachable(format!("{dsn}: {err}")),
            Err(_) => ProbeOutcome::unreachable(format!(
                "{dsn}: no ping answer within {attempt_timeout:?}"
            )),
        }
    }
}

async fn connect_and_ping(target: &Target) -> Result<(), sqlx::Error> {
    match target.protocol {
        Protocol::Mysql => {
            let mut options = MySqlConnectOptions::new()
                .host(&target.host)
                .port(target.port.unwrap_or(MYSQL_DEFAULT_PORT))
                .ssl_mode(MySqlSslMode::Disabled);
            if let Some(credentials) = &target.credentials {
                options = options.username(&credentials.user);
                if let Some(password) = &credentials.password {
                    options = options.password(password);
                }
            }

            let mut conn = MySqlConnection::connect_with(&options).await?;
            let ping = conn.ping().await;
            let _ = conn.close().await;
            ping
        }
        Protocol::Postgres => {
            let mut options = PgConnectOptions::new()
                .host(&target.host)
                .ssl_mode(PgSslMode::Disable);
            if let Some(port) = target.port {
                options = options.port(port);
            }
            if let Some(credentials) = &target.credentials {
                options = options.username(&credentials.user);
                if let Some(password) = &credentials.password {
                    options = options.password(password);
                }
            }

            let mut conn = PgConnection::connect_with(&options).await?;
            let ping = conn.ping().await;
            let _ = conn.close().await;
            ping
        }
        other => Err(sqlx::Error::Configuration(
            format!("not a database protocol: {other}").into(),
        )),
    }
}
