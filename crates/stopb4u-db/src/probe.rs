//! # Connectivity Probe
//!
//! One bounded attempt to reach the data source, answered with a
//! [`ConnectionStatus`] rather than an error.
//!
//! ## Probe Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SqlProbe::probe                                  │
//! │                                                                         │
//! │  DbConfig ──► connection_url() ──Err──► Failed(InvalidConfig)          │
//! │                     │                                                   │
//! │                     ▼                                                   │
//! │  ┌───────── timeout(probe_timeout) ─────────┐                          │
//! │  │  AnyConnection::connect(url)             │                          │
//! │  │       │                                  │                          │
//! │  │       ▼                                  │                          │
//! │  │  ping ──► close                          │                          │
//! │  └──────────────────────────────────────────┘                          │
//! │       │               │                 │                               │
//! │       ▼               ▼                 ▼                               │
//! │   Connected   Failed(Unreachable)  Failed(Timeout)                      │
//! │               Failed(InvalidConfig)                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The probe never retries and never leaves a connection open: whatever
//! it opens is closed before it returns, and on timeout the in-flight
//! attempt is dropped.

use sqlx::{AnyConnection, Connection};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

use stopb4u_core::{ConnectionStatus, ProbeFailureKind};

use crate::error::DbError;
use crate::pool::{install_drivers, DbConfig};

/// Default bound on one probe.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Probes a SQL data source described by a [`DbConfig`].
#[derive(Debug, Clone)]
pub struct SqlProbe {
    config: DbConfig,
    timeout: Duration,
}

impl SqlProbe {
    /// Creates a probe with the default timeout.
    pub fn new(config: DbConfig) -> Self {
        SqlProbe {
            config,
            timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    /// Sets the probe timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The configuration being probed.
    pub fn config(&self) -> &DbConfig {
        &self.config
    }

    /// Makes exactly one bounded connection attempt.
    pub async fn probe(&self) -> ConnectionStatus {
        install_drivers();
        let target = self.config.redacted_url();
        debug!(url = %target, timeout = ?self.timeout, "Probing data source");

        let url = match self.config.connection_url() {
            Ok(url) => url,
            Err(e) => {
                warn!(url = %target, error = %e, "Data source configuration rejected");
                return ConnectionStatus::failed(ProbeFailureKind::InvalidConfig, e.to_string());
            }
        };

        let status = bounded(attempt(url), self.timeout).await;
        match &status {
            ConnectionStatus::Connected => info!(url = %target, "Data source reachable"),
            ConnectionStatus::Failed(reason) => {
                warn!(url = %target, kind = ?reason.kind, detail = %reason.detail, "Data source probe failed")
            }
        }
        status
    }
}

/// Opens, pings and closes one connection.
async fn attempt(url: String) -> Result<(), sqlx::Error> {
    let mut conn = AnyConnection::connect(&url).await?;
    let pinged = conn.ping().await;
    // close even if the ping failed; a close error adds nothing
    let _ = conn.close().await;
    pinged
}

/// Runs `attempt` under `timeout` and classifies the outcome.
pub(crate) async fn bounded<F>(attempt: F, timeout: Duration) -> ConnectionStatus
where
    F: Future<Output = Result<(), sqlx::Error>>,
{
    match tokio::time::timeout(timeout, attempt).await {
        Ok(Ok(())) => ConnectionStatus::Connected,
        Ok(Err(e)) => classify(e),
        Err(_) => ConnectionStatus::failed(
            ProbeFailureKind::Timeout,
            format!("no response within {:?}", timeout),
        ),
    }
}

fn classify(err: sqlx::Error) -> ConnectionStatus {
    match DbError::from(err) {
        DbError::InvalidConfig(detail) => {
            ConnectionStatus::failed(ProbeFailureKind::InvalidConfig, detail)
        }
        other => ConnectionStatus::failed(ProbeFailureKind::Unreachable, other.to_string()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use stopb4u_core::ProbeFailure;

    fn failure(status: ConnectionStatus) -> ProbeFailure {
        match status {
            ConnectionStatus::Failed(reason) => reason,
            ConnectionStatus::Connected => panic!("expected a failed probe"),
        }
    }

    #[tokio::test]
    async fn test_in_memory_store_is_reachable() {
        let status = SqlProbe::new(DbConfig::in_memory()).probe().await;
        assert_eq!(status, ConnectionStatus::Connected);
    }

    #[tokio::test]
    async fn test_file_store_is_reachable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analyzer.db");
        let url = format!("sqlite://{}?mode=rwc", path.display());

        let status = SqlProbe::new(DbConfig::new(url)).probe().await;
        assert!(status.is_connected());
    }

    #[tokio::test]
    async fn test_unknown_scheme_is_invalid_config() {
        let status = SqlProbe::new(DbConfig::new("ftp://db.local/analyzer"))
            .probe()
            .await;
        assert_eq!(failure(status).kind, ProbeFailureKind::InvalidConfig);
    }

    #[tokio::test]
    async fn test_bad_credentials_url_is_invalid_config() {
        let config = DbConfig::new("nonsense").credentials(Some("analyst".into()), None);
        let status = SqlProbe::new(config).probe().await;
        assert_eq!(failure(status).kind, ProbeFailureKind::InvalidConfig);
    }

    #[tokio::test]
    async fn test_missing_file_is_unreachable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("analyzer.db");
        let url = format!("sqlite://{}?mode=ro", path.display());

        let status = SqlProbe::new(DbConfig::new(url)).probe().await;
        assert_eq!(failure(status).kind, ProbeFailureKind::Unreachable);
    }

    #[tokio::test]
    async fn test_hung_attempt_times_out() {
        let status = bounded(
            std::future::pending::<Result<(), sqlx::Error>>(),
            Duration::from_millis(20),
        )
        .await;

        let reason = failure(status);
        assert_eq!(reason.kind, ProbeFailureKind::Timeout);
        assert!(reason.detail.contains("20ms"));
    }

    #[tokio::test]
    async fn test_attempt_errors_are_classified() {
        let status = bounded(async { Err(sqlx::Error::PoolClosed) }, DEFAULT_PROBE_TIMEOUT).await;
        assert_eq!(failure(status).kind, ProbeFailureKind::Unreachable);
    }

    #[test]
    fn test_timeout_builder() {
        let probe = SqlProbe::new(DbConfig::in_memory()).with_timeout(Duration::from_secs(2));
        assert_eq!(probe.timeout(), Duration::from_secs(2));
        assert!(probe.config().is_sqlite());
    }
}
