//! Tracing subscriber installation for the UI.
//!
//! # Design
//! - A single entry point installs the global subscriber before the app renders.
//! - Browser builds write formatted events to the web console; native builds use stderr.
//! - Unparseable level directives fall back to [`DEFAULT_LOG_LEVEL`] instead of failing boot.

use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Level used when no directive is stored or the stored one does not parse.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// A global subscriber was already installed.
    #[error("failed to install tracing subscriber: {source}")]
    Install {
        /// Underlying initialisation failure.
        #[from]
        source: tracing_subscriber::util::TryInitError,
    },
}

/// Build the level filter for `directive` (e.g. `debug`, `keyward_ui=debug`).
#[must_use]
pub fn build_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Returns [`TelemetryError::Install`] when a subscriber is already installed.
pub fn init_logging(directive: &str) -> Result<(), TelemetryError> {
    let registry = tracing_subscriber::registry().with(build_filter(directive));

    #[cfg(target_arch = "wasm32")]
    let installed = registry
        .with(
            fmt::layer()
                .with_ansi(false)
                .without_time()
                .with_target(false)
                .with_writer(tracing_web::MakeWebConsoleWriter::new()),
        )
        .try_init();

    #[cfg(not(target_arch = "wasm32"))]
    let installed = registry
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();

    installed?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::approvals::session::ApproverEditSession;
    use crate::models::{EnvironmentRef, SecretApprovalPolicy};
    use tracing::subscriber::NoSubscriber;
    use uuid::Uuid;

    #[test]
    fn filter_keeps_valid_directives() {
        assert_eq!(build_filter("debug").to_string(), "debug");
        assert_eq!(build_filter("keyward_ui=warn").to_string(), "keyward_ui=warn");
    }

    #[test]
    fn filter_falls_back_on_garbage() {
        assert_eq!(build_filter("keyward_ui=loudest").to_string(), DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn session_events_reach_an_installed_subscriber() {
        assert!(init_logging("warn").is_ok());
        let mut session = ApproverEditSession::new("acme");
        let policy = SecretApprovalPolicy {
            id: Uuid::from_u128(1),
            name: "prod-guard".to_string(),
            environment: EnvironmentRef {
                id: Uuid::from_u128(0xe1),
                name: "Production".to_string(),
                slug: "prod".to_string(),
            },
            secret_path: None,
            approvals: 1,
            user_approvers: Vec::new(),
            updated_at: None,
        };
        assert!(session.open(&policy, false).is_err());
        let routed = tracing::dispatcher::get_default(|dispatch| !dispatch.is::<NoSubscriber>());
        assert!(routed);
        assert!(matches!(
            init_logging("debug"),
            Err(TelemetryError::Install { .. })
        ));
    }
}
