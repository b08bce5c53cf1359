// ── Core error types ──
//
// User-facing errors from dataall-core. Consumers never see raw reqwest
// errors or JSON bodies; `From<dataall_api::Error>` translates them.
// Note that `Session::execute` itself never returns these: request
// failures travel as `Outcome::Errors` plus an error-bus event.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    // ── Session errors ───────────────────────────────────────────────
    #[error("No token available: sign in or configure a token first")]
    NoToken,

    #[error("Invalid token: {message}")]
    InvalidToken { message: String },

    #[error("Cannot reach GraphQL endpoint: {reason}")]
    ConnectionFailed { reason: String },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Request errors ───────────────────────────────────────────────
    /// The server answered the operation with GraphQL errors.
    #[error("{message}")]
    Request { message: String },

    #[error("API error: {message}")]
    Api { message: String, status: Option<u16> },

    /// Refused locally because of an active maintenance window.
    #[error("{message}")]
    MaintenanceBlocked { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<dataall_api::Error> for CoreError {
    fn from(err: dataall_api::Error) -> Self {
        use dataall_api::Error as Api;

        match err {
            Api::UnknownModule { .. } | Api::InvalidUrl(_) => CoreError::Config {
                message: err.to_string(),
            },
            Api::InvalidToken { message } => CoreError::InvalidToken { message },
            Api::InvalidFilter { field, reason } => CoreError::ValidationFailed {
                message: format!("{field}: {reason}"),
            },
            Api::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            Api::Tls(msg) => CoreError::ConnectionFailed {
                reason: format!("TLS error: {msg}"),
            },
            Api::Transport(ref e) if e.is_timeout() => CoreError::Timeout { timeout_secs: 0 },
            Api::Transport(ref e) if e.is_connect() => CoreError::ConnectionFailed {
                reason: e.to_string(),
            },
            Api::Transport(e) => CoreError::Api {
                status: e.status().map(|s| s.as_u16()),
                message: e.to_string(),
            },
            Api::Http { status, .. } => CoreError::Api {
                message: format!("HTTP {status} from GraphQL endpoint"),
                status: Some(status),
            },
            Api::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_module_is_a_config_error() {
        let err: CoreError = dataall_api::Error::UnknownModule {
            module: "search".into(),
        }
        .into();
        assert!(matches!(err, CoreError::Config { ref message } if message.contains("search")));
    }

    #[test]
    fn http_status_is_preserved() {
        let err: CoreError = dataall_api::Error::Http {
            status: 503,
            body: String::new(),
        }
        .into();
        assert!(matches!(err, CoreError::Api { status: Some(503), .. }));
    }
}
