//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use dataall_config::ConfigError;
use dataall_core::{CoreError, ErrorKind};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const MAINTENANCE: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the data.all API: {reason}")]
    #[diagnostic(
        code(dataall::connection_failed),
        help(
            "Check the endpoint URL of your profile and that the API is reachable.\n\
             Try: dataall maintenance status --insecure"
        )
    )]
    ConnectionFailed { reason: String },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(dataall::timeout),
        help("Increase the timeout with --timeout or check API responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Token rejected: {message}")]
    #[diagnostic(
        code(dataall::auth_failed),
        help("Refresh your identity token, then run: dataall config set-token")
    )]
    AuthFailed { message: String },

    #[error("No token configured for profile '{profile}'")]
    #[diagnostic(
        code(dataall::no_token),
        help(
            "Store one with: dataall config set-token\n\
             Or set the DATAALL_TOKEN environment variable."
        )
    )]
    NoToken { profile: String },

    // ── Requests ─────────────────────────────────────────────────────

    /// The API answered with GraphQL errors.
    #[error("{message}")]
    #[diagnostic(code(dataall::request))]
    Request { message: String },

    /// Already printed from the error channel; only the exit code remains.
    #[error("{message}")]
    #[diagnostic(code(dataall::reported))]
    Reported { kind: ErrorKind, message: String },

    #[error("API error: {message}")]
    #[diagnostic(code(dataall::api_error))]
    Api { message: String },

    #[error("{message}")]
    #[diagnostic(
        code(dataall::maintenance),
        help("Wait for the maintenance window to end: dataall maintenance watch")
    )]
    MaintenanceBlocked { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(dataall::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(dataall::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: dataall config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No configuration found and no --endpoint given")]
    #[diagnostic(
        code(dataall::no_config),
        help(
            "Create a config with: dataall config init\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(dataall::config))]
    Config(Box<ConfigError>),

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Operation '{action}' requires confirmation")]
    #[diagnostic(
        code(dataall::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not render output: {0}")]
    #[diagnostic(code(dataall::render))]
    Render(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. }
            | Self::Reported {
                kind: ErrorKind::Network,
                ..
            } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoToken { .. } => exit_code::AUTH,
            Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::MaintenanceBlocked { .. } => exit_code::MAINTENANCE,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Whether the message already reached the user through the
    /// error channel.
    pub fn already_shown(&self) -> bool {
        matches!(self, Self::Reported { .. })
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NoToken => CliError::NoToken {
                profile: "current".into(),
            },
            CoreError::InvalidToken { message } => CliError::AuthFailed { message },
            CoreError::ConnectionFailed { reason } => CliError::ConnectionFailed { reason },
            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },
            CoreError::Request { message } => CliError::Request { message },
            CoreError::Api { message, status: _ } | CoreError::Internal(message) => {
                CliError::Api { message }
            }
            CoreError::MaintenanceBlocked { message } => CliError::MaintenanceBlocked { message },
            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },
        }
    }
}

impl From<dataall_api::Error> for CliError {
    fn from(err: dataall_api::Error) -> Self {
        CoreError::from(err).into()
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::UnknownProfile { name } => CliError::ProfileNotFound {
                name,
                available: "(see: dataall config show)".into(),
            },
            other => CliError::Config(Box::new(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_reports_exit_as_connection_failures() {
        let err = CliError::Reported {
            kind: ErrorKind::Network,
            message: "Network error occurred".into(),
        };
        assert_eq!(err.exit_code(), exit_code::CONNECTION);
        assert!(err.already_shown());

        let err = CliError::Reported {
            kind: ErrorKind::Request,
            message: "Not authorized".into(),
        };
        assert_eq!(err.exit_code(), exit_code::GENERAL);
    }

    #[test]
    fn maintenance_refusal_has_its_own_exit_code() {
        let err: CliError = CoreError::MaintenanceBlocked {
            message: dataall_core::BLOCKED_MESSAGE.into(),
        }
        .into();
        assert_eq!(err.exit_code(), exit_code::MAINTENANCE);
        assert!(!err.already_shown());
    }

    #[test]
    fn config_validation_is_a_usage_error() {
        let err: CliError = ConfigError::Validation {
            field: "endpoints".into(),
            reason: "at least one module endpoint is required".into(),
        }
        .into();
        assert_eq!(err.exit_code(), exit_code::USAGE);
        assert_eq!(CliError::from(CoreError::NoToken).exit_code(), exit_code::AUTH);
    }
}
