use thiserror::Error;

/// Top-level error type for the `dataall-api` crate.
///
/// These are failures the caller had no chance to branch on: the request
/// never produced a GraphQL envelope. Structured GraphQL errors returned by
/// the server are *not* errors at this level, they travel inside
/// [`Outcome::Errors`](crate::Outcome::Errors).
#[derive(Debug, Error)]
pub enum Error {
    // ── Configuration ───────────────────────────────────────────────
    /// No endpoint is registered for the requested backend module.
    #[error("No GraphQL endpoint configured for module '{module}'")]
    UnknownModule { module: String },

    /// The token cannot be sent as an HTTP header value.
    #[error("Invalid token: {message}")]
    InvalidToken { message: String },

    /// A pagination filter would violate `page >= 1` / `pageSize > 0`.
    #[error("Invalid filter {field}: {reason}")]
    InvalidFilter { field: &'static str, reason: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Response ────────────────────────────────────────────────────
    /// The server answered with a non-success status and no GraphQL envelope.
    #[error("HTTP {status} from GraphQL endpoint")]
    Http { status: u16, body: String },

    /// The body was not a valid GraphQL envelope, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the request never reached the server or never
    /// came back (connect, DNS, timeout, body read).
    pub fn is_network(&self) -> bool {
        match self {
            Self::Transport(e) => !e.is_decode() && e.status().is_none(),
            Self::Timeout { .. } => true,
            _ => false,
        }
    }

    /// Returns `true` if this is a transient error worth retrying.
    ///
    /// The client itself never retries; this is a hint for callers.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } => true,
            Self::Http { status, .. } => matches!(status, 502..=504),
            _ => false,
        }
    }

    /// HTTP status attached to this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
