// ── Runtime console configuration ──
//
// Describes *where* and *as whom* to talk to a data.all backend. Carries
// the token and connection tuning but never touches disk: the CLI
// resolves profiles and hands a `ConsoleConfig` in.

use std::path::PathBuf;
use std::time::Duration;

use dataall_api::{DEFAULT_MODULE, DEFAULT_PAGE_SIZE, EndpointMap, TlsMode, TransportConfig};
use secrecy::SecretString;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (local development stacks).
    DangerAcceptInvalid,
}

#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Backend module name → GraphQL endpoint.
    pub endpoints: EndpointMap,
    /// Module every session talks to unless overridden.
    pub module: String,
    /// Identity token. `None` means "not signed in yet".
    pub token: Option<SecretString>,
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Default page size of list views.
    pub page_size: u32,
    /// Period of the maintenance status poll. Zero disables polling.
    pub maintenance_poll_interval: Duration,
    /// Tenant administrators are never gated by maintenance windows.
    pub is_admin: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            endpoints: EndpointMap::new(),
            module: DEFAULT_MODULE.into(),
            token: None,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            page_size: DEFAULT_PAGE_SIZE,
            maintenance_poll_interval: Duration::from_secs(30),
            is_admin: false,
        }
    }
}

impl ConsoleConfig {
    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: match &self.tls {
                TlsVerification::SystemDefaults => TlsMode::System,
                TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
                TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
            },
            timeout: (!self.timeout.is_zero()).then_some(self.timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_timeout_means_unbounded() {
        let config = ConsoleConfig {
            timeout: Duration::ZERO,
            ..ConsoleConfig::default()
        };
        assert!(config.transport().timeout.is_none());
        assert_eq!(
            ConsoleConfig::default().transport().timeout,
            Some(Duration::from_secs(30))
        );
    }
}
