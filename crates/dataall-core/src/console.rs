// ── Console facade ──
//
// Entry point for consumers: owns the config, the error bus and the
// session slot, and vends list controllers and the maintenance guard.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use secrecy::SecretString;
use tracing::debug;

use crate::config::ConsoleConfig;
use crate::error::CoreError;
use crate::error_bus::ErrorBus;
use crate::list::PagedList;
use crate::maintenance::MaintenanceGuard;
use crate::session::{Session, SessionSlot};

/// Cheaply cloneable via `Arc<ConsoleInner>`.
#[derive(Debug, Clone)]
pub struct Console {
    inner: Arc<ConsoleInner>,
}

#[derive(Debug)]
struct ConsoleInner {
    config: ConsoleConfig,
    token: ArcSwapOption<SecretString>,
    slot: SessionSlot,
}

impl Console {
    pub fn new(config: ConsoleConfig) -> Self {
        Self::with_bus(config, ErrorBus::new())
    }

    /// Share an existing error bus, e.g. one the caller already renders.
    pub fn with_bus(config: ConsoleConfig, bus: ErrorBus) -> Self {
        let slot = SessionSlot::new(config.endpoints.clone(), config.transport(), bus);
        let token = ArcSwapOption::new(config.token.clone().map(Arc::new));
        Self {
            inner: Arc::new(ConsoleInner {
                config,
                token,
                slot,
            }),
        }
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.inner.config
    }

    pub fn bus(&self) -> &ErrorBus {
        self.inner.slot.bus()
    }

    // ── Token lifecycle ──────────────────────────────────────────

    /// Swap in a refreshed token. The next session request rebuilds.
    pub fn set_token(&self, token: SecretString) {
        debug!("token updated");
        self.inner.token.store(Some(Arc::new(token)));
    }

    /// Forget the token and the session built from it.
    pub fn sign_out(&self) {
        self.inner.token.store(None);
        self.inner.slot.invalidate();
    }

    // ── Sessions ─────────────────────────────────────────────────

    /// Session for the configured module, or `None` while signed out.
    pub fn try_session(&self) -> Result<Option<Arc<Session>>, CoreError> {
        self.try_session_for(&self.inner.config.module)
    }

    pub fn try_session_for(&self, module: &str) -> Result<Option<Arc<Session>>, CoreError> {
        let token = self.inner.token.load_full();
        self.inner.slot.current(module, token.as_deref())
    }

    /// Like [`try_session`](Self::try_session) but treats "not ready"
    /// as [`CoreError::NoToken`].
    pub fn session(&self) -> Result<Arc<Session>, CoreError> {
        self.try_session()?.ok_or(CoreError::NoToken)
    }

    // ── Controllers ──────────────────────────────────────────────

    /// A list controller sized by the configured page size.
    pub fn list<T>(&self) -> Result<PagedList<T>, CoreError> {
        PagedList::new(self.inner.config.page_size)
    }

    /// Maintenance guard on the current session, polling at the
    /// configured interval.
    pub fn maintenance(&self) -> Result<MaintenanceGuard, CoreError> {
        Ok(MaintenanceGuard::spawn(
            self.session()?,
            self.inner.config.maintenance_poll_interval,
            self.inner.config.is_admin,
        ))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use dataall_api::EndpointMap;

    use super::*;

    fn config() -> ConsoleConfig {
        ConsoleConfig {
            endpoints: EndpointMap::new()
                .with("core", "http://localhost:9/graphql/api")
                .unwrap(),
            ..ConsoleConfig::default()
        }
    }

    #[test]
    fn no_token_means_not_ready() {
        let console = Console::new(config());
        assert!(console.try_session().unwrap().is_none());
        assert!(matches!(console.session(), Err(CoreError::NoToken)));
    }

    #[test]
    fn token_refresh_rebuilds_session() {
        let console = Console::new(config());
        console.set_token(SecretString::from("a"));
        let first = console.session().unwrap();
        assert!(Arc::ptr_eq(&first, &console.session().unwrap()));

        console.set_token(SecretString::from("b"));
        let second = console.session().unwrap();
        assert!(!Arc::ptr_eq(&first, &second));

        console.sign_out();
        assert!(console.try_session().unwrap().is_none());
    }

    #[test]
    fn list_uses_configured_page_size() {
        let console = Console::new(ConsoleConfig {
            page_size: 25,
            ..config()
        });
        let list = console.list::<u32>().unwrap();
        assert_eq!(list.filter().page_size(), 25);
    }
}
