// ── Session ──
//
// A request transport bound to one token and one backend module, plus
// the slot that keeps exactly one of them current.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use dataall_api::{EndpointMap, GraphQlClient, Operation, Outcome, TransportConfig};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use url::Url;

use crate::error::CoreError;
use crate::error_bus::{ErrorBus, ErrorEvent, ErrorKind, NETWORK_ERROR_MESSAGE};

// ── Session ──────────────────────────────────────────────────────

/// Authenticated transport for one backend module.
///
/// Read-only after creation and safe to share between any number of
/// concurrent callers.
#[derive(Debug)]
pub struct Session {
    module: String,
    token: SecretString,
    client: GraphQlClient,
    bus: ErrorBus,
}

impl Session {
    /// Build a session, or `Ok(None)` while no usable token exists.
    ///
    /// A blank token counts as absent. An unknown module or a token that
    /// cannot be sent as a header is an `Err`.
    pub fn create(
        module: &str,
        token: Option<&SecretString>,
        endpoints: &EndpointMap,
        bus: ErrorBus,
        transport: &TransportConfig,
    ) -> Result<Option<Self>, CoreError> {
        let Some(token) = token.filter(|t| !t.expose_secret().trim().is_empty()) else {
            debug!(module, "no token yet, session not ready");
            return Ok(None);
        };

        let endpoint = endpoints.resolve(module)?.clone();
        let client = GraphQlClient::with_token(endpoint, token, transport)?;
        debug!(module, endpoint = %client.endpoint(), "session created");

        Ok(Some(Self {
            module: module.to_owned(),
            token: token.clone(),
            client,
            bus,
        }))
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn endpoint(&self) -> &Url {
        self.client.endpoint()
    }

    pub fn bus(&self) -> &ErrorBus {
        &self.bus
    }

    fn is_for(&self, module: &str, token: &SecretString) -> bool {
        self.module == module && self.token.expose_secret() == token.expose_secret()
    }

    /// Run one operation. Never fails.
    ///
    /// GraphQL errors come back untouched and are *not* reported. Any
    /// failure that produced no envelope is published on the error bus
    /// exactly once and returned as a single client-origin error.
    pub async fn execute<O>(&self, op: &O) -> Outcome<O::Data>
    where
        O: Operation + ?Sized,
    {
        match self.client.execute(op).await {
            Ok(outcome) => outcome,
            Err(err) if err.is_network() => {
                self.bus.publish(
                    ErrorEvent::new(ErrorKind::Network, NETWORK_ERROR_MESSAGE)
                        .with_detail(err.to_string()),
                );
                Outcome::client_error(NETWORK_ERROR_MESSAGE)
            }
            Err(err) => {
                let message = err.to_string();
                let mut event = ErrorEvent::new(ErrorKind::Unhandled, message.clone());
                if let dataall_api::Error::Http { body, .. }
                | dataall_api::Error::Deserialization { body, .. } = &err
                {
                    event = event.with_detail(body.clone());
                }
                self.bus.publish(event);
                Outcome::client_error(message)
            }
        }
    }
}

// ── SessionSlot ──────────────────────────────────────────────────

/// Holds the current [`Session`] and replaces it when the token or the
/// module changes. There is nothing to tear down: the old session is
/// simply dropped once its last in-flight request finishes.
#[derive(Debug)]
pub struct SessionSlot {
    endpoints: EndpointMap,
    transport: TransportConfig,
    bus: ErrorBus,
    current: ArcSwapOption<Session>,
}

impl SessionSlot {
    pub fn new(endpoints: EndpointMap, transport: TransportConfig, bus: ErrorBus) -> Self {
        Self {
            endpoints,
            transport,
            bus,
            current: ArcSwapOption::empty(),
        }
    }

    /// The session for `module` and `token`, built lazily.
    ///
    /// Returns `Ok(None)` (and drops any cached session) while the token
    /// is absent.
    pub fn current(
        &self,
        module: &str,
        token: Option<&SecretString>,
    ) -> Result<Option<Arc<Session>>, CoreError> {
        if let (Some(token), Some(cached)) = (token, self.current.load_full()) {
            if cached.is_for(module, token) {
                return Ok(Some(cached));
            }
        }

        let fresh = Session::create(module, token, &self.endpoints, self.bus.clone(), &self.transport)?
            .map(Arc::new);
        if fresh.is_some() {
            debug!(module, "replacing current session");
        }
        self.current.store(fresh.clone());
        Ok(fresh)
    }

    /// Drop the cached session (sign-out).
    pub fn invalidate(&self) {
        self.current.store(None);
    }

    pub fn is_ready(&self) -> bool {
        self.current.load().is_some()
    }

    pub fn bus(&self) -> &ErrorBus {
        &self.bus
    }
}
