// ── Maintenance window guard ──
//
// Polls the window status on an interval and derives what the signed-in
// user may still do. Admin actions (start/stop/reindex) go through the
// same session and report refusals on the error bus.

use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use chrono::{DateTime, Utc};
use dataall_api::{OperationKind, Outcome};
use dataall_api::operations::{
    GetMaintenanceWindowStatus, MaintenanceMode, MaintenanceWindow, StartMaintenanceWindow,
    StartReindexCatalog, StopMaintenanceWindow,
};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::error::CoreError;
use crate::error_bus::ErrorKind;
use crate::session::Session;

/// Text shown to users whose request was refused during maintenance.
pub const BLOCKED_MESSAGE: &str = "Access Restricted: data.all is currently undergoing maintenance, and your actions are temporarily blocked.";

/// Operations that stay reachable under `NO-ACCESS`.
const ALLOWED_WHEN_BLOCKED: [&str; 2] = ["getGroupsForUser", "getMaintenanceWindowStatus"];

// ── Access ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Access {
    Full,
    ReadOnly,
    Blocked,
}

impl Access {
    pub fn for_window(window: MaintenanceWindow, is_admin: bool) -> Self {
        if is_admin || !window.in_effect() {
            return Self::Full;
        }
        match window.mode {
            Some(MaintenanceMode::NoAccess) => Self::Blocked,
            Some(MaintenanceMode::ReadOnly) => Self::ReadOnly,
            None => Self::Full,
        }
    }

    /// Whether an operation of this kind and name may be sent.
    pub fn permits(self, kind: OperationKind, operation_name: &str) -> bool {
        match self {
            Self::Full => true,
            Self::ReadOnly => kind == OperationKind::Query,
            Self::Blocked => ALLOWED_WHEN_BLOCKED
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(operation_name)),
        }
    }

    /// `Err(MaintenanceBlocked)` unless [`permits`](Self::permits).
    pub fn check(self, kind: OperationKind, operation_name: &str) -> Result<(), CoreError> {
        if self.permits(kind, operation_name) {
            Ok(())
        } else {
            Err(CoreError::MaintenanceBlocked {
                message: BLOCKED_MESSAGE.into(),
            })
        }
    }
}

// ── MaintenanceState ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MaintenanceState {
    pub window: MaintenanceWindow,
    pub access: Access,
    /// `None` until the first successful poll.
    pub checked_at: Option<DateTime<Utc>>,
}

impl Default for MaintenanceState {
    fn default() -> Self {
        Self {
            window: MaintenanceWindow::INACTIVE,
            access: Access::Full,
            checked_at: None,
        }
    }
}

// ── MaintenanceGuard ─────────────────────────────────────────────

/// Shared handle; clones observe the same state and poller. The poller
/// stops once the last clone is dropped.
#[derive(Debug, Clone)]
pub struct MaintenanceGuard {
    inner: Arc<GuardInner>,
}

#[derive(Debug)]
struct GuardInner {
    session: Arc<Session>,
    is_admin: bool,
    state: watch::Sender<MaintenanceState>,
    cancel: CancellationToken,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl MaintenanceGuard {
    /// A guard that only polls when asked via [`check_now`](Self::check_now).
    pub fn new(session: Arc<Session>, is_admin: bool) -> Self {
        let (state, _) = watch::channel(MaintenanceState::default());
        Self {
            inner: Arc::new(GuardInner {
                session,
                is_admin,
                state,
                cancel: CancellationToken::new(),
                task: Mutex::new(None),
            }),
        }
    }

    /// Create a guard and start polling every `interval`.
    ///
    /// The first poll runs immediately. Must be called inside a tokio
    /// runtime. A zero interval behaves like [`new`](Self::new).
    pub fn spawn(session: Arc<Session>, interval: Duration, is_admin: bool) -> Self {
        let guard = Self::new(session, is_admin);
        if !interval.is_zero() {
            let handle = tokio::spawn(poll_task(
                Arc::downgrade(&guard.inner),
                interval,
                guard.inner.cancel.clone(),
            ));
            if let Ok(mut slot) = guard.inner.task.lock() {
                *slot = Some(handle);
            }
        }
        guard
    }

    pub fn state(&self) -> MaintenanceState {
        *self.inner.state.borrow()
    }

    pub fn access(&self) -> Access {
        self.inner.state.borrow().access
    }

    pub fn subscribe(&self) -> watch::Receiver<MaintenanceState> {
        self.inner.state.subscribe()
    }

    /// Stop the poller. Idempotent.
    pub fn shutdown(&self) {
        self.inner.cancel.cancel();
        let handle = self.inner.task.lock().ok().and_then(|mut slot| slot.take());
        if let Some(handle) = handle {
            handle.abort();
        }
    }

    /// Poll once. On failure the last known state is kept and the errors
    /// are returned; [`Outcome::already_surfaced`] tells whether the
    /// session published them.
    pub async fn check_now(&self) -> Outcome<MaintenanceState> {
        let outcome = self
            .inner
            .session
            .execute(&GetMaintenanceWindowStatus::new())
            .await;

        let data = match outcome {
            Outcome::Data(data) => data,
            Outcome::Errors(errors) => {
                debug!(
                    error = errors.first().map(|e| e.message.as_str()).unwrap_or_default(),
                    "maintenance status check failed, keeping last state"
                );
                return Outcome::Errors(errors);
            }
        };

        let window = data.get_maintenance_window_status.unwrap_or_default();
        let next = MaintenanceState {
            window,
            access: Access::for_window(window, self.inner.is_admin),
            checked_at: Some(Utc::now()),
        };

        let previous = self.inner.state.send_replace(next);
        if previous.window != next.window {
            info!(
                status = %window.status,
                mode = window.mode.map(|m| m.to_string()).unwrap_or_default(),
                access = %next.access,
                "maintenance window changed"
            );
        }
        Outcome::Data(next)
    }

    // ── Admin actions ────────────────────────────────────────────

    /// Start a window in `mode`. Returns whether the server accepted it.
    pub async fn start(&self, mode: MaintenanceMode) -> bool {
        let outcome = self
            .inner
            .session
            .execute(&StartMaintenanceWindow::new(mode))
            .await
            .map(|d| d.start_maintenance_window);
        self.settle("Could not start maintenance window", outcome).await
    }

    pub async fn stop(&self) -> bool {
        let outcome = self
            .inner
            .session
            .execute(&StopMaintenanceWindow::new())
            .await
            .map(|d| d.stop_maintenance_window);
        self.settle("Could not stop maintenance window", outcome).await
    }

    /// Trigger a catalog reindex, optionally purging deleted entities.
    pub async fn reindex(&self, handle_deletes: bool) -> bool {
        let outcome = self
            .inner
            .session
            .execute(&StartReindexCatalog::new(handle_deletes))
            .await
            .map(|d| d.start_reindex_catalog);
        self.settle("Could not start catalog reindex", outcome).await
    }

    /// Report a refused admin action and refresh the state after a
    /// successful one.
    async fn settle(&self, failure: &str, outcome: Outcome<Option<bool>>) -> bool {
        let accepted = match &outcome {
            Outcome::Data(ok) => ok.unwrap_or(false),
            Outcome::Errors(_) => false,
        };

        if accepted {
            self.check_now().await;
        } else if !outcome.already_surfaced() {
            let message = outcome
                .first_message()
                .map_or_else(|| failure.to_owned(), |m| format!("{failure}: {m}"));
            self.inner.session.bus().report(ErrorKind::Maintenance, message);
        }
        accepted
    }
}

impl Drop for GuardInner {
    fn drop(&mut self) {
        self.cancel.cancel();
        if let Ok(slot) = self.task.get_mut() {
            if let Some(handle) = slot.take() {
                handle.abort();
            }
        }
    }
}

/// Periodic status poller. The immediate first tick doubles as the
/// initial check. Ends once the last guard handle is dropped.
async fn poll_task(weak: Weak<GuardInner>, period: Duration, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                let Some(inner) = weak.upgrade() else { break };
                debug!("maintenance poll tick");
                let _ = MaintenanceGuard { inner }.check_now().await;
            }
        }
    }
    debug!("maintenance poller stopped");
}

#[cfg(test)]
mod tests {
    use dataall_api::operations::MaintenanceStatus;

    use super::*;

    fn window(status: MaintenanceStatus, mode: Option<MaintenanceMode>) -> MaintenanceWindow {
        MaintenanceWindow { status, mode }
    }

    #[test]
    fn inactive_window_grants_full_access() {
        let w = window(MaintenanceStatus::Inactive, Some(MaintenanceMode::NoAccess));
        assert_eq!(Access::for_window(w, false), Access::Full);
    }

    #[test]
    fn pending_and_active_windows_gate_non_admins() {
        for status in [MaintenanceStatus::Pending, MaintenanceStatus::Active] {
            let blocked = window(status, Some(MaintenanceMode::NoAccess));
            let read_only = window(status, Some(MaintenanceMode::ReadOnly));
            assert_eq!(Access::for_window(blocked, false), Access::Blocked);
            assert_eq!(Access::for_window(read_only, false), Access::ReadOnly);
            assert_eq!(Access::for_window(blocked, true), Access::Full);
        }
    }

    #[test]
    fn read_only_allows_queries_only() {
        assert!(Access::ReadOnly.permits(OperationKind::Query, "ListDatasets"));
        assert!(!Access::ReadOnly.permits(OperationKind::Mutation, "createDataset"));
    }

    #[test]
    fn blocked_allows_bootstrap_queries_case_insensitively() {
        assert!(Access::Blocked.permits(OperationKind::Query, "GetMaintenanceWindowStatus"));
        assert!(Access::Blocked.permits(OperationKind::Query, "getgroupsforuser"));
        assert!(!Access::Blocked.permits(OperationKind::Query, "ListDatasets"));
        assert!(matches!(
            Access::Blocked.check(OperationKind::Query, "ListDatasets"),
            Err(CoreError::MaintenanceBlocked { .. })
        ));
    }
}
