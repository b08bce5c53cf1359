//! Client-side core between `dataall-api` and presenting layers (CLI).
//!
//! - **[`Session`]**: transport bound to one token and one backend module.
//!   [`Session::execute`] never fails: transport failures are published on
//!   the [`ErrorBus`] and come back as a synthesized error list, while
//!   GraphQL errors pass through untouched for the caller to branch on.
//!
//! - **[`SessionSlot`]**: keeps one session current and rebuilds it when the
//!   token or module changes.
//!
//! - **[`PagedList<T>`]**: generic paginated fetch controller with guarded
//!   page navigation and stale-response suppression.
//!
//! - **[`MaintenanceGuard`]**: polls the maintenance window and derives the
//!   user's [`Access`].
//!
//! - **[`Console`]**: facade wiring the above from a [`ConsoleConfig`].

pub mod config;
pub mod console;
pub mod error;
pub mod error_bus;
pub mod list;
pub mod maintenance;
pub mod session;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ConsoleConfig, TlsVerification};
pub use console::Console;
pub use error::CoreError;
pub use error_bus::{ErrorAction, ErrorBus, ErrorEvent, ErrorKind, NETWORK_ERROR_MESSAGE};
pub use list::{FetchOutcome, FetchStatus, ListState, PagedList};
pub use maintenance::{Access, BLOCKED_MESSAGE, MaintenanceGuard, MaintenanceState};
pub use session::{Session, SessionSlot};
