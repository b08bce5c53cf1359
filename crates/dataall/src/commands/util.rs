//! Shared helpers for command handlers.

use std::sync::Arc;

use dataall_api::{Filter, OperationKind, Outcome, Page, PagedOperation};
use dataall_core::{Console, ErrorAction, FetchOutcome, MaintenanceGuard, PagedList, Session};
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::debug;

use crate::cli::ListArgs;
use crate::error::CliError;

/// Nodes collected by a list command plus the last page fetched.
pub struct Listing<T> {
    pub nodes: Vec<T>,
    pub last: Arc<Page<T>>,
}

/// Error-channel events published from now on.
pub type Events = broadcast::Receiver<ErrorAction>;

/// Check the maintenance window once and refuse what it forbids.
///
/// A check that failed in the session (unreachable API, unusable
/// response) was already reported and ends the command. A GraphQL error
/// from the status query lets the command proceed.
pub async fn ensure_access(
    console: &Console,
    session: &Arc<Session>,
    kind: OperationKind,
    operation_name: &str,
) -> Result<(), CliError> {
    let mut events = console.bus().subscribe();
    let guard = MaintenanceGuard::new(Arc::clone(session), console.config().is_admin);
    let outcome = guard.check_now().await;
    if outcome.already_surfaced() {
        let fallback = outcome.first_message().unwrap_or_default().to_owned();
        return Err(reported(&mut events, fallback));
    }
    if !outcome.is_data() {
        debug!("maintenance status unavailable, continuing");
    }
    Ok(guard.access().check(kind, operation_name)?)
}

/// Error for a failure that was published on the error channel since
/// `events` subscribed. Falls back to a plain request error.
pub fn reported(events: &mut Events, fallback: String) -> CliError {
    let mut last = None;
    loop {
        match events.try_recv() {
            Ok(ErrorAction::SetError(event)) => last = Some(event),
            Ok(ErrorAction::ClearError) | Err(TryRecvError::Lagged(_)) => {}
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }
    match last {
        Some(event) => CliError::Reported {
            kind: event.kind,
            message: event.message,
        },
        None => CliError::Request { message: fallback },
    }
}

/// Unwrap an outcome of a one-shot operation.
///
/// GraphQL errors were not published anywhere yet and become
/// [`CliError::Request`]; session-synthesized ones were.
pub fn settle<T>(events: &mut Events, outcome: Outcome<T>) -> Result<T, CliError> {
    let surfaced = outcome.already_surfaced();
    match outcome {
        Outcome::Data(data) => Ok(data),
        Outcome::Errors(errors) => {
            let message = errors
                .first()
                .map(|e| e.message.clone())
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "Unknown error".into());
            if surfaced {
                Err(reported(events, message))
            } else {
                Err(CliError::Request { message })
            }
        }
    }
}

/// Run a paginated list command: maintenance check, then one page or,
/// with `--all`, every page in order.
pub async fn fetch_list<T, O, F>(
    console: &Console,
    args: &ListArgs,
    build: F,
) -> Result<Listing<T>, CliError>
where
    T: Clone,
    O: PagedOperation<Node = T>,
    F: Fn(Filter) -> O,
{
    let page_size = args.page_size.unwrap_or(console.config().page_size);
    let mut filter = Filter::new(page_size)?.with_page(args.page)?;
    if let Some(ref term) = args.term {
        filter = filter.with_term(term.as_str());
    }

    let session = console.session()?;
    let probe = build(filter.clone());
    ensure_access(console, &session, probe.kind(), probe.name()).await?;

    let list: PagedList<T> = PagedList::with_filter(filter);
    let mut events = console.bus().subscribe();

    let mut nodes = Vec::new();
    loop {
        match list.fetch(&session, &build).await {
            FetchOutcome::Updated => {}
            FetchOutcome::Failed(message) => return Err(reported(&mut events, message)),
            FetchOutcome::Superseded => {
                return Err(CliError::Api {
                    message: "list fetch was superseded".into(),
                });
            }
        }
        let page = list.page();
        nodes.extend(page.nodes.iter().cloned());
        if !args.all || !page.has_next || !list.set_page(page.page + 1) {
            return Ok(Listing { nodes, last: page });
        }
        debug!(page = page.page + 1, of = page.pages, "fetching next page");
    }
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// `Some(value)` as text, `-` otherwise.
pub fn or_dash(value: Option<&str>) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or("-").to_owned()
}

/// The ISO date part of an API timestamp.
pub fn date_only(value: Option<&str>) -> String {
    or_dash(value.map(|v| v.split('T').next().unwrap_or(v)))
}
