// ── Paginated list controller ──
//
// Drives one list view's fetch cycle: holds the Filter and the last Page,
// tracks loading state, and guards page navigation. Every fetch is a full
// replace. Completions that lost the race to a newer fetch are dropped.

use std::sync::Arc;

use dataall_api::{Filter, Outcome, Page, PagedOperation};
use tokio::sync::watch;
use tracing::debug;

use crate::error::CoreError;
use crate::error_bus::{ErrorEvent, ErrorKind};
use crate::session::Session;

/// Shown when the server reports failure with an empty message.
const UNKNOWN_ERROR: &str = "Unknown error";

// ── State ────────────────────────────────────────────────────────

/// `Idle → Loading → {Ready, Errored}`, and back to `Loading` on fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Errored(String),
}

impl FetchStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Snapshot published to subscribers after every change.
#[derive(Debug)]
pub struct ListState<T> {
    pub filter: Filter,
    pub page: Arc<Page<T>>,
    pub status: FetchStatus,
    generation: u64,
}

impl<T> Clone for ListState<T> {
    fn clone(&self) -> Self {
        Self {
            filter: self.filter.clone(),
            page: Arc::clone(&self.page),
            status: self.status.clone(),
            generation: self.generation,
        }
    }
}

impl<T> ListState<T> {
    /// Number of fetches started so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// How a call to [`PagedList::fetch`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The page was replaced.
    Updated,
    /// The request failed; the previous page is untouched.
    Failed(String),
    /// A newer fetch started meanwhile; this result was discarded.
    Superseded,
}

// ── PagedList ────────────────────────────────────────────────────

/// Generic paginated fetch controller. Clones share state.
#[derive(Debug)]
pub struct PagedList<T> {
    state: Arc<watch::Sender<ListState<T>>>,
}

impl<T> Clone for PagedList<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T> Default for PagedList<T> {
    fn default() -> Self {
        Self::with_filter(Filter::default())
    }
}

impl<T> PagedList<T> {
    /// First page, empty term.
    pub fn new(page_size: u32) -> Result<Self, CoreError> {
        Ok(Self::with_filter(Filter::new(page_size)?))
    }

    pub fn with_filter(filter: Filter) -> Self {
        let (tx, _) = watch::channel(ListState {
            filter,
            page: Arc::new(Page::default()),
            status: FetchStatus::Idle,
            generation: 0,
        });
        Self {
            state: Arc::new(tx),
        }
    }

    // ── Accessors ────────────────────────────────────────────────

    pub fn filter(&self) -> Filter {
        self.state.borrow().filter.clone()
    }

    pub fn page(&self) -> Arc<Page<T>> {
        Arc::clone(&self.state.borrow().page)
    }

    pub fn status(&self) -> FetchStatus {
        self.state.borrow().status.clone()
    }

    pub fn snapshot(&self) -> ListState<T> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ListState<T>> {
        self.state.subscribe()
    }

    // ── Filter changes (never fetch) ─────────────────────────────

    /// Update the term as the user types.
    pub fn set_search_term(&self, term: &str) -> bool {
        self.state.send_if_modified(|s| {
            if s.filter.term() == term {
                return false;
            }
            s.filter.set_term(term);
            true
        })
    }

    /// Commit a search: set the term and go back to page 1.
    pub fn search(&self, term: &str) -> bool {
        self.state.send_if_modified(|s| {
            if s.filter.term() == term && s.filter.page() == 1 {
                return false;
            }
            s.filter.set_term(term);
            s.filter.set_page(1).is_ok()
        })
    }

    /// Move to page `n` if it exists and differs from the current page.
    ///
    /// A rejected change leaves the state untouched and notifies nobody.
    pub fn set_page(&self, n: u32) -> bool {
        self.state.send_if_modified(|s| {
            if !s.page.accepts_page(n) || s.filter.page() == n {
                return false;
            }
            s.filter.set_page(n).is_ok()
        })
    }

    /// Change the page size and return to page 1.
    pub fn set_page_size(&self, page_size: u32) -> Result<bool, CoreError> {
        let mut result = Ok(false);
        self.state.send_if_modified(|s| {
            if s.filter.page_size() == page_size {
                return false;
            }
            match s.filter.clone().with_page_size(page_size).and_then(|f| f.with_page(1)) {
                Ok(filter) => {
                    s.filter = filter;
                    result = Ok(true);
                    true
                }
                Err(e) => {
                    result = Err(e.into());
                    false
                }
            }
        });
        result
    }

    /// Replace the whole filter, e.g. to add entity constraints.
    pub fn set_filter(&self, filter: Filter) {
        self.state.send_modify(|s| s.filter = filter);
    }

    // ── Fetch ────────────────────────────────────────────────────

    /// Run the list query for the current filter.
    ///
    /// Server errors are forwarded to the error bus; errors the session
    /// synthesized were published there already and are not repeated.
    pub async fn fetch<O, F>(&self, session: &Session, build: F) -> FetchOutcome
    where
        O: PagedOperation<Node = T>,
        F: FnOnce(Filter) -> O,
    {
        let mut generation = 0;
        let mut filter = Filter::default();
        self.state.send_modify(|s| {
            s.generation += 1;
            generation = s.generation;
            filter.clone_from(&s.filter);
            s.status = FetchStatus::Loading;
        });

        let op = build(filter);
        debug!(operation = op.name(), generation, "list fetch started");
        let outcome = session.execute(&op).await;
        let surfaced = outcome.already_surfaced();

        let mut result = FetchOutcome::Superseded;
        self.state.send_if_modified(|s| {
            if s.generation != generation {
                return false;
            }
            result = match outcome {
                Outcome::Data(data) => {
                    s.page = Arc::new(O::into_page(data));
                    s.status = FetchStatus::Ready;
                    FetchOutcome::Updated
                }
                Outcome::Errors(errors) => {
                    let message = errors
                        .first()
                        .map(|e| e.message.as_str())
                        .filter(|m| !m.is_empty())
                        .unwrap_or(UNKNOWN_ERROR)
                        .to_owned();
                    if !surfaced {
                        session
                            .bus()
                            .publish(ErrorEvent::new(ErrorKind::Request, message.clone()));
                    }
                    s.status = FetchStatus::Errored(message.clone());
                    FetchOutcome::Failed(message)
                }
            };
            true
        });

        if result == FetchOutcome::Superseded {
            debug!(generation, "list fetch superseded, result discarded");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn with_pages(list: &PagedList<u32>, page: u32, pages: u32) {
        list.state.send_modify(|s| {
            s.page = Arc::new(Page {
                nodes: vec![],
                count: u64::from(pages) * 10,
                page,
                pages,
                has_next: page < pages,
                has_previous: page > 1,
            });
            s.status = FetchStatus::Ready;
        });
    }

    #[test]
    fn initial_state_is_idle_first_page() {
        let list: PagedList<u32> = PagedList::default();
        let filter = list.filter();
        assert_eq!(filter.page(), 1);
        assert_eq!(filter.page_size(), 10);
        assert_eq!(filter.term(), "");
        assert_eq!(list.status(), FetchStatus::Idle);
        assert_eq!(*list.page(), Page::default());
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert!(PagedList::<u32>::new(0).is_err());
        let list: PagedList<u32> = PagedList::default();
        assert!(list.set_page_size(0).is_err());
        assert_eq!(list.filter().page_size(), 10);
    }

    #[test]
    fn out_of_range_or_same_page_is_a_silent_noop() {
        let list: PagedList<u32> = PagedList::default();
        with_pages(&list, 1, 3);
        let rx = list.subscribe();

        assert!(!list.set_page(4));
        assert!(!list.set_page(1));
        assert!(!list.set_page(0));
        assert!(!rx.has_changed().unwrap());
        assert_eq!(list.filter().page(), 1);

        assert!(list.set_page(3));
        assert!(rx.has_changed().unwrap());
        assert_eq!(list.filter().page(), 3);
    }

    #[test]
    fn typing_does_not_reset_page_but_search_does() {
        let list: PagedList<u32> = PagedList::default();
        with_pages(&list, 1, 3);
        assert!(list.set_page(2));

        assert!(list.set_search_term("sal"));
        assert_eq!(list.filter().page(), 2);
        assert!(!list.set_search_term("sal"));

        assert!(list.search("sales"));
        assert_eq!(list.filter().term(), "sales");
        assert_eq!(list.filter().page(), 1);
        assert!(!list.search("sales"));
    }

    #[test]
    fn page_size_change_returns_to_first_page() {
        let list: PagedList<u32> = PagedList::default();
        with_pages(&list, 1, 3);
        list.set_page(3);
        assert!(list.set_page_size(25).unwrap());
        let filter = list.filter();
        assert_eq!(filter.page_size(), 25);
        assert_eq!(filter.page(), 1);
        assert!(!list.set_page_size(25).unwrap());
    }

    #[test]
    fn clones_share_state() {
        let a: PagedList<u32> = PagedList::default();
        let b = a.clone();
        a.set_search_term("x");
        assert_eq!(b.filter().term(), "x");
    }
}
