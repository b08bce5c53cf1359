//! Pagination wire types shared by every list query.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Error;

/// Page size used by list views.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Page size used to load a whole collection into a selector.
pub const SELECT_LIST_PAGE_SIZE: u32 = 10_000;

// ── Filter ───────────────────────────────────────────────────────────

/// Pagination and search intent sent as the `filter` variable.
///
/// `page` is 1-based and `page_size` is positive; both are checked on
/// every mutation so a `Filter` on the wire is always valid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    page: u32,
    page_size: u32,
    term: String,
    /// Entity-specific keys (`environmentUri`, `status`, ...), sent inline.
    #[serde(flatten)]
    constraints: Map<String, Value>,
}

impl Default for Filter {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            term: String::new(),
            constraints: Map::new(),
        }
    }
}

impl Filter {
    /// First page, empty term, the given page size.
    pub fn new(page_size: u32) -> Result<Self, Error> {
        Self::default().with_page_size(page_size)
    }

    /// The "load everything" filter used to fill dropdowns.
    pub fn select_list() -> Self {
        Self {
            page_size: SELECT_LIST_PAGE_SIZE,
            ..Self::default()
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn constraints(&self) -> &Map<String, Value> {
        &self.constraints
    }

    pub fn with_page(mut self, page: u32) -> Result<Self, Error> {
        self.set_page(page)?;
        Ok(self)
    }

    pub fn with_page_size(mut self, page_size: u32) -> Result<Self, Error> {
        self.set_page_size(page_size)?;
        Ok(self)
    }

    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.term = term.into();
        self
    }

    /// Add an entity-specific key. The reserved keys are rejected.
    pub fn with_constraint(mut self, key: impl Into<String>, value: Value) -> Result<Self, Error> {
        let key = key.into();
        if matches!(key.as_str(), "page" | "pageSize" | "term") {
            return Err(Error::InvalidFilter {
                field: "constraint",
                reason: format!("'{key}' is a reserved filter key"),
            });
        }
        self.constraints.insert(key, value);
        Ok(self)
    }

    pub fn set_page(&mut self, page: u32) -> Result<(), Error> {
        if page == 0 {
            return Err(Error::InvalidFilter {
                field: "page",
                reason: "pages are numbered from 1".into(),
            });
        }
        self.page = page;
        Ok(())
    }

    pub fn set_page_size(&mut self, page_size: u32) -> Result<(), Error> {
        if page_size == 0 {
            return Err(Error::InvalidFilter {
                field: "pageSize",
                reason: "page size must be positive".into(),
            });
        }
        self.page_size = page_size;
        Ok(())
    }

    pub fn set_term(&mut self, term: impl Into<String>) {
        self.term = term.into();
    }
}

// ── Page ─────────────────────────────────────────────────────────────

/// The paginated response envelope returned by every list query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
    #[serde(default)]
    pub count: u64,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default = "first_page")]
    pub pages: u32,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub has_previous: bool,
}

fn first_page() -> u32 {
    1
}

impl<T> Default for Page<T> {
    /// The empty page shown before the first fetch completes.
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            count: 0,
            page: 1,
            pages: 1,
            has_next: false,
            has_previous: false,
        }
    }
}

impl<T> Page<T> {
    /// Whether navigating to page `n` is a real, in-range change.
    pub fn accepts_page(&self, n: u32) -> bool {
        n >= 1 && n <= self.pages && n != self.page
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            nodes: self.nodes.into_iter().map(f).collect(),
            count: self.count,
            page: self.page,
            pages: self.pages,
            has_next: self.has_next,
            has_previous: self.has_previous,
        }
    }
}
