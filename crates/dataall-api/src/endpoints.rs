//! Static module name → GraphQL endpoint table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Error;

/// The module every console view talks to unless told otherwise.
pub const DEFAULT_MODULE: &str = "core";

/// Maps a logical backend module (`core`, `search`, ...) to its endpoint.
///
/// Read once when a session is built; sessions never look it up again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EndpointMap {
    endpoints: BTreeMap<String, Url>,
}

impl EndpointMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the endpoint for `module`.
    pub fn insert(&mut self, module: impl Into<String>, url: Url) -> Option<Url> {
        self.endpoints.insert(module.into(), url)
    }

    /// Builder-style [`insert`](Self::insert) that parses the URL.
    pub fn with(mut self, module: impl Into<String>, url: &str) -> Result<Self, Error> {
        self.endpoints.insert(module.into(), Url::parse(url)?);
        Ok(self)
    }

    /// Resolve the endpoint for `module`.
    pub fn resolve(&self, module: &str) -> Result<&Url, Error> {
        self.endpoints.get(module).ok_or_else(|| Error::UnknownModule {
            module: module.to_owned(),
        })
    }

    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.endpoints.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

impl FromIterator<(String, Url)> for EndpointMap {
    fn from_iter<I: IntoIterator<Item = (String, Url)>>(iter: I) -> Self {
        Self {
            endpoints: iter.into_iter().collect(),
        }
    }
}
