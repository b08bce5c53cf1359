//! GraphQL wire types: operations, request body, error entries, and the
//! data-XOR-errors [`Outcome`] every execution resolves to.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;
use crate::paging::Page;

// ── Operations ───────────────────────────────────────────────────────

/// Whether an operation reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum OperationKind {
    Query,
    Mutation,
}

/// A named GraphQL request with typed variables and a typed response.
///
/// Implementors are immutable once built and are consumed by reference,
/// once per execution.
pub trait Operation {
    type Variables: Serialize;
    type Data: DeserializeOwned;

    /// The `operationName` sent on the wire.
    fn name(&self) -> &str;

    fn kind(&self) -> OperationKind;

    /// The field-selection document.
    fn document(&self) -> &str;

    fn variables(&self) -> &Self::Variables;
}

/// An operation whose response is a paginated list envelope.
pub trait PagedOperation: Operation {
    type Node;

    /// Pull the [`Page`] out of the operation-specific data wrapper.
    fn into_page(data: Self::Data) -> Page<Self::Node>;
}

/// The JSON body POSTed to the endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest<'a, V: Serialize> {
    pub operation_name: &'a str,
    pub query: &'a str,
    pub variables: &'a V,
}

impl<'a, V: Serialize> GraphQlRequest<'a, V> {
    pub fn from_operation<O>(op: &'a O) -> Self
    where
        O: Operation<Variables = V> + ?Sized,
    {
        Self {
            operation_name: op.name(),
            query: op.document(),
            variables: op.variables(),
        }
    }
}

// ── Errors ───────────────────────────────────────────────────────────

/// Where a [`GraphQlError`] came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorOrigin {
    /// Returned by the server in the response envelope.
    #[default]
    Server,
    /// Synthesized locally from a failure that produced no envelope.
    Client,
}

/// Source position of an error inside the request document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

/// One entry of the `errors` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,
    /// Response path; segments are field names or list indices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
    #[serde(skip)]
    pub origin: ErrorOrigin,
}

impl GraphQlError {
    /// A locally synthesized error carrying only a message.
    pub fn client(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: Vec::new(),
            path: None,
            extensions: None,
            origin: ErrorOrigin::Client,
        }
    }
}

// ── Outcome ──────────────────────────────────────────────────────────

/// The result of executing one operation: data XOR a non-empty error list.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Data(T),
    Errors(Vec<GraphQlError>),
}

impl<T> Outcome<T> {
    /// Single client-side error, used when no envelope was received.
    pub fn client_error(message: impl Into<String>) -> Self {
        Self::Errors(vec![GraphQlError::client(message)])
    }

    pub fn is_data(&self) -> bool {
        matches!(self, Self::Data(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Data(d) => Some(d),
            Self::Errors(_) => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Data(d) => Some(d),
            Self::Errors(_) => None,
        }
    }

    /// The error list; empty for [`Outcome::Data`].
    pub fn errors(&self) -> &[GraphQlError] {
        match self {
            Self::Data(_) => &[],
            Self::Errors(e) => e,
        }
    }

    /// Message of the first error, the one views show to the user.
    pub fn first_message(&self) -> Option<&str> {
        self.errors().first().map(|e| e.message.as_str())
    }

    /// `true` when the errors were synthesized locally, meaning the
    /// session already reported them to the error channel.
    pub fn already_surfaced(&self) -> bool {
        self.errors().iter().any(|e| e.origin == ErrorOrigin::Client)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Data(d) => Outcome::Data(f(d)),
            Self::Errors(e) => Outcome::Errors(e),
        }
    }

    pub fn into_result(self) -> Result<T, Vec<GraphQlError>> {
        match self {
            Self::Data(d) => Ok(d),
            Self::Errors(e) => Err(e),
        }
    }
}

// ── Envelope ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

impl Envelope {
    pub(crate) fn has_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(|e| !e.is_empty())
    }

    /// Decode the `{data, errors}` envelope into a typed [`Outcome`].
    ///
    /// Any error entry wins over (possibly partial) data. An envelope
    /// with neither is malformed.
    pub(crate) fn into_outcome<T: DeserializeOwned>(self, body: &str) -> Result<Outcome<T>, Error> {
        if let Some(errors) = self.errors.filter(|e| !e.is_empty()) {
            return Ok(Outcome::Errors(errors));
        }

        let Some(data) = self.data.filter(|d| !d.is_null()) else {
            return Err(Error::Deserialization {
                message: "response envelope has neither data nor errors".into(),
                body: body.to_owned(),
            });
        };

        serde_json::from_value(data)
            .map(Outcome::Data)
            .map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: body.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn decode<T: DeserializeOwned>(body: &Value) -> Result<Outcome<T>, Error> {
        let text = body.to_string();
        let envelope: Envelope = serde_json::from_str(&text).unwrap();
        envelope.into_outcome(&text)
    }

    #[test]
    fn errors_win_over_partial_data() {
        let outcome: Outcome<Value> = decode(&json!({
            "data": { "getDataset": null },
            "errors": [{
                "message": "Not authorized",
                "locations": [{ "line": 2, "column": 3 }],
                "path": ["getDataset"]
            }]
        }))
        .unwrap();

        assert_eq!(outcome.first_message(), Some("Not authorized"));
        assert!(!outcome.already_surfaced());
        let err = &outcome.errors()[0];
        assert_eq!(err.locations, vec![Location { line: 2, column: 3 }]);
        assert_eq!(err.path, Some(vec![json!("getDataset")]));
        assert_eq!(err.origin, ErrorOrigin::Server);
    }

    #[test]
    fn empty_error_list_is_treated_as_success() {
        let outcome: Outcome<Value> =
            decode(&json!({ "data": { "ok": true }, "errors": [] })).unwrap();
        assert_eq!(outcome.data(), Some(&json!({ "ok": true })));
        assert!(outcome.errors().is_empty());
    }

    #[test]
    fn envelope_without_data_or_errors_is_malformed() {
        let err = decode::<Value>(&json!({ "data": null })).unwrap_err();
        assert!(matches!(err, Error::Deserialization { .. }), "got {err:?}");
    }

    #[test]
    fn client_errors_are_marked_as_surfaced() {
        let outcome: Outcome<()> = Outcome::client_error("Network error occurred");
        assert!(outcome.already_surfaced());
        assert_eq!(outcome.into_result().unwrap_err().len(), 1);
    }

    #[test]
    fn request_body_uses_wire_names() {
        struct Ping {
            vars: Value,
        }
        impl Operation for Ping {
            type Variables = Value;
            type Data = Value;
            fn name(&self) -> &str {
                "Ping"
            }
            fn kind(&self) -> OperationKind {
                OperationKind::Query
            }
            fn document(&self) -> &str {
                "query Ping { ping }"
            }
            fn variables(&self) -> &Value {
                &self.vars
            }
        }

        let op = Ping { vars: json!({}) };
        let body = serde_json::to_value(GraphQlRequest::from_operation(&op)).unwrap();
        assert_eq!(
            body,
            json!({ "operationName": "Ping", "query": "query Ping { ping }", "variables": {} })
        );
        assert_eq!(op.kind().to_string(), "query");
    }
}
