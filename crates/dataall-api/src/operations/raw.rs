//! Untyped escape hatch for operations outside the catalogue.

use serde_json::Value;

use crate::graphql::{Operation, OperationKind};

/// An operation built at runtime from a document and a JSON variable map.
/// Its data decodes as an arbitrary [`Value`].
#[derive(Debug, Clone)]
pub struct RawOperation {
    name: String,
    kind: OperationKind,
    document: String,
    variables: Value,
}

impl RawOperation {
    pub fn query(name: impl Into<String>, document: impl Into<String>) -> Self {
        Self::new(name, OperationKind::Query, document)
    }

    pub fn mutation(name: impl Into<String>, document: impl Into<String>) -> Self {
        Self::new(name, OperationKind::Mutation, document)
    }

    pub fn new(name: impl Into<String>, kind: OperationKind, document: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            document: document.into(),
            variables: Value::Object(serde_json::Map::new()),
        }
    }

    #[must_use]
    pub fn with_variables(mut self, variables: Value) -> Self {
        self.variables = variables;
        self
    }
}

impl Operation for RawOperation {
    type Variables = Value;
    type Data = Value;

    fn name(&self) -> &str {
        &self.name
    }
    fn kind(&self) -> OperationKind {
        self.kind
    }
    fn document(&self) -> &str {
        &self.document
    }
    fn variables(&self) -> &Value {
        &self.variables
    }
}
