//! `queryEnums`: server-side enum catalogues used to populate selectors.

use serde::{Deserialize, Serialize};

use crate::graphql::{Operation, OperationKind};

const QUERY_ENUMS: &str = r"
query enumsQuery($enums_names: [String]) {
  queryEnums(enums_names: $enums_names) {
    name
    elements {
      name
      value
    }
  }
}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumElement {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDefinition {
    pub name: String,
    #[serde(default)]
    pub elements: Vec<EnumElement>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnumsVariables {
    pub enums_names: Vec<String>,
}

/// `queryEnums(enums_names)`.
#[derive(Debug, Clone)]
pub struct FetchEnums {
    variables: EnumsVariables,
}

impl FetchEnums {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            variables: EnumsVariables {
                enums_names: names.into_iter().map(Into::into).collect(),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchEnumsData {
    #[serde(default)]
    pub query_enums: Vec<EnumDefinition>,
}

impl FetchEnumsData {
    /// Elements of the named enum, or an empty slice if the server omitted it.
    pub fn elements(&self, name: &str) -> &[EnumElement] {
        self.query_enums
            .iter()
            .find(|e| e.name == name)
            .map_or(&[], |e| e.elements.as_slice())
    }
}

impl Operation for FetchEnums {
    type Variables = EnumsVariables;
    type Data = FetchEnumsData;

    fn name(&self) -> &str {
        "enumsQuery"
    }
    fn kind(&self) -> OperationKind {
        OperationKind::Query
    }
    fn document(&self) -> &str {
        QUERY_ENUMS
    }
    fn variables(&self) -> &EnumsVariables {
        &self.variables
    }
}
