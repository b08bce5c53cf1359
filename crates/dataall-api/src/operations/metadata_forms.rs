//! Metadata form list query.

use serde::{Deserialize, Serialize};

use super::FilterVariables;
use crate::graphql::{Operation, OperationKind, PagedOperation};
use crate::paging::{Filter, Page};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataForm {
    pub uri: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "SamlGroupName")]
    pub saml_group_name: Option<String>,
    /// `Global`, `Organization-Wide`, `Environment-Wide` or `Team-Only`.
    #[serde(default)]
    pub visibility: Option<String>,
    #[serde(default)]
    pub home_entity: Option<String>,
    #[serde(default)]
    pub home_entity_name: Option<String>,
    #[serde(default)]
    pub user_role: Option<String>,
}

const LIST_METADATA_FORMS: &str = r"
query listMetadataForms($filter: MetadataFormFilter) {
  listMetadataForms(filter: $filter) {
    count
    page
    pages
    hasNext
    hasPrevious
    nodes {
      uri
      name
      description
      SamlGroupName
      visibility
      homeEntity
      homeEntityName
      userRole
    }
  }
}";

/// `listMetadataForms(filter)`.
#[derive(Debug, Clone)]
pub struct ListMetadataForms {
    variables: FilterVariables,
}

impl ListMetadataForms {
    pub fn new(filter: Filter) -> Self {
        Self {
            variables: FilterVariables { filter },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMetadataFormsData {
    pub list_metadata_forms: Page<MetadataForm>,
}

impl Operation for ListMetadataForms {
    type Variables = FilterVariables;
    type Data = ListMetadataFormsData;

    fn name(&self) -> &str {
        "listMetadataForms"
    }
    fn kind(&self) -> OperationKind {
        OperationKind::Query
    }
    fn document(&self) -> &str {
        LIST_METADATA_FORMS
    }
    fn variables(&self) -> &FilterVariables {
        &self.variables
    }
}

impl PagedOperation for ListMetadataForms {
    type Node = MetadataForm;

    fn into_page(data: ListMetadataFormsData) -> Page<MetadataForm> {
        data.list_metadata_forms
    }
}
