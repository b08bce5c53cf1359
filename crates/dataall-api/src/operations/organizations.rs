//! Organization list query.

use serde::{Deserialize, Serialize};

use super::FilterVariables;
use crate::graphql::{Operation, OperationKind, PagedOperation};
use crate::paging::{Filter, Page};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationStats {
    #[serde(default)]
    pub environments: u64,
    #[serde(default)]
    pub groups: u64,
    #[serde(default)]
    pub users: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub organization_uri: String,
    pub label: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default, rename = "SamlGroupName")]
    pub saml_group_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub user_role_in_organization: Option<String>,
    #[serde(default)]
    pub stats: Option<OrganizationStats>,
}

const LIST_ORGANIZATIONS: &str = r"
query ListOrganizations($filter: OrganizationFilter) {
  listOrganizations(filter: $filter) {
    count
    page
    pages
    hasNext
    hasPrevious
    nodes {
      organizationUri
      label
      name
      owner
      SamlGroupName
      description
      created
      tags
      userRoleInOrganization
      stats { environments groups users }
    }
  }
}";

/// `listOrganizations(filter)`.
#[derive(Debug, Clone)]
pub struct ListOrganizations {
    variables: FilterVariables,
}

impl ListOrganizations {
    pub fn new(filter: Filter) -> Self {
        Self {
            variables: FilterVariables { filter },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOrganizationsData {
    pub list_organizations: Page<Organization>,
}

impl Operation for ListOrganizations {
    type Variables = FilterVariables;
    type Data = ListOrganizationsData;

    fn name(&self) -> &str {
        "ListOrganizations"
    }
    fn kind(&self) -> OperationKind {
        OperationKind::Query
    }
    fn document(&self) -> &str {
        LIST_ORGANIZATIONS
    }
    fn variables(&self) -> &FilterVariables {
        &self.variables
    }
}

impl PagedOperation for ListOrganizations {
    type Node = Organization;

    fn into_page(data: ListOrganizationsData) -> Page<Organization> {
        data.list_organizations
    }
}
