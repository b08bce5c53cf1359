//! Environment, environment network and environment team list queries.

use serde::{Deserialize, Serialize};

use super::{FilterVariables, LabelRef, StackRef};
use crate::graphql::{Operation, OperationKind, PagedOperation};
use crate::paging::{Filter, Page};

// ── Nodes ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    pub environment_uri: String,
    pub label: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "AwsAccountId")]
    pub aws_account_id: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default, rename = "SamlGroupName")]
    pub saml_group_name: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub user_role_in_environment: Option<String>,
    #[serde(default)]
    pub organization: Option<LabelRef>,
    #[serde(default)]
    pub stack: Option<StackRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentNetwork {
    pub vpc_uri: String,
    #[serde(rename = "VpcId")]
    pub vpc_id: String,
    pub label: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default, rename = "SamlGroupName")]
    pub saml_group_name: Option<String>,
    #[serde(default)]
    pub private_subnet_ids: Vec<String>,
    #[serde(default)]
    pub public_subnet_ids: Vec<String>,
}

/// A team (IdP group) invited to an environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentGroup {
    pub group_uri: String,
    #[serde(default)]
    pub invited_by: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "environmentIAMRoleArn")]
    pub environment_iam_role_arn: Option<String>,
    #[serde(default, rename = "environmentIAMRoleName")]
    pub environment_iam_role_name: Option<String>,
    #[serde(default)]
    pub environment_athena_work_group: Option<String>,
}

/// Variables for list queries scoped to one environment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentScopedVariables {
    pub environment_uri: String,
    pub filter: Filter,
}

// ── ListEnvironments ─────────────────────────────────────────────────

const LIST_ENVIRONMENTS: &str = r"
query ListEnvironments($filter: EnvironmentFilter) {
  listEnvironments(filter: $filter) {
    count
    page
    pages
    hasNext
    hasPrevious
    nodes {
      environmentUri
      label
      name
      description
      AwsAccountId
      region
      owner
      SamlGroupName
      created
      userRoleInEnvironment
      organization { label name }
      stack { status }
    }
  }
}";

/// `listEnvironments(filter)`.
#[derive(Debug, Clone)]
pub struct ListEnvironments {
    variables: FilterVariables,
}

impl ListEnvironments {
    pub fn new(filter: Filter) -> Self {
        Self {
            variables: FilterVariables { filter },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEnvironmentsData {
    pub list_environments: Page<Environment>,
}

impl Operation for ListEnvironments {
    type Variables = FilterVariables;
    type Data = ListEnvironmentsData;

    fn name(&self) -> &str {
        "ListEnvironments"
    }
    fn kind(&self) -> OperationKind {
        OperationKind::Query
    }
    fn document(&self) -> &str {
        LIST_ENVIRONMENTS
    }
    fn variables(&self) -> &FilterVariables {
        &self.variables
    }
}

impl PagedOperation for ListEnvironments {
    type Node = Environment;

    fn into_page(data: ListEnvironmentsData) -> Page<Environment> {
        data.list_environments
    }
}

// ── ListEnvironmentNetworks ──────────────────────────────────────────

const LIST_ENVIRONMENT_NETWORKS: &str = r"
query ListEnvironmentNetworks($environmentUri: String!, $filter: VpcFilter) {
  listEnvironmentNetworks(environmentUri: $environmentUri, filter: $filter) {
    count
    page
    pages
    hasNext
    hasPrevious
    nodes {
      vpcUri
      VpcId
      label
      name
      region
      SamlGroupName
      privateSubnetIds
      publicSubnetIds
    }
  }
}";

/// `listEnvironmentNetworks(environmentUri, filter)`.
#[derive(Debug, Clone)]
pub struct ListEnvironmentNetworks {
    variables: EnvironmentScopedVariables,
}

impl ListEnvironmentNetworks {
    pub fn new(environment_uri: impl Into<String>, filter: Filter) -> Self {
        Self {
            variables: EnvironmentScopedVariables {
                environment_uri: environment_uri.into(),
                filter,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEnvironmentNetworksData {
    pub list_environment_networks: Page<EnvironmentNetwork>,
}

impl Operation for ListEnvironmentNetworks {
    type Variables = EnvironmentScopedVariables;
    type Data = ListEnvironmentNetworksData;

    fn name(&self) -> &str {
        "ListEnvironmentNetworks"
    }
    fn kind(&self) -> OperationKind {
        OperationKind::Query
    }
    fn document(&self) -> &str {
        LIST_ENVIRONMENT_NETWORKS
    }
    fn variables(&self) -> &EnvironmentScopedVariables {
        &self.variables
    }
}

impl PagedOperation for ListEnvironmentNetworks {
    type Node = EnvironmentNetwork;

    fn into_page(data: ListEnvironmentNetworksData) -> Page<EnvironmentNetwork> {
        data.list_environment_networks
    }
}

// ── ListEnvironmentGroups ────────────────────────────────────────────

const LIST_ENVIRONMENT_GROUPS: &str = r"
query ListEnvironmentGroups($environmentUri: String!, $filter: GroupFilter) {
  listEnvironmentGroups(environmentUri: $environmentUri, filter: $filter) {
    count
    page
    pages
    hasNext
    hasPrevious
    nodes {
      groupUri
      invitedBy
      created
      description
      environmentIAMRoleArn
      environmentIAMRoleName
      environmentAthenaWorkGroup
    }
  }
}";

/// `listEnvironmentGroups(environmentUri, filter)`: the environment's teams.
#[derive(Debug, Clone)]
pub struct ListEnvironmentGroups {
    variables: EnvironmentScopedVariables,
}

impl ListEnvironmentGroups {
    pub fn new(environment_uri: impl Into<String>, filter: Filter) -> Self {
        Self {
            variables: EnvironmentScopedVariables {
                environment_uri: environment_uri.into(),
                filter,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEnvironmentGroupsData {
    pub list_environment_groups: Page<EnvironmentGroup>,
}

impl Operation for ListEnvironmentGroups {
    type Variables = EnvironmentScopedVariables;
    type Data = ListEnvironmentGroupsData;

    fn name(&self) -> &str {
        "ListEnvironmentGroups"
    }
    fn kind(&self) -> OperationKind {
        OperationKind::Query
    }
    fn document(&self) -> &str {
        LIST_ENVIRONMENT_GROUPS
    }
    fn variables(&self) -> &EnvironmentScopedVariables {
        &self.variables
    }
}

impl PagedOperation for ListEnvironmentGroups {
    type Node = EnvironmentGroup;

    fn into_page(data: ListEnvironmentGroupsData) -> Page<EnvironmentGroup> {
        data.list_environment_groups
    }
}
