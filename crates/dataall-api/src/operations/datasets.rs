//! Dataset and dataset-table list queries.

use serde::{Deserialize, Serialize};

use super::{FilterVariables, LabelRef, StackRef};
use crate::graphql::{Operation, OperationKind, PagedOperation};
use crate::paging::{Filter, Page};

// ── Nodes ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub dataset_uri: String,
    pub label: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    /// ISO 8601 date-time as sent by the API.
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default, rename = "AwsAccountId")]
    pub aws_account_id: Option<String>,
    #[serde(default, rename = "SamlAdminGroupName")]
    pub saml_admin_group_name: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub user_role_for_dataset: Option<String>,
    #[serde(default)]
    pub environment: Option<LabelRef>,
    #[serde(default)]
    pub organization: Option<LabelRef>,
    #[serde(default)]
    pub stack: Option<StackRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetTable {
    pub table_uri: String,
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, rename = "GlueTableName")]
    pub glue_table_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
}

// ── ListDatasets ─────────────────────────────────────────────────────

const LIST_DATASETS: &str = r"
query ListDatasets($filter: DatasetFilter) {
  listDatasets(filter: $filter) {
    count
    page
    pages
    hasNext
    hasPrevious
    nodes {
      datasetUri
      label
      name
      description
      owner
      created
      region
      AwsAccountId
      SamlAdminGroupName
      tags
      userRoleForDataset
      environment { label name }
      organization { label name }
      stack { status }
    }
  }
}";

/// `listDatasets(filter)`: every dataset visible to the caller.
#[derive(Debug, Clone)]
pub struct ListDatasets {
    variables: FilterVariables,
}

impl ListDatasets {
    pub fn new(filter: Filter) -> Self {
        Self {
            variables: FilterVariables { filter },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDatasetsData {
    pub list_datasets: Page<Dataset>,
}

impl Operation for ListDatasets {
    type Variables = FilterVariables;
    type Data = ListDatasetsData;

    fn name(&self) -> &str {
        "ListDatasets"
    }
    fn kind(&self) -> OperationKind {
        OperationKind::Query
    }
    fn document(&self) -> &str {
        LIST_DATASETS
    }
    fn variables(&self) -> &FilterVariables {
        &self.variables
    }
}

impl PagedOperation for ListDatasets {
    type Node = Dataset;

    fn into_page(data: ListDatasetsData) -> Page<Dataset> {
        data.list_datasets
    }
}

// ── ListDatasetTables ────────────────────────────────────────────────

const LIST_DATASET_TABLES: &str = r"
query GetDatasetTables($datasetUri: String!, $filter: DatasetTableFilter) {
  getDataset(datasetUri: $datasetUri) {
    tables(filter: $filter) {
      count
      page
      pages
      hasNext
      hasPrevious
      nodes {
        tableUri
        name
        label
        GlueTableName
        description
        created
      }
    }
  }
}";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetTablesVariables {
    pub dataset_uri: String,
    pub filter: Filter,
}

/// `getDataset(datasetUri).tables(filter)`: tables registered in one dataset.
#[derive(Debug, Clone)]
pub struct ListDatasetTables {
    variables: DatasetTablesVariables,
}

impl ListDatasetTables {
    pub fn new(dataset_uri: impl Into<String>, filter: Filter) -> Self {
        Self {
            variables: DatasetTablesVariables {
                dataset_uri: dataset_uri.into(),
                filter,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DatasetTablesHolder {
    pub tables: Page<DatasetTable>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetTablesData {
    pub get_dataset: Option<DatasetTablesHolder>,
}

impl Operation for ListDatasetTables {
    type Variables = DatasetTablesVariables;
    type Data = DatasetTablesData;

    fn name(&self) -> &str {
        "GetDatasetTables"
    }
    fn kind(&self) -> OperationKind {
        OperationKind::Query
    }
    fn document(&self) -> &str {
        LIST_DATASET_TABLES
    }
    fn variables(&self) -> &DatasetTablesVariables {
        &self.variables
    }
}

impl PagedOperation for ListDatasetTables {
    type Node = DatasetTable;

    /// A dataset the caller cannot see resolves to `null`; that is an
    /// empty list, not a failure.
    fn into_page(data: DatasetTablesData) -> Page<DatasetTable> {
        data.get_dataset.map(|d| d.tables).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::json;

    use super::*;
    use crate::graphql::GraphQlRequest;

    #[test]
    fn table_variables_use_camel_case() {
        let op = ListDatasetTables::new("ds-1", Filter::default());
        let body = serde_json::to_value(GraphQlRequest::from_operation(&op)).unwrap();
        assert_eq!(body["operationName"], "GetDatasetTables");
        assert_eq!(body["variables"]["datasetUri"], "ds-1");
        assert_eq!(body["variables"]["filter"]["pageSize"], 10);
    }

    #[test]
    fn hidden_dataset_yields_empty_table_page() {
        let data: DatasetTablesData = serde_json::from_value(json!({ "getDataset": null })).unwrap();
        let page = ListDatasetTables::into_page(data);
        assert!(page.is_empty());
        assert_eq!(page.pages, 1);
    }

    #[test]
    fn dataset_node_decodes_mixed_case_fields() {
        let ds: Dataset = serde_json::from_value(json!({
            "datasetUri": "ds-1",
            "label": "Sales",
            "AwsAccountId": "111122223333",
            "SamlAdminGroupName": "DataTeam",
            "environment": { "label": "Prod" },
            "stack": { "status": "CREATE_COMPLETE" }
        }))
        .unwrap();
        assert_eq!(ds.aws_account_id.as_deref(), Some("111122223333"));
        assert_eq!(ds.saml_admin_group_name.as_deref(), Some("DataTeam"));
        assert!(ds.tags.is_empty());
    }
}
