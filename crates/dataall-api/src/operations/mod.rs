//! Typed operation catalogue for the data.all GraphQL schema.
//!
//! Each operation owns its variables and names the shape of its `data`
//! payload, so a response that drifts from the schema fails at decode
//! time rather than deep inside a caller.

pub mod datasets;
pub mod enums;
pub mod environments;
pub mod maintenance;
pub mod metadata_forms;
pub mod organizations;
pub mod raw;

pub use datasets::{Dataset, DatasetTable, ListDatasetTables, ListDatasets};
pub use enums::{EnumDefinition, EnumElement, FetchEnums};
pub use environments::{
    Environment, EnvironmentGroup, EnvironmentNetwork, ListEnvironmentGroups,
    ListEnvironmentNetworks, ListEnvironments,
};
pub use maintenance::{
    GetMaintenanceWindowStatus, MaintenanceMode, MaintenanceStatus, MaintenanceWindow,
    StartMaintenanceWindow, StartReindexCatalog, StopMaintenanceWindow,
};
pub use metadata_forms::{ListMetadataForms, MetadataForm};
pub use organizations::{ListOrganizations, Organization};
pub use raw::RawOperation;

use serde::Serialize;

use crate::paging::Filter;

/// Serializes as `{}` for operations that take no arguments.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct NoVariables {}

/// Variables of the top-level list queries: just `$filter`.
#[derive(Debug, Clone, Serialize)]
pub struct FilterVariables {
    pub filter: Filter,
}

/// Small name/label reference embedded in several node types.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelRef {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl LabelRef {
    /// The label, falling back to the name.
    pub fn display(&self) -> Option<&str> {
        self.label
            .as_deref()
            .filter(|l| !l.is_empty())
            .or(self.name.as_deref())
    }
}

/// CloudFormation stack status attached to deployable entities.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StackRef {
    #[serde(default)]
    pub status: Option<String>,
}
