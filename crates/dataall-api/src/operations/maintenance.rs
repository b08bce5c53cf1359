//! Maintenance window status and admin mutations.

use serde::{Deserialize, Deserializer, Serialize};

use super::NoVariables;
use crate::graphql::{Operation, OperationKind};

// ── Wire enums ───────────────────────────────────────────────────────

/// Lifecycle of a maintenance window.
///
/// `PENDING` means the window was requested and running jobs are
/// draining; the API already treats it as in effect.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum MaintenanceStatus {
    Pending,
    Active,
    Inactive,
}

/// What non-admin users may still do during a window.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
pub enum MaintenanceMode {
    /// Queries allowed, mutations blocked.
    #[serde(rename = "READ-ONLY")]
    #[strum(to_string = "READ-ONLY", serialize = "read-only", serialize = "readonly")]
    ReadOnly,
    /// Everything blocked except a couple of bootstrap queries.
    #[serde(rename = "NO-ACCESS")]
    #[strum(to_string = "NO-ACCESS", serialize = "no-access", serialize = "noaccess")]
    NoAccess,
}

/// Status payload of `getMaintenanceWindowStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceWindow {
    pub status: MaintenanceStatus,
    /// Empty on the wire while no window has been configured.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub mode: Option<MaintenanceMode>,
}

impl MaintenanceWindow {
    pub const INACTIVE: Self = Self {
        status: MaintenanceStatus::Inactive,
        mode: None,
    };

    /// `true` for `PENDING` and `ACTIVE`.
    pub fn in_effect(self) -> bool {
        self.status != MaintenanceStatus::Inactive
    }
}

impl Default for MaintenanceWindow {
    fn default() -> Self {
        Self::INACTIVE
    }
}

fn blank_as_none<'de, D>(de: D) -> Result<Option<MaintenanceMode>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(de)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

// ── getMaintenanceWindowStatus ───────────────────────────────────────

const GET_MAINTENANCE_STATUS: &str = r"
query getMaintenanceWindowStatus {
  getMaintenanceWindowStatus {
    status
    mode
  }
}";

#[derive(Debug, Clone, Default)]
pub struct GetMaintenanceWindowStatus {
    variables: NoVariables,
}

impl GetMaintenanceWindowStatus {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceStatusData {
    pub get_maintenance_window_status: Option<MaintenanceWindow>,
}

impl Operation for GetMaintenanceWindowStatus {
    type Variables = NoVariables;
    type Data = MaintenanceStatusData;

    fn name(&self) -> &str {
        "getMaintenanceWindowStatus"
    }
    fn kind(&self) -> OperationKind {
        OperationKind::Query
    }
    fn document(&self) -> &str {
        GET_MAINTENANCE_STATUS
    }
    fn variables(&self) -> &NoVariables {
        &self.variables
    }
}

// ── startMaintenanceWindow ───────────────────────────────────────────

const START_MAINTENANCE_WINDOW: &str = r"
mutation startMaintenanceWindow($mode: String) {
  startMaintenanceWindow(mode: $mode)
}";

#[derive(Debug, Clone, Serialize)]
pub struct StartMaintenanceVariables {
    pub mode: MaintenanceMode,
}

#[derive(Debug, Clone)]
pub struct StartMaintenanceWindow {
    variables: StartMaintenanceVariables,
}

impl StartMaintenanceWindow {
    pub fn new(mode: MaintenanceMode) -> Self {
        Self {
            variables: StartMaintenanceVariables { mode },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartMaintenanceData {
    pub start_maintenance_window: Option<bool>,
}

impl Operation for StartMaintenanceWindow {
    type Variables = StartMaintenanceVariables;
    type Data = StartMaintenanceData;

    fn name(&self) -> &str {
        "startMaintenanceWindow"
    }
    fn kind(&self) -> OperationKind {
        OperationKind::Mutation
    }
    fn document(&self) -> &str {
        START_MAINTENANCE_WINDOW
    }
    fn variables(&self) -> &StartMaintenanceVariables {
        &self.variables
    }
}

// ── stopMaintenanceWindow ────────────────────────────────────────────

const STOP_MAINTENANCE_WINDOW: &str = r"
mutation stopMaintenanceWindow {
  stopMaintenanceWindow
}";

#[derive(Debug, Clone, Default)]
pub struct StopMaintenanceWindow {
    variables: NoVariables,
}

impl StopMaintenanceWindow {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopMaintenanceData {
    pub stop_maintenance_window: Option<bool>,
}

impl Operation for StopMaintenanceWindow {
    type Variables = NoVariables;
    type Data = StopMaintenanceData;

    fn name(&self) -> &str {
        "stopMaintenanceWindow"
    }
    fn kind(&self) -> OperationKind {
        OperationKind::Mutation
    }
    fn document(&self) -> &str {
        STOP_MAINTENANCE_WINDOW
    }
    fn variables(&self) -> &NoVariables {
        &self.variables
    }
}

// ── startReindexCatalog ──────────────────────────────────────────────

const START_REINDEX_CATALOG: &str = r"
mutation startReindexCatalog($handleDeletes: Boolean!) {
  startReindexCatalog(handleDeletes: $handleDeletes)
}";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReindexVariables {
    pub handle_deletes: bool,
}

#[derive(Debug, Clone)]
pub struct StartReindexCatalog {
    variables: ReindexVariables,
}

impl StartReindexCatalog {
    pub fn new(handle_deletes: bool) -> Self {
        Self {
            variables: ReindexVariables { handle_deletes },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartReindexData {
    pub start_reindex_catalog: Option<bool>,
}

impl Operation for StartReindexCatalog {
    type Variables = ReindexVariables;
    type Data = StartReindexData;

    fn name(&self) -> &str {
        "startReindexCatalog"
    }
    fn kind(&self) -> OperationKind {
        OperationKind::Mutation
    }
    fn document(&self) -> &str {
        START_REINDEX_CATALOG
    }
    fn variables(&self) -> &ReindexVariables {
        &self.variables
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::json;

    use super::*;

    #[test]
    fn blank_mode_decodes_as_none() {
        let w: MaintenanceWindow =
            serde_json::from_value(json!({ "status": "INACTIVE", "mode": "" })).unwrap();
        assert_eq!(w, MaintenanceWindow::INACTIVE);
        assert!(!w.in_effect());
    }

    #[test]
    fn pending_window_is_in_effect() {
        let w: MaintenanceWindow =
            serde_json::from_value(json!({ "status": "PENDING", "mode": "NO-ACCESS" })).unwrap();
        assert_eq!(w.mode, Some(MaintenanceMode::NoAccess));
        assert!(w.in_effect());
    }

    #[test]
    fn mode_round_trips_wire_strings() {
        assert_eq!(MaintenanceMode::ReadOnly.to_string(), "READ-ONLY");
        assert_eq!(
            "no-access".parse::<MaintenanceMode>().unwrap(),
            MaintenanceMode::NoAccess
        );
        assert_eq!(
            serde_json::to_value(StartMaintenanceVariables {
                mode: MaintenanceMode::ReadOnly
            })
            .unwrap(),
            json!({ "mode": "READ-ONLY" })
        );
    }

    #[test]
    fn unknown_mode_is_a_decode_error() {
        let res = serde_json::from_value::<MaintenanceWindow>(
            json!({ "status": "ACTIVE", "mode": "PARTIAL" }),
        );
        assert!(res.is_err());
    }
}
