//! Dataset command handlers.

use tabled::Tabled;

use dataall_api::operations::{Dataset, DatasetTable, LabelRef, ListDatasetTables, ListDatasets};
use dataall_core::Console;

use crate::cli::{DatasetsArgs, DatasetsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct DatasetRow {
    #[tabled(rename = "URI")]
    uri: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Environment")]
    environment: String,
    #[tabled(rename = "Region")]
    region: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl From<&Dataset> for DatasetRow {
    fn from(d: &Dataset) -> Self {
        Self {
            uri: d.dataset_uri.clone(),
            label: d.label.clone(),
            environment: util::or_dash(d.environment.as_ref().and_then(LabelRef::display)),
            region: util::or_dash(d.region.as_deref()),
            role: util::or_dash(d.user_role_for_dataset.as_deref()),
            created: util::date_only(d.created.as_deref()),
        }
    }
}

#[derive(Tabled)]
struct TableRow {
    #[tabled(rename = "URI")]
    uri: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Glue table")]
    glue_table: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&DatasetTable> for TableRow {
    fn from(t: &DatasetTable) -> Self {
        Self {
            uri: t.table_uri.clone(),
            name: t.label.clone().unwrap_or_else(|| t.name.clone()),
            glue_table: util::or_dash(t.glue_table_name.as_deref()),
            description: util::or_dash(t.description.as_deref()),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    console: &Console,
    args: DatasetsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DatasetsCommand::List(list) => {
            let listing = util::fetch_list(console, &list, ListDatasets::new).await?;
            let out = output::render_list(
                &global.output,
                &listing.nodes,
                |n| DatasetRow::from(n),
                |d| d.dataset_uri.clone(),
            )?;
            output::print_output(&out, global.quiet);
            output::print_page_footer(&global.output, &listing.last, list.all, global.quiet);
            Ok(())
        }

        DatasetsCommand::Tables { dataset_uri, list } => {
            let listing = util::fetch_list(console, &list, |filter| {
                ListDatasetTables::new(dataset_uri.as_str(), filter)
            })
            .await?;
            let out = output::render_list(
                &global.output,
                &listing.nodes,
                |n| TableRow::from(n),
                |t| t.table_uri.clone(),
            )?;
            output::print_output(&out, global.quiet);
            output::print_page_footer(&global.output, &listing.last, list.all, global.quiet);
            Ok(())
        }
    }
}
