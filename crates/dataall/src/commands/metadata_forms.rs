//! Metadata form command handlers.

use tabled::Tabled;

use dataall_api::operations::{ListMetadataForms, MetadataForm};
use dataall_core::Console;

use crate::cli::{GlobalOpts, MetadataFormsArgs, MetadataFormsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct MetadataFormRow {
    #[tabled(rename = "URI")]
    uri: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Visibility")]
    visibility: String,
    #[tabled(rename = "Owner")]
    owner: String,
    #[tabled(rename = "Attached to")]
    home: String,
}

impl From<&MetadataForm> for MetadataFormRow {
    fn from(f: &MetadataForm) -> Self {
        Self {
            uri: f.uri.clone(),
            name: f.name.clone(),
            visibility: util::or_dash(f.visibility.as_deref()),
            owner: util::or_dash(f.saml_group_name.as_deref()),
            home: util::or_dash(f.home_entity_name.as_deref()),
        }
    }
}

pub async fn handle(
    console: &Console,
    args: MetadataFormsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        MetadataFormsCommand::List(list) => {
            let listing = util::fetch_list(console, &list, ListMetadataForms::new).await?;
            let out = output::render_list(
                &global.output,
                &listing.nodes,
                |n| MetadataFormRow::from(n),
                |f| f.uri.clone(),
            )?;
            output::print_output(&out, global.quiet);
            output::print_page_footer(&global.output, &listing.last, list.all, global.quiet);
            Ok(())
        }
    }
}
