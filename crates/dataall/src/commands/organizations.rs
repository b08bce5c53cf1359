//! Organization command handlers.

use tabled::Tabled;

use dataall_api::operations::{ListOrganizations, Organization};
use dataall_core::Console;

use crate::cli::{GlobalOpts, OrganizationsArgs, OrganizationsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct OrganizationRow {
    #[tabled(rename = "URI")]
    uri: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Team")]
    team: String,
    #[tabled(rename = "Envs")]
    environments: String,
    #[tabled(rename = "Users")]
    users: String,
    #[tabled(rename = "Role")]
    role: String,
}

impl From<&Organization> for OrganizationRow {
    fn from(o: &Organization) -> Self {
        Self {
            uri: o.organization_uri.clone(),
            label: o.label.clone(),
            team: util::or_dash(o.saml_group_name.as_deref()),
            environments: o
                .stats
                .as_ref()
                .map(|s| s.environments.to_string())
                .unwrap_or_default(),
            users: o
                .stats
                .as_ref()
                .map(|s| s.users.to_string())
                .unwrap_or_default(),
            role: util::or_dash(o.user_role_in_organization.as_deref()),
        }
    }
}

pub async fn handle(
    console: &Console,
    args: OrganizationsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        OrganizationsCommand::List(list) => {
            let listing = util::fetch_list(console, &list, ListOrganizations::new).await?;
            let out = output::render_list(
                &global.output,
                &listing.nodes,
                |n| OrganizationRow::from(n),
                |o| o.organization_uri.clone(),
            )?;
            output::print_output(&out, global.quiet);
            output::print_page_footer(&global.output, &listing.last, list.all, global.quiet);
            Ok(())
        }
    }
}
