//! Environment command handlers.

use tabled::Tabled;

use dataall_api::operations::{
    Environment, EnvironmentGroup, EnvironmentNetwork, LabelRef, ListEnvironmentGroups,
    ListEnvironmentNetworks, ListEnvironments,
};
use dataall_core::Console;

use crate::cli::{EnvironmentsArgs, EnvironmentsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct EnvironmentRow {
    #[tabled(rename = "URI")]
    uri: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Organization")]
    organization: String,
    #[tabled(rename = "Account")]
    account: String,
    #[tabled(rename = "Region")]
    region: String,
    #[tabled(rename = "Stack")]
    stack: String,
}

impl From<&Environment> for EnvironmentRow {
    fn from(e: &Environment) -> Self {
        Self {
            uri: e.environment_uri.clone(),
            label: e.label.clone(),
            organization: util::or_dash(e.organization.as_ref().and_then(LabelRef::display)),
            account: util::or_dash(e.aws_account_id.as_deref()),
            region: util::or_dash(e.region.as_deref()),
            stack: util::or_dash(e.stack.as_ref().and_then(|s| s.status.as_deref())),
        }
    }
}

#[derive(Tabled)]
struct NetworkRow {
    #[tabled(rename = "URI")]
    uri: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "VPC")]
    vpc_id: String,
    #[tabled(rename = "Team")]
    team: String,
    #[tabled(rename = "Private subnets")]
    private_subnets: String,
}

impl From<&EnvironmentNetwork> for NetworkRow {
    fn from(n: &EnvironmentNetwork) -> Self {
        Self {
            uri: n.vpc_uri.clone(),
            label: n.label.clone(),
            vpc_id: n.vpc_id.clone(),
            team: util::or_dash(n.saml_group_name.as_deref()),
            private_subnets: n.private_subnet_ids.join(", "),
        }
    }
}

#[derive(Tabled)]
struct TeamRow {
    #[tabled(rename = "Team")]
    team: String,
    #[tabled(rename = "IAM role")]
    role: String,
    #[tabled(rename = "Invited by")]
    invited_by: String,
    #[tabled(rename = "Invited")]
    created: String,
}

impl From<&EnvironmentGroup> for TeamRow {
    fn from(g: &EnvironmentGroup) -> Self {
        Self {
            team: g.group_uri.clone(),
            role: util::or_dash(g.environment_iam_role_name.as_deref()),
            invited_by: util::or_dash(g.invited_by.as_deref()),
            created: util::date_only(g.created.as_deref()),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    console: &Console,
    args: EnvironmentsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        EnvironmentsCommand::List(list) => {
            let listing = util::fetch_list(console, &list, ListEnvironments::new).await?;
            let out = output::render_list(
                &global.output,
                &listing.nodes,
                |n| EnvironmentRow::from(n),
                |e| e.environment_uri.clone(),
            )?;
            output::print_output(&out, global.quiet);
            output::print_page_footer(&global.output, &listing.last, list.all, global.quiet);
            Ok(())
        }

        EnvironmentsCommand::Networks {
            environment_uri,
            list,
        } => {
            let listing = util::fetch_list(console, &list, |filter| {
                ListEnvironmentNetworks::new(environment_uri.as_str(), filter)
            })
            .await?;
            let out = output::render_list(
                &global.output,
                &listing.nodes,
                |n| NetworkRow::from(n),
                |n| n.vpc_uri.clone(),
            )?;
            output::print_output(&out, global.quiet);
            output::print_page_footer(&global.output, &listing.last, list.all, global.quiet);
            Ok(())
        }

        EnvironmentsCommand::Teams {
            environment_uri,
            list,
        } => {
            let listing = util::fetch_list(console, &list, |filter| {
                ListEnvironmentGroups::new(environment_uri.as_str(), filter)
            })
            .await?;
            let out = output::render_list(
                &global.output,
                &listing.nodes,
                |n| TeamRow::from(n),
                |g| g.group_uri.clone(),
            )?;
            output::print_output(&out, global.quiet);
            output::print_page_footer(&global.output, &listing.last, list.all, global.quiet);
            Ok(())
        }
    }
}
