//! Config subcommand handlers.

use dialoguer::{Confirm, Input, Password, Select};

use dataall_api::DEFAULT_MODULE;
use dataall_config::{Config, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

const REDACTED: &str = "********";

// ── Helpers ─────────────────────────────────────────────────────────

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Copy of the config safe to print.
fn redacted(cfg: &Config) -> Config {
    let mut cfg = cfg.clone();
    for profile in cfg.profiles.values_mut() {
        if profile.token.is_some() {
            profile.token = Some(REDACTED.into());
        }
    }
    cfg
}

fn read_token(prompt: &str, global: &GlobalOpts) -> Result<String, CliError> {
    let token = match global.token {
        Some(ref token) => token.clone(),
        None => Password::new()
            .with_prompt(prompt)
            .interact()
            .map_err(prompt_err)?,
    };
    if token.trim().is_empty() {
        return Err(CliError::Validation {
            field: "token".into(),
            reason: "token cannot be empty".into(),
        });
    }
    Ok(token)
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = dataall_config::config_path();
            let mut cfg = dataall_config::load_config()?;
            eprintln!("data.all console configuration");
            eprintln!("   Config path: {}\n", config_path.display());

            // 1. Profile name
            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default(config::active_profile_name(global, &cfg))
                .interact_text()
                .map_err(prompt_err)?;

            // 2. Core GraphQL endpoint
            let endpoint: String = Input::new()
                .with_prompt("GraphQL endpoint URL")
                .default("https://localhost/graphql/api".into())
                .interact_text()
                .map_err(prompt_err)?;

            // 3. Admin flag
            let is_admin = Confirm::new()
                .with_prompt("Are you a tenant administrator?")
                .default(false)
                .interact()
                .map_err(prompt_err)?;

            let mut profile = Profile {
                module: DEFAULT_MODULE.into(),
                is_admin,
                ..Profile::default()
            };
            profile.endpoints.insert(DEFAULT_MODULE.into(), endpoint);
            // Fail before writing anything if the URL does not parse.
            dataall_config::endpoint_map(&profile)?;

            // 4. Token storage
            let store_choices = &[
                "Store in system keyring (recommended)",
                "Save to config file (plaintext)",
                "Skip (use DATAALL_TOKEN)",
            ];
            let store_selection = Select::new()
                .with_prompt("Where to store the identity token?")
                .items(store_choices)
                .default(0)
                .interact()
                .map_err(prompt_err)?;

            match store_selection {
                0 => {
                    let token = read_token("Identity token", global)?;
                    dataall_config::store_token(&profile_name, &token)?;
                    eprintln!("   ✓ Token stored in system keyring");
                }
                1 => profile.token = Some(read_token("Identity token", global)?),
                _ => {}
            }

            // 5. Merge and write
            cfg.profiles.insert(profile_name.clone(), profile);
            cfg.default_profile = Some(profile_name.clone());
            dataall_config::save_config(&cfg)?;

            eprintln!("\n✓ Configuration written to {}", config_path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: dataall maintenance status");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = redacted(&dataall_config::load_config()?);
            let out = output::render_single(
                &global.output,
                &cfg,
                |c| toml::to_string_pretty(c).unwrap_or_else(|_| format!("{c:#?}")),
                |c| {
                    let mut names: Vec<&str> = c.profiles.keys().map(String::as_str).collect();
                    names.sort_unstable();
                    names.join("\n")
                },
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            println!("{}", dataall_config::config_path().display());
            Ok(())
        }

        // ── SetToken ────────────────────────────────────────────────
        ConfigCommand::SetToken => {
            let cfg = dataall_config::load_config()?;
            let profile_name = config::active_profile_name(global, &cfg);
            if !cfg.profiles.contains_key(&profile_name) {
                return Err(CliError::ProfileNotFound {
                    available: config::available_profiles(&cfg),
                    name: profile_name,
                });
            }

            let token = read_token("Identity token", global)?;
            dataall_config::store_token(&profile_name, &token)?;
            eprintln!("✓ Token stored in system keyring for profile '{profile_name}'");
            Ok(())
        }
    }
}
