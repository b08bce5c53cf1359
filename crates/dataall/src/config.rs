//! CLI configuration: thin wrapper around `dataall_config`.
//!
//! Adds CLI-specific resolution that respects `GlobalOpts` flag
//! overrides (--endpoint, --module, --token, etc.).

use dataall_api::DEFAULT_MODULE;
use dataall_config::{Config, Profile};
use dataall_core::ConsoleConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.profile_name(global.profile.as_deref()).to_owned()
}

/// Comma-separated profile names, for error help text.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<&str> = config.profiles.keys().map(String::as_str).collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort_unstable();
    names.join(", ")
}

/// Apply flag overrides on top of a profile.
///
/// `--endpoint` rebinds the active module only; other module endpoints of
/// the profile stay as configured.
pub fn apply_overrides(mut profile: Profile, global: &GlobalOpts) -> Profile {
    if let Some(ref module) = global.module {
        profile.module.clone_from(module);
    }
    if let Some(ref url) = global.endpoint {
        profile.endpoints.insert(profile.module.clone(), url.clone());
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
    profile
}

/// Build a `ConsoleConfig` from the config file, active profile and
/// CLI overrides.
///
/// Without a matching profile, `--endpoint` alone is enough to run.
pub fn resolve_console_config(global: &GlobalOpts) -> Result<ConsoleConfig, CliError> {
    let cfg = dataall_config::load_config()?;
    let name = active_profile_name(global, &cfg);

    let profile = match cfg.profiles.get(&name) {
        Some(profile) => profile.clone(),
        None if global.endpoint.is_some() => Profile {
            module: DEFAULT_MODULE.into(),
            ..Profile::default()
        },
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                available: available_profiles(&cfg),
                name,
            });
        }
        None => {
            return Err(CliError::NoConfig {
                path: dataall_config::config_path().display().to_string(),
            });
        }
    };

    let profile = apply_overrides(profile, global);
    let token = dataall_config::resolve_token(&profile, &name, global.token.as_deref());
    tracing::debug!(
        profile = %name,
        module = %profile.module,
        has_token = token.is_some(),
        "resolved profile"
    );
    Ok(dataall_config::profile_to_console_config(
        &profile,
        &cfg.defaults,
        token,
    )?)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["dataall"];
        argv.extend_from_slice(args);
        argv.extend_from_slice(&["maintenance", "status"]);
        Cli::parse_from(argv).global
    }

    #[test]
    fn endpoint_flag_rebinds_the_active_module() {
        let mut profile = Profile {
            module: "core".into(),
            ..Profile::default()
        };
        profile
            .endpoints
            .insert("core".into(), "https://old.example.com/graphql/api".into());
        profile
            .endpoints
            .insert("search".into(), "https://old.example.com/search/api".into());

        let flags = global(&["--endpoint", "https://new.example.com/graphql/api", "--timeout", "5"]);
        let profile = apply_overrides(profile, &flags);

        assert_eq!(profile.endpoints["core"], "https://new.example.com/graphql/api");
        assert_eq!(profile.endpoints["search"], "https://old.example.com/search/api");
        assert_eq!(profile.timeout, Some(5));
        assert_eq!(profile.insecure, None);
    }

    #[test]
    fn module_flag_applies_before_endpoint() {
        let flags = global(&["--module", "search", "--endpoint", "http://localhost:4000/search"]);
        let profile = apply_overrides(Profile::default(), &flags);
        assert_eq!(profile.module, "search");
        assert!(profile.endpoints.contains_key("search"));
    }

    #[test]
    fn available_profiles_are_sorted() {
        let mut cfg = Config::default();
        assert_eq!(available_profiles(&cfg), "(none)");
        cfg.profiles.insert("prod".into(), Profile::default());
        cfg.profiles.insert("dev".into(), Profile::default());
        assert_eq!(available_profiles(&cfg), "dev, prod");
    }
}
