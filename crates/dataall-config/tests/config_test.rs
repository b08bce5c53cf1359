#![allow(clippy::unwrap_used)]
// Config loading and token resolution, isolated with figment's Jail.

use std::path::Path;

use figment::Jail;
use secrecy::ExposeSecret;

use dataall_config::{Profile, TOKEN_ENV, load_config_from, resolve_token};

const CONFIG: &str = r#"
default_profile = "prod"

[defaults]
output = "json"
page_size = 20

[profiles.prod]
module = "core"
token_env = "PROD_DATAALL_TOKEN"
token = "plaintext-token"
is_admin = true

[profiles.prod.endpoints]
core = "https://api.example.com/graphql/api"
search = "https://api.example.com/search/api"
"#;

#[test]
fn test_file_values_override_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", CONFIG)?;
        let cfg = load_config_from(Path::new("config.toml")).unwrap();

        assert_eq!(cfg.default_profile.as_deref(), Some("prod"));
        assert_eq!(cfg.defaults.output, "json");
        assert_eq!(cfg.defaults.page_size, 20);
        assert_eq!(cfg.defaults.timeout, 30);
        assert_eq!(cfg.defaults.maintenance_poll_secs, 30);

        let prod = cfg.profile("prod").unwrap();
        assert!(prod.is_admin);
        assert_eq!(prod.endpoints.len(), 2);
        Ok(())
    });
}

#[test]
fn test_env_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", CONFIG)?;
        jail.set_env("DATAALL_DEFAULTS__PAGE_SIZE", "50");
        jail.set_env("DATAALL_DEFAULT_PROFILE", "staging");

        let cfg = load_config_from(Path::new("config.toml")).unwrap();
        assert_eq!(cfg.defaults.page_size, 50);
        assert_eq!(cfg.default_profile.as_deref(), Some("staging"));
        Ok(())
    });
}

#[test]
fn test_missing_file_yields_defaults() {
    Jail::expect_with(|_jail| {
        let cfg = load_config_from(Path::new("absent.toml")).unwrap();
        assert_eq!(cfg.defaults.output, "table");
        assert_eq!(cfg.defaults.page_size, 10);
        assert!(cfg.profiles.is_empty());
        Ok(())
    });
}

#[test]
fn test_token_env_precedence() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", CONFIG)?;
        let cfg = load_config_from(Path::new("config.toml")).unwrap();
        let prod: &Profile = cfg.profile("prod").unwrap();

        jail.set_env(TOKEN_ENV, "generic-env-token");
        jail.set_env("PROD_DATAALL_TOKEN", "profile-env-token");
        let token = resolve_token(prod, "jail-profile-a", None).unwrap();
        assert_eq!(token.expose_secret(), "profile-env-token");

        jail.set_env("PROD_DATAALL_TOKEN", "   ");
        let token = resolve_token(prod, "jail-profile-a", None).unwrap();
        assert_eq!(token.expose_secret(), "generic-env-token");
        Ok(())
    });
}
