//! Shared configuration for data.all clients.
//!
//! TOML profiles, token resolution (flag, env, keyring, plaintext), and
//! translation to `dataall_core::ConsoleConfig`. The CLI layers its
//! `GlobalOpts` overrides on top.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::time::Duration;

use dataall_api::{DEFAULT_MODULE, DEFAULT_PAGE_SIZE, EndpointMap};
use dataall_core::{ConsoleConfig, TlsVerification};
use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Environment variable consulted when a profile names no `token_env`,
/// or when the one it names is unset.
pub const TOKEN_ENV: &str = "DATAALL_TOKEN";

const KEYRING_SERVICE: &str = "dataall";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found in config")]
    UnknownProfile { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Name of the active profile: explicit choice, then the configured
    /// default, then `"default"`.
    pub fn profile_name<'a>(&'a self, explicit: Option<&'a str>) -> &'a str {
        explicit
            .or(self.default_profile.as_deref())
            .unwrap_or("default")
    }

    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProfile { name: name.into() })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Seconds between maintenance status polls; 0 disables polling.
    #[serde(default = "default_poll_secs")]
    pub maintenance_poll_secs: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: default_timeout(),
            page_size: default_page_size(),
            maintenance_poll_secs: default_poll_secs(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}
fn default_poll_secs() -> u64 {
    30
}

/// A named backend profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Backend module name → GraphQL endpoint URL.
    #[serde(default)]
    pub endpoints: BTreeMap<String, String>,

    /// Module used when `--module` is not given.
    #[serde(default = "default_module")]
    pub module: String,

    /// Environment variable holding the identity token.
    pub token_env: Option<String>,

    /// Token in plaintext (prefer keyring or env var).
    pub token: Option<String>,

    /// Tenant administrators bypass maintenance gating.
    #[serde(default)]
    pub is_admin: bool,

    /// Path to a custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    pub insecure: Option<bool>,

    pub timeout: Option<u64>,

    pub page_size: Option<u32>,
}

fn default_module() -> String {
    DEFAULT_MODULE.into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "dataall", "dataall").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("dataall");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Defaults, then the TOML file at `path` (if present), then
/// `DATAALL_`-prefixed env vars with `__` as the nesting separator
/// (`DATAALL_DEFAULTS__PAGE_SIZE=25`).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("DATAALL_").split("__"));

    let config: Config = figment.extract()?;
    debug!(path = %path.display(), profiles = config.profiles.len(), "config loaded");
    Ok(config)
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Token resolution ────────────────────────────────────────────────

/// Resolve the identity token: flag, the profile's `token_env`,
/// [`TOKEN_ENV`], the system keyring, then plaintext.
///
/// `None` is not an error: the console simply is not signed in yet.
pub fn resolve_token(
    profile: &Profile,
    profile_name: &str,
    flag: Option<&str>,
) -> Option<SecretString> {
    if let Some(token) = flag.filter(|t| !t.trim().is_empty()) {
        return Some(SecretString::from(token.to_owned()));
    }

    let env_names = profile.token_env.as_deref().into_iter().chain([TOKEN_ENV]);
    for name in env_names {
        if let Some(token) = std::env::var(name).ok().filter(|t| !t.trim().is_empty()) {
            debug!(source = name, "token from environment");
            return Some(SecretString::from(token));
        }
    }

    if let Some(token) = keyring_token(profile_name) {
        debug!("token from keyring");
        return Some(token);
    }

    profile
        .token
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .map(|t| SecretString::from(t.to_owned()))
}

fn keyring_entry(profile_name: &str) -> Result<keyring::Entry, keyring::Error> {
    keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/token"))
}

fn keyring_token(profile_name: &str) -> Option<SecretString> {
    keyring_entry(profile_name)
        .and_then(|entry| entry.get_password())
        .ok()
        .map(SecretString::from)
}

/// Store a token in the system keyring for `profile_name`.
pub fn store_token(profile_name: &str, token: &str) -> Result<(), ConfigError> {
    keyring_entry(profile_name)?.set_password(token)?;
    Ok(())
}

// ── Translation to ConsoleConfig ────────────────────────────────────

/// Parse a profile's endpoint table.
pub fn endpoint_map(profile: &Profile) -> Result<EndpointMap, ConfigError> {
    profile
        .endpoints
        .iter()
        .try_fold(EndpointMap::new(), |map, (module, url)| {
            map.with(module.clone(), url).map_err(|e| ConfigError::Validation {
                field: format!("endpoints.{module}"),
                reason: e.to_string(),
            })
        })
}

/// Build a `ConsoleConfig` from a profile and the global defaults.
pub fn profile_to_console_config(
    profile: &Profile,
    defaults: &Defaults,
    token: Option<SecretString>,
) -> Result<ConsoleConfig, ConfigError> {
    let endpoints = endpoint_map(profile)?;
    if endpoints.is_empty() {
        return Err(ConfigError::Validation {
            field: "endpoints".into(),
            reason: "at least one module endpoint is required".into(),
        });
    }
    endpoints
        .resolve(&profile.module)
        .map_err(|e| ConfigError::Validation {
            field: "module".into(),
            reason: e.to_string(),
        })?;

    let page_size = profile.page_size.unwrap_or(defaults.page_size);
    if page_size == 0 {
        return Err(ConfigError::Validation {
            field: "page_size".into(),
            reason: "must be positive".into(),
        });
    }

    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    Ok(ConsoleConfig {
        endpoints,
        module: profile.module.clone(),
        token,
        tls,
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
        page_size,
        maintenance_poll_interval: Duration::from_secs(defaults.maintenance_poll_secs),
        is_admin: profile.is_admin,
    })
}
