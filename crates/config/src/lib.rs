//! Layered configuration.
//!
//! Values are merged from, in increasing order of precedence:
//! 1. built-in defaults,
//! 2. `config.toml` in the user's configuration directory,
//! 3. an explicitly given TOML file,
//! 4. `POKEVAULT_`-prefixed environment variables, with `__` separating
//!    sections (`POKEVAULT_API__MAX_IN_FLIGHT=8`).

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_PREFIX: &str = "POKEVAULT_";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub refresh: RefreshConfig,
}

/// How to talk to the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Number of entities requested from the catalog.
    pub catalog_limit: u32,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    /// Requests allowed in flight at once, across every tier.
    pub max_in_flight: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://pokeapi.co/api/v2/".to_string(),
            catalog_limit: 1025,
            connect_timeout_secs: 15,
            request_timeout_secs: 30,
            max_in_flight: 32,
        }
    }
}

impl ApiConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Entities resolved at the same time.
    pub max_concurrency: usize,
    /// Preferred language for flavor text and genus.
    pub language: String,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self { max_concurrency: 16, language: "en".to_string() }
    }
}

impl Config {
    /// Load, merge and validate configuration.
    ///
    /// Unlike the per-user file, an `explicit` file that doesn't exist is an
    /// error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit
            && !path.is_file()
        {
            exn::bail!(ErrorKind::Missing(path.display().to_string()));
        }
        let config: Self = Self::figment(explicit).extract().or_raise(|| ErrorKind::Extract)?;
        config.validate()?;
        tracing::debug!(?config, "loaded configuration");
        Ok(config)
    }

    /// The merged sources, before extraction.
    pub fn figment(explicit: Option<&Path>) -> Figment {
        Self::layered(user_config_file().as_deref(), explicit)
    }

    fn layered(user: Option<&Path>, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = user {
            figment = figment.merge(Toml::file(path));
        }
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file_exact(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn validate(&self) -> Result<()> {
        let base_url = self.api.base_url.trim();
        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            exn::bail!(ErrorKind::Invalid(format!("api.base_url must be an http(s) URL, got {base_url:?}")));
        }
        let positive = [
            ("api.catalog_limit", u64::from(self.api.catalog_limit)),
            ("api.connect_timeout_secs", self.api.connect_timeout_secs),
            ("api.request_timeout_secs", self.api.request_timeout_secs),
            ("api.max_in_flight", self.api.max_in_flight as u64),
            ("refresh.max_concurrency", self.refresh.max_concurrency as u64),
        ];
        if let Some((key, _)) = positive.iter().find(|(_, value)| *value == 0) {
            exn::bail!(ErrorKind::Invalid(format!("{key} must be at least 1")));
        }
        if self.refresh.language.trim().is_empty() {
            exn::bail!(ErrorKind::Invalid("refresh.language must not be empty".to_string()));
        }
        Ok(())
    }
}

/// `config.toml` in the platform's per-user configuration directory.
pub fn user_config_file() -> Option<PathBuf> {
    ProjectDirs::from("dev", "pokevault", "pokevault").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
