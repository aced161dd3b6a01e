//! Typed settings for the paysync CLI, layered from an optional TOML file
//! and `PAYSYNC_*` environment overrides.

use std::path::Path;

use anyhow::Context;
use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub account: AccountSettings,
    #[serde(default = "default_locale")]
    pub locale: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub access_token: Option<String>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            access_token: None,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AccountSettings {
    pub creditor: Option<String>,
}

fn default_base_url() -> String {
    "https://api.paysync.dev".to_string()
}

fn default_locale() -> String {
    "en".to_string()
}

impl Settings {
    /// Load settings from the given file (or `paysync.toml` in the working
    /// directory when present), then apply `PAYSYNC_*` environment
    /// overrides with `__` as the section separator.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = Config::builder();
        builder = match path {
            Some(path) => builder.add_source(File::from(path)),
            None => builder.add_source(File::with_name("paysync").required(false)),
        };
        builder
            .add_source(Environment::with_prefix("PAYSYNC").separator("__"))
            .build()
            .and_then(Config::try_deserialize)
            .context("failed to load settings")
    }
}
