use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result, bail};
use client::ClientConfig;
use serde::Deserialize;

use crate::cli::Cli;

/// Optional settings file; flags and environment variables override it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    pub api_url: Option<String>,
    pub token: Option<String>,
    pub page_size: Option<u32>,
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("admin-console").join("config.toml"))
    }

    /// A missing file is an empty config.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => match Self::default_path() {
                Some(path) => Self::load_from(&path),
                None => Ok(Self::default()),
            },
        }
    }
}

pub fn client_config(cli: &Cli, file: &FileConfig) -> Result<ClientConfig> {
    let Some(url) = cli.api_url.as_deref().or(file.api_url.as_deref()) else {
        bail!("no API URL configured; pass --api-url or set ADMIN_API_URL");
    };
    let mut config = ClientConfig::new(url)?;
    if let Some(token) = cli.token.as_deref().or(file.token.as_deref())
        && !token.trim().is_empty()
    {
        config = config.with_token(token.trim());
    }
    if let Some(secs) = file.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    Ok(config)
}
