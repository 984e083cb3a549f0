use anyhow::Context;
use cardio_protocol::DEFAULT_API_URL;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub(crate) const API_URL_ENV: &str = "CARDIO_API_URL";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct IntakeConfig {
    #[serde(default)]
    pub(crate) api_url: Option<String>,
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
}

impl IntakeConfig {
    /// A missing file is the same as an empty one.
    pub(crate) fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Settings {
    pub(crate) api_url: String,
    pub(crate) timeout: Option<Duration>,
}

/// Layers default < config file < environment < command line. Blank values
/// count as unset.
pub(crate) fn resolve_settings(
    cli_api_url: Option<&str>,
    cli_timeout_secs: Option<u64>,
    env_api_url: Option<&str>,
    config: &IntakeConfig,
) -> Settings {
    let api_url = [cli_api_url, env_api_url, config.api_url.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
        .unwrap_or(DEFAULT_API_URL)
        .to_string();
    let timeout_secs = cli_timeout_secs
        .or(config.timeout_secs)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    let timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs));
    Settings { api_url, timeout }
}
