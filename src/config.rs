use anyhow::{Context, Result};
use competency_lens_core::models::FieldNames;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub source: SourceConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub fields: FieldNames,
    #[serde(default)]
    pub history: HistoryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    #[serde(default = "default_all_description")]
    pub all_description: String,
    /// Column used as a standard's one-line label in text output.
    #[serde(default = "default_title_field")]
    pub title_field: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            all_description: default_all_description(),
            title_field: default_title_field(),
        }
    }
}

fn default_all_description() -> String {
    "Every competency across all lenses.".to_string()
}

fn default_title_field() -> String {
    "Competency".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct HistoryConfig {
    #[serde(default = "default_history_enabled")]
    pub enabled: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

fn default_history_enabled() -> bool {
    true
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let mut config = parse_config(&content)?;

    // Relative source paths are resolved against the config file's directory
    if let Some(source_path) = config.source.path.as_mut() {
        if source_path.is_relative() {
            if let Some(dir) = path.parent() {
                *source_path = dir.join(&*source_path);
            }
        }
    }

    Ok(config)
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;

    // Validate source
    match (&config.source.url, &config.source.path) {
        (Some(_), Some(_)) => anyhow::bail!("source.url and source.path are mutually exclusive"),
        (None, None) => anyhow::bail!("one of source.url or source.path must be set"),
        _ => {}
    }
    if let Some(url) = &config.source.url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            anyhow::bail!("source.url must be an http(s) URL, got '{}'", url);
        }
    }
    if config.source.timeout_secs == 0 {
        anyhow::bail!("source.timeout_secs must be > 0");
    }

    // Validate field names
    let fields = [
        ("fields.active", &config.fields.active),
        ("fields.lens_name", &config.fields.lens_name),
        ("fields.lens_description", &config.fields.lens_description),
        ("fields.mastery", &config.fields.mastery),
    ];
    let mut seen = HashSet::new();
    for (key, value) in fields {
        if value.is_empty() {
            anyhow::bail!("{} must not be empty", key);
        }
        if !seen.insert(value.as_str()) {
            anyhow::bail!("{} duplicates another field column: '{}'", key, value);
        }
    }

    Ok(config)
}
