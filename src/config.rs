use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::providers::trello::DEFAULT_BASE_URL;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub trello: TrelloConfig,
}

/// Credentials are not checked here. Missing values stay empty and the
/// service rejects the request.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TrelloConfig {
    pub api_key: String,
    pub token: String,
    pub username: String,
    pub base_url: String,
}

impl Default for TrelloConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            token: String::new(),
            username: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl TrelloConfig {
    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(v) = var("TRELLO_API_KEY") {
            self.api_key = v;
        }
        if let Some(v) = var("TRELLO_API_TOKEN") {
            self.token = v;
        }
        if let Some(v) = var("TRELLO_USERNAME") {
            self.username = v;
        }
        if let Some(v) = var("TRELLO_BASE_URL").filter(|v| !v.trim().is_empty()) {
            self.base_url = v;
        }
    }
}

fn config_path() -> PathBuf {
    data_dir().join("config.toml")
}

pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".addcard")
}

pub fn load_config() -> Result<AppConfig> {
    let var = env_then_dotenv(Path::new(".env"), |name| std::env::var(name).ok());
    load_config_from(&config_path(), var)
}

/// Variables from an optional `.env` file. A missing or unreadable file
/// yields nothing, and lines that fail to parse are skipped.
fn dotenv_vars(path: &Path) -> HashMap<String, String> {
    dotenvy::from_path_iter(path)
        .map(|iter| iter.filter_map(|item| item.ok()).collect())
        .unwrap_or_default()
}

/// Looks a name up in `var` first and falls back to the `.env` file.
pub fn env_then_dotenv(
    dotenv_path: &Path,
    var: impl Fn(&str) -> Option<String>,
) -> impl Fn(&str) -> Option<String> {
    let file = dotenv_vars(dotenv_path);
    move |name| var(name).or_else(|| file.get(name).cloned())
}

/// Reads the optional config file, then lets environment variables win.
pub fn load_config_from(
    path: &Path,
    var: impl Fn(&str) -> Option<String>,
) -> Result<AppConfig> {
    let mut config = if path.exists() {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        toml::from_str::<AppConfig>(&contents)
            .with_context(|| "Failed to parse config.toml")?
    } else {
        AppConfig::default()
    };
    config.trello.apply_env(var);
    Ok(config)
}
