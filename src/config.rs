use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const CONFIG_FILE: &str = "config.json";

/// Connection settings for the usage store.
#[derive(Debug, Clone)]
pub struct Config {
    pub supabase_url: String,
    pub supabase_key: String,
}

/// On-disk form; every field is optional so the CLI or environment can
/// supply the rest.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    #[serde(default)]
    pub supabase_url: Option<String>,
    #[serde(default)]
    pub supabase_key: Option<String>,
}

impl ConfigFile {
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "token-tracker")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// A missing file is an empty config; a malformed one is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {:?}", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl Config {
    /// Values given on the command line (or through their environment
    /// variables) take precedence over the config file. Blank values count
    /// as unset, so an exported but empty variable falls through to the file.
    pub fn resolve(url: Option<String>, key: Option<String>, file: ConfigFile) -> Result<Self> {
        let supabase_url = non_blank(url)
            .or_else(|| non_blank(file.supabase_url))
            .context("Supabase URL not configured: pass --url, set SUPABASE_URL, or add supabaseUrl to the config file")?;
        let supabase_key = non_blank(key)
            .or_else(|| non_blank(file.supabase_key))
            .context("Supabase key not configured: pass --key, set SUPABASE_ANON_KEY, or add supabaseKey to the config file")?;

        Ok(Self {
            supabase_url,
            supabase_key,
        })
    }

    pub fn load(url: Option<String>, key: Option<String>) -> Result<Self> {
        let file = match ConfigFile::default_path() {
            Some(path) => ConfigFile::load_from(&path)?,
            None => ConfigFile::default(),
        };
        Self::resolve(url, key, file)
    }
}
