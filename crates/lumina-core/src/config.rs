use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// On-disk configuration (`config.toml` in the data dir). Every field has
/// a default, so a missing file or a partial file both work.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LuminaConfig {
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// The single shared editor secret, stored in plain text. This is a
    /// one-person, device-local tool; anything multi-user needs a real
    /// credential store.
    #[serde(default = "default_admin_password")]
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            password: default_admin_password(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Gemini API key. Unset means the assistant answers with a fixed
    /// advisory message instead of calling out.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_assistant_model")]
    pub model: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_assistant_model(),
        }
    }
}

fn default_admin_password() -> String {
    "admin".to_string()
}

fn default_assistant_model() -> String {
    "gemini-3-flash-preview".to_string()
}

impl LuminaConfig {
    /// Effective editor secret: `LUMINA_ADMIN_PASSWORD` env overrides the
    /// config file.
    #[must_use]
    pub fn admin_password(&self) -> String {
        non_empty_env("LUMINA_ADMIN_PASSWORD").unwrap_or_else(|| self.admin.password.clone())
    }

    /// Effective assistant API key: `LUMINA_API_KEY` env, then `GEMINI_API_KEY`,
    /// then the config file. `None` when nowhere configured.
    #[must_use]
    pub fn api_key(&self) -> Option<String> {
        non_empty_env("LUMINA_API_KEY")
            .or_else(|| non_empty_env("GEMINI_API_KEY"))
            .or_else(|| self.assistant.api_key.clone().filter(|k| !k.is_empty()))
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

/// Load `config.toml` from the data dir. A missing file yields the default
/// config; a malformed file is a hard error, since silently ignoring an
/// editor's explicit settings would be worse than stopping.
pub fn load_config(data_dir: &Path) -> Result<LuminaConfig> {
    let path = data_dir.join("config.toml");
    if !path.exists() {
        return Ok(LuminaConfig::default());
    }
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("read config at {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("parse config at {}", path.display()))
}

/// Resolve the data dir: explicit flag > `LUMINA_DIR` env > the platform
/// data dir > a `.lumina` dir in the working directory as a last resort.
#[must_use]
pub fn resolve_data_dir(flag: Option<&Path>) -> PathBuf {
    if let Some(dir) = flag {
        return dir.to_path_buf();
    }
    if let Some(dir) = non_empty_env("LUMINA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::data_dir()
        .map_or_else(|| PathBuf::from(".lumina"), |base| base.join("lumina"))
}
