use anyhow::{Context, Result};
use recall_llm::LlmSettings;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Overrides the config file location
pub const CONFIG_ENV: &str = "RECALL_CONFIG";

/// Overrides `llm.host`
pub const HOST_ENV: &str = "OLLAMA_HOST";

pub const DEFAULT_CONFIG_TOML: &str = r#"[llm]
backend = "ollama"               # "ollama" or "openai" (LM Studio, llama.cpp server, ...)
model = "mistral"                # model name
host = "http://localhost:11434"  # ollama: :11434, LM Studio: :1234
context_size = 0                 # 0 = ask the backend, falling back to 8192

[output]
dir = "~/recall"                 # folder holding one subfolder per meeting
"#;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub llm: LlmConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    #[serde(flatten)]
    pub settings: LlmSettings,

    /// Context window in tokens; 0 = auto-detect
    pub context_size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "~/recall".to_string(),
        }
    }
}

impl OutputConfig {
    #[must_use]
    pub fn resolved_dir(&self) -> PathBuf {
        expand_tilde(&self.dir)
    }
}

impl Config {
    /// Load the config file (defaults when absent), then apply env overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&config_path()?)?;
        if let Ok(host) = env::var(HOST_ENV) {
            if !host.trim().is_empty() {
                log::debug!("{HOST_ENV} overrides llm.host with {host}");
                config.llm.settings.host = host;
            }
        }
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("Invalid config {}", path.display()))
    }
}

/// `$RECALL_CONFIG`, else `~/.config/recall/config.toml`
pub fn config_path() -> Result<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    let home = dirs::home_dir().context("Cannot determine home directory")?;
    Ok(home.join(".config").join("recall").join("config.toml"))
}

/// Write the default config if none exists yet; returns its path.
pub fn ensure_config_file() -> Result<PathBuf> {
    let path = config_path()?;
    if !path.exists() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, DEFAULT_CONFIG_TOML)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Created default config at {}", path.display());
    }
    Ok(path)
}

/// Expand a leading `~` to the home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    let home = dirs::home_dir();
    match (path, home) {
        ("~", Some(home)) => home,
        (p, Some(home)) if p.starts_with("~/") => home.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    }
}
