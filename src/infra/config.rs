use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const COOKIE_MAX_AGE_SECS: i64 = 60 * 60 * 24 * 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    pub model: String,
    pub api_base_url: String,
    pub analysis_max_tokens: u32,
    pub cookie_max_age_secs: i64,
    pub secure_cookies: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 3000,
            model: DEFAULT_MODEL.to_string(),
            api_base_url: DEFAULT_API_BASE.to_string(),
            analysis_max_tokens: 2000,
            cookie_max_age_secs: COOKIE_MAX_AGE_SECS,
            secure_cookies: true,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

pub struct ConfigManager {
    path: Option<PathBuf>,
    config: ServerConfig,
}

impl ConfigManager {
    const CONFIG_FILE: &'static str = "influscope.yml";

    /// Loads from an explicit file, `./influscope.yml`, or the user config
    /// directory, in that order. Missing files fall back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::discover(),
        };

        let config = match &path {
            Some(path) if path.exists() => Self::load_file(path)?,
            _ => ServerConfig::default(),
        };

        Ok(Self { path, config })
    }

    fn discover() -> Option<PathBuf> {
        let local = PathBuf::from(Self::CONFIG_FILE);
        if local.exists() {
            return Some(local);
        }
        Self::user_config_path().filter(|p| p.exists())
    }

    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("influscope").join("config.yml"))
    }

    fn load_file(path: &Path) -> Result<ServerConfig> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: ServerConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("Invalid config at {}", path.display()))?;
        Ok(config)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// File values with environment overrides applied.
    pub fn get(&self) -> ServerConfig {
        let mut config = self.config.clone();

        if let Ok(bind) = std::env::var("INFLUSCOPE_BIND") {
            config.bind_address = bind;
        }
        if let Some(port) = std::env::var("INFLUSCOPE_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
        {
            config.port = port;
        }
        if let Ok(model) = std::env::var("INFLUSCOPE_MODEL") {
            config.model = model;
        }
        if let Ok(base) = std::env::var("INFLUSCOPE_API_BASE") {
            config.api_base_url = base;
        }
        if let Ok(secure) = std::env::var("INFLUSCOPE_SECURE_COOKIES") {
            config.secure_cookies = !matches!(secure.to_lowercase().as_str(), "0" | "false" | "no");
        }

        config
    }

    /// Writes a commented default file unless one is already present.
    /// Returns `false` when the file existed.
    pub fn create_default(path: impl AsRef<Path>) -> Result<bool> {
        let path = path.as_ref();
        if path.exists() {
            return Ok(false);
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, crate::prompts::DEFAULT_CONFIG_CONTENT)
            .with_context(|| format!("Failed to write config at {}", path.display()))?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn default_file_parses_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("influscope.yml");

        assert!(ConfigManager::create_default(&path).unwrap());
        assert!(!ConfigManager::create_default(&path).unwrap());

        let manager = ConfigManager::load(Some(&path)).unwrap();
        assert_eq!(manager.config, ServerConfig::default());
        assert_eq!(manager.path(), Some(path.as_path()));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("influscope.yml");
        std::fs::write(&path, "port: 8088\nsecure_cookies: false\n").unwrap();

        let manager = ConfigManager::load(Some(&path)).unwrap();
        assert_eq!(manager.config.port, 8088);
        assert!(!manager.config.secure_cookies);
        assert_eq!(manager.config.model, DEFAULT_MODEL);
    }

    #[test]
    fn missing_explicit_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::load(Some(&dir.path().join("absent.yml"))).unwrap();
        assert_eq!(manager.config, ServerConfig::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("influscope.yml");
        std::fs::write(&path, "port: [not a number").unwrap();
        assert!(ConfigManager::load(Some(&path)).is_err());
    }
}
