use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Environment variable that overrides `backend.base_url`.
pub const BACKEND_URL_ENV: &str = "CINELOG_BACKEND_URL";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    // No built-in default: the backend location must be configured
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Shown in place of a poster when an entry has none.
    #[serde(default = "default_placeholder_poster")]
    pub placeholder_poster: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_placeholder_poster() -> String {
    "/placeholder_movie.jpg".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            placeholder_poster: default_placeholder_poster(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise start from defaults.
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply `CINELOG_BACKEND_URL` over the file value.
    pub fn apply_env(&mut self) {
        self.override_backend_url(std::env::var(BACKEND_URL_ENV).ok());
    }

    /// Replace the backend URL when `url` is set and non-empty.
    pub fn override_backend_url(&mut self, url: Option<String>) {
        if let Some(url) = url.filter(|url| !url.trim().is_empty()) {
            debug!("Backend URL overridden: {}", url);
            self.backend.base_url = Some(url.trim().to_string());
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let url = self.backend.base_url.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "backend.base_url is not configured (set it with `cinelog config set-backend <url>` or {})",
                BACKEND_URL_ENV
            )
        })?;

        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(anyhow::anyhow!(
                "backend.base_url must start with http:// or https:// (got '{}')",
                url
            ));
        }

        if self.backend.timeout_secs == 0 {
            return Err(anyhow::anyhow!("backend.timeout_secs must be greater than zero"));
        }

        Ok(())
    }

    /// Validated base URL without trailing slashes.
    pub fn base_url(&self) -> anyhow::Result<String> {
        self.validate()?;
        let url = self.backend.base_url.as_deref().unwrap_or_default();
        Ok(url.trim_end_matches('/').to_string())
    }
}
