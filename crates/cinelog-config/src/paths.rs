use anyhow::Result;
use std::path::{Path, PathBuf};

/// Overrides the configuration directory (useful in containers and tests).
pub const CONFIG_DIR_ENV: &str = "CINELOG_CONFIG_DIR";

pub struct PathManager {
    config_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("cinelog");

        Ok(Self::from_base(base_dir))
    }

    pub fn from_base(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        Self {
            log_dir: base_dir.join("logs"),
            config_dir: base_dir,
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn default_log_file(&self) -> PathBuf {
        self.log_dir.join("cinelog.log")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Self::from_base(dir);
        }

        // Platform config dir (e.g. ~/.config/cinelog on Linux), else the working directory
        Self::new().unwrap_or_else(|_| Self::from_base(".cinelog"))
    }
}
