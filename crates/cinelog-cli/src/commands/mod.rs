pub mod browse;
pub mod config;
pub mod delete;
pub mod edit;
pub mod list;
pub mod progress;
pub mod prompts;
pub mod record;
pub mod show;

use cinelog_client::{HttpBackend, MovieBackend};
use cinelog_config::Config;
use color_eyre::Result;

/// What every backend-facing command needs: the client and display settings.
pub struct Session {
    backend: HttpBackend,
    placeholder: String,
}

impl Session {
    pub fn connect(config: Config) -> Result<Self> {
        let backend = HttpBackend::from_config(&config).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
        Ok(Self {
            backend,
            placeholder: config.display.placeholder_poster,
        })
    }

    pub fn backend(&self) -> &dyn MovieBackend {
        &self.backend
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }
}
