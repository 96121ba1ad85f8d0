use super::Config;
use crate::error::ConfigError;
use anyhow::{Context, Result};
use directories::UserDirs;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

impl Config {
    /// `$NATE_CONFIG`, else `~/.nate/config.toml`.
    pub fn default_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("NATE_CONFIG")
            && !path.trim().is_empty()
        {
            return Ok(PathBuf::from(shellexpand::tilde(path.trim()).into_owned()));
        }

        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        Ok(home.join(".nate").join("config.toml"))
    }

    /// Load the config at `path` (or the default location), writing a
    /// default file first if none exists. Environment overrides are applied
    /// after parsing and are never persisted.
    pub fn load_or_init(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path()?,
        };

        let mut config = if config_path.exists() {
            Self::load_from(&config_path)?
        } else {
            let config = Self {
                config_path: config_path.clone(),
                ..Self::default()
            };
            config.save()?;
            info!(path = %config_path.display(), "wrote default config");
            config
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "reading config");
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: Config = toml::from_str(&contents).map_err(|error| {
            ConfigError::Load(format!("{}: {}", path.display(), error.message()))
        })?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.config_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory {}", parent.display())
            })?;
        }
        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.config_path, toml_str).context("Failed to write config file")?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::Validation("model must not be empty".into()));
        }
        // The model id becomes a directory under the conversation folder.
        if !Path::new(&self.model)
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
        {
            return Err(ConfigError::Validation(format!(
                "model {:?} must be a relative name without `.` or `..` segments",
                self.model
            )));
        }
        if self.conversation_folder.trim().is_empty() {
            return Err(ConfigError::Validation(
                "conversation_folder must not be empty".into(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "request_timeout_secs must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
