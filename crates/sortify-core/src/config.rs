//! Settings.
//!
//! Settings are read once at start-up and handed to the components that need
//! them; nothing in this crate reads the environment afterwards.
//!
//! Sources, later ones winning:
//! 1. `settings.json` (an explicit path, or `<config dir>/sortify/settings.json`)
//! 2. `EMAIL_ADDRESS`
//! 3. `SORTIFY_OWNER_EMAIL`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::scoring::Scorer;
use crate::{Error, Result};

/// Environment variable naming the mailbox owner.
pub const OWNER_EMAIL_VAR: &str = "SORTIFY_OWNER_EMAIL";

/// Fallback variable shared with the mail account configuration.
pub const EMAIL_ADDRESS_VAR: &str = "EMAIL_ADDRESS";

/// Application settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Address of the mailbox being triaged.
    #[serde(default)]
    pub owner_email: Option<String>,
}

impl Settings {
    /// Default settings file location.
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sortify")
            .join("settings.json")
    }

    /// Reads settings from a JSON file.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No settings file at {}", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&contents)?;
        Ok(settings.normalized())
    }

    /// Applies environment overrides through `lookup`.
    ///
    /// `SORTIFY_OWNER_EMAIL` beats `EMAIL_ADDRESS`; blank values are ignored.
    #[must_use]
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let from_env = [OWNER_EMAIL_VAR, EMAIL_ADDRESS_VAR]
            .into_iter()
            .filter_map(|var| lookup(var).and_then(|v| non_blank(&v)))
            .next();

        if from_env.is_some() {
            self.owner_email = from_env;
        }
        self
    }

    /// Loads settings from `path` (or the default location) and the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file is unreadable or invalid.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map_or_else(Self::default_path, Path::to_path_buf);
        let settings = Self::from_file(&path)?.with_env(|var| std::env::var(var).ok());

        match &settings.owner_email {
            Some(owner) => info!("Triaging mailbox of {owner}"),
            None => info!("No owner address configured; self-sent detection is off"),
        }

        Ok(settings)
    }

    /// Writes settings as pretty JSON, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Checks the settings for values that cannot work.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the owner address has no `@`.
    pub fn validate(&self) -> Result<()> {
        match &self.owner_email {
            Some(owner) if !owner.contains('@') => Err(Error::Config(format!(
                "owner_email {owner:?} is not an email address"
            ))),
            _ => Ok(()),
        }
    }

    /// Builds the importance scorer for these settings.
    #[must_use]
    pub fn scorer(&self) -> Scorer {
        Scorer::new(self.owner_email.clone())
    }

    fn normalized(mut self) -> Self {
        self.owner_email = self.owner_email.as_deref().and_then(non_blank);
        self
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
