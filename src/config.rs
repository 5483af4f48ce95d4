//! User settings
//!
//! Read from `<config dir>/gimer/config.toml`, or the file named by
//! `GIMER_CONFIG`. Every key is optional and CLI flags win over the file.
//!
//! ```toml
//! confirm = "origin"   # none | origin | all
//! remote = "origin"
//! git = "/usr/bin/git"
//! cache_dir = "/var/tmp/gimer"
//! locale = "ja"
//! cleanup = false
//! ```

use crate::error::{Error, Result};
use crate::merge::DEFAULT_REMOTE;
use crate::messages::Messages;
use crate::types::ConfirmPolicy;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable overriding the settings file location
pub const CONFIG_ENV: &str = "GIMER_CONFIG";

/// Settings file contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Default confirmation policy
    pub confirm: Option<ConfirmPolicy>,
    /// Remote used for fetch, pull and push
    pub remote: Option<String>,
    /// Version-control executable
    pub git: Option<String>,
    /// Where working copies are cached
    pub cache_dir: Option<PathBuf>,
    /// Message language tag, e.g. `ja` or `en`
    pub locale: Option<String>,
    /// Delete the working copy after every run
    pub cleanup: bool,
}

impl Settings {
    /// Location of the settings file, if one can be determined
    pub fn default_path() -> Option<PathBuf> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
            _ => dirs::config_dir().map(|dir| dir.join("gimer").join("config.toml")),
        }
    }

    /// Load settings from the default location; a missing file gives defaults
    pub fn load() -> Result<Self> {
        Self::default_path().map_or_else(|| Ok(Self::default()), |path| Self::load_from(&path))
    }

    /// Load settings from `path`; a missing file gives defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no settings file");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let settings: Self = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    /// Remote name, defaulting to `origin`
    pub fn remote(&self) -> &str {
        self.remote.as_deref().unwrap_or(DEFAULT_REMOTE)
    }

    /// Executable name, defaulting to `git`
    pub fn git_program(&self) -> &str {
        self.git.as_deref().unwrap_or("git")
    }

    /// Messages for the configured locale, falling back to the environment
    pub fn messages(&self) -> Messages {
        let locale = self.locale.clone().or_else(Messages::detect_locale);
        Messages::for_locale(locale.as_deref())
    }
}
