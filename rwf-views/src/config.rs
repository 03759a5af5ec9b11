//! Global configuration.
//!
//! Loaded from `rwf.toml` in the current directory, if it exists. View settings go
//! into the `[views]` table; other tables in the file are ignored:
//!
//! ```toml
//! [views]
//! templates = "templates"
//! mode = "release"
//! pattern = "**/*.html"
//! autoescape = true
//! ```
//!
//! The environment variables `RWF_TEMPLATES` and `RWF_TEMPLATES_MODE` override the
//! templates folder and the mode.
use once_cell::sync::OnceCell;
use std::env::var;
use std::fs::read_to_string;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use colored::Colorize;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::view::views::{Mode, DEFAULT_PATTERN};

static CONFIG: OnceCell<Config> = OnceCell::new();

#[derive(Error, Debug)]
pub enum Error {
    #[error("config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("config file not found")]
    Io(#[from] std::io::Error),

    #[error("\"{0}\" is not a templates mode, use \"release\" or \"debug\"")]
    Mode(String),

    #[error("config is already loaded")]
    ConfigLoaded,

    #[error("config not found")]
    NoConfig,
}

/// Global configuration.
#[derive(Debug, Clone)]
pub struct Config {
    path: Option<PathBuf>,
    /// Folder templates are read from.
    pub templates: PathBuf,
    /// Compile templates once (`release`) or on every render (`debug`).
    pub mode: Mode,
    /// Glob matching template files, relative to the templates folder.
    pub pattern: String,
    /// Escape HTML in template expressions.
    pub autoescape: bool,
    /// Logging to a terminal.
    pub tty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: None,
            templates: PathBuf::from("templates"),
            mode: Mode::default(),
            pattern: DEFAULT_PATTERN.to_string(),
            autoescape: true,
            tty: std::io::stderr().is_terminal(),
        }
    }
}

impl Config {
    /// Load configuration from `rwf.toml` and the environment.
    pub fn load() -> Result<Config, Error> {
        let path = ["rwf.toml", "Rwf.toml"]
            .into_iter()
            .map(PathBuf::from)
            .find(|path| path.exists());

        let mut config = match path {
            Some(path) => Config::load_from(path)?,
            None => Config::default(),
        };

        config.apply_env(|name| var(name).ok())?;

        Ok(config)
    }

    /// Load configuration from a file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Config, Error> {
        let file = read_to_string(path.as_ref())?;
        let mut config = Config::from_toml(&file)?;
        config.path = Some(path.as_ref().to_owned());

        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Config, Error> {
        let file: ConfigFile = toml::from_str(text)?;
        let mut config = Config::default();

        if let Some(views) = file.views {
            if let Some(templates) = views.templates {
                config.templates = templates;
            }

            if let Some(mode) = views.mode {
                config.mode = mode;
            }

            if let Some(pattern) = views.pattern {
                config.pattern = pattern;
            }

            config.autoescape = views.autoescape;
        }

        Ok(config)
    }

    /// Override settings with environment variables.
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), Error> {
        if let Some(templates) = lookup("RWF_TEMPLATES") {
            self.templates = PathBuf::from(templates);
        }

        if let Some(mode) = lookup("RWF_TEMPLATES_MODE") {
            self.mode = mode.parse().map_err(Error::Mode)?;
        }

        Ok(())
    }

    /// File the configuration was loaded from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Use this configuration globally. Must be called before anything reads the configuration.
    pub fn set(self) -> Result<(), Error> {
        CONFIG.set(self).map_err(|_| Error::ConfigLoaded)
    }

    pub fn get() -> &'static Config {
        get_config()
    }

    /// Log the settings that matter when debugging template issues.
    pub fn log_info(&self) {
        let mode = match (self.mode, self.tty) {
            (Mode::Release, true) => "release".green().to_string(),
            (Mode::Debug, true) => "debug".yellow().to_string(),
            (mode, false) => mode.to_string(),
        };

        match self.path {
            Some(ref path) => info!("configuration loaded from \"{}\"", path.display()),
            None => info!("configuration not found, using defaults"),
        }

        info!(
            "serving templates from \"{}\" in {} mode",
            self.templates.display(),
            mode
        );
    }
}

pub fn get_config() -> &'static Config {
    CONFIG.get_or_init(|| Config::load().unwrap_or_default())
}

#[derive(Serialize, Deserialize)]
struct ConfigFile {
    views: Option<ViewsConfig>,
}

#[derive(Serialize, Deserialize)]
struct ViewsConfig {
    templates: Option<PathBuf>,
    mode: Option<Mode>,
    pattern: Option<String>,
    #[serde(default = "ViewsConfig::default_autoescape")]
    autoescape: bool,
}

impl ViewsConfig {
    fn default_autoescape() -> bool {
        true
    }
}
