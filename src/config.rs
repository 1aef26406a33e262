use crate::fs::FileSystem;
use crate::viz::ChartSettings;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE: &str = ".reconview.toml";
pub const DEFAULT_BACKEND: &str = "http://127.0.0.1:5001";
pub const DEFAULT_PREFS_FILE: &str = ".reconview-prefs.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub backend: Backend,
    pub server: Server,
    pub charts: ChartSettings,
    pub prefs_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backend {
    pub url: String,
    /// Path prefix the backend's own pages live under, used for links.
    pub docroot: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Server {
    pub port: u16,
    pub open_browser: bool,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    backend: Option<RawBackend>,
    server: Option<RawServer>,
    charts: Option<RawCharts>,
    preferences: Option<RawPreferences>,
}

#[derive(Debug, Deserialize)]
struct RawBackend {
    url: Option<String>,
    docroot: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawServer {
    port: Option<u16>,
    open_browser: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawCharts {
    bar_width: Option<f64>,
    bar_height: Option<f64>,
    bubble_diameter: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawPreferences {
    path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            server: Server::default(),
            charts: ChartSettings::default(),
            prefs_path: PathBuf::from(DEFAULT_PREFS_FILE),
        }
    }
}

impl Default for Backend {
    fn default() -> Self {
        Self {
            url: DEFAULT_BACKEND.to_string(),
            docroot: String::new(),
        }
    }
}

impl Default for Server {
    fn default() -> Self {
        Self {
            port: 3000,
            open_browser: false,
        }
    }
}

impl Config {
    /// Loads `.reconview.toml` from `dir`, falling back to defaults when the
    /// file is absent.
    pub fn load(dir: &Path, fs: &dyn FileSystem) -> Result<Self, ConfigError> {
        Self::load_file(&dir.join(CONFIG_FILE), fs)
    }

    pub fn load_file(path: &Path, fs: &dyn FileSystem) -> Result<Self, ConfigError> {
        if !fs.exists(path) {
            return Ok(Self::default());
        }

        let content = fs.read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;
        let defaults = Self::default();

        let backend = match raw.backend {
            Some(b) => Backend {
                url: b.url.unwrap_or(defaults.backend.url),
                docroot: b.docroot.unwrap_or_default(),
            },
            None => defaults.backend,
        };

        let server = match raw.server {
            Some(s) => Server {
                port: s.port.unwrap_or(defaults.server.port),
                open_browser: s.open_browser.unwrap_or(defaults.server.open_browser),
            },
            None => defaults.server,
        };

        let charts = match raw.charts {
            Some(c) => ChartSettings {
                bar_width: c.bar_width.unwrap_or(defaults.charts.bar_width),
                bar_height: c.bar_height.unwrap_or(defaults.charts.bar_height),
                bubble_diameter: c.bubble_diameter.unwrap_or(defaults.charts.bubble_diameter),
            },
            None => defaults.charts,
        };

        let prefs_path = raw
            .preferences
            .and_then(|p| p.path)
            .unwrap_or(defaults.prefs_path);

        Ok(Self {
            backend,
            server,
            charts,
            prefs_path,
        })
    }

    /// Applies `--backend` from the command line.
    pub fn with_backend(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.backend.url = url;
        }
        self
    }
}

pub fn generate_config_template() -> String {
    format!(
        r#"# reconview configuration

[backend]
# Base URL of the recon backend web UI
url = "{DEFAULT_BACKEND}"
# Prefix for links into the backend's own pages
# docroot = ""

[server]
port = 3000
open_browser = false

[charts]
bar_width = 1100.0
bar_height = 520.0
bubble_diameter = 900.0

[preferences]
path = "{DEFAULT_PREFS_FILE}"
"#
    )
}
