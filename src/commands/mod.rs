mod actions;
mod chart;
mod init;
mod scans;
mod serve;

pub use actions::{cmd_delete, cmd_export, cmd_search, cmd_stop};
pub use chart::{cmd_chart, cmd_tree};
pub use init::cmd_init;
pub use scans::cmd_scans;
pub use serve::cmd_serve;

use crate::cli::GlobalArgs;
use crate::config::Config;
use crate::fetch::{HttpTransport, ReconApi};
use crate::fs::{FileSystem, default_fs};
use crate::style;
use std::path::Path;
use tokio::runtime::Runtime;

/// Shared context for command execution, reducing boilerplate across commands.
pub struct CommandContext {
    pub config: Config,
    pub fs: &'static dyn FileSystem,
}

impl CommandContext {
    /// Loads config (`--config` or `./.reconview.toml`) and applies
    /// `--backend`. A broken config file falls back to defaults with a
    /// warning.
    pub fn new(global: &GlobalArgs) -> Self {
        let fs = default_fs();
        let loaded = match &global.config {
            Some(path) => Config::load_file(path, fs),
            None => Config::load(Path::new("."), fs),
        };
        let config = loaded.unwrap_or_else(|e| {
            style::warning(&format!("Failed to load config: {}. Using defaults.", e));
            Config::default()
        });

        Self {
            config: config.with_backend(global.backend.clone()),
            fs,
        }
    }

    /// Returns Err(exit_code) if the backend URL is unusable.
    pub fn api(&self) -> Result<ReconApi<HttpTransport>, i32> {
        match HttpTransport::new(&self.config.backend.url) {
            Ok(transport) => Ok(ReconApi::new(transport, self.config.backend.docroot.clone())),
            Err(e) => {
                style::error(&e.to_string());
                Err(1)
            }
        }
    }

    /// Writes `content` to `output`, or stdout when no file is given.
    pub fn emit(&self, output: Option<&Path>, content: &str) -> i32 {
        match output {
            Some(path) => {
                if let Err(e) = self.fs.write(path, content) {
                    style::error(&format!("Failed to write {}: {}", style::path(path), e));
                    return 1;
                }
                style::success(&format!("Written to {}", style::path(path)));
            }
            None => print!("{}", content),
        }
        0
    }
}

pub(crate) fn runtime() -> Result<Runtime, i32> {
    Runtime::new().map_err(|e| {
        style::error(&format!("Failed to create tokio runtime: {}", e));
        1
    })
}
