pub mod analysis;
pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod fetch;
pub mod fs;
pub mod model;
pub mod prefs;
pub mod render;
pub mod server;
pub mod style;
pub mod view;
pub mod viz;

pub use api::{
    ReconviewError, load_tree, parse_scan_rows, render_bar_chart, render_chart, scan_table,
    tree_stats,
};
pub use cli::Cli;
pub use commands::{
    cmd_chart, cmd_delete, cmd_export, cmd_init, cmd_scans, cmd_search, cmd_serve, cmd_stop,
    cmd_tree,
};
pub use config::Config;
pub use viz::{Chart, ChartError, ChartKind, ChartSettings};
