use crate::fetch::ExportFormat;
use crate::view::ScanFilter;
use crate::viz::ChartKind;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "reconview")]
#[command(about = "Scan tables, charts and a dashboard for a recon backend")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Backend base URL (overrides .reconview.toml)
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Config file (defaults to ./.reconview.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List scans known to the backend
    Scans(ScansArgs),

    /// Search the results of one scan
    Search(SearchArgs),

    /// Abort running scans
    Stop(IdsArgs),

    /// Delete scans and their data
    Delete(IdsArgs),

    /// Download scan results
    Export(ExportArgs),

    /// Render chart input JSON as SVG or an HTML page
    Chart(ChartArgs),

    /// Print leaf count, node count and depth of a discovery tree
    Tree(TreeArgs),

    /// Start the dashboard web server
    Serve(ServeArgs),

    /// Generate a starter .reconview.toml configuration file
    Init(InitArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct ScansArgs {
    /// Only show scans in this state
    #[arg(long, default_value = "all")]
    pub filter: ScanFilter,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: ListFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Scan ID
    pub id: String,

    /// Restrict to one event type (e.g. IP_ADDRESS)
    #[arg(long)]
    pub event_type: Option<String>,

    /// Value to match
    #[arg(long)]
    pub value: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct IdsArgs {
    /// Scan IDs
    #[arg(required = true)]
    pub ids: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ExportArgs {
    /// Scan IDs
    #[arg(required = true)]
    pub ids: Vec<String>,

    /// Export format
    #[arg(short, long, default_value = "csv")]
    pub format: ExportFormat,

    /// Output file (defaults to reconview-export.<ext>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct ChartArgs {
    /// Chart type
    pub kind: ChartKind,

    /// Input JSON file
    pub input: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the bare SVG instead of a full HTML page
    #[arg(long)]
    pub svg: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct TreeArgs {
    /// Discovery tree JSON file; omit to fetch from the backend
    #[arg(long, conflicts_with_all = ["scan", "event_type"])]
    pub input: Option<PathBuf>,

    /// Scan ID to fetch the tree for
    #[arg(long, requires = "event_type")]
    pub scan: Option<String>,

    /// Event type to fetch the tree for
    #[arg(long, requires = "scan")]
    pub event_type: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    /// Port for HTTP server (overrides config)
    #[arg(long)]
    pub port: Option<u16>,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Path where to create .reconview.toml (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ListFormat {
    #[default]
    Text,
    Json,
    Html,
}
