use clap::Parser;
use reconview::cli::{Cli, Command};
use reconview::{
    cmd_chart, cmd_delete, cmd_export, cmd_init, cmd_scans, cmd_search, cmd_serve, cmd_stop,
    cmd_tree,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "reconview=warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let global = &cli.global;

    let exit_code = match cli.command {
        Command::Scans(args) => cmd_scans(global, args),
        Command::Search(args) => cmd_search(global, args),
        Command::Stop(args) => cmd_stop(global, args),
        Command::Delete(args) => cmd_delete(global, args),
        Command::Export(args) => cmd_export(global, args),
        Command::Chart(args) => cmd_chart(global, args),
        Command::Tree(args) => cmd_tree(global, args),
        Command::Serve(args) => cmd_serve(global, args),
        Command::Init(args) => cmd_init(args),
    };

    std::process::exit(exit_code);
}
