//! Command-line launcher for the MEP Digital Ecosystem dashboard.

mod bootstrap_helpers;
mod cli_args;
mod clipboard_sinks;

use anyhow::{Context, Result};
use mep_dashboard::DIAGRAM_DEFINITION;
use mep_gateway::run_dashboard_server;

pub use bootstrap_helpers::init_tracing;
pub use cli_args::Cli;
pub use clipboard_sinks::{
    copy_to_system_clipboard, CommandClipboardSink, StdoutClipboardSink, SYSTEM_CLIPBOARD_SINKS,
};

/// Runs the mode selected on the command line.
pub async fn run_cli(cli: Cli) -> Result<()> {
    if cli.print_diagram_definition {
        println!("{DIAGRAM_DEFINITION}");
        return Ok(());
    }
    if cli.copy_diagram_definition {
        let sink = copy_to_system_clipboard(DIAGRAM_DEFINITION)
            .context("failed to copy diagram definition")?;
        tracing::info!(sink, "diagram definition copied");
        if sink != "stdout" {
            eprintln!("diagram definition copied via {sink}");
        }
        return Ok(());
    }
    run_dashboard_server(cli.server_config()).await
}
