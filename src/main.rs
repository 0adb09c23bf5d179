mod debug_report;

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use chainroute::{RequestDescriptor, load_route_file};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Load a route file and show which action a request dispatches to.
///
/// Exit codes: 0 when the request matched (or only tables were printed),
/// 1 when no action matched, 2 for invalid arguments or route files.
#[derive(Parser)]
#[command(name = "chainroute", version, about, long_about = None)]
struct Cli {
    /// TOML route file.
    #[arg(short, long)]
    routes: PathBuf,

    /// Request method.
    #[arg(short, long, default_value = "GET")]
    method: String,

    /// Force ANSI color output.
    #[arg(long, conflicts_with = "no_color")]
    color: bool,

    /// Disable ANSI color output.
    #[arg(long)]
    no_color: bool,

    /// Only print the loaded action tables.
    #[arg(long)]
    table_only: bool,

    /// Request path, e.g. `/user/42/edit`.
    path: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "chainroute=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let color = if cli.color {
        true
    } else if cli.no_color {
        false
    } else {
        io::stdout().is_terminal()
    };

    let table = match load_route_file(&cli.routes) {
        Ok(table) => table,
        Err(err) => {
            tracing::error!(path = %cli.routes.display(), "{err}");
            return ExitCode::from(2);
        }
    };
    tracing::info!(actions = table.len(), "routes loaded");

    let path = match (&cli.path, cli.table_only) {
        (Some(path), false) => path,
        _ => {
            debug_report::print_tables(&table.describe(), color);
            return ExitCode::SUCCESS;
        }
    };

    let request = RequestDescriptor::parse(&cli.method, path);
    let trace = table.dispatch_verbose(&request);
    debug_report::print_dispatch(&table, &request, &trace, color);

    if trace.outcome.is_match() { ExitCode::SUCCESS } else { ExitCode::from(1) }
}
