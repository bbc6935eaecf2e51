use clap::{Parser, Subcommand};
use dnsql_domain::CliOverrides;
use std::process::ExitCode;
use tracing::info;

mod bootstrap;
mod commands;
mod di;
mod exit_code;

use commands::{EndpointCommand, QueryArgs, SearchArgs};

#[derive(Parser)]
#[command(name = "dnsql")]
#[command(version)]
#[command(about = "Query DNS nameservers as relations")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Per-exchange timeout in milliseconds
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Path of the system resolver configuration
    #[arg(long, global = true)]
    resolv_conf: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Query a nameserver and print one row per resource record
    Query(QueryArgs),
    /// Expand a partial name against the system search list
    Search(SearchArgs),
    /// Print the endpoint descriptor of a system nameserver
    System,
    /// Format endpoint descriptors
    #[command(subcommand)]
    Endpoint(EndpointCommand),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", failure_line(&e));
            exit_code::from_error(&e)
        }
    }
}

/// The single line printed on failure. Logging may not be initialised yet.
fn failure_line(err: &anyhow::Error) -> String {
    format!("dnsql: {:#}", err)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let overrides = CliOverrides {
        log_level: cli.log_level,
        timeout_ms: cli.timeout_ms,
        resolv_conf: cli.resolv_conf,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), overrides)?;
    bootstrap::init_logging(&config);

    info!("Starting dnsql v{}", env!("CARGO_PKG_VERSION"));

    let services = di::Services::new(&config);

    match cli.command {
        Command::Query(args) => commands::run_query(&services, args).await,
        Command::Search(args) => commands::run_search(&services, args).await,
        Command::System => commands::run_system(&services).await,
        Command::Endpoint(command) => commands::run_endpoint(command),
    }
}
