use clap::Subcommand;
use dnsql_domain::{format_classic, format_tls, Endpoint};

#[derive(Subcommand, Debug)]
pub enum EndpointCommand {
    /// Format a udp:// or tcp:// descriptor
    Classic {
        #[arg(long, default_value = "udp")]
        protocol: String,
        #[arg(long)]
        host: String,
        #[arg(long, default_value_t = 53)]
        port: u16,
    },
    /// Format a tls:// descriptor carrying the TLS server name
    Tls {
        #[arg(long)]
        host: String,
        #[arg(long, default_value_t = 853)]
        port: u16,
        #[arg(long)]
        hostname: String,
    },
}

pub fn run_endpoint(command: EndpointCommand) -> anyhow::Result<()> {
    let descriptor = match command {
        EndpointCommand::Classic {
            protocol,
            host,
            port,
        } => format_classic(&protocol, &host, port),
        EndpointCommand::Tls {
            host,
            port,
            hostname,
        } => format_tls(&host, port, &hostname),
    };

    // refuse to print something the resolver factory would reject
    let _: Endpoint = descriptor.parse()?;

    println!("{}", descriptor);
    Ok(())
}
