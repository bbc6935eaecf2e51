use super::{bind_args, print_rows, resolve_system_endpoint};
use crate::di::Services;
use clap::Args;
use dnsql_application::relation::{Constraint, Value};
use dnsql_application::use_cases::{DnsColumn, QueryDnsUseCase};
use tracing::info;

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Domain name to look up
    #[arg(short, long)]
    pub domain: String,

    /// Endpoint descriptor, e.g. udp://8.8.8.8:53 or https://dns.google/dns-query
    #[arg(short, long)]
    pub nameserver: Option<String>,

    /// Record type (default A)
    #[arg(short = 't', long = "type")]
    pub record_type: Option<String>,

    /// Record class (default IN)
    #[arg(long)]
    pub class: Option<String>,
}

pub async fn run_query(services: &Services, args: QueryArgs) -> anyhow::Result<()> {
    let nameserver = match args.nameserver.or_else(|| services.default_nameserver.clone()) {
        Some(ns) => ns,
        None => resolve_system_endpoint(services).await?,
    };

    let mut constraints = vec![
        Constraint::eq(DnsColumn::Domain.index()),
        Constraint::eq(DnsColumn::Nameserver.index()),
    ];
    let mut values = vec![Value::from(args.domain), Value::from(nameserver.as_str())];

    if let Some(record_type) = args.record_type {
        constraints.push(Constraint::eq(DnsColumn::Type.index()));
        values.push(Value::from(record_type));
    }
    if let Some(class) = args.class {
        constraints.push(Constraint::eq(DnsColumn::Class.index()));
        values.push(Value::from(class));
    }

    let planned = QueryDnsUseCase::compile(&constraints)?;
    let argv = bind_args(&planned.usage, values);
    let cursor = services.query_dns.execute(&planned.plan, &argv).await?;

    let printed = print_rows(cursor)?;
    info!(rows = printed, nameserver = %nameserver, "Query complete");
    Ok(())
}
