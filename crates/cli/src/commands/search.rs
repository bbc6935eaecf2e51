use super::{bind_args, print_rows};
use crate::di::Services;
use clap::Args;
use dnsql_application::relation::{Constraint, Value};
use dnsql_application::use_cases::{ExpandSearchListUseCase, SearchListColumn};
use tracing::info;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Partial (possibly unqualified) domain name
    #[arg(short, long)]
    pub partial: String,

    /// Dot threshold deciding whether the bare name is tried first
    #[arg(long)]
    pub ndots: Option<u32>,
}

pub async fn run_search(services: &Services, args: SearchArgs) -> anyhow::Result<()> {
    let mut constraints = vec![Constraint::eq(SearchListColumn::Partial.index())];
    let mut values = vec![Value::from(args.partial)];

    if let Some(ndots) = args.ndots {
        constraints.push(Constraint::eq(SearchListColumn::Ndots.index()));
        values.push(Value::from(i64::from(ndots)));
    }

    let planned = ExpandSearchListUseCase::compile(&constraints)?;
    let argv = bind_args(&planned.usage, values);
    let cursor = services.search_list.execute(&planned.plan, &argv).await?;

    let printed = print_rows(cursor)?;
    info!(candidates = printed, "Search list expansion complete");
    Ok(())
}
