mod endpoint;
mod query;
mod search;
mod system;

pub use endpoint::{run_endpoint, EndpointCommand};
pub use query::{run_query, QueryArgs};
pub use search::{run_search, SearchArgs};
pub use system::{resolve_system_endpoint, run_system};

use dnsql_application::relation::{ConstraintUsage, Row, RowCursor, Value};
use serde::Serialize;
use std::io::Write;

/// Places each constraint value into the argv slot its usage assigned.
fn bind_args(usage: &[ConstraintUsage], values: Vec<Value>) -> Vec<Value> {
    let mut slots: Vec<(usize, Value)> = usage
        .iter()
        .zip(values)
        .filter_map(|(u, value)| u.argv_index.map(|idx| (idx, value)))
        .collect();
    slots.sort_by_key(|(idx, _)| *idx);
    slots.into_iter().map(|(_, value)| value).collect()
}

/// Drains the cursor, writing one JSON object per row.
fn print_rows<R: Row + Serialize>(mut cursor: RowCursor<R>) -> anyhow::Result<usize> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut printed = 0;

    while !cursor.eof() {
        if let Some(row) = cursor.current() {
            serde_json::to_writer(&mut out, row)?;
            writeln!(out)?;
            printed += 1;
        }
        cursor.advance();
    }

    out.flush()?;
    Ok(printed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_args_orders_by_argv_slot() {
        let usage = [
            ConstraintUsage {
                argv_index: Some(1),
                omit: false,
            },
            ConstraintUsage {
                argv_index: None,
                omit: false,
            },
            ConstraintUsage {
                argv_index: Some(0),
                omit: true,
            },
        ];

        let args = bind_args(
            &usage,
            vec![Value::from("b"), Value::from("skipped"), Value::from("a")],
        );

        assert_eq!(args, vec![Value::from("a"), Value::from("b")]);
    }
}
