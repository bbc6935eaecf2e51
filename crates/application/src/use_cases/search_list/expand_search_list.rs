use crate::ports::ResolvConfigSource;
use crate::relation::{Constraint, ConstraintUsage, IndexPlan, Operator, Row, RowCursor, Value};
use crate::services::search_list;
use dnsql_domain::resolv_config::DEFAULT_NDOTS;
use dnsql_domain::{is_fqdn, DomainError, SearchCandidateRow};
use std::sync::Arc;
use tracing::debug;

/// Columns of the search-list relation, in positional order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchListColumn {
    Partial,
    Ndots,
    Candidate,
}

impl SearchListColumn {
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(SearchListColumn::Partial),
            1 => Some(SearchListColumn::Ndots),
            2 => Some(SearchListColumn::Candidate),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl Row for SearchCandidateRow {
    fn column(&self, index: usize) -> Value {
        match SearchListColumn::from_index(index) {
            Some(SearchListColumn::Partial) => Value::Text(self.partial.to_string()),
            Some(SearchListColumn::Ndots) => Value::Integer(i64::from(self.ndots)),
            Some(SearchListColumn::Candidate) => Value::Text(self.candidate.clone()),
            None => Value::Null,
        }
    }
}

/// Argument layout: `partial` is always argument 0, `ndots` argument 1 when
/// bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchListPlan {
    pub has_ndots: bool,
}

pub struct ExpandSearchListUseCase {
    source: Arc<dyn ResolvConfigSource>,
}

impl ExpandSearchListUseCase {
    pub fn new(source: Arc<dyn ResolvConfigSource>) -> Self {
        Self { source }
    }

    pub fn compile(constraints: &[Constraint]) -> Result<IndexPlan<SearchListPlan>, DomainError> {
        let mut usage = vec![ConstraintUsage::default(); constraints.len()];
        let mut partial_at = None;
        let mut ndots_at = None;

        for (i, constraint) in constraints.iter().enumerate() {
            let column = match SearchListColumn::from_index(constraint.column) {
                Some(column @ (SearchListColumn::Partial | SearchListColumn::Ndots)) => column,
                _ => continue,
            };

            if constraint.op != Operator::Eq {
                return Err(DomainError::ConstraintViolation(format!(
                    "only equals-to operation is supported (got {})",
                    constraint.op
                )));
            }

            if !constraint.usable {
                continue;
            }

            match column {
                SearchListColumn::Partial => partial_at = Some(i),
                _ => ndots_at = Some(i),
            }
        }

        let Some(partial_at) = partial_at else {
            return Err(DomainError::ConstraintViolation(
                "partial domain value must be provided".to_string(),
            ));
        };

        usage[partial_at] = ConstraintUsage {
            argv_index: Some(SearchListColumn::Partial.index()),
            omit: false,
        };
        if let Some(ndots_at) = ndots_at {
            usage[ndots_at] = ConstraintUsage {
                argv_index: Some(SearchListColumn::Ndots.index()),
                omit: false,
            };
        }

        Ok(IndexPlan {
            usage,
            plan: SearchListPlan {
                has_ndots: ndots_at.is_some(),
            },
        })
    }

    pub async fn execute(
        &self,
        plan: &SearchListPlan,
        args: &[Value],
    ) -> Result<RowCursor<SearchCandidateRow>, DomainError> {
        let partial = match args.first() {
            Some(Value::Text(s)) => s.clone(),
            Some(other) => {
                return Err(DomainError::ConstraintViolation(format!(
                    "partial must be text, got {}",
                    other.type_name()
                )))
            }
            None => {
                return Err(DomainError::ConstraintViolation(
                    "partial domain value must be provided".to_string(),
                ))
            }
        };

        let ndots = if plan.has_ndots {
            let value = args.get(1).ok_or_else(|| {
                DomainError::ConstraintViolation("ndots value missing".to_string())
            })?;
            ndots_arg(value)?
        } else {
            DEFAULT_NDOTS
        };

        self.expand(&partial, ndots).await
    }

    /// Expands `partial` against the host search list. The configuration is
    /// only read when `partial` is not already fully qualified.
    pub async fn expand(
        &self,
        partial: &str,
        ndots: u32,
    ) -> Result<RowCursor<SearchCandidateRow>, DomainError> {
        let candidates = if is_fqdn(partial) {
            vec![partial.to_string()]
        } else {
            let config = self.source.load().await?;
            search_list::expand(partial, &config.search, ndots)
        };

        debug!(partial, ndots, candidates = candidates.len(), "Search list expanded");

        let partial: Arc<str> = partial.into();
        let rows = candidates
            .into_iter()
            .map(|candidate| SearchCandidateRow {
                partial: Arc::clone(&partial),
                ndots,
                candidate,
            })
            .collect();

        Ok(RowCursor::new(rows))
    }
}

fn ndots_arg(value: &Value) -> Result<u32, DomainError> {
    let n = value.as_integer().ok_or_else(|| {
        DomainError::ConstraintViolation(format!(
            "ndots must be an integer, got {}",
            value.type_name()
        ))
    })?;

    u32::try_from(n)
        .map_err(|_| DomainError::ConstraintViolation(format!("ndots must be non-negative: {}", n)))
}
