use crate::ports::ResolverFactory;
use crate::relation::{Constraint, ConstraintUsage, IndexPlan, Operator, Row, RowCursor, Value};
use dnsql_domain::{
    DomainError, Question, RecordClass, RecordType, ResourceRecordRow, ResponseMessage, Section,
};
use std::sync::Arc;
use tracing::debug;

/// Columns of the DNS relation, in positional order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DnsColumn {
    Domain,
    Section,
    Class,
    Type,
    Ttl,
    Nameserver,
    Data,
}

impl DnsColumn {
    pub const ALL: [DnsColumn; 7] = [
        DnsColumn::Domain,
        DnsColumn::Section,
        DnsColumn::Class,
        DnsColumn::Type,
        DnsColumn::Ttl,
        DnsColumn::Nameserver,
        DnsColumn::Data,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        dnsql_domain::rows::DNS_COLUMNS[self.index()]
    }
}

impl Row for ResourceRecordRow {
    fn column(&self, index: usize) -> Value {
        match DnsColumn::from_index(index) {
            Some(DnsColumn::Domain) => Value::Text(self.domain.to_string()),
            Some(DnsColumn::Section) => Value::Text(self.section.as_str().to_string()),
            Some(DnsColumn::Class) => Value::Text(self.class.clone()),
            Some(DnsColumn::Type) => Value::Text(self.record_type.clone()),
            Some(DnsColumn::Ttl) => Value::Integer(i64::from(self.ttl)),
            Some(DnsColumn::Nameserver) => Value::Text(self.nameserver.to_string()),
            Some(DnsColumn::Data) => Value::Json(self.data.clone()),
            None => Value::Null,
        }
    }
}

/// Which column each bound argument belongs to, by argument position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DnsPlan {
    bindings: Vec<DnsColumn>,
}

impl DnsPlan {
    pub fn bindings(&self) -> &[DnsColumn] {
        &self.bindings
    }
}

/// Fully bound DNS relation query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsRequest {
    pub question: Question,
    pub nameserver: String,
}

pub struct QueryDnsUseCase {
    factory: Arc<dyn ResolverFactory>,
}

impl QueryDnsUseCase {
    pub fn new(factory: Arc<dyn ResolverFactory>) -> Self {
        Self { factory }
    }

    /// Decides which offered constraints are consumed.
    ///
    /// Only equality is accepted on domain, nameserver, type and class. The
    /// domain predicate is fully enforced by the lookup; the others steer the
    /// lookup but are left for the caller to re-check. Domain and nameserver
    /// are both required.
    pub fn compile(constraints: &[Constraint]) -> Result<IndexPlan<DnsPlan>, DomainError> {
        let mut usage = vec![ConstraintUsage::default(); constraints.len()];
        let mut bindings = Vec::new();
        let mut has_domain = false;
        let mut has_nameserver = false;

        for (i, constraint) in constraints.iter().enumerate() {
            let column = match DnsColumn::from_index(constraint.column) {
                Some(
                    column @ (DnsColumn::Domain
                    | DnsColumn::Nameserver
                    | DnsColumn::Type
                    | DnsColumn::Class),
                ) => column,
                _ => continue,
            };

            if constraint.op != Operator::Eq {
                return Err(DomainError::ConstraintViolation(format!(
                    "only equals-to operation is supported (got {} on {})",
                    constraint.op,
                    column.name()
                )));
            }

            if !constraint.usable {
                continue;
            }

            usage[i] = ConstraintUsage {
                argv_index: Some(bindings.len()),
                omit: column == DnsColumn::Domain,
            };
            bindings.push(column);

            match column {
                DnsColumn::Domain => has_domain = true,
                DnsColumn::Nameserver => has_nameserver = true,
                _ => {}
            }
        }

        if !(has_domain && has_nameserver) {
            return Err(DomainError::ConstraintViolation(
                "required constraints not met".to_string(),
            ));
        }

        debug!(bindings = ?bindings, "DNS relation planned");

        Ok(IndexPlan {
            usage,
            plan: DnsPlan { bindings },
        })
    }

    /// Applies bound argument values to a plan. Type and class default to
    /// `A` and `IN`.
    pub fn bind(plan: &DnsPlan, args: &[Value]) -> Result<DnsRequest, DomainError> {
        if args.len() != plan.bindings.len() {
            return Err(DomainError::ConstraintViolation(format!(
                "expected {} bound values, got {}",
                plan.bindings.len(),
                args.len()
            )));
        }

        let mut domain = None;
        let mut nameserver = None;
        let mut record_type = RecordType::default();
        let mut class = RecordClass::default();

        for (column, value) in plan.bindings.iter().zip(args) {
            let text = text_arg(*column, value)?;
            match column {
                DnsColumn::Domain => domain = Some(text),
                DnsColumn::Nameserver => nameserver = Some(text),
                DnsColumn::Type => record_type = text.parse()?,
                DnsColumn::Class => class = text.parse()?,
                _ => {}
            }
        }

        match (domain, nameserver) {
            (Some(domain), Some(nameserver)) => Ok(DnsRequest {
                question: Question::new(&domain, record_type, class),
                nameserver,
            }),
            _ => Err(DomainError::ConstraintViolation(
                "required constraints not met".to_string(),
            )),
        }
    }

    pub async fn execute(
        &self,
        plan: &DnsPlan,
        args: &[Value],
    ) -> Result<RowCursor<ResourceRecordRow>, DomainError> {
        let request = Self::bind(plan, args)?;
        self.execute_request(&request).await
    }

    pub async fn execute_request(
        &self,
        request: &DnsRequest,
    ) -> Result<RowCursor<ResourceRecordRow>, DomainError> {
        let resolver = self.factory.create(&request.nameserver)?;

        debug!(
            question = %request.question,
            nameserver = %request.nameserver,
            "Executing DNS relation"
        );

        let message = resolver.lookup(&request.question).await?;
        let rows = flatten(message, request.nameserver.as_str().into());

        debug!(rows = rows.len(), "DNS relation produced rows");
        Ok(RowCursor::new(rows))
    }
}

fn text_arg(column: DnsColumn, value: &Value) -> Result<String, DomainError> {
    match value {
        Value::Text(s) => Ok(s.clone()),
        Value::Integer(n) => Ok(n.to_string()),
        other => Err(DomainError::ConstraintViolation(format!(
            "{} must be text, got {}",
            column.name(),
            other.type_name()
        ))),
    }
}

fn flatten(message: ResponseMessage, nameserver: Arc<str>) -> Vec<ResourceRecordRow> {
    let mut rows = Vec::with_capacity(message.record_count());

    let sections = [
        (Section::Answer, message.answers),
        (Section::Authority, message.authority),
        (Section::Extra, message.additional),
    ];

    for (section, records) in sections {
        rows.extend(records.into_iter().map(|record| ResourceRecordRow {
            domain: record.name,
            section,
            class: record.class,
            record_type: record.record_type,
            ttl: record.ttl,
            nameserver: Arc::clone(&nameserver),
            data: record.data,
        }));
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_indices_follow_declaration_order() {
        for (i, column) in DnsColumn::ALL.iter().enumerate() {
            assert_eq!(column.index(), i);
            assert_eq!(DnsColumn::from_index(i), Some(*column));
        }
        assert_eq!(DnsColumn::Type.name(), "type");
        assert_eq!(DnsColumn::from_index(7), None);
    }

    #[test]
    fn test_bind_rejects_null_domain() {
        let plan = DnsPlan {
            bindings: vec![DnsColumn::Domain, DnsColumn::Nameserver],
        };
        let err = QueryDnsUseCase::bind(&plan, &[Value::Null, "udp://1.1.1.1:53".into()])
            .unwrap_err();
        assert!(matches!(err, DomainError::ConstraintViolation(_)));
    }
}
