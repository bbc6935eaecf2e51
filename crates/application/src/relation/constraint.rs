use std::fmt;

/// Comparison operator of a predicate offered by the query layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
    Like,
    Glob,
    IsNull,
    IsNotNull,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Like => "LIKE",
            Operator::Glob => "GLOB",
            Operator::IsNull => "IS NULL",
            Operator::IsNotNull => "IS NOT NULL",
        };
        f.write_str(s)
    }
}

/// A predicate on one column, as offered to the planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constraint {
    pub column: usize,
    pub op: Operator,
    pub usable: bool,
}

impl Constraint {
    pub fn eq(column: usize) -> Self {
        Self {
            column,
            op: Operator::Eq,
            usable: true,
        }
    }

    pub fn new(column: usize, op: Operator, usable: bool) -> Self {
        Self { column, op, usable }
    }
}

/// Planner decision for one offered constraint.
///
/// `argv_index` is the position of the bound value handed to execution, or
/// `None` when the constraint is not consumed. `omit` tells the caller it
/// need not re-check the predicate against produced rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConstraintUsage {
    pub argv_index: Option<usize>,
    pub omit: bool,
}

/// Output of a planning phase: one usage per offered constraint, in the same
/// order, plus the typed plan consumed by execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexPlan<P> {
    pub usage: Vec<ConstraintUsage>,
    pub plan: P,
}
