//! Plan/execute machinery shared by the DNS and search-list relations.
mod constraint;
mod cursor;
mod value;

pub use constraint::{Constraint, ConstraintUsage, IndexPlan, Operator};
pub use cursor::{Row, RowCursor};
pub use value::Value;
