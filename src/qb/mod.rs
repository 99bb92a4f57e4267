//! Declarative SELECT-statement assembly.
//!
//! This module holds the two halves of the assembler:
//!
//! - [`Expr`]: the boolean predicate tree of literal SQL fragments with bind
//!   values, composed into nested AND/OR groups.
//! - [`QueryBuilder`]: the mutable statement description (relation, joins,
//!   projections, predicate, grouping, pagination) and the assembly of the
//!   final text and parameter sequence.
//!
//! ```ignore
//! use sqlqb::{qb, JoinCondition};
//!
//! let mut query = qb::select();
//! query
//!     .relation("document d")?
//!     .join("email em", JoinCondition::using("document_id"))?
//!     .project(["count(*)"])
//!     .and_bind("d.storage_type = %s", "email")?;
//!
//! let built = query.build()?;
//! ```

mod expr;
mod join;
mod select;

pub use expr::Expr;
pub use join::{JoinCondition, JoinKind, JoinSpec};
pub use select::{BuiltStatement, QueryBuilder};

/// Positional placeholder token: emitted for LIMIT/OFFSET and expected
/// verbatim in caller-supplied fragments that carry bind values.
pub const PLACEHOLDER: &str = "%s";

/// Create a SELECT statement builder.
///
/// # Example
/// ```ignore
/// let mut query = sqlqb::select();
/// query.relation("document")?.project(["document_id"]);
/// ```
pub fn select() -> QueryBuilder {
    QueryBuilder::new()
}
