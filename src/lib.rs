//! # sqlqb
//!
//! A declarative SQL SELECT assembler: build a statement through chained
//! calls, get back literal SQL text plus the positional bind values that
//! match it.
//!
//! ## Features
//!
//! - **SQL explicit**: fragments are caller-supplied literal text; the
//!   assembler never quotes, rewrites, or coerces
//! - **Parameter bookkeeping**: bind values always come back in the exact
//!   order of their placeholders, across joins, predicates, HAVING and
//!   pagination
//! - **Composable predicates**: nested AND/OR trees with per-fragment binds
//! - **Idempotent joins**: declaring the same join twice keeps one clause
//! - **Fail fast**: contract violations surface at the offending call, as
//!   [`QbError`] values
//!
//! ## Example
//!
//! ```ignore
//! use sqlqb::{select, JoinCondition};
//!
//! let mut query = select();
//! query
//!     .relation("document d")?
//!     .join("email em", JoinCondition::using("document_id"))?
//!     .project(["count(*)"])
//!     .and_bind("d.storage_type = %s", "email")?
//!     .limit(20)?;
//!
//! let built = query.build()?;
//! // hand built.statement() / built.parameters() to the execution layer
//! ```

pub mod error;
pub mod qb;
pub mod value;

pub use error::{QbError, QbResult};
pub use qb::{
    BuiltStatement, Expr, JoinCondition, JoinKind, JoinSpec, PLACEHOLDER, QueryBuilder, select,
};
pub use value::Value;
