//! Error types for sqlqb

use thiserror::Error;

/// Result type alias for statement-assembly operations
pub type QbResult<T> = Result<T, QbError>;

/// Error types for statement assembly.
///
/// These are programmer-error-class failures: they surface synchronously at
/// the call that violates the contract and are not retryable.
#[derive(Debug, Error)]
pub enum QbError {
    /// A relation or join claims an alias already used in this builder
    #[error("Alias collision: '{0}' is already in use")]
    AliasCollision(String),

    /// A join was declared in an invalid builder state
    #[error("Malformed join: {0}")]
    MalformedJoin(String),

    /// A predicate fragment disagrees with its parameter list
    #[error("Malformed expression: {0}")]
    MalformedExpression(String),

    /// The statement was read before any projection was added
    #[error("Statement has no projections")]
    MissingProjection,

    /// LIMIT/OFFSET contract violation
    #[error("Invalid pagination: {0}")]
    InvalidPagination(String),

    /// A relation expression the alias scanner cannot handle
    #[error("Unsupported alias syntax: {0}")]
    UnsupportedAliasSyntax(String),
}

impl QbError {
    /// Create a malformed-join error
    pub fn malformed_join(message: impl Into<String>) -> Self {
        Self::MalformedJoin(message.into())
    }

    /// Create a malformed-expression error
    pub fn malformed_expression(message: impl Into<String>) -> Self {
        Self::MalformedExpression(message.into())
    }

    /// Create an invalid-pagination error
    pub fn invalid_pagination(message: impl Into<String>) -> Self {
        Self::InvalidPagination(message.into())
    }

    /// Create an unsupported-alias-syntax error
    pub fn unsupported_alias_syntax(message: impl Into<String>) -> Self {
        Self::UnsupportedAliasSyntax(message.into())
    }

    /// Check if this is an alias collision error
    pub fn is_alias_collision(&self) -> bool {
        matches!(self, Self::AliasCollision(_))
    }

    /// Check if this is a malformed join error
    pub fn is_malformed_join(&self) -> bool {
        matches!(self, Self::MalformedJoin(_))
    }

    /// Check if this is a malformed expression error
    pub fn is_malformed_expression(&self) -> bool {
        matches!(self, Self::MalformedExpression(_))
    }

    /// Check if this is a missing projection error
    pub fn is_missing_projection(&self) -> bool {
        matches!(self, Self::MissingProjection)
    }

    /// Check if this is an invalid pagination error
    pub fn is_invalid_pagination(&self) -> bool {
        matches!(self, Self::InvalidPagination(_))
    }

    /// Check if this is an unsupported alias syntax error
    pub fn is_unsupported_alias_syntax(&self) -> bool {
        matches!(self, Self::UnsupportedAliasSyntax(_))
    }
}
