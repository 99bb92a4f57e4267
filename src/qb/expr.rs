//! Boolean predicate tree for WHERE/HAVING clauses.
//!
//! `Expr` composes literal SQL fragments and their bind values into nested
//! AND/OR groups. Rendering walks the tree depth-first left-to-right, so the
//! flattened parameter sequence always matches the placeholder order of the
//! final text.

use super::PLACEHOLDER;
use crate::error::{QbError, QbResult};
use crate::value::Value;

/// Expression node for building WHERE/HAVING clauses.
///
/// Insertion order of composite children is preserved in rendering.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// One literal SQL fragment plus its bind values, in declaration order.
    Fragment { sql: String, params: Vec<Value> },
    /// AND group: every child must hold.
    And(Vec<Expr>),
    /// OR group: at least one child must hold.
    Or(Vec<Expr>),
}

impl Expr {
    /// Create a bare fragment with no bind values.
    ///
    /// The text is taken verbatim and is not checked against the placeholder
    /// count; this is the raw escape hatch.
    pub fn fragment(sql: impl Into<String>) -> Self {
        Expr::Fragment {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Create a fragment carrying a single bind value.
    pub fn bind(sql: impl Into<String>, value: impl Into<Value>) -> QbResult<Self> {
        Self::with_params(sql, vec![value.into()])
    }

    /// Create a fragment carrying one bind value per placeholder.
    ///
    /// Fails with [`QbError::MalformedExpression`] when the placeholder
    /// count in `sql` disagrees with the number of values supplied.
    pub fn with_params(sql: impl Into<String>, params: Vec<Value>) -> QbResult<Self> {
        let sql = sql.into();
        check_placeholders(&sql, params.len())?;
        Ok(Expr::Fragment { sql, params })
    }

    /// Create an AND group over the given children.
    pub fn and(children: Vec<Expr>) -> Self {
        Expr::And(children)
    }

    /// Create an OR group over the given children.
    pub fn or(children: Vec<Expr>) -> Self {
        Expr::Or(children)
    }

    /// Append a child, preserving insertion order.
    ///
    /// A fragment receiver is promoted to an AND group over itself and the
    /// new child, so a running predicate can keep growing.
    pub fn push(&mut self, child: Expr) {
        match self {
            Expr::And(children) | Expr::Or(children) => children.push(child),
            Expr::Fragment { .. } => {
                let prior = std::mem::replace(self, Expr::And(Vec::new()));
                *self = Expr::And(vec![prior, child]);
            }
        }
    }

    /// Check if this expression renders to nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            Expr::Fragment { sql, .. } => sql.is_empty(),
            Expr::And(children) | Expr::Or(children) => {
                children.is_empty() || children.iter().all(Expr::is_empty)
            }
        }
    }

    /// Render the SQL text, pushing bind values onto `params` in the same
    /// left-to-right order the text is produced.
    pub fn build(&self, params: &mut Vec<Value>) -> String {
        match self {
            Expr::Fragment { sql, params: own } => {
                params.extend(own.iter().cloned());
                sql.clone()
            }
            Expr::And(children) => join_children(children, "AND", params),
            Expr::Or(children) => join_children(children, "OR", params),
        }
    }

    /// Flatten bind values depth-first without rendering any text.
    pub fn collect_params(&self, out: &mut Vec<Value>) {
        match self {
            Expr::Fragment { params, .. } => out.extend(params.iter().cloned()),
            Expr::And(children) | Expr::Or(children) => {
                for child in children {
                    child.collect_params(out);
                }
            }
        }
    }
}

/// Render a composite: empty children are skipped, a single survivor is
/// emitted unwrapped, two or more are each parenthesized and joined with the
/// operator keyword.
fn join_children(children: &[Expr], op: &str, params: &mut Vec<Value>) -> String {
    let mut parts: Vec<String> = children
        .iter()
        .map(|child| child.build(params))
        .filter(|sql| !sql.is_empty())
        .collect();

    match parts.len() {
        0 => String::new(),
        1 => parts.remove(0),
        _ => parts
            .iter()
            .map(|sql| format!("({sql})"))
            .collect::<Vec<_>>()
            .join(&format!(" {op} ")),
    }
}

/// Verify that a fragment declares one bind value per placeholder.
pub(crate) fn check_placeholders(sql: &str, supplied: usize) -> QbResult<()> {
    let expected = sql.matches(PLACEHOLDER).count();
    if expected != supplied {
        return Err(QbError::malformed_expression(format!(
            "fragment '{sql}' has {expected} '{PLACEHOLDER}' placeholders but {supplied} parameters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_fragment() {
        let expr = Expr::fragment("date_entered < current_date");
        let mut params = Vec::new();
        assert_eq!(expr.build(&mut params), "date_entered < current_date");
        assert!(params.is_empty());
    }

    #[test]
    fn test_and_group_wraps_children() {
        let expr = Expr::and(vec![
            Expr::bind("storage_type = %s", "email").unwrap(),
            Expr::fragment("date_entered < current_date"),
        ]);
        let mut params = Vec::new();
        assert_eq!(
            expr.build(&mut params),
            "(storage_type = %s) AND (date_entered < current_date)"
        );
        assert_eq!(params, vec![Value::Text("email".to_string())]);
    }

    #[test]
    fn test_or_group_wraps_children() {
        let expr = Expr::or(vec![
            Expr::bind("a = %s", 1i64).unwrap(),
            Expr::bind("b = %s", 2i64).unwrap(),
        ]);
        let mut params = Vec::new();
        assert_eq!(expr.build(&mut params), "(a = %s) OR (b = %s)");
        assert_eq!(params, vec![Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn test_single_child_unwrapped() {
        let expr = Expr::and(vec![Expr::bind("storage_type = %s", "email").unwrap()]);
        let mut params = Vec::new();
        assert_eq!(expr.build(&mut params), "storage_type = %s");
    }

    #[test]
    fn test_empty_group_renders_nothing() {
        let expr = Expr::And(Vec::new());
        let mut params = Vec::new();
        assert_eq!(expr.build(&mut params), "");
        assert!(expr.is_empty());
        assert!(params.is_empty());
    }

    #[test]
    fn test_nested_groups() {
        let expr = Expr::and(vec![
            Expr::bind("storage_type = %s", "email").unwrap(),
            Expr::or(vec![
                Expr::fragment("date_entered > current_date"),
                Expr::bind("document_id > %s", 4564i64).unwrap(),
            ]),
        ]);
        let mut params = Vec::new();
        assert_eq!(
            expr.build(&mut params),
            "(storage_type = %s) AND ((date_entered > current_date) OR (document_id > %s))"
        );
        assert_eq!(
            params,
            vec![Value::Text("email".to_string()), Value::Int(4564)]
        );
    }

    #[test]
    fn test_params_flatten_depth_first() {
        let expr = Expr::and(vec![
            Expr::or(vec![
                Expr::bind("a = %s", 1i64).unwrap(),
                Expr::bind("b = %s", 2i64).unwrap(),
            ]),
            Expr::bind("c = %s", 3i64).unwrap(),
        ]);
        let mut collected = Vec::new();
        expr.collect_params(&mut collected);
        assert_eq!(
            collected,
            vec![Value::Int(1), Value::Int(2), Value::Int(3)]
        );

        let mut rendered = Vec::new();
        expr.build(&mut rendered);
        assert_eq!(rendered, collected);
    }

    #[test]
    fn test_push_promotes_fragment() {
        let mut expr = Expr::fragment("a = 1");
        expr.push(Expr::fragment("b = 2"));
        let mut params = Vec::new();
        assert_eq!(expr.build(&mut params), "(a = 1) AND (b = 2)");
    }

    #[test]
    fn test_placeholder_count_mismatch() {
        let err = Expr::with_params("a = %s AND b = %s", vec![Value::Int(1)]).unwrap_err();
        assert!(err.is_malformed_expression());

        let err = Expr::bind("a = 1", 5i64).unwrap_err();
        assert!(err.is_malformed_expression());
    }
}
