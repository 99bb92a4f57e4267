//! SELECT statement builder.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, trace};

use super::PLACEHOLDER;
use super::expr::{Expr, check_placeholders};
use super::join::{JoinCondition, JoinKind, JoinSpec};
use crate::error::{QbError, QbResult};
use crate::value::Value;

/// Statement builder with an accumulating predicate tree.
///
/// State is mutated through chained calls and read back through
/// [`statement`](Self::statement) / [`parameters`](Self::parameters), which
/// recompute from current state on every access, or frozen with
/// [`build`](Self::build). Contract violations fail at the offending call,
/// not at render time.
#[derive(Clone, Debug)]
pub struct QueryBuilder {
    /// Statement verb (default SELECT)
    verb: String,
    /// Projection expressions, in declaration order
    projections: Vec<String>,
    /// Main relation expression
    main_relation: Option<String>,
    /// Distinct joins, in declaration order
    joins: Vec<JoinSpec>,
    /// Root predicate: an AND over every accumulated condition
    filter: Expr,
    /// GROUP BY columns
    group_by: Vec<String>,
    /// HAVING expressions
    having: Vec<String>,
    /// Bind values for the HAVING expressions, in declaration order
    having_params: Vec<Value>,
    /// LIMIT
    limit: Option<i64>,
    /// OFFSET
    offset: Option<i64>,
    /// Aliases claimed over the whole lifetime of this builder
    used_aliases: HashSet<String>,
}

impl QueryBuilder {
    /// Create a SELECT builder.
    pub fn new() -> Self {
        Self::with_verb("SELECT")
    }

    /// Create a builder with a custom statement verb.
    pub fn with_verb(verb: impl Into<String>) -> Self {
        Self {
            verb: verb.into(),
            projections: Vec::new(),
            main_relation: None,
            joins: Vec::new(),
            filter: Expr::And(Vec::new()),
            group_by: Vec::new(),
            having: Vec::new(),
            having_params: Vec::new(),
            limit: None,
            offset: None,
            used_aliases: HashSet::new(),
        }
    }

    // ==================== Relation & joins ====================

    /// Set the main relation, fully replacing any earlier one.
    ///
    /// The expression may carry a single-word alias (`"document d"`), which
    /// is registered for collision checking. Aliases registered by earlier
    /// calls stay registered for the lifetime of the builder, so replacing
    /// the relation does not free its alias.
    pub fn relation(&mut self, relation: &str) -> QbResult<&mut Self> {
        self.scan_alias(relation)?;
        self.main_relation = Some(relation.to_string());
        Ok(self)
    }

    /// Declare an INNER join.
    pub fn join(&mut self, relation: &str, condition: JoinCondition) -> QbResult<&mut Self> {
        self.join_spec(JoinSpec::new(relation, condition))
    }

    /// Declare a LEFT join.
    pub fn left_join(&mut self, relation: &str, condition: JoinCondition) -> QbResult<&mut Self> {
        self.join_spec(JoinSpec::new(relation, condition).kind(JoinKind::Left))
    }

    /// Declare a RIGHT join.
    pub fn right_join(&mut self, relation: &str, condition: JoinCondition) -> QbResult<&mut Self> {
        self.join_spec(JoinSpec::new(relation, condition).kind(JoinKind::Right))
    }

    /// Declare a FULL OUTER join.
    pub fn outer_join(&mut self, relation: &str, condition: JoinCondition) -> QbResult<&mut Self> {
        self.join_spec(JoinSpec::new(relation, condition).kind(JoinKind::FullOuter))
    }

    /// Declare a join from a full spec.
    ///
    /// Declaring a structurally equal spec again is a no-op, so independent
    /// code paths can request the same join without coordinating. Only a
    /// newly appended join has its relation scanned for an alias.
    pub fn join_spec(&mut self, spec: JoinSpec) -> QbResult<&mut Self> {
        if self.main_relation.is_none() {
            return Err(QbError::malformed_join("cannot join without a main relation"));
        }
        if self.joins.contains(&spec) {
            trace!(relation = spec.relation(), "duplicate join ignored");
            return Ok(self);
        }
        self.scan_alias(spec.relation())?;
        self.joins.push(spec);
        Ok(self)
    }

    // ==================== Projections & grouping ====================

    /// Append projection expressions.
    ///
    /// At least one projection must be present before the statement can be
    /// read.
    pub fn project<I, S>(&mut self, expressions: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.projections.extend(expressions.into_iter().map(Into::into));
        self
    }

    /// Append GROUP BY columns.
    pub fn group_by<I, S>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_by.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Append a HAVING expression with its bind values.
    pub fn having(&mut self, expression: &str, params: Vec<Value>) -> QbResult<&mut Self> {
        check_placeholders(expression, params.len())?;
        self.having.push(expression.to_string());
        self.having_params.extend(params);
        Ok(self)
    }

    // ==================== Conditions ====================

    /// AND a fragment with bind values into the predicate.
    ///
    /// Every call accumulates into the root conjunction: two calls render as
    /// `(a) AND (b)`.
    pub fn and_where(&mut self, sql: &str, params: Vec<Value>) -> QbResult<&mut Self> {
        let expr = Expr::with_params(sql, params)?;
        self.filter.push(expr);
        Ok(self)
    }

    /// AND a fragment with a single bind value into the predicate.
    pub fn and_bind(&mut self, sql: &str, value: impl Into<Value>) -> QbResult<&mut Self> {
        self.and_where(sql, vec![value.into()])
    }

    /// AND a raw fragment with no bind values into the predicate.
    ///
    /// The text is not checked against the placeholder count.
    pub fn and_raw(&mut self, sql: &str) -> &mut Self {
        self.filter.push(Expr::fragment(sql));
        self
    }

    /// AND a prebuilt expression tree into the predicate.
    pub fn and_expr(&mut self, expr: Expr) -> &mut Self {
        self.filter.push(expr);
        self
    }

    // ==================== Pagination ====================

    /// Set LIMIT. The value is emitted as a bind parameter.
    pub fn limit(&mut self, limit: i64) -> QbResult<&mut Self> {
        if limit < 0 {
            return Err(QbError::invalid_pagination(format!("negative LIMIT {limit}")));
        }
        self.limit = Some(limit);
        Ok(self)
    }

    /// Set OFFSET. Requires a LIMIT to already be set.
    pub fn offset(&mut self, offset: i64) -> QbResult<&mut Self> {
        if self.limit.is_none() {
            return Err(QbError::invalid_pagination("OFFSET requires a LIMIT"));
        }
        if offset <= 0 {
            return Err(QbError::invalid_pagination(format!(
                "non-positive OFFSET {offset}"
            )));
        }
        self.offset = Some(offset);
        Ok(self)
    }

    /// Set LIMIT and OFFSET in one call.
    pub fn limit_offset(&mut self, limit: i64, offset: i64) -> QbResult<&mut Self> {
        self.limit(limit)?;
        self.offset(offset)
    }

    // ==================== Assembly ====================

    /// Assemble the statement text from the current state.
    ///
    /// Clause order: verb, projections, FROM, joins in declaration order,
    /// WHERE, GROUP BY, HAVING, LIMIT, OFFSET.
    pub fn statement(&self) -> QbResult<String> {
        if self.projections.is_empty() {
            return Err(QbError::MissingProjection);
        }

        let mut sql = String::new();
        sql.push_str(&self.verb);
        sql.push(' ');
        sql.push_str(&self.projections.join(", "));

        if let Some(relation) = &self.main_relation {
            sql.push_str(" FROM ");
            sql.push_str(relation);
        }

        for join in &self.joins {
            sql.push(' ');
            sql.push_str(&join.render());
        }

        let mut predicate_params = Vec::new();
        let predicate = self.filter.build(&mut predicate_params);
        if !predicate.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&predicate);
        }

        if !self.group_by.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&self.group_by.join(", "));
        }

        if !self.having.is_empty() {
            sql.push_str(" HAVING ");
            sql.push_str(&self.having.join(", "));
        }

        if self.limit.is_some() {
            sql.push_str(" LIMIT ");
            sql.push_str(PLACEHOLDER);
        }

        if self.offset.is_some() {
            sql.push_str(" OFFSET ");
            sql.push_str(PLACEHOLDER);
        }

        debug!(statement = %sql, "assembled statement");
        Ok(sql)
    }

    /// Flatten the parameter sequence to match the statement's placeholder
    /// order: join params in declaration order, predicate params depth-first
    /// left-to-right, having params, then LIMIT and OFFSET.
    pub fn parameters(&self) -> Vec<Value> {
        let mut params = Vec::new();
        for join in &self.joins {
            params.extend(join.bind_values().iter().cloned());
        }
        self.filter.collect_params(&mut params);
        params.extend(self.having_params.iter().cloned());
        if let Some(limit) = self.limit {
            params.push(Value::Int(limit));
        }
        if let Some(offset) = self.offset {
            params.push(Value::Int(offset));
        }
        params
    }

    /// Freeze the builder into an immutable statement/parameter pair.
    pub fn build(self) -> QbResult<BuiltStatement> {
        let statement = self.statement()?;
        let parameters = self.parameters();
        Ok(BuiltStatement {
            statement,
            parameters,
        })
    }

    /// Register the alias embedded in a relation expression, if any.
    ///
    /// `"document d"` claims `d`; a second relation claiming `d` is a
    /// collision. Quoted and multi-word expressions are not parseable.
    fn scan_alias(&mut self, relation_expr: &str) -> QbResult<()> {
        if relation_expr.contains('"') {
            return Err(QbError::unsupported_alias_syntax(format!(
                "quoted relation '{relation_expr}'"
            )));
        }

        match relation_expr.matches(' ').count() {
            0 => Ok(()),
            1 => {
                if let Some((_, alias)) = relation_expr.split_once(' ') {
                    if !self.used_aliases.insert(alias.to_string()) {
                        return Err(QbError::AliasCollision(alias.to_string()));
                    }
                }
                Ok(())
            }
            _ => Err(QbError::unsupported_alias_syntax(format!(
                "multi-word relation '{relation_expr}'"
            ))),
        }
    }
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A frozen statement: text plus the matching positional parameters.
///
/// Produced by [`QueryBuilder::build`]; consuming the builder guarantees the
/// pair can never drift from later mutation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BuiltStatement {
    statement: String,
    parameters: Vec<Value>,
}

impl BuiltStatement {
    /// The statement text.
    pub fn statement(&self) -> &str {
        &self.statement
    }

    /// The positional parameters, one per placeholder occurrence.
    pub fn parameters(&self) -> &[Value] {
        &self.parameters
    }

    /// Split into the raw pair for handoff to an execution layer.
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.statement, self.parameters)
    }
}
