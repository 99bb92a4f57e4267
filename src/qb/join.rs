//! Join declarations.

use crate::value::Value;

/// How a joined relation combines with the rows already in scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    FullOuter,
}

impl JoinKind {
    /// SQL keyword for this join kind.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Inner => "INNER",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::FullOuter => "FULL OUTER",
        }
    }
}

/// The join predicate: exactly one of ON or USING.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JoinCondition {
    /// `ON (<expression>)`
    On(String),
    /// `USING (<column list>)`
    Using(String),
}

impl JoinCondition {
    /// Create an ON condition.
    pub fn on(text: impl Into<String>) -> Self {
        Self::On(text.into())
    }

    /// Create a USING condition.
    pub fn using(text: impl Into<String>) -> Self {
        Self::Using(text.into())
    }

    fn keyword(&self) -> &'static str {
        match self {
            Self::On(_) => "ON",
            Self::Using(_) => "USING",
        }
    }

    fn text(&self) -> &str {
        match self {
            Self::On(text) | Self::Using(text) => text,
        }
    }
}

/// One declared JOIN: relation, predicate, kind, and any bind values the
/// predicate text references.
///
/// Structural equality over every field drives duplicate detection:
/// declaring an equal spec twice leaves a single JOIN clause in the
/// statement.
#[derive(Clone, Debug, PartialEq)]
pub struct JoinSpec {
    relation: String,
    condition: JoinCondition,
    kind: JoinKind,
    params: Vec<Value>,
}

impl JoinSpec {
    /// Create an INNER join spec with no bind values.
    pub fn new(relation: impl Into<String>, condition: JoinCondition) -> Self {
        Self {
            relation: relation.into(),
            condition,
            kind: JoinKind::Inner,
            params: Vec::new(),
        }
    }

    /// Override the join kind.
    pub fn kind(mut self, kind: JoinKind) -> Self {
        self.kind = kind;
        self
    }

    /// Append one bind value.
    pub fn param(mut self, value: impl Into<Value>) -> Self {
        self.params.push(value.into());
        self
    }

    /// Append several bind values.
    pub fn params(mut self, values: Vec<Value>) -> Self {
        self.params.extend(values);
        self
    }

    /// The joined relation expression, possibly carrying an alias.
    pub fn relation(&self) -> &str {
        &self.relation
    }

    pub(crate) fn bind_values(&self) -> &[Value] {
        &self.params
    }

    /// Render the full clause: `<KIND> JOIN <relation> <ON|USING> (<text>)`.
    pub(crate) fn render(&self) -> String {
        format!(
            "{} JOIN {} {} ({})",
            self.kind.keyword(),
            self.relation,
            self.condition.keyword(),
            self.condition.text()
        )
    }
}
