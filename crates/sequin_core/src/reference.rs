//! Variable references found in prompt templates.

use serde::{Deserialize, Serialize};

/// Syntactic shape of a variable reference.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum VariableKind {
    /// `<<name>>`
    Simple,
    /// `<<name[i]>>`
    ArrayIndexed,
    /// `<<name[i][j]>>`
    MatrixIndexed,
}

impl VariableKind {
    /// Classify by the number of bracket groups following the name.
    pub fn from_index_count(count: usize) -> Self {
        match count {
            0 => VariableKind::Simple,
            1 => VariableKind::ArrayIndexed,
            _ => VariableKind::MatrixIndexed,
        }
    }
}

/// A single index inside a reference.
///
/// Indices are either literal positions or the name of another variable
/// whose value selects the position at execution time. The execution
/// backend performs the lookup; this type only classifies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum IndexExpr {
    /// Literal integer index
    Literal(usize),
    /// Dynamic index naming another variable
    Variable(String),
}

impl IndexExpr {
    /// Classify the raw text between brackets.
    ///
    /// # Examples
    ///
    /// ```
    /// use sequin_core::IndexExpr;
    ///
    /// assert_eq!(IndexExpr::parse(" 2 "), IndexExpr::Literal(2));
    /// assert_eq!(IndexExpr::parse("row"), IndexExpr::Variable("row".to_string()));
    /// ```
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<usize>() {
            Ok(n) => IndexExpr::Literal(n),
            Err(_) => IndexExpr::Variable(trimmed.to_string()),
        }
    }
}

/// A variable reference extracted from a template.
///
/// Derived on demand from template text and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariableReference {
    /// The full token including delimiters, e.g. `<<items[0]>>`
    pub raw_token: String,
    /// Variable name without indices
    pub name: String,
    /// Simple, array-indexed or matrix-indexed
    pub kind: VariableKind,
    /// Raw index texts in order of appearance
    pub indices: Vec<String>,
}

impl VariableReference {
    /// Classified indices.
    pub fn index_exprs(&self) -> Vec<IndexExpr> {
        self.indices.iter().map(|i| IndexExpr::parse(i)).collect()
    }

    /// Names of variables used as dynamic indices.
    pub fn index_variables(&self) -> Vec<String> {
        self.index_exprs()
            .into_iter()
            .filter_map(|expr| match expr {
                IndexExpr::Variable(name) => Some(name),
                IndexExpr::Literal(_) => None,
            })
            .collect()
    }

    /// The simple token for this reference's name, e.g. `<<items>>`.
    pub fn simple_token(&self) -> String {
        format!("<<{}>>", self.name)
    }
}
