use crate::error::UnknownOperator;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Comparison applied by a condition. Stored as its symbol (`<`, `=`, `>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "=")]
    Equal,
    #[serde(rename = ">")]
    GreaterThan,
}

impl Operator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::LessThan => "<",
            Operator::Equal => "=",
            Operator::GreaterThan => ">",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Operator {
    type Err = UnknownOperator;

    fn from_str(symbol: &str) -> Result<Self, Self::Err> {
        [Operator::LessThan, Operator::Equal, Operator::GreaterThan]
            .into_iter()
            .find(|operator| operator.symbol() == symbol)
            .ok_or_else(|| UnknownOperator(symbol.to_string()))
    }
}

/// Runtime outcome of a condition as reported by the backend.
///
/// The graph model never keeps this; serialization always writes `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Idle,
    Successful,
    Failed,
}

/// A single condition in the stored, parent-referencing filter tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawNode {
    pub id: String,
    pub parameter: String,
    pub operator: Operator,
    pub value: String,
    #[serde(default)]
    pub children: Vec<String>,
    #[serde(default)]
    pub status: Status,
}

impl RawNode {
    /// Creates a childless, idle condition.
    pub fn new(id: &str, parameter: &str, operator: Operator, value: &str) -> Self {
        Self {
            id: id.to_string(),
            parameter: parameter.to_string(),
            operator,
            value: value.to_string(),
            children: Vec::new(),
            status: Status::Idle,
        }
    }

    pub fn with_children(mut self, children: &[&str]) -> Self {
        self.children = children.iter().map(|c| c.to_string()).collect();
        self
    }
}

/// Stored conditions keyed by id.
pub type FilterMap = AHashMap<String, RawNode>;
