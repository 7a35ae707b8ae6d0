use super::model::{FilterMap, Operator, RawNode};
use crate::convert;
use crate::error::{ConversionError, DocumentError};
use crate::graph::Dag;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// The persisted filter tree, matching the JSON document exchanged with the storage backend.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FilterDocument {
    pub root_id: String,
    pub filter: FilterMap,
}

impl FilterDocument {
    pub fn new(root_id: &str, filter: FilterMap) -> Self {
        Self {
            root_id: root_id.to_string(),
            filter,
        }
    }

    /// Parses a filter document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a filter document from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the document as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }

    /// Builds the graph model for this document.
    pub fn to_dag(&self) -> Result<Dag, ConversionError> {
        convert::deserialize(&self.root_id, &self.filter)
    }

    /// The seed filter tree used when no stored document is available.
    ///
    /// `1 -> {2, 3}`, `2 -> {4, 5}`, `3 -> {6}`, `6 -> {7, 8, 9}`.
    pub fn sample() -> Self {
        let nodes = [
            RawNode::new("1", "accommodation.size", Operator::LessThan, "20")
                .with_children(&["2", "3"]),
            RawNode::new("2", "main.applicant.age", Operator::LessThan, "20")
                .with_children(&["4", "5"]),
            RawNode::new("4", "main.applicant.income", Operator::LessThan, "2000"),
            RawNode::new("5", "co.applicant.income", Operator::LessThan, "2000"),
            RawNode::new("3", "co.applicant.age", Operator::LessThan, "18").with_children(&["6"]),
            RawNode::new("6", "applied_loan_amount", Operator::LessThan, "1000")
                .with_children(&["7", "8", "9"]),
            RawNode::new("7", "co.applicant.age", Operator::LessThan, "18"),
            RawNode::new("8", "co.applicant.age", Operator::LessThan, "18"),
            RawNode::new("9", "co.applicant.age", Operator::LessThan, "18"),
        ];

        let filter = nodes
            .into_iter()
            .map(|node| (node.id.clone(), node))
            .collect();

        Self::new("1", filter)
    }
}
