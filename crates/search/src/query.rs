//! Element predicates

use serde::{Deserialize, Serialize};
use std::fmt;
use xmlstore_core::{AttributeRow, ElementKind, ElementRow};

/// What a search selects
///
/// Both variants compare exactly (case-sensitive, no trimming).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", rename_all = "snake_case")]
pub enum ElementQuery {
    /// Node elements whose tag name equals `name`
    NodeName {
        /// Tag name
        name: String,
    },
    /// Elements owning an attribute with this exact name and value
    Attribute {
        /// Attribute name
        name: String,
        /// Attribute value
        value: String,
    },
}

impl ElementQuery {
    /// Select Node elements named `name`
    pub fn node_name(name: impl Into<String>) -> Self {
        ElementQuery::NodeName { name: name.into() }
    }

    /// Select elements carrying `name="value"`
    pub fn attribute(name: impl Into<String>, value: impl Into<String>) -> Self {
        ElementQuery::Attribute {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Does `element`, owning `attributes`, satisfy this query?
    pub fn matches(&self, element: &ElementRow, attributes: &[AttributeRow]) -> bool {
        match self {
            ElementQuery::NodeName { name } => {
                element.kind == ElementKind::Node && element.value == *name
            }
            ElementQuery::Attribute { name, value } => attributes
                .iter()
                .any(|a| a.name == *name && a.value == *value),
        }
    }
}

impl fmt::Display for ElementQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementQuery::NodeName { name } => write!(f, "<{}>", name),
            ElementQuery::Attribute { name, value } => write!(f, "[{}=\"{}\"]", name, value),
        }
    }
}
