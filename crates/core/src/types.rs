//! Identifier and discriminator types
//!
//! - DocumentId, ElementId, AttributeId: UUID v4 row keys
//! - ElementKind: Node (named tag) or Text (character content leaf)

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random identifier (UUID v4)
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Get the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim()).map(Self).map_err(|_| Error::InvalidId {
                    value: s.to_string(),
                })
            }
        }
    };
}

uuid_id!(
    /// Unique identifier of a stored XML document
    DocumentId
);

uuid_id!(
    /// Unique identifier of an element row (Node or Text)
    ElementId
);

uuid_id!(
    /// Unique identifier of an attribute row
    AttributeId
);

/// Element type discriminator
///
/// Persisted as the lowercase strings `"node"` and `"text"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Named tag; may own attributes and children
    Node,
    /// Character content leaf; no attributes, no children
    Text,
}

impl ElementKind {
    /// Storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Node => "node",
            ElementKind::Text => "text",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "node" => Ok(ElementKind::Node),
            "text" => Ok(ElementKind::Text),
            other => Err(Error::corruption(format!(
                "unknown element kind '{}'",
                other
            ))),
        }
    }
}
