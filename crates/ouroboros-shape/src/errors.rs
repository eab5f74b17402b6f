//! Validation result and error types
//!
//! Validation failures are data: every validator returns a [`ValidationResult`] whose
//! error side is an [`ErrorNode`] tree mirroring the schema shape. Schema mistakes are
//! a different class of error, [`SchemaError`], returned by the configuration setters.

use crate::types::{Kind, Value};
use indexmap::IndexMap;
use std::fmt;
use thiserror::Error;

// ============================================================================
// Validation Result
// ============================================================================

/// Outcome of a single `validate` call: the validated value or an error tree
pub type ValidationResult = Result<Value, ErrorNode>;

/// Successful outcome carrying `value`
pub fn success(value: Value) -> ValidationResult {
    Ok(value)
}

/// Type mismatch outcome: `Expected {expected} but got {actual}`
pub fn type_error(expected: Kind, actual: Kind) -> ValidationResult {
    Err(ErrorNode::Leaf(format!("Expected {} but got {}", expected, actual)))
}

/// Render a number the way error messages show it (`3`, `2.5`, `Infinity`, `NaN`)
pub(crate) fn display_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let sign = if n > 0.0 { "" } else { "-" };
        format!("{}Infinity", sign)
    } else {
        n.to_string()
    }
}

// ============================================================================
// Error Tree
// ============================================================================

/// Position of a nested error inside its parent composite
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKey {
    /// Object field name
    Field(String),
    /// List element index
    Index(usize),
}

impl fmt::Display for ErrorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.write_str(name),
            Self::Index(i) => write!(f, "{}", i),
        }
    }
}

impl From<&str> for ErrorKey {
    fn from(name: &str) -> Self {
        Self::Field(name.to_string())
    }
}

impl From<usize> for ErrorKey {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// Validation error: a message from a leaf validator, or a mapping of nested errors
/// from a composite one.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorNode {
    Leaf(String),
    Branch(IndexMap<ErrorKey, ErrorNode>),
}

impl ErrorNode {
    /// Leaf message, if this is a leaf
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Leaf(msg) => Some(msg),
            Self::Branch(_) => None,
        }
    }

    /// Nested error under `key`, if this is a branch holding one
    pub fn get(&self, key: impl Into<ErrorKey>) -> Option<&ErrorNode> {
        match self {
            Self::Leaf(_) => None,
            Self::Branch(children) => children.get(&key.into()),
        }
    }

    /// Number of leaf messages in the tree
    pub fn count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Branch(children) => children.values().map(ErrorNode::count).sum(),
        }
    }

    /// Flatten into `(path, message)` pairs, paths dotted like `address.city` or
    /// `tags.1`. A root leaf has an empty path.
    pub fn leaves(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        let mut path = Vec::new();
        self.collect_leaves(&mut path, &mut out);
        out
    }

    fn collect_leaves(&self, path: &mut Vec<String>, out: &mut Vec<(String, String)>) {
        match self {
            Self::Leaf(msg) => out.push((path.join("."), msg.clone())),
            Self::Branch(children) => {
                for (key, child) in children {
                    path.push(key.to_string());
                    child.collect_leaves(path, out);
                    path.pop();
                }
            }
        }
    }
}

impl fmt::Display for ErrorNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(msg) => f.write_str(msg),
            Self::Branch(_) => {
                let leaves = self.leaves();
                write!(f, "{} validation error(s)", leaves.len())?;
                for (path, msg) in leaves {
                    write!(f, "; {}: {}", path, msg)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ErrorNode {}

#[cfg(feature = "serde")]
impl serde::Serialize for ErrorNode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        match self {
            Self::Leaf(msg) => serializer.serialize_str(msg),
            Self::Branch(children) => {
                let mut map = serializer.serialize_map(Some(children.len()))?;
                for (key, child) in children {
                    map.serialize_entry(&key.to_string(), child)?;
                }
                map.end()
            }
        }
    }
}

// ============================================================================
// Schema (configuration) Errors
// ============================================================================

/// A malformed schema. Raised by the configuration setters, never by `validate`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("Invalid length bounds: minLength ({min}) must be less than maxLength ({max})")]
    InvalidLengthBounds { min: usize, max: usize },

    #[error("Invalid range bounds: min ({min}) must be less than max ({max})")]
    InvalidRangeBounds { min: f64, max: f64 },

    #[error("Invalid {bound} bound: {value} is not a finite number")]
    NonFiniteBound { bound: &'static str, value: f64 },

    #[error("Conflicting coercion: {requested} cannot be combined with {existing}")]
    ConflictingCoercion {
        requested: &'static str,
        existing: &'static str,
    },

    #[error("Invalid float precision {precision}: must be at most {max}")]
    InvalidPrecision { precision: u32, max: u32 },

    #[error("Duplicate schema field: {0}")]
    DuplicateField(String),
}
