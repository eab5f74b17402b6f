//! Ouroboros Shape
//!
//! Composable runtime value validation for the Ouroboros framework.
//!
//! Static types stop at the process boundary. Deserialized payloads, user input and
//! configuration arrive as dynamic [`Value`]s; this crate checks them against a schema
//! assembled from small combinators and returns either the validated value or a
//! structured error tree. Ordinary validation failures never panic.
//!
//! # Building blocks
//!
//! - Primitives: [`string`], [`number`], [`boolean`], [`symbol`], [`any`]
//! - Composites: [`object`] over a [`Schema`], [`list`] over an element validator
//! - Modifiers: [`Optional::optional`], [`LengthBounded::min_length`] /
//!   [`LengthBounded::max_length`], numeric bounds and coercion on [`NumberValidator`]
//!
//! Modifiers consume the validator and return the reconfigured one. Setters that can
//! produce a malformed schema (inverted bounds, conflicting coercions, duplicate
//! fields) return a [`SchemaError`] instead.
//!
//! # Features
//!
//! - **Default**: core validation
//! - **serde**: conversions between [`Value`] and `serde_json::Value`, JSON output for
//!   [`ErrorNode`], and `validate_json`. Its tests run with
//!   `cargo test -p ouroboros-shape --features serde`
//!
//! # Example
//!
//! ```rust
//! use ouroboros_shape::{list, number, object, string, LengthBounded, Optional, Schema, Validator, Value};
//!
//! let schema = object(
//!     Schema::new()
//!         .field("name", string().min_length(2)?.max_length(32)?)?
//!         .field("age", number().min(0.0)?.max(150.0)?.to_integer()?)?
//!         .field("tags", list(string()).optional())?,
//! );
//!
//! let input = Value::object([("name", Value::from("Ada")), ("age", Value::from("36.4"))]);
//! let output = schema.validate(&input).unwrap();
//! assert_eq!(output.get("age"), Some(&Value::Number(36.0)));
//!
//! let bad = Value::object([("name", Value::from("A")), ("tags", Value::List(vec![Value::from(1)]))]);
//! let errors = schema.validate(&bad).unwrap_err();
//! assert_eq!(
//!     errors.leaves(),
//!     vec![
//!         ("name".to_string(), "Expected string length to be at least 2 but got 1".to_string()),
//!         ("age".to_string(), "Expected number but got undefined".to_string()),
//!         ("tags.0".to_string(), "Expected string but got number".to_string()),
//!     ]
//! );
//! # Ok::<(), ouroboros_shape::SchemaError>(())
//! ```

// Public modules
pub mod constraints;
pub mod errors;
pub mod modifiers;
pub mod types;
pub mod validators;

// Re-export commonly used types
pub use constraints::{check_length, check_range, LengthBounds, RangeBounds};
pub use errors::{success, type_error, ErrorKey, ErrorNode, SchemaError, ValidationResult};
pub use modifiers::{LengthBounded, Optional};
pub use types::{classify, Kind, Symbol, Value};
pub use validators::{
    any, boolean, list, number, object, string, symbol, validate, AnyValidator,
    BooleanValidator, Coercion, ListValidator, NumberValidator, ObjectValidator, Schema,
    StringValidator, SymbolValidator, Validator, DEFAULT_FLOAT_PRECISION, MAX_FLOAT_PRECISION,
};

#[cfg(feature = "serde")]
pub use validators::validate_json;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
