//! Core validation engine
//!
//! Every validator implements [`Validator`]. Primitive validators check a single
//! [`Kind`](crate::types::Kind); composite validators own child validators and
//! aggregate their results into an [`ErrorNode`](crate::errors::ErrorNode) tree.

mod composite;
mod primitive;

pub use composite::{list, object, ListValidator, ObjectValidator, Schema};
pub use primitive::{
    any, boolean, number, string, symbol, AnyValidator, BooleanValidator, Coercion,
    NumberValidator, StringValidator, SymbolValidator, DEFAULT_FLOAT_PRECISION,
    MAX_FLOAT_PRECISION,
};

use crate::errors::ValidationResult;
use crate::types::Value;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// Validator Trait
// ============================================================================

/// A configured validator. Immutable once built, so a single instance can be shared
/// across calls and threads.
pub trait Validator: fmt::Debug + Send + Sync {
    /// Validate `value`, returning the validated (possibly coerced) value or the
    /// error tree. Never panics on bad data.
    fn validate(&self, value: &Value) -> ValidationResult;

    /// Erase the concrete type, e.g. for heterogeneous schema construction
    fn boxed(self) -> Box<dyn Validator>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

impl<V: Validator + ?Sized> Validator for Box<V> {
    fn validate(&self, value: &Value) -> ValidationResult {
        (**self).validate(value)
    }
}

impl<V: Validator + ?Sized> Validator for Arc<V> {
    fn validate(&self, value: &Value) -> ValidationResult {
        (**self).validate(value)
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Validate a value against a validator
///
/// # Example
///
/// ```
/// use ouroboros_shape::{number, object, string, validate, LengthBounded, Schema, Value};
///
/// let user = object(
///     Schema::new()
///         .field("name", string().min_length(1)?)?
///         .field("age", number().min(0.0)?)?,
/// );
///
/// let value = Value::object([("name", Value::from("Ada")), ("age", Value::from(36))]);
/// assert!(validate(&value, &user).is_ok());
///
/// let invalid = Value::object([("name", Value::from("")), ("age", Value::from("x"))]);
/// let errors = validate(&invalid, &user).unwrap_err();
/// assert_eq!(errors.count(), 2);
/// # Ok::<(), ouroboros_shape::SchemaError>(())
/// ```
pub fn validate(value: &Value, validator: &dyn Validator) -> ValidationResult {
    validator.validate(value)
}

/// Validate a JSON document, converting it to a [`Value`] first
#[cfg(feature = "serde")]
pub fn validate_json(json: &serde_json::Value, validator: &dyn Validator) -> ValidationResult {
    validator.validate(&Value::from(json.clone()))
}
