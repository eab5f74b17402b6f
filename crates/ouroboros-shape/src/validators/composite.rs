//! Object and list validators
//!
//! Composites recurse into their children and aggregate. A child failure is recorded
//! under its field name or index; the composite fails as a whole if any child fails,
//! otherwise it returns a value rebuilt from the children's results.

use super::Validator;
use crate::constraints::LengthBounds;
use crate::errors::{type_error, ErrorKey, ErrorNode, SchemaError, ValidationResult};
use crate::modifiers::{skip_absent, LengthBounded, Optional};
use crate::types::{Kind, Value};
use indexmap::IndexMap;

// ============================================================================
// Schema
// ============================================================================

/// Field layout for an [`ObjectValidator`]: unique field names in declaration order
#[derive(Debug, Default)]
pub struct Schema {
    fields: IndexMap<String, Box<dyn Validator>>,
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field. Declaring the same name twice is an error.
    pub fn field(
        self,
        name: impl Into<String>,
        validator: impl Validator + 'static,
    ) -> Result<Self, SchemaError> {
        self.insert(name.into(), Box::new(validator))
    }

    /// Build a schema from `(name, validator)` pairs
    pub fn from_fields<K, I>(fields: I) -> Result<Self, SchemaError>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Box<dyn Validator>)>,
    {
        fields
            .into_iter()
            .try_fold(Self::new(), |schema, (name, validator)| {
                schema.insert(name.into(), validator)
            })
    }

    fn insert(mut self, name: String, validator: Box<dyn Validator>) -> Result<Self, SchemaError> {
        if self.fields.contains_key(&name) {
            tracing::debug!(field = %name, "rejecting duplicate schema field");
            return Err(SchemaError::DuplicateField(name));
        }
        self.fields.insert(name, validator);
        Ok(self)
    }

    /// Number of declared fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no fields are declared
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Declared field names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

// ============================================================================
// Object
// ============================================================================

/// Validates objects field by field against a [`Schema`]
///
/// Only declared fields are visited; extra payload keys are ignored and do not appear
/// in the result. A declared field missing from the payload is validated as
/// [`Value::Undefined`].
#[derive(Debug)]
pub struct ObjectValidator {
    schema: Schema,
    optional: bool,
    bounds: LengthBounds,
}

/// Create an object validator owning `schema`
pub fn object(schema: Schema) -> ObjectValidator {
    ObjectValidator {
        schema,
        optional: false,
        bounds: LengthBounds::default(),
    }
}

impl ObjectValidator {
    /// The schema this validator checks against
    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

impl Validator for ObjectValidator {
    fn validate(&self, value: &Value) -> ValidationResult {
        if let Some(result) = skip_absent(self.optional, value) {
            return result;
        }

        let payload = match value {
            Value::Object(payload) => payload,
            other => return type_error(Kind::Object, other.kind()),
        };

        // Bounds apply to the payload's key count, extra keys included
        self.check_length(payload.len())?;

        tracing::trace!(fields = self.schema.len(), "validating object");

        let mut errors = IndexMap::new();
        let mut values = IndexMap::new();

        for (name, validator) in &self.schema.fields {
            let result = match payload.get(name) {
                Some(field_value) => validator.validate(field_value),
                None => validator.validate(&Value::Undefined),
            };

            match result {
                Ok(validated) => {
                    values.insert(name.clone(), validated);
                }
                Err(error) => {
                    errors.insert(ErrorKey::Field(name.clone()), error);
                }
            }
        }

        if errors.is_empty() {
            Ok(Value::Object(values))
        } else {
            tracing::debug!(
                failed = errors.len(),
                fields = self.schema.len(),
                "object validation failed"
            );
            Err(ErrorNode::Branch(errors))
        }
    }
}

impl Optional for ObjectValidator {
    fn is_optional(&self) -> bool {
        self.optional
    }

    fn with_optional(self, optional: bool) -> Self {
        Self { optional, ..self }
    }
}

impl LengthBounded for ObjectValidator {
    const LENGTH_LABEL: &'static str = "object";

    fn length_bounds(&self) -> &LengthBounds {
        &self.bounds
    }

    fn with_length_bounds(self, bounds: LengthBounds) -> Self {
        Self { bounds, ..self }
    }
}

// ============================================================================
// List
// ============================================================================

/// Validates every element of a list with one element validator
#[derive(Debug)]
pub struct ListValidator {
    element: Box<dyn Validator>,
    optional: bool,
    bounds: LengthBounds,
}

/// Create a list validator applying `element` to every item
pub fn list(element: impl Validator + 'static) -> ListValidator {
    ListValidator {
        element: Box::new(element),
        optional: false,
        bounds: LengthBounds::default(),
    }
}

impl Validator for ListValidator {
    fn validate(&self, value: &Value) -> ValidationResult {
        if let Some(result) = skip_absent(self.optional, value) {
            return result;
        }

        let items = match value {
            Value::List(items) => items,
            other => return type_error(Kind::Array, other.kind()),
        };

        self.check_length(items.len())?;

        tracing::trace!(items = items.len(), "validating list");

        let mut errors = IndexMap::new();
        let mut values = Vec::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            match self.element.validate(item) {
                Ok(validated) => values.push(validated),
                Err(error) => {
                    errors.insert(ErrorKey::Index(index), error);
                }
            }
        }

        if errors.is_empty() {
            Ok(Value::List(values))
        } else {
            tracing::debug!(
                failed = errors.len(),
                items = items.len(),
                "list validation failed"
            );
            Err(ErrorNode::Branch(errors))
        }
    }
}

impl Optional for ListValidator {
    fn is_optional(&self) -> bool {
        self.optional
    }

    fn with_optional(self, optional: bool) -> Self {
        Self { optional, ..self }
    }
}

impl LengthBounded for ListValidator {
    const LENGTH_LABEL: &'static str = "array";

    fn length_bounds(&self) -> &LengthBounds {
        &self.bounds
    }

    fn with_length_bounds(self, bounds: LengthBounds) -> Self {
        Self { bounds, ..self }
    }
}
