//! Reusable modifier traits
//!
//! Validators opt into shared behavior by implementing a small accessor pair; the
//! user-facing modifier methods come from the provided trait methods.

use crate::constraints::{check_length, LengthBounds};
use crate::errors::{ErrorNode, SchemaError, ValidationResult};
use crate::types::Value;

// ============================================================================
// Optional
// ============================================================================

/// Accept the absent and null sentinels without further checks
pub trait Optional: Sized {
    /// Whether the validator is currently optional
    fn is_optional(&self) -> bool;

    /// Return a copy with the optional flag set to `optional`
    fn with_optional(self, optional: bool) -> Self;

    /// Mark the validator optional
    fn optional(self) -> Self {
        self.with_optional(true)
    }
}

/// Short-circuit for optional validators: `Some(Ok(value))` when the value is
/// absent or null and `optional` is set, `None` when validation must continue.
pub(crate) fn skip_absent(optional: bool, value: &Value) -> Option<ValidationResult> {
    (optional && value.is_nullish()).then(|| Ok(value.clone()))
}

// ============================================================================
// Length Bounded
// ============================================================================

/// Minimum/maximum bounds on the validator's length dimension
pub trait LengthBounded: Sized {
    /// Label naming the measured value in error messages
    const LENGTH_LABEL: &'static str;

    /// Current bounds
    fn length_bounds(&self) -> &LengthBounds;

    /// Return a copy carrying `bounds`
    fn with_length_bounds(self, bounds: LengthBounds) -> Self;

    /// Require at least `n`; must stay below any configured maximum
    fn min_length(self, n: usize) -> Result<Self, SchemaError> {
        let bounds = self.length_bounds().with_min(n)?;
        Ok(self.with_length_bounds(bounds))
    }

    /// Require at most `n`; must stay above any configured minimum
    fn max_length(self, n: usize) -> Result<Self, SchemaError> {
        let bounds = self.length_bounds().with_max(n)?;
        Ok(self.with_length_bounds(bounds))
    }

    /// Apply the bounds to `length`, if any are set
    fn check_length(&self, length: usize) -> Result<(), ErrorNode> {
        let bounds = self.length_bounds();
        if bounds.is_set() {
            check_length(length, bounds, Self::LENGTH_LABEL)
        } else {
            Ok(())
        }
    }
}
