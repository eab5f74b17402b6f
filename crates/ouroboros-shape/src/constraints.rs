//! Length and range constraints
//!
//! Bounds are plain data with validated setters; the check functions are pure and know
//! nothing about which validator called them.

use crate::errors::{display_number, ErrorNode, SchemaError};

// ============================================================================
// Length Bounds
// ============================================================================

/// Bounds on a length dimension (characters, keys, or elements)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LengthBounds {
    /// Minimum length (inclusive)
    pub min_length: Option<usize>,
    /// Maximum length (inclusive)
    pub max_length: Option<usize>,
}

impl LengthBounds {
    /// Whether either bound is set
    pub fn is_set(&self) -> bool {
        self.min_length.is_some() || self.max_length.is_some()
    }

    /// Set the minimum, keeping `min_length < max_length`
    pub fn with_min(self, min: usize) -> Result<Self, SchemaError> {
        if let Some(max) = self.max_length {
            if min >= max {
                tracing::debug!(min, max, "rejecting minLength");
                return Err(SchemaError::InvalidLengthBounds { min, max });
            }
        }
        Ok(Self {
            min_length: Some(min),
            ..self
        })
    }

    /// Set the maximum, keeping `min_length < max_length`
    pub fn with_max(self, max: usize) -> Result<Self, SchemaError> {
        if let Some(min) = self.min_length {
            if min >= max {
                tracing::debug!(min, max, "rejecting maxLength");
                return Err(SchemaError::InvalidLengthBounds { min, max });
            }
        }
        Ok(Self {
            max_length: Some(max),
            ..self
        })
    }
}

// ============================================================================
// Range Bounds
// ============================================================================

/// Bounds on a numeric value
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RangeBounds {
    /// Minimum value (inclusive)
    pub min: Option<f64>,
    /// Maximum value (inclusive)
    pub max: Option<f64>,
}

impl RangeBounds {
    /// Whether either bound is set
    pub fn is_set(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    /// Set the minimum, keeping `min < max`
    pub fn with_min(self, min: f64) -> Result<Self, SchemaError> {
        ensure_finite("min", min)?;
        if let Some(max) = self.max {
            if min >= max {
                tracing::debug!(min, max, "rejecting min");
                return Err(SchemaError::InvalidRangeBounds { min, max });
            }
        }
        Ok(Self {
            min: Some(min),
            ..self
        })
    }

    /// Set the maximum, keeping `min < max`
    pub fn with_max(self, max: f64) -> Result<Self, SchemaError> {
        ensure_finite("max", max)?;
        if let Some(min) = self.min {
            if min >= max {
                tracing::debug!(min, max, "rejecting max");
                return Err(SchemaError::InvalidRangeBounds { min, max });
            }
        }
        Ok(Self {
            max: Some(max),
            ..self
        })
    }
}

fn ensure_finite(bound: &'static str, value: f64) -> Result<(), SchemaError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SchemaError::NonFiniteBound { bound, value })
    }
}

// ============================================================================
// Checks
// ============================================================================

/// Check a length against bounds. The minimum is checked first.
pub fn check_length(length: usize, bounds: &LengthBounds, label: &str) -> Result<(), ErrorNode> {
    if let Some(min) = bounds.min_length {
        if length < min {
            return Err(ErrorNode::Leaf(format!(
                "Expected {} length to be at least {} but got {}",
                label, min, length
            )));
        }
    }

    if let Some(max) = bounds.max_length {
        if length > max {
            return Err(ErrorNode::Leaf(format!(
                "Expected {} length to be at most {} but got {}",
                label, max, length
            )));
        }
    }

    Ok(())
}

/// Check a number against bounds. The minimum is checked first.
pub fn check_range(number: f64, bounds: &RangeBounds, label: &str) -> Result<(), ErrorNode> {
    if let Some(min) = bounds.min {
        if number < min {
            return Err(ErrorNode::Leaf(format!(
                "Expected {} to be at least {} but got {}",
                label,
                display_number(min),
                display_number(number)
            )));
        }
    }

    if let Some(max) = bounds.max {
        if number > max {
            return Err(ErrorNode::Leaf(format!(
                "Expected {} to be at most {} but got {}",
                label,
                display_number(max),
                display_number(number)
            )));
        }
    }

    Ok(())
}
