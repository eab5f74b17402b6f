//! Validators for atomic kinds

use super::Validator;
use crate::constraints::{check_range, LengthBounds, RangeBounds};
use crate::errors::{display_number, success, type_error, ErrorNode, SchemaError, ValidationResult};
use crate::modifiers::{skip_absent, LengthBounded, Optional};
use crate::types::{Kind, Value};
use once_cell::sync::Lazy;
use regex::Regex;

/// Decimal digits with at most one `.` separator
static NUMERIC_STRING_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]*\.?[0-9]*$").unwrap());

/// Precision used by [`NumberValidator::to_float`]
pub const DEFAULT_FLOAT_PRECISION: u32 = 3;

/// Largest precision accepted by [`NumberValidator::to_float_with_precision`]
pub const MAX_FLOAT_PRECISION: u32 = 15;

// ============================================================================
// String
// ============================================================================

/// Accepts strings, optionally bounded by character count
#[derive(Debug, Clone, Default)]
pub struct StringValidator {
    optional: bool,
    bounds: LengthBounds,
}

/// Create a string validator
pub fn string() -> StringValidator {
    StringValidator::default()
}

impl Validator for StringValidator {
    fn validate(&self, value: &Value) -> ValidationResult {
        if let Some(result) = skip_absent(self.optional, value) {
            return result;
        }

        match value {
            Value::String(s) => {
                self.check_length(s.chars().count())?;
                success(value.clone())
            }
            other => type_error(Kind::String, other.kind()),
        }
    }
}

impl Optional for StringValidator {
    fn is_optional(&self) -> bool {
        self.optional
    }

    fn with_optional(self, optional: bool) -> Self {
        Self { optional, ..self }
    }
}

impl LengthBounded for StringValidator {
    const LENGTH_LABEL: &'static str = "string";

    fn length_bounds(&self) -> &LengthBounds {
        &self.bounds
    }

    fn with_length_bounds(self, bounds: LengthBounds) -> Self {
        Self { bounds, ..self }
    }
}

// ============================================================================
// Number
// ============================================================================

/// Output conversion applied to a validated number
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Coercion {
    /// Return the input as given
    #[default]
    None,
    /// Round to the nearest integer
    Integer,
    /// Round to `precision` decimal places
    Float { precision: u32 },
}

impl Coercion {
    fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Integer => "toInteger",
            Self::Float { .. } => "toFloat",
        }
    }

    fn apply(&self, n: f64) -> f64 {
        match self {
            Self::None => n,
            Self::Integer => round_half_up(n),
            Self::Float { precision } => {
                let factor = 10f64.powi(*precision as i32);
                let scaled = n * factor;
                // Past 2^52 an f64 has no fractional digits left to round
                if !scaled.is_finite() || n.abs() >= MAX_EXACT_FRACTION / factor {
                    return n;
                }
                round_half_up(scaled) / factor
            }
        }
    }
}

/// 2^52, the magnitude from which every f64 is an integer
const MAX_EXACT_FRACTION: f64 = 4_503_599_627_370_496.0;

// Halves round towards positive infinity: 2.5 -> 3, -2.5 -> -2.
// `n - floor` is exact, unlike `n + 0.5`.
fn round_half_up(n: f64) -> f64 {
    let floor = n.floor();
    if n - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Accepts numbers and decimal numeric strings, with optional range bounds and
/// output coercion
#[derive(Debug, Clone, Default)]
pub struct NumberValidator {
    optional: bool,
    range: RangeBounds,
    coercion: Coercion,
}

/// Create a number validator
pub fn number() -> NumberValidator {
    NumberValidator::default()
}

impl NumberValidator {
    /// Require at least `n`; must stay below any configured maximum
    pub fn min(self, n: f64) -> Result<Self, SchemaError> {
        let range = self.range.with_min(n)?;
        Ok(Self { range, ..self })
    }

    /// Require at most `n`; must stay above any configured minimum
    pub fn max(self, n: f64) -> Result<Self, SchemaError> {
        let range = self.range.with_max(n)?;
        Ok(Self { range, ..self })
    }

    /// Round successful results to the nearest integer
    pub fn to_integer(self) -> Result<Self, SchemaError> {
        self.with_coercion(Coercion::Integer)
    }

    /// Round successful results to [`DEFAULT_FLOAT_PRECISION`] decimal places
    pub fn to_float(self) -> Result<Self, SchemaError> {
        self.to_float_with_precision(DEFAULT_FLOAT_PRECISION)
    }

    /// Round successful results to `precision` decimal places
    pub fn to_float_with_precision(self, precision: u32) -> Result<Self, SchemaError> {
        if precision > MAX_FLOAT_PRECISION {
            return Err(SchemaError::InvalidPrecision {
                precision,
                max: MAX_FLOAT_PRECISION,
            });
        }
        self.with_coercion(Coercion::Float { precision })
    }

    /// Currently configured coercion
    pub fn coercion(&self) -> Coercion {
        self.coercion
    }

    fn with_coercion(self, coercion: Coercion) -> Result<Self, SchemaError> {
        let conflicting = !matches!(self.coercion, Coercion::None)
            && std::mem::discriminant(&self.coercion) != std::mem::discriminant(&coercion);
        if conflicting {
            tracing::debug!(
                requested = coercion.name(),
                existing = self.coercion.name(),
                "rejecting coercion"
            );
            return Err(SchemaError::ConflictingCoercion {
                requested: coercion.name(),
                existing: self.coercion.name(),
            });
        }
        Ok(Self { coercion, ..self })
    }
}

impl Validator for NumberValidator {
    fn validate(&self, value: &Value) -> ValidationResult {
        if let Some(result) = skip_absent(self.optional, value) {
            return result;
        }

        let parsed = match value {
            Value::Number(n) => *n,
            Value::String(s) => {
                if !NUMERIC_STRING_REGEX.is_match(s) {
                    return type_error(Kind::Number, Kind::String);
                }
                // "" and "." pass the character check but do not parse
                s.parse::<f64>().unwrap_or(f64::NAN)
            }
            other => return type_error(Kind::Number, other.kind()),
        };

        // Very long digit strings overflow to infinity as well
        if parsed.is_infinite() {
            return Err(ErrorNode::Leaf(format!(
                "Expected finite number but got {}",
                display_number(parsed)
            )));
        }
        if parsed.is_nan() {
            return type_error(Kind::Number, value.kind());
        }

        if self.range.is_set() {
            check_range(parsed, &self.range, "number")?;
        }

        match self.coercion {
            Coercion::None => success(value.clone()),
            coercion => success(Value::Number(coercion.apply(parsed))),
        }
    }
}

impl Optional for NumberValidator {
    fn is_optional(&self) -> bool {
        self.optional
    }

    fn with_optional(self, optional: bool) -> Self {
        Self { optional, ..self }
    }
}

// ============================================================================
// Boolean / Symbol
// ============================================================================

/// Accepts booleans
#[derive(Debug, Clone, Default)]
pub struct BooleanValidator {
    optional: bool,
}

/// Create a boolean validator
pub fn boolean() -> BooleanValidator {
    BooleanValidator::default()
}

impl Validator for BooleanValidator {
    fn validate(&self, value: &Value) -> ValidationResult {
        if let Some(result) = skip_absent(self.optional, value) {
            return result;
        }
        exact_kind(Kind::Boolean, value)
    }
}

impl Optional for BooleanValidator {
    fn is_optional(&self) -> bool {
        self.optional
    }

    fn with_optional(self, optional: bool) -> Self {
        Self { optional }
    }
}

/// Accepts symbols
#[derive(Debug, Clone, Default)]
pub struct SymbolValidator {
    optional: bool,
}

/// Create a symbol validator
pub fn symbol() -> SymbolValidator {
    SymbolValidator::default()
}

impl Validator for SymbolValidator {
    fn validate(&self, value: &Value) -> ValidationResult {
        if let Some(result) = skip_absent(self.optional, value) {
            return result;
        }
        exact_kind(Kind::Symbol, value)
    }
}

impl Optional for SymbolValidator {
    fn is_optional(&self) -> bool {
        self.optional
    }

    fn with_optional(self, optional: bool) -> Self {
        Self { optional }
    }
}

fn exact_kind(expected: Kind, value: &Value) -> ValidationResult {
    let actual = value.kind();
    if actual == expected {
        success(value.clone())
    } else {
        type_error(expected, actual)
    }
}

// ============================================================================
// Any
// ============================================================================

/// Accepts every value except the absent/null sentinels
#[derive(Debug, Clone, Default)]
pub struct AnyValidator {
    optional: bool,
    allow_undefined_null: bool,
}

/// Create an any validator
pub fn any() -> AnyValidator {
    AnyValidator::default()
}

impl AnyValidator {
    /// Also accept the absent and null sentinels
    pub fn allow_undefined_null(self) -> Self {
        Self {
            allow_undefined_null: true,
            ..self
        }
    }
}

impl Validator for AnyValidator {
    fn validate(&self, value: &Value) -> ValidationResult {
        if let Some(result) = skip_absent(self.optional, value) {
            return result;
        }

        if value.is_nullish() && !self.allow_undefined_null {
            return Err(ErrorNode::Leaf(format!(
                "Expected any value but got {}",
                value.kind()
            )));
        }
        success(value.clone())
    }
}

impl Optional for AnyValidator {
    fn is_optional(&self) -> bool {
        self.optional
    }

    fn with_optional(self, optional: bool) -> Self {
        Self { optional, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Symbol;

    fn message(result: ValidationResult) -> String {
        result
            .unwrap_err()
            .message()
            .map(str::to_string)
            .unwrap_or_default()
    }

    #[test]
    fn test_string_basic() {
        assert_eq!(string().validate(&Value::from("hi")), Ok(Value::from("hi")));
        assert_eq!(
            message(string().validate(&Value::from(1))),
            "Expected string but got number"
        );
        assert_eq!(
            message(string().validate(&Value::Undefined)),
            "Expected string but got undefined"
        );
    }

    #[test]
    fn test_string_length_counts_characters() {
        let validator = string().max_length(2).unwrap();
        assert!(validator.validate(&Value::from("é€")).is_ok());
        assert!(validator.validate(&Value::from("abc")).is_err());
    }

    #[test]
    fn test_number_accepts_numeric_strings() {
        assert_eq!(number().validate(&Value::from("3.14")), Ok(Value::from("3.14")));
        assert!(number().validate(&Value::from("42")).is_ok());
        assert!(number().validate(&Value::from(".5")).is_ok());
        assert!(number().validate(&Value::from("3.")).is_ok());
    }

    #[test]
    fn test_number_rejects_malformed_strings() {
        for input in ["3a", "1.2.3", "-3", " 1", "", ".", "1e5"] {
            assert_eq!(
                message(number().validate(&Value::from(input))),
                "Expected number but got string",
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn test_number_rejects_nan_and_infinity() {
        assert_eq!(
            message(number().validate(&Value::Number(f64::NAN))),
            "Expected number but got NaN"
        );
        assert_eq!(
            message(number().validate(&Value::Number(f64::INFINITY))),
            "Expected finite number but got Infinity"
        );
        assert_eq!(
            message(number().validate(&Value::Number(f64::NEG_INFINITY))),
            "Expected finite number but got -Infinity"
        );
        let huge = "9".repeat(400);
        assert_eq!(
            message(number().validate(&Value::from(huge))),
            "Expected finite number but got Infinity"
        );
    }

    #[test]
    fn test_number_rejects_other_kinds() {
        assert_eq!(
            message(number().validate(&Value::Bool(true))),
            "Expected number but got boolean"
        );
        assert_eq!(
            message(number().validate(&Value::Null)),
            "Expected number but got null"
        );
    }

    #[test]
    fn test_number_range() {
        let validator = number().min(1.0).unwrap().max(10.0).unwrap();
        assert!(validator.validate(&Value::from(1)).is_ok());
        assert!(validator.validate(&Value::from("10")).is_ok());
        assert_eq!(
            message(validator.validate(&Value::from(0))),
            "Expected number to be at least 1 but got 0"
        );
        assert_eq!(
            message(validator.validate(&Value::from("10.5"))),
            "Expected number to be at most 10 but got 10.5"
        );
    }

    #[test]
    fn test_number_coercion() {
        let integer = number().to_integer().unwrap();
        assert_eq!(integer.validate(&Value::from("2.5")), Ok(Value::Number(3.0)));
        assert_eq!(integer.validate(&Value::from(-2.5)), Ok(Value::Number(-2.0)));

        let float = number().to_float().unwrap();
        assert_eq!(float.validate(&Value::from(1.23456)), Ok(Value::Number(1.235)));

        let coarse = number().to_float_with_precision(1).unwrap();
        assert_eq!(coarse.validate(&Value::from("7.25")), Ok(Value::Number(7.3)));
        assert_eq!(coarse.coercion(), Coercion::Float { precision: 1 });
    }

    #[test]
    fn test_to_integer_rounds_exactly() {
        let integer = number().to_integer().unwrap();
        assert_eq!(
            integer.validate(&Value::Number(0.49999999999999994)),
            Ok(Value::Number(0.0))
        );
        assert_eq!(
            integer.validate(&Value::Number(4503599627370497.0)),
            Ok(Value::Number(4503599627370497.0))
        );
        assert_eq!(
            integer.validate(&Value::Number(-0.5)),
            Ok(Value::Number(0.0))
        );
    }

    #[test]
    fn test_to_float_never_overflows_finite_input() {
        assert_eq!(
            number().to_float().unwrap().validate(&Value::Number(1e306)),
            Ok(Value::Number(1e306))
        );
        assert_eq!(
            number()
                .to_float_with_precision(MAX_FLOAT_PRECISION)
                .unwrap()
                .validate(&Value::Number(1e300)),
            Ok(Value::Number(1e300))
        );
        assert_eq!(
            number().to_float().unwrap().validate(&Value::Number(-f64::MAX)),
            Ok(Value::Number(-f64::MAX))
        );
        assert_eq!(
            number().to_float().unwrap().validate(&Value::Number(9007199254740993.0)),
            Ok(Value::Number(9007199254740993.0))
        );
    }

    #[test]
    fn test_number_coercion_conflicts() {
        assert_eq!(
            number().to_integer().and_then(NumberValidator::to_float).unwrap_err(),
            SchemaError::ConflictingCoercion {
                requested: "toFloat",
                existing: "toInteger"
            }
        );
        assert!(number().to_float().and_then(NumberValidator::to_integer).is_err());
        // Re-requesting the same mode only updates it
        assert!(number()
            .to_float()
            .and_then(|v| v.to_float_with_precision(5))
            .is_ok());
        assert!(number().to_float_with_precision(MAX_FLOAT_PRECISION + 1).is_err());
    }

    #[test]
    fn test_boolean_and_symbol() {
        assert!(boolean().validate(&Value::Bool(false)).is_ok());
        assert_eq!(
            message(boolean().validate(&Value::from("true"))),
            "Expected boolean but got string"
        );

        let token = Value::Symbol(Symbol::new("id"));
        assert_eq!(symbol().validate(&token), Ok(token.clone()));
        assert_eq!(
            message(symbol().validate(&Value::from("id"))),
            "Expected symbol but got string"
        );
    }

    #[test]
    fn test_any() {
        assert!(any().validate(&Value::from(0)).is_ok());
        assert!(any().validate(&Value::Number(f64::NAN)).is_ok());
        assert_eq!(
            message(any().validate(&Value::Undefined)),
            "Expected any value but got undefined"
        );
        assert_eq!(
            any().allow_undefined_null().validate(&Value::Null),
            Ok(Value::Null)
        );
        assert_eq!(any().optional().validate(&Value::Null), Ok(Value::Null));
    }

    #[test]
    fn test_optional_bypasses_checks() {
        let validator = number().min(5.0).unwrap().to_integer().unwrap().optional();
        assert_eq!(validator.validate(&Value::Undefined), Ok(Value::Undefined));
        assert_eq!(validator.validate(&Value::Null), Ok(Value::Null));
        assert!(validator.validate(&Value::from(1)).is_err());
        assert_eq!(boolean().optional().validate(&Value::Null), Ok(Value::Null));
    }
}
