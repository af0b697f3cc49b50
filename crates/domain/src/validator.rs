use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::constraint::{ConstraintKind, FieldConstraint};
use crate::input::FieldValue;

/// Reason a value failed its constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationReason {
    /// Explicit `null` where null is not allowed.
    Null,
    /// Missing value where one is required.
    Required,
    /// Wrong primitive type.
    InvalidType,
    /// Text shorter than the minimum length.
    TooShort,
    /// Text longer than the maximum length.
    TooLong,
    /// Number with a fractional part where an integer is required.
    NotInteger,
    /// Number below the lower bound.
    BelowMin,
    /// Number above the upper bound.
    AboveMax,
    /// Text not matching its preset shape.
    PatternMismatch,
    /// String that is not a hyphenated UUID.
    MalformedIdentifier,
}

impl ValidationReason {
    /// Returns a stable value for the reason.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Required => "REQUIRED",
            Self::InvalidType => "INVALID_TYPE",
            Self::TooShort => "TOO_SHORT",
            Self::TooLong => "TOO_LONG",
            Self::NotInteger => "NOT_INTEGER",
            Self::BelowMin => "BELOW_MIN",
            Self::AboveMax => "ABOVE_MAX",
            Self::PatternMismatch => "PATTERN_MISMATCH",
            Self::MalformedIdentifier => "MALFORMED_IDENTIFIER",
        }
    }
}

/// Pass or fail result of validating one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// Every rule passed.
    Valid,
    /// The first failing rule.
    Invalid(ValidationReason),
}

impl ValidationOutcome {
    /// Returns whether every rule passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns the failure reason, if any.
    #[must_use]
    pub fn reason(&self) -> Option<ValidationReason> {
        match self {
            Self::Valid => None,
            Self::Invalid(reason) => Some(*reason),
        }
    }
}

impl FieldConstraint {
    /// Validates a value and reports the first failing rule.
    ///
    /// Rules run in a fixed order: nullability, presence, primitive type,
    /// then the kind-specific bounds and shape checks.
    #[must_use]
    pub fn validate(&self, value: FieldValue<'_>) -> ValidationOutcome {
        self.evaluate(value, true)
            .first()
            .copied()
            .map_or(ValidationOutcome::Valid, ValidationOutcome::Invalid)
    }

    /// Reports every failing rule instead of only the first.
    ///
    /// Nullability, presence and type failures still end evaluation because
    /// no later rule can be checked against such a value.
    #[must_use]
    pub fn violations(&self, value: FieldValue<'_>) -> Vec<ValidationReason> {
        self.evaluate(value, false)
    }

    fn evaluate(&self, value: FieldValue<'_>, stop_at_first: bool) -> Vec<ValidationReason> {
        let value = match value {
            FieldValue::Null if !self.allows_null() => return vec![ValidationReason::Null],
            FieldValue::Undefined if !self.allows_undefined() => {
                return vec![ValidationReason::Required];
            }
            FieldValue::Null | FieldValue::Undefined => return Vec::new(),
            FieldValue::Present(value) => value,
        };

        let mut reasons = Vec::new();

        match self.kind() {
            ConstraintKind::Text => {
                let Some(text) = value.as_str() else {
                    return vec![ValidationReason::InvalidType];
                };

                let length = text.chars().count();
                if self.min_length_bound().is_some_and(|min| length < min) {
                    reasons.push(ValidationReason::TooShort);
                }
                if self.max_length_bound().is_some_and(|max| length > max) {
                    reasons.push(ValidationReason::TooLong);
                }
                if self
                    .text_pattern()
                    .is_some_and(|pattern| !pattern.is_match(text))
                {
                    reasons.push(ValidationReason::PatternMismatch);
                }
            }
            ConstraintKind::Boolean => {
                if !value.is_boolean() {
                    return vec![ValidationReason::InvalidType];
                }
            }
            ConstraintKind::Number => {
                let Some(number) = finite_number(value) else {
                    return vec![ValidationReason::InvalidType];
                };

                if self.only_int() && number.fract() != 0.0 {
                    reasons.push(ValidationReason::NotInteger);
                }
                if self.min_bound().is_some_and(|min| number < min) {
                    reasons.push(ValidationReason::BelowMin);
                }
                if self.max_bound().is_some_and(|max| number > max) {
                    reasons.push(ValidationReason::AboveMax);
                }
            }
            ConstraintKind::Identifier => {
                let Some(text) = value.as_str() else {
                    return vec![ValidationReason::InvalidType];
                };

                if !is_hyphenated_uuid(text) {
                    reasons.push(ValidationReason::MalformedIdentifier);
                }
            }
        }

        if stop_at_first {
            reasons.truncate(1);
        }

        reasons
    }
}

fn finite_number(value: &Value) -> Option<f64> {
    value.as_f64().filter(|number| number.is_finite())
}

/// Returns whether the text is a UUID in its canonical 8-4-4-4-12 form.
#[must_use]
pub fn is_hyphenated_uuid(text: &str) -> bool {
    // The hyphenated form is the only 36-character encoding the parser accepts.
    text.len() == 36 && Uuid::try_parse(text).is_ok()
}
