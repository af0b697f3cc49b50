use crate::constraint::{ConstraintKind, FieldConstraint, TextPattern};
use crate::validator::ValidationReason;

impl ValidationReason {
    /// Returns the rule name reported as the constraint key for this reason.
    #[must_use]
    pub fn rule_name(&self, constraint: &FieldConstraint) -> &'static str {
        match self {
            Self::Null => "not_null",
            Self::Required => "is_defined",
            Self::InvalidType => match constraint.kind() {
                ConstraintKind::Text | ConstraintKind::Identifier => "is_string",
                ConstraintKind::Boolean => "is_boolean",
                ConstraintKind::Number => "is_number",
            },
            Self::TooShort => "min_length",
            Self::TooLong => "max_length",
            Self::NotInteger => "is_int",
            Self::BelowMin => "min",
            Self::AboveMax => "max",
            Self::PatternMismatch => match constraint.text_pattern() {
                Some(TextPattern::Email) => "is_email",
                Some(TextPattern::Phone) => "is_phone_number",
                None => "matches",
            },
            Self::MalformedIdentifier => "is_uuid",
        }
    }
}

/// Renders the message for a failed rule.
///
/// `constraint` must be the one the value was validated with so the rendered
/// bounds match the bounds that were enforced.
#[must_use]
pub fn resolve_message(
    reason: ValidationReason,
    label: &str,
    constraint: &FieldConstraint,
) -> String {
    match reason {
        ValidationReason::Null => format!("{label} must not be null"),
        ValidationReason::Required => format!("{label} is required"),
        ValidationReason::InvalidType => match constraint.kind() {
            ConstraintKind::Text | ConstraintKind::Identifier => {
                format!("{label} must be a string")
            }
            ConstraintKind::Boolean => format!("{label} must be a boolean"),
            ConstraintKind::Number => format!("{label} must be a number"),
        },
        ValidationReason::TooShort => format!(
            "{label} must be at least {} characters long",
            constraint.min_length_bound().unwrap_or_default()
        ),
        ValidationReason::TooLong => format!(
            "{label} must be at most {} characters long",
            constraint.max_length_bound().unwrap_or_default()
        ),
        ValidationReason::NotInteger => format!("{label} must be an integer"),
        ValidationReason::BelowMin => format!(
            "{label} must be greater or equal to {}",
            constraint.min_bound().unwrap_or_default()
        ),
        ValidationReason::AboveMax => format!(
            "{label} must be less or equal to {}",
            constraint.max_bound().unwrap_or_default()
        ),
        ValidationReason::PatternMismatch => match constraint.text_pattern() {
            Some(TextPattern::Email) => format!("{label} must be a valid email address"),
            Some(TextPattern::Phone) => format!("{label} must be a valid phone number"),
            None => format!("{label} has an invalid format"),
        },
        ValidationReason::MalformedIdentifier => format!("{label} must be a valid UUID"),
    }
}
