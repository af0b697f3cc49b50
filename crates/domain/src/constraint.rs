use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$").ok()
});

static PHONE_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{1,4}?[-. ]?(?:\(?[0-9]{1,4}\)?[-. ]?){1,4}[0-9]{2,4}$").ok());

/// Primitive kind accepted by a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    /// UTF-8 string.
    Text,
    /// JSON boolean.
    Boolean,
    /// Finite JSON number.
    Number,
    /// Hyphenated UUID string.
    Identifier,
}

impl ConstraintKind {
    /// Returns a stable value for the kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::Identifier => "identifier",
        }
    }
}

/// Preset shape checks for text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextPattern {
    /// Email address.
    Email,
    /// Phone number with optional country code and separators.
    Phone,
}

impl TextPattern {
    /// Returns a stable value for the preset.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }

    /// Returns whether the text matches the preset.
    #[must_use]
    pub fn is_match(&self, value: &str) -> bool {
        let pattern = match self {
            Self::Email => &*EMAIL_PATTERN,
            Self::Phone => &*PHONE_PATTERN,
        };

        pattern
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(value))
    }
}

/// Declarative rule set for one field.
///
/// Bounds that do not apply to the kind (a length bound on a number, say) are
/// kept but never evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldConstraint {
    kind: ConstraintKind,
    allow_null: bool,
    allow_undefined: bool,
    min_length: Option<usize>,
    max_length: Option<usize>,
    min: Option<f64>,
    max: Option<f64>,
    only_int: bool,
    pattern: Option<TextPattern>,
}

impl FieldConstraint {
    const fn of_kind(kind: ConstraintKind) -> Self {
        Self {
            kind,
            allow_null: false,
            allow_undefined: false,
            min_length: None,
            max_length: None,
            min: None,
            max: None,
            only_int: false,
            pattern: None,
        }
    }

    /// Required, non-null text.
    #[must_use]
    pub const fn text() -> Self {
        Self::of_kind(ConstraintKind::Text)
    }

    /// Required, non-null boolean.
    #[must_use]
    pub const fn boolean() -> Self {
        Self::of_kind(ConstraintKind::Boolean)
    }

    /// Required, non-null number.
    #[must_use]
    pub const fn number() -> Self {
        Self::of_kind(ConstraintKind::Number)
    }

    /// Required, non-null UUID string.
    #[must_use]
    pub const fn identifier() -> Self {
        Self::of_kind(ConstraintKind::Identifier)
    }

    /// Accepts an explicit `null`.
    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.allow_null = true;
        self
    }

    /// Accepts a missing value.
    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.allow_undefined = true;
        self
    }

    /// Minimum text length in characters.
    #[must_use]
    pub const fn min_length(mut self, value: usize) -> Self {
        self.min_length = Some(value);
        self
    }

    /// Maximum text length in characters.
    #[must_use]
    pub const fn max_length(mut self, value: usize) -> Self {
        self.max_length = Some(value);
        self
    }

    /// Inclusive lower numeric bound.
    #[must_use]
    pub const fn min(mut self, value: f64) -> Self {
        self.min = Some(value);
        self
    }

    /// Inclusive upper numeric bound.
    #[must_use]
    pub const fn max(mut self, value: f64) -> Self {
        self.max = Some(value);
        self
    }

    /// Rejects numbers with a fractional part.
    #[must_use]
    pub const fn integer(mut self) -> Self {
        self.only_int = true;
        self
    }

    /// Requires text to match a preset shape.
    #[must_use]
    pub const fn pattern(mut self, value: TextPattern) -> Self {
        self.pattern = Some(value);
        self
    }

    /// Returns the primitive kind.
    #[must_use]
    pub fn kind(&self) -> ConstraintKind {
        self.kind
    }

    /// Returns whether `null` is accepted.
    #[must_use]
    pub fn allows_null(&self) -> bool {
        self.allow_null
    }

    /// Returns whether a missing value is accepted.
    #[must_use]
    pub fn allows_undefined(&self) -> bool {
        self.allow_undefined
    }

    /// Returns the minimum text length.
    #[must_use]
    pub fn min_length_bound(&self) -> Option<usize> {
        self.min_length
    }

    /// Returns the maximum text length.
    #[must_use]
    pub fn max_length_bound(&self) -> Option<usize> {
        self.max_length
    }

    /// Returns the inclusive lower numeric bound.
    #[must_use]
    pub fn min_bound(&self) -> Option<f64> {
        self.min
    }

    /// Returns the inclusive upper numeric bound.
    #[must_use]
    pub fn max_bound(&self) -> Option<f64> {
        self.max
    }

    /// Returns whether only integers are accepted.
    #[must_use]
    pub fn only_int(&self) -> bool {
        self.only_int
    }

    /// Returns the text shape preset.
    #[must_use]
    pub fn text_pattern(&self) -> Option<TextPattern> {
        self.pattern
    }
}

#[cfg(test)]
mod tests {
    use super::{ConstraintKind, FieldConstraint, TextPattern};

    #[test]
    fn builders_start_strict() {
        let constraint = FieldConstraint::text();
        assert_eq!(constraint.kind(), ConstraintKind::Text);
        assert!(!constraint.allows_null());
        assert!(!constraint.allows_undefined());
    }

    #[test]
    fn email_preset_accepts_common_addresses() {
        assert!(TextPattern::Email.is_match("sales@acme.example"));
        assert!(TextPattern::Email.is_match("first.last+tag@sub.acme.io"));
        assert!(!TextPattern::Email.is_match("sales@acme"));
        assert!(!TextPattern::Email.is_match("sales acme.example"));
    }

    #[test]
    fn phone_preset_accepts_separated_numbers() {
        assert!(TextPattern::Phone.is_match("+1 (555) 010-9999"));
        assert!(TextPattern::Phone.is_match("0201234567"));
        assert!(!TextPattern::Phone.is_match("call me"));
        assert!(!TextPattern::Phone.is_match("12"));
    }
}
