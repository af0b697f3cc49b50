//! Field schemas and the validation pipeline built on them.

use serde::Serialize;
use serde_json::{Map, Value};
use storefront_core::{AppError, AppResult, FieldMessages};

use crate::constraint::FieldConstraint;
use crate::input::FieldValue;
use crate::message::resolve_message;
use crate::validator::ValidationReason;

/// One declared field: its property key, display label and constraint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldRule {
    property: String,
    label: String,
    constraint: FieldConstraint,
}

impl FieldRule {
    /// Returns the input property key.
    #[must_use]
    pub fn property(&self) -> &str {
        self.property.as_str()
    }

    /// Returns the label used in messages.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Returns the field constraint.
    #[must_use]
    pub fn constraint(&self) -> &FieldConstraint {
        &self.constraint
    }

    fn error_record(&self, value: FieldValue<'_>, reasons: &[ValidationReason]) -> FieldErrorRecord {
        let mut constraints = FieldMessages::new();
        for reason in reasons {
            constraints.insert(
                reason.rule_name(&self.constraint),
                resolve_message(*reason, self.label.as_str(), &self.constraint),
            );
        }

        FieldErrorRecord {
            property: self.property.clone(),
            value: value.to_echo(),
            constraints,
        }
    }
}

/// Failure report for one offending field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldErrorRecord {
    /// Input property key.
    pub property: String,
    /// Offending value; `None` when the property was missing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Rule name to message, in the order the rules were evaluated.
    pub constraints: FieldMessages,
}

impl FieldErrorRecord {
    /// Returns the message of the first failing rule.
    #[must_use]
    pub fn first_message(&self) -> Option<&str> {
        self.constraints.iter().next().map(|(_, message)| message)
    }
}

/// Ordered field declarations for one input shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldSchema {
    fields: Vec<FieldRule>,
}

impl FieldSchema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a field.
    ///
    /// Declaring the same property twice replaces the earlier rule in place.
    #[must_use]
    pub fn field(
        mut self,
        property: impl Into<String>,
        label: impl Into<String>,
        constraint: FieldConstraint,
    ) -> Self {
        let rule = FieldRule {
            property: property.into(),
            label: label.into(),
            constraint,
        };

        match self
            .fields
            .iter_mut()
            .find(|existing| existing.property == rule.property)
        {
            Some(existing) => *existing = rule,
            None => self.fields.push(rule),
        }

        self
    }

    /// Returns the declared fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldRule] {
        &self.fields
    }

    /// Returns the rule for a property.
    #[must_use]
    pub fn rule(&self, property: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|rule| rule.property == property)
    }

    /// Derives a schema where every field may be omitted.
    ///
    /// Nullability is unchanged, so partial updates cannot null out a
    /// non-nullable field.
    #[must_use]
    pub fn partial(&self) -> Self {
        Self {
            fields: self
                .fields
                .iter()
                .map(|rule| FieldRule {
                    constraint: rule.constraint.optional(),
                    ..rule.clone()
                })
                .collect(),
        }
    }

    /// Reports every failing rule of every declared field.
    #[must_use]
    pub fn validate_all(&self, input: &Value) -> Vec<FieldErrorRecord> {
        self.fields
            .iter()
            .filter_map(|rule| {
                let value = FieldValue::of(input, rule.property());
                let reasons = rule.constraint.violations(value);
                (!reasons.is_empty()).then(|| rule.error_record(value, &reasons))
            })
            .collect()
    }

    /// Reports the first failing rule of each declared field.
    ///
    /// Every field is evaluated; the early exit is per field.
    #[must_use]
    pub fn validate_first_error(&self, input: &Value) -> Vec<FieldErrorRecord> {
        self.fields
            .iter()
            .filter_map(|rule| {
                let value = FieldValue::of(input, rule.property());
                rule.constraint
                    .validate(value)
                    .reason()
                    .map(|reason| rule.error_record(value, &[reason]))
            })
            .collect()
    }

    /// Validates the input and returns only its declared, present properties.
    ///
    /// Failures are aggregated into one [`AppError::Unprocessable`] holding a
    /// single message per offending property.
    pub fn validate_or_throw(&self, input: &Value) -> AppResult<Map<String, Value>> {
        let errors = self.validate_first_error(input);
        if !errors.is_empty() {
            return Err(AppError::Unprocessable(aggregate_messages(&errors)));
        }

        Ok(self.strip_undeclared(input))
    }

    /// Keeps only declared properties that are present in the input.
    #[must_use]
    pub fn strip_undeclared(&self, input: &Value) -> Map<String, Value> {
        let Some(object) = input.as_object() else {
            return Map::new();
        };

        self.fields
            .iter()
            .filter_map(|rule| {
                object
                    .get(rule.property())
                    .map(|value| (rule.property.clone(), value.clone()))
            })
            .collect()
    }
}

/// Collapses error records into one message per property.
#[must_use]
pub fn aggregate_messages(errors: &[FieldErrorRecord]) -> FieldMessages {
    let mut messages = FieldMessages::new();
    for error in errors {
        if let Some(message) = error.first_message() {
            messages.insert(error.property.as_str(), message);
        }
    }

    messages
}
