use serde_json::{Map, Value};

/// One raw field value as seen by the validators.
///
/// JSON has no `undefined`, so a missing key is modelled explicitly and kept
/// apart from an explicit `null`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// The key is absent from the input.
    Undefined,
    /// The key is present with a JSON `null`.
    Null,
    /// The key is present with any other JSON value.
    Present(&'a Value),
}

impl<'a> FieldValue<'a> {
    /// Builds a field value from an optional lookup result.
    #[must_use]
    pub fn from_lookup(value: Option<&'a Value>) -> Self {
        match value {
            None => Self::Undefined,
            Some(Value::Null) => Self::Null,
            Some(value) => Self::Present(value),
        }
    }

    /// Reads a property from an arbitrary input value.
    ///
    /// Inputs that are not JSON objects have no properties, so every lookup
    /// yields `Undefined`.
    #[must_use]
    pub fn of(input: &'a Value, property: &str) -> Self {
        Self::from_lookup(input.as_object().and_then(|object| object.get(property)))
    }

    /// Reads a property from a JSON object.
    #[must_use]
    pub fn of_object(object: &'a Map<String, Value>, property: &str) -> Self {
        Self::from_lookup(object.get(property))
    }

    /// Returns whether the value is `null` or missing.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Undefined | Self::Null)
    }

    /// Returns the string payload when the value is a JSON string.
    #[must_use]
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Self::Present(value) => value.as_str(),
            Self::Undefined | Self::Null => None,
        }
    }

    /// Returns the value as it should be echoed back in diagnostics.
    #[must_use]
    pub fn to_echo(&self) -> Option<Value> {
        match self {
            Self::Undefined => None,
            Self::Null => Some(Value::Null),
            Self::Present(value) => Some((*value).clone()),
        }
    }
}
