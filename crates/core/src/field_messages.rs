use std::fmt::{Display, Formatter};

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

/// One message per key, kept in insertion order.
///
/// Keys are offending properties in aggregated errors and rule names inside
/// a single field's failure report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMessages {
    entries: Vec<(String, String)>,
}

impl FieldMessages {
    /// Creates an empty message set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the message for a property.
    ///
    /// A later message for the same property replaces the earlier one while
    /// keeping the property's original position.
    pub fn insert(&mut self, property: impl Into<String>, message: impl Into<String>) {
        let property = property.into();
        let message = message.into();

        match self.entries.iter_mut().find(|(key, _)| *key == property) {
            Some((_, existing)) => *existing = message,
            None => self.entries.push((property, message)),
        }
    }

    /// Returns the message recorded for a property.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == property)
            .map(|(_, message)| message.as_str())
    }

    /// Returns whether no property has a message.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of properties with a message.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates `(property, message)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(property, message)| (property.as_str(), message.as_str()))
    }
}

impl Display for FieldMessages {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, (property, message)) in self.iter().enumerate() {
            if index > 0 {
                formatter.write_str("; ")?;
            }
            write!(formatter, "{property}: {message}")?;
        }

        Ok(())
    }
}

impl Serialize for FieldMessages {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (property, message) in &self.entries {
            map.serialize_entry(property, message)?;
        }
        map.end()
    }
}
