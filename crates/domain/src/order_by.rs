use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;

use crate::input::FieldValue;

/// Sort direction of one ordering term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Ascending sort direction.
    Asc,
    /// Descending sort direction.
    Desc,
}

impl SortDirection {
    /// Parses a transport value into a sort direction.
    #[must_use]
    pub fn parse_transport(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    /// Returns the stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// A column an entity allows sorting by.
///
/// Only obtainable from an [`OrderPolicy`], so it always names a known column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SortColumn(&'static str);

impl SortColumn {
    /// Returns the column name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

/// One `(column, direction)` ordering term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct OrderTerm {
    /// Column to sort by.
    pub column: SortColumn,
    /// Sort direction.
    pub direction: SortDirection,
}

impl OrderTerm {
    /// Returns the `<column>_<direction>` transport token.
    #[must_use]
    pub fn to_transport(&self) -> String {
        format!("{}_{}", self.column.as_str(), self.direction.as_str())
    }
}

/// Sortable columns and fallback ordering of one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderPolicy {
    columns: Vec<SortColumn>,
    default_order: Vec<OrderTerm>,
}

impl OrderPolicy {
    /// Creates a policy.
    ///
    /// Columns named by the default order are always sortable. A column
    /// repeated in the default order keeps only its first term.
    #[must_use]
    pub fn new(
        columns: &[&'static str],
        default_order: &[(&'static str, SortDirection)],
    ) -> Self {
        let mut sortable: Vec<SortColumn> = Vec::new();
        for name in columns
            .iter()
            .copied()
            .chain(default_order.iter().map(|(name, _)| *name))
        {
            if !sortable.iter().any(|column| column.0 == name) {
                sortable.push(SortColumn(name));
            }
        }

        let mut seen = HashSet::new();
        let default_order = default_order
            .iter()
            .filter(|(name, _)| seen.insert(*name))
            .map(|(name, direction)| OrderTerm {
                column: SortColumn(*name),
                direction: *direction,
            })
            .collect();

        Self {
            columns: sortable,
            default_order,
        }
    }

    /// Returns the sortable columns.
    #[must_use]
    pub fn columns(&self) -> &[SortColumn] {
        &self.columns
    }

    /// Returns the fallback ordering.
    #[must_use]
    pub fn default_order(&self) -> &[OrderTerm] {
        &self.default_order
    }

    /// Resolves a column name against the sortable set.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<SortColumn> {
        self.columns.iter().copied().find(|column| column.0 == name)
    }

    /// Parses one `<column>_<asc|desc>` token.
    #[must_use]
    pub fn parse_token(&self, token: &str) -> Option<OrderTerm> {
        let (column, direction) = token.rsplit_once('_')?;

        Some(OrderTerm {
            column: self.column(column)?,
            direction: SortDirection::parse_transport(direction)?,
        })
    }

    /// Normalizes raw ordering input.
    ///
    /// The input must be an array of valid tokens naming distinct columns.
    /// Anything else, including an empty array, yields the default order;
    /// a list is never partially honored. Accepted terms keep the caller's
    /// order, which is the tie-break priority.
    #[must_use]
    pub fn normalize(&self, raw: FieldValue<'_>) -> Vec<OrderTerm> {
        self.parse_all(raw)
            .unwrap_or_else(|| self.default_order.clone())
    }

    fn parse_all(&self, raw: FieldValue<'_>) -> Option<Vec<OrderTerm>> {
        let FieldValue::Present(Value::Array(tokens)) = raw else {
            return None;
        };
        if tokens.is_empty() {
            return None;
        }

        let mut seen = HashSet::new();
        tokens
            .iter()
            .map(|token| {
                let term = self.parse_token(token.as_str()?)?;
                seen.insert(term.column).then_some(term)
            })
            .collect()
    }
}
