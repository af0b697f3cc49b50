use std::sync::LazyLock;

use serde::Serialize;
use serde_json::Value;

use crate::constraint::FieldConstraint;
use crate::input::FieldValue;
use crate::order_by::{OrderPolicy, OrderTerm};
use crate::pagination::Pagination;
use crate::schema::FieldSchema;
use crate::text_query::normalize_text_query;

/// Raw list input key for the free-text search.
pub const TEXT_QUERY_KEY: &str = "text_query";
/// Raw list input key for the active filter.
pub const ACTIVE_KEY: &str = "active";
/// Raw list input key for the deleted filter.
pub const DELETED_KEY: &str = "deleted";
/// Raw list input key for the page number.
pub const PAGE_KEY: &str = "page";
/// Raw list input key for the page size.
pub const PAGE_SIZE_KEY: &str = "page_size";
/// Raw list input key for the ordering tokens.
pub const ORDER_BY_KEY: &str = "order_by";

static LIST_QUERY_SCHEMA: LazyLock<FieldSchema> = LazyLock::new(|| {
    FieldSchema::new().field(
        TEXT_QUERY_KEY,
        "text query",
        FieldConstraint::text().nullable().optional(),
    )
});

/// Strict part of list input validation.
///
/// Only the free-text search is data-bearing; the other list keys degrade to
/// defaults instead of failing.
#[must_use]
pub fn list_query_schema() -> &'static FieldSchema {
    &LIST_QUERY_SCHEMA
}

/// Visibility by active flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveFilter {
    /// Only active records.
    #[default]
    Active,
    /// Only inactive records.
    Inactive,
    /// Active and inactive records.
    All,
}

impl ActiveFilter {
    /// Parses a transport value into a filter.
    #[must_use]
    pub fn parse_transport(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    /// Returns the stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::All => "all",
        }
    }

    /// Returns whether a record with the given flag is visible.
    #[must_use]
    pub fn admits(&self, active: bool) -> bool {
        match self {
            Self::Active => active,
            Self::Inactive => !active,
            Self::All => true,
        }
    }

    fn from_raw(value: FieldValue<'_>) -> Self {
        match value {
            FieldValue::Present(Value::String(token)) => {
                Self::parse_transport(token).unwrap_or_default()
            }
            FieldValue::Present(Value::Bool(true)) => Self::Active,
            FieldValue::Present(Value::Bool(false)) => Self::Inactive,
            _ => Self::default(),
        }
    }
}

/// Visibility by soft-delete state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletedFilter {
    /// Only records that were not soft-deleted.
    #[default]
    NotDeleted,
    /// Only soft-deleted records.
    Deleted,
    /// Every record.
    All,
}

impl DeletedFilter {
    /// Parses a transport value into a filter.
    #[must_use]
    pub fn parse_transport(value: &str) -> Option<Self> {
        match value {
            "not_deleted" => Some(Self::NotDeleted),
            "deleted" => Some(Self::Deleted),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    /// Returns the stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotDeleted => "not_deleted",
            Self::Deleted => "deleted",
            Self::All => "all",
        }
    }

    /// Returns whether a record with the given state is visible.
    #[must_use]
    pub fn admits(&self, deleted: bool) -> bool {
        match self {
            Self::NotDeleted => !deleted,
            Self::Deleted => deleted,
            Self::All => true,
        }
    }

    fn from_raw(value: FieldValue<'_>) -> Self {
        match value {
            FieldValue::Present(Value::String(token)) => {
                Self::parse_transport(token).unwrap_or_default()
            }
            FieldValue::Present(Value::Bool(true)) => Self::Deleted,
            FieldValue::Present(Value::Bool(false)) => Self::NotDeleted,
            _ => Self::default(),
        }
    }
}

/// Normalized filter, page and sort parameters handed to persistence.
///
/// Predicates and ordering must be applied in the order given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListQueryDescriptor {
    /// Wildcard pattern; `None` or empty means no text filter.
    pub text_pattern: Option<String>,
    /// Active flag visibility.
    pub active_filter: ActiveFilter,
    /// Soft-delete visibility.
    pub deleted_filter: DeletedFilter,
    /// Page window.
    pub pagination: Pagination,
    /// Ordering terms with unique columns, highest priority first.
    pub order_by: Vec<OrderTerm>,
}

impl ListQueryDescriptor {
    /// Builds a descriptor from raw list input.
    ///
    /// `text_query` is expected to have passed [`list_query_schema`]; any
    /// non-string that slips through is treated as absent.
    #[must_use]
    pub fn build(input: &Value, order_policy: &OrderPolicy) -> Self {
        Self {
            text_pattern: normalize_text_query(FieldValue::of(input, TEXT_QUERY_KEY).as_str()),
            active_filter: ActiveFilter::from_raw(FieldValue::of(input, ACTIVE_KEY)),
            deleted_filter: DeletedFilter::from_raw(FieldValue::of(input, DELETED_KEY)),
            pagination: Pagination::normalize(
                FieldValue::of(input, PAGE_KEY),
                FieldValue::of(input, PAGE_SIZE_KEY),
            ),
            order_by: order_policy.normalize(FieldValue::of(input, ORDER_BY_KEY)),
        }
    }

    /// Returns the text pattern when it actually filters.
    #[must_use]
    pub fn effective_text_pattern(&self) -> Option<&str> {
        self.text_pattern
            .as_deref()
            .filter(|pattern| !pattern.is_empty())
    }
}
