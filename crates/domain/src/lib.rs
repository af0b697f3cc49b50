//! Field validation and list-query normalization.

#![forbid(unsafe_code)]

mod catalog;
mod constraint;
mod input;
mod list_query;
mod message;
mod order_by;
mod pagination;
mod schema;
mod text_query;
mod validator;

#[cfg(test)]
mod properties;

pub use catalog::{
    ACTIVE_PROPERTY, CREATED_AT_COLUMN, CatalogEntityDefinition, NAME_PROPERTY,
    UPDATED_AT_COLUMN, catalog_definition, catalog_definitions,
};
pub use constraint::{ConstraintKind, FieldConstraint, TextPattern};
pub use input::FieldValue;
pub use list_query::{
    ACTIVE_KEY, ActiveFilter, DELETED_KEY, DeletedFilter, ListQueryDescriptor, ORDER_BY_KEY,
    PAGE_KEY, PAGE_SIZE_KEY, TEXT_QUERY_KEY, list_query_schema,
};
pub use message::resolve_message;
pub use order_by::{OrderPolicy, OrderTerm, SortColumn, SortDirection};
pub use pagination::{
    DEFAULT_PAGE, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, MIN_PAGE, MIN_PAGE_SIZE, Pagination,
};
pub use schema::{FieldErrorRecord, FieldRule, FieldSchema, aggregate_messages};
pub use text_query::{
    LIKE_ESCAPE, SINGLE_WILDCARD, TEXT_QUERY_MAX_LENGTH, WILDCARD, normalize_text_query,
};
pub use validator::{ValidationOutcome, ValidationReason, is_hyphenated_uuid};
