//! Catalog entities served by the CRUD endpoints.

use std::sync::LazyLock;

use storefront_core::{AppError, AppResult};

use crate::constraint::{FieldConstraint, TextPattern};
use crate::order_by::{OrderPolicy, SortDirection};
use crate::schema::FieldSchema;

/// Data property every catalog entity carries for visibility filtering.
pub const ACTIVE_PROPERTY: &str = "active";

/// Data property free-text search matches against.
pub const NAME_PROPERTY: &str = "name";

/// Record timestamp column for creation time.
pub const CREATED_AT_COLUMN: &str = "created_at";

/// Record timestamp column for last update time.
pub const UPDATED_AT_COLUMN: &str = "updated_at";

static BRAND: LazyLock<CatalogEntityDefinition> = LazyLock::new(|| {
    CatalogEntityDefinition::new(
        "brand",
        "Brand",
        FieldSchema::new()
            .field(
                NAME_PROPERTY,
                "name",
                FieldConstraint::text().min_length(2).max_length(50),
            )
            .field(
                "contact_email",
                "contact email",
                FieldConstraint::text()
                    .max_length(254)
                    .pattern(TextPattern::Email)
                    .nullable()
                    .optional(),
            )
            .field(
                "contact_phone",
                "contact phone",
                FieldConstraint::text()
                    .max_length(32)
                    .pattern(TextPattern::Phone)
                    .nullable()
                    .optional(),
            )
            .field(
                ACTIVE_PROPERTY,
                "active",
                FieldConstraint::boolean().optional(),
            ),
        OrderPolicy::new(
            &[NAME_PROPERTY, ACTIVE_PROPERTY, CREATED_AT_COLUMN, UPDATED_AT_COLUMN],
            &[
                (NAME_PROPERTY, SortDirection::Asc),
                (ACTIVE_PROPERTY, SortDirection::Asc),
            ],
        ),
    )
});

static PRODUCT: LazyLock<CatalogEntityDefinition> = LazyLock::new(|| {
    CatalogEntityDefinition::new(
        "product",
        "Product",
        FieldSchema::new()
            .field(
                NAME_PROPERTY,
                "name",
                FieldConstraint::text().min_length(2).max_length(80),
            )
            .field(
                "price",
                "price",
                FieldConstraint::number().min(0.0).max(1_000_000.0),
            )
            .field(
                "stock",
                "stock",
                FieldConstraint::number()
                    .integer()
                    .min(0.0)
                    .max(1_000_000.0)
                    .optional(),
            )
            .field("brand_id", "brand", FieldConstraint::identifier())
            .field(
                ACTIVE_PROPERTY,
                "active",
                FieldConstraint::boolean().optional(),
            ),
        OrderPolicy::new(
            &[
                NAME_PROPERTY,
                "price",
                "stock",
                ACTIVE_PROPERTY,
                CREATED_AT_COLUMN,
                UPDATED_AT_COLUMN,
            ],
            &[
                (NAME_PROPERTY, SortDirection::Asc),
                (ACTIVE_PROPERTY, SortDirection::Asc),
            ],
        ),
    )
});

/// Schema, ordering and naming of one catalog entity.
#[derive(Debug, Clone)]
pub struct CatalogEntityDefinition {
    logical_name: &'static str,
    display_name: &'static str,
    create_schema: FieldSchema,
    update_schema: FieldSchema,
    order_policy: OrderPolicy,
}

impl CatalogEntityDefinition {
    /// Creates a definition; the update schema is the create schema with
    /// every field made optional.
    #[must_use]
    pub fn new(
        logical_name: &'static str,
        display_name: &'static str,
        create_schema: FieldSchema,
        order_policy: OrderPolicy,
    ) -> Self {
        let update_schema = create_schema.partial();

        Self {
            logical_name,
            display_name,
            create_schema,
            update_schema,
            order_policy,
        }
    }

    /// Returns the logical (stable) name.
    #[must_use]
    pub fn logical_name(&self) -> &'static str {
        self.logical_name
    }

    /// Returns the display (human-friendly) name.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        self.display_name
    }

    /// Returns the schema for create payloads.
    #[must_use]
    pub fn create_schema(&self) -> &FieldSchema {
        &self.create_schema
    }

    /// Returns the schema for partial update payloads.
    #[must_use]
    pub fn update_schema(&self) -> &FieldSchema {
        &self.update_schema
    }

    /// Returns the sortable columns and default order.
    #[must_use]
    pub fn order_policy(&self) -> &OrderPolicy {
        &self.order_policy
    }
}

/// Returns every catalog entity definition.
#[must_use]
pub fn catalog_definitions() -> [&'static CatalogEntityDefinition; 2] {
    [&*BRAND, &*PRODUCT]
}

/// Resolves a catalog entity by logical name.
pub fn catalog_definition(logical_name: &str) -> AppResult<&'static CatalogEntityDefinition> {
    catalog_definitions()
        .into_iter()
        .find(|definition| definition.logical_name == logical_name)
        .ok_or_else(|| AppError::NotFound(format!("unknown catalog entity '{logical_name}'")))
}
