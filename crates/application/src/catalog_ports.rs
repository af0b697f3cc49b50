use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use storefront_core::{AppResult, RecordId};
use storefront_domain::{ACTIVE_PROPERTY, ListQueryDescriptor};

/// Persisted catalog record.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRecord {
    record_id: RecordId,
    entity_logical_name: String,
    data: Map<String, Value>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl CatalogRecord {
    /// Creates a fresh, not-deleted record stamped with `now`.
    #[must_use]
    pub fn new(
        record_id: RecordId,
        entity_logical_name: impl Into<String>,
        data: Map<String, Value>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            record_id,
            entity_logical_name: entity_logical_name.into(),
            data,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Rebuilds a record from stored columns.
    #[must_use]
    pub fn from_storage(
        record_id: RecordId,
        entity_logical_name: impl Into<String>,
        data: Map<String, Value>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        deleted_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            record_id,
            entity_logical_name: entity_logical_name.into(),
            data,
            created_at,
            updated_at,
            deleted_at,
        }
    }

    /// Returns the record identifier.
    #[must_use]
    pub fn record_id(&self) -> RecordId {
        self.record_id
    }

    /// Returns the owning entity logical name.
    #[must_use]
    pub fn entity_logical_name(&self) -> &str {
        self.entity_logical_name.as_str()
    }

    /// Returns the validated field values.
    #[must_use]
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the soft-delete timestamp.
    #[must_use]
    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    /// Returns the active flag; records without one count as active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.data
            .get(ACTIVE_PROPERTY)
            .and_then(Value::as_bool)
            .unwrap_or(true)
    }

    /// Returns whether the record was soft-deleted.
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Applies changed values and stamps the update time.
    pub fn apply_changes(&mut self, changes: Map<String, Value>, now: DateTime<Utc>) {
        self.data.extend(changes);
        self.updated_at = now;
    }

    /// Marks the record as soft-deleted.
    pub fn mark_deleted(&mut self, now: DateTime<Utc>) {
        self.deleted_at = Some(now);
        self.updated_at = now;
    }
}

/// One page of listed records.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPage {
    /// Records on this page in descriptor order.
    pub items: Vec<CatalogRecord>,
    /// One-based page number.
    pub page: u64,
    /// Page size used for the query.
    pub page_size: u64,
    /// Number of records matching the filters across all pages.
    pub total: u64,
}

/// Repository port for catalog record persistence.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Inserts a new record.
    async fn insert_record(&self, record: CatalogRecord) -> AppResult<()>;

    /// Replaces data and timestamps of an existing record.
    async fn save_record(&self, record: CatalogRecord) -> AppResult<()>;

    /// Finds a record by id, including soft-deleted records.
    async fn find_record(
        &self,
        entity_logical_name: &str,
        record_id: RecordId,
    ) -> AppResult<Option<CatalogRecord>>;

    /// Lists records applying the descriptor's filters, order and page.
    async fn list_records(
        &self,
        entity_logical_name: &str,
        query: &ListQueryDescriptor,
    ) -> AppResult<CatalogPage>;
}
