use std::sync::{Arc, LazyLock};

use chrono::Utc;
use serde_json::{Value, json};
use storefront_core::{AppError, AppResult, RecordId};
use storefront_domain::{
    ACTIVE_PROPERTY, CatalogEntityDefinition, FieldConstraint, FieldSchema, ListQueryDescriptor,
    catalog_definition, list_query_schema,
};
use uuid::Uuid;

use crate::catalog_ports::{CatalogPage, CatalogRecord, CatalogRepository};

#[cfg(test)]
mod tests;

static RECORD_ID_SCHEMA: LazyLock<FieldSchema> =
    LazyLock::new(|| FieldSchema::new().field("id", "id", FieldConstraint::identifier()));

/// Application service for catalog CRUD and listing.
#[derive(Clone)]
pub struct CatalogService {
    repository: Arc<dyn CatalogRepository>,
}

impl CatalogService {
    /// Creates a new catalog service from a repository implementation.
    #[must_use]
    pub fn new(repository: Arc<dyn CatalogRepository>) -> Self {
        Self { repository }
    }

    /// Validates and inserts a new record.
    ///
    /// Undeclared properties are dropped and `active` defaults to `true`.
    pub async fn create_record(
        &self,
        entity_logical_name: &str,
        payload: &Value,
    ) -> AppResult<CatalogRecord> {
        let definition = catalog_definition(entity_logical_name)?;
        let mut data = definition.create_schema().validate_or_throw(payload)?;
        data.entry(ACTIVE_PROPERTY).or_insert(Value::Bool(true));

        let record = CatalogRecord::new(
            RecordId::new(),
            definition.logical_name(),
            data,
            Utc::now(),
        );
        self.repository.insert_record(record.clone()).await?;

        Ok(record)
    }

    /// Validates a partial payload and applies it to a live record.
    pub async fn update_record(
        &self,
        entity_logical_name: &str,
        record_id: &str,
        payload: &Value,
    ) -> AppResult<CatalogRecord> {
        let definition = catalog_definition(entity_logical_name)?;
        let record_id = parse_record_id(record_id)?;
        let changes = definition.update_schema().validate_or_throw(payload)?;

        let mut record = self.live_record(definition, record_id).await?;
        record.apply_changes(changes, Utc::now());
        self.repository.save_record(record.clone()).await?;

        Ok(record)
    }

    /// Soft-deletes a live record.
    pub async fn delete_record(&self, entity_logical_name: &str, record_id: &str) -> AppResult<()> {
        let definition = catalog_definition(entity_logical_name)?;
        let record_id = parse_record_id(record_id)?;

        let mut record = self.live_record(definition, record_id).await?;
        record.mark_deleted(Utc::now());
        self.repository.save_record(record).await
    }

    /// Returns a live record.
    pub async fn get_record(
        &self,
        entity_logical_name: &str,
        record_id: &str,
    ) -> AppResult<CatalogRecord> {
        let definition = catalog_definition(entity_logical_name)?;
        let record_id = parse_record_id(record_id)?;

        self.live_record(definition, record_id).await
    }

    /// Lists records for raw, untrusted list input.
    pub async fn list_records(
        &self,
        entity_logical_name: &str,
        raw_query: &Value,
    ) -> AppResult<CatalogPage> {
        let descriptor = self.list_descriptor(entity_logical_name, raw_query)?;
        self.repository
            .list_records(entity_logical_name, &descriptor)
            .await
    }

    /// Validates list input and builds the descriptor handed to persistence.
    pub fn list_descriptor(
        &self,
        entity_logical_name: &str,
        raw_query: &Value,
    ) -> AppResult<ListQueryDescriptor> {
        let definition = catalog_definition(entity_logical_name)?;
        list_query_schema().validate_or_throw(raw_query)?;

        Ok(ListQueryDescriptor::build(
            raw_query,
            definition.order_policy(),
        ))
    }

    async fn live_record(
        &self,
        definition: &CatalogEntityDefinition,
        record_id: RecordId,
    ) -> AppResult<CatalogRecord> {
        self.repository
            .find_record(definition.logical_name(), record_id)
            .await?
            .filter(|record| !record.is_deleted())
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "{} record '{}' does not exist",
                    definition.logical_name(),
                    record_id
                ))
            })
    }
}

fn parse_record_id(record_id: &str) -> AppResult<RecordId> {
    RECORD_ID_SCHEMA.validate_or_throw(&json!({ "id": record_id }))?;

    Uuid::try_parse(record_id)
        .map(RecordId::from_uuid)
        .map_err(|error| AppError::Validation(format!("invalid record id '{record_id}': {error}")))
}
