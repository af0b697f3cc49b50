use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use storefront_core::{AppError, AppResult, RecordId};
use storefront_domain::{ActiveFilter, DeletedFilter, ListQueryDescriptor, SortDirection};
use tokio::sync::Mutex;

use crate::{CatalogPage, CatalogRecord, CatalogRepository};

use super::CatalogService;

struct FakeRepository {
    records: Mutex<HashMap<(String, RecordId), CatalogRecord>>,
    last_query: Mutex<Option<ListQueryDescriptor>>,
}

impl FakeRepository {
    fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            last_query: Mutex::new(None),
        }
    }
}

#[async_trait]
impl CatalogRepository for FakeRepository {
    async fn insert_record(&self, record: CatalogRecord) -> AppResult<()> {
        let key = (record.entity_logical_name().to_owned(), record.record_id());
        let mut records = self.records.lock().await;
        if records.contains_key(&key) {
            return Err(AppError::Conflict(format!("record '{}' exists", key.1)));
        }
        records.insert(key, record);
        Ok(())
    }

    async fn save_record(&self, record: CatalogRecord) -> AppResult<()> {
        let key = (record.entity_logical_name().to_owned(), record.record_id());
        let mut records = self.records.lock().await;
        if !records.contains_key(&key) {
            return Err(AppError::NotFound(format!("record '{}' missing", key.1)));
        }
        records.insert(key, record);
        Ok(())
    }

    async fn find_record(
        &self,
        entity_logical_name: &str,
        record_id: RecordId,
    ) -> AppResult<Option<CatalogRecord>> {
        Ok(self
            .records
            .lock()
            .await
            .get(&(entity_logical_name.to_owned(), record_id))
            .cloned())
    }

    async fn list_records(
        &self,
        entity_logical_name: &str,
        query: &ListQueryDescriptor,
    ) -> AppResult<CatalogPage> {
        *self.last_query.lock().await = Some(query.clone());
        let items: Vec<CatalogRecord> = self
            .records
            .lock()
            .await
            .values()
            .filter(|record| record.entity_logical_name() == entity_logical_name)
            .cloned()
            .collect();

        Ok(CatalogPage {
            total: items.len() as u64,
            items,
            page: query.pagination.page(),
            page_size: query.pagination.page_size(),
        })
    }
}

fn service() -> (CatalogService, Arc<FakeRepository>) {
    let repository = Arc::new(FakeRepository::new());
    (CatalogService::new(repository.clone()), repository)
}

fn unprocessable_messages(error: AppError) -> Vec<(String, String)> {
    match error {
        AppError::Unprocessable(messages) => messages
            .iter()
            .map(|(property, message)| (property.to_owned(), message.to_owned()))
            .collect(),
        other => panic!("expected unprocessable error, got {other:?}"),
    }
}

#[tokio::test]
async fn create_record_strips_undeclared_and_defaults_active() {
    let (service, repository) = service();

    let record = service
        .create_record("brand", &json!({"name": "Acme", "mystery": 1}))
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(record.data().get("name"), Some(&json!("Acme")));
    assert_eq!(record.data().get("active"), Some(&Value::Bool(true)));
    assert!(record.data().get("mystery").is_none());
    assert!(!record.is_deleted());
    assert_eq!(repository.records.lock().await.len(), 1);
}

#[tokio::test]
async fn create_record_keeps_explicit_inactive_flag() {
    let (service, _) = service();

    let record = service
        .create_record("brand", &json!({"name": "Acme", "active": false}))
        .await
        .unwrap_or_else(|_| unreachable!());

    assert!(!record.is_active());
}

#[tokio::test]
async fn create_record_reports_field_messages() {
    let (service, repository) = service();

    let error = service
        .create_record("brand", &json!({"name": 1, "active": "true"}))
        .await
        .err()
        .unwrap_or_else(|| unreachable!());

    let messages = unprocessable_messages(error);
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].0, "name");
    assert_eq!(messages[0].1, "name must be a string");
    assert_eq!(messages[1].0, "active");
    assert!(repository.records.lock().await.is_empty());
}

#[tokio::test]
async fn create_record_rejects_unknown_entity() {
    let (service, _) = service();

    let result = service.create_record("warehouse", &json!({})).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn update_record_rejects_malformed_identifier() {
    let (service, _) = service();

    let error = service
        .update_record("brand", "not-a-uuid", &json!({"name": "Acme"}))
        .await
        .err()
        .unwrap_or_else(|| unreachable!());

    let messages = unprocessable_messages(error);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].0, "id");
}

#[tokio::test]
async fn update_record_merges_partial_payload() {
    let (service, _) = service();
    let created = service
        .create_record("brand", &json!({"name": "Acme", "contact_email": "a@acme.io"}))
        .await
        .unwrap_or_else(|_| unreachable!());
    let record_id = created.record_id().to_string();

    let updated = service
        .update_record("brand", &record_id, &json!({"contact_email": null}))
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(updated.data().get("name"), Some(&json!("Acme")));
    assert_eq!(updated.data().get("contact_email"), Some(&Value::Null));
    assert!(updated.updated_at() >= created.updated_at());
}

#[tokio::test]
async fn update_record_still_validates_present_fields() {
    let (service, _) = service();
    let created = service
        .create_record("brand", &json!({"name": "Acme"}))
        .await
        .unwrap_or_else(|_| unreachable!());

    let error = service
        .update_record("brand", &created.record_id().to_string(), &json!({"name": "A"}))
        .await
        .err()
        .unwrap_or_else(|| unreachable!());

    let messages = unprocessable_messages(error);
    assert_eq!(
        messages,
        vec![(
            "name".to_owned(),
            "name must be at least 2 characters long".to_owned()
        )]
    );
}

#[tokio::test]
async fn delete_record_hides_record_and_second_delete_is_not_found() {
    let (service, repository) = service();
    let created = service
        .create_record("brand", &json!({"name": "Acme"}))
        .await
        .unwrap_or_else(|_| unreachable!());
    let record_id = created.record_id().to_string();

    service
        .delete_record("brand", &record_id)
        .await
        .unwrap_or_else(|_| unreachable!());

    assert!(matches!(
        service.get_record("brand", &record_id).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        service.delete_record("brand", &record_id).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        service
            .update_record("brand", &record_id, &json!({"name": "Other"}))
            .await,
        Err(AppError::NotFound(_))
    ));
    assert_eq!(repository.records.lock().await.len(), 1);
}

#[tokio::test]
async fn get_record_is_scoped_to_entity() {
    let (service, _) = service();
    let created = service
        .create_record("brand", &json!({"name": "Acme"}))
        .await
        .unwrap_or_else(|_| unreachable!());

    let result = service
        .get_record("product", &created.record_id().to_string())
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn list_records_normalizes_raw_query() {
    let (service, repository) = service();

    let page = service
        .list_records(
            "product",
            &json!({
                "text_query": "blue shoe",
                "active": "all",
                "page": 0,
                "page_size": 500,
                "order_by": ["price_desc", "bogus_asc"],
            }),
        )
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(page.page, 1);
    assert_eq!(page.page_size, 40);

    let query = repository
        .last_query
        .lock()
        .await
        .clone()
        .unwrap_or_else(|| unreachable!());
    assert_eq!(query.text_pattern.as_deref(), Some("%blue%shoe%"));
    assert_eq!(query.active_filter, ActiveFilter::All);
    assert_eq!(query.deleted_filter, DeletedFilter::NotDeleted);
    assert_eq!(query.order_by.len(), 2);
    assert_eq!(query.order_by[0].column.as_str(), "name");
    assert_eq!(query.order_by[0].direction, SortDirection::Asc);
}

#[tokio::test]
async fn list_records_rejects_non_string_text_query() {
    let (service, repository) = service();

    let error = service
        .list_records("brand", &json!({"text_query": 42}))
        .await
        .err()
        .unwrap_or_else(|| unreachable!());

    let messages = unprocessable_messages(error);
    assert_eq!(messages[0].0, "text_query");
    assert!(repository.last_query.lock().await.is_none());
}
