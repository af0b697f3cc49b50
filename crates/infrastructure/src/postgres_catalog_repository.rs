use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use storefront_application::{CatalogPage, CatalogRecord, CatalogRepository};
use storefront_core::{AppError, AppResult, RecordId};
use storefront_domain::ListQueryDescriptor;
use tracing::debug;
use uuid::Uuid;

mod query;


/// PostgreSQL-backed catalog repository.
#[derive(Clone)]
pub struct PostgresCatalogRepository {
    pool: PgPool,
}

impl PostgresCatalogRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CatalogRecordRow {
    id: Uuid,
    entity_logical_name: String,
    data: Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

#[async_trait]
impl CatalogRepository for PostgresCatalogRepository {
    async fn insert_record(&self, record: CatalogRecord) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO catalog_records (id, entity_logical_name, data, created_at, updated_at, deleted_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(record.record_id().as_uuid())
        .bind(record.entity_logical_name())
        .bind(Value::Object(record.data().clone()))
        .bind(record.created_at())
        .bind(record.updated_at())
        .bind(record.deleted_at())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            if is_unique_violation(&error) {
                return AppError::Conflict(format!(
                    "{} record '{}' already exists",
                    record.entity_logical_name(),
                    record.record_id()
                ));
            }

            AppError::Internal(format!(
                "failed to insert {} record '{}': {error}",
                record.entity_logical_name(),
                record.record_id()
            ))
        })?;

        Ok(())
    }

    async fn save_record(&self, record: CatalogRecord) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE catalog_records
            SET data = $3, updated_at = $4, deleted_at = $5
            WHERE entity_logical_name = $1 AND id = $2
            "#,
        )
        .bind(record.entity_logical_name())
        .bind(record.record_id().as_uuid())
        .bind(Value::Object(record.data().clone()))
        .bind(record.updated_at())
        .bind(record.deleted_at())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to save {} record '{}': {error}",
                record.entity_logical_name(),
                record.record_id()
            ))
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "{} record '{}' does not exist",
                record.entity_logical_name(),
                record.record_id()
            )));
        }

        Ok(())
    }

    async fn find_record(
        &self,
        entity_logical_name: &str,
        record_id: RecordId,
    ) -> AppResult<Option<CatalogRecord>> {
        let row = sqlx::query_as::<_, CatalogRecordRow>(
            r#"
            SELECT id, entity_logical_name, data, created_at, updated_at, deleted_at
            FROM catalog_records
            WHERE entity_logical_name = $1 AND id = $2
            "#,
        )
        .bind(entity_logical_name)
        .bind(record_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to find {entity_logical_name} record '{record_id}': {error}"
            ))
        })?;

        row.map(catalog_record_from_row).transpose()
    }

    async fn list_records(
        &self,
        entity_logical_name: &str,
        query: &ListQueryDescriptor,
    ) -> AppResult<CatalogPage> {
        let total = self.count_records_impl(entity_logical_name, query).await?;
        let rows = self.select_page_impl(entity_logical_name, query).await?;
        let items = rows
            .into_iter()
            .map(catalog_record_from_row)
            .collect::<AppResult<Vec<_>>>()?;

        debug!(
            entity_logical_name,
            page = query.pagination.page(),
            page_size = query.pagination.page_size(),
            total,
            returned = items.len(),
            "listed postgres catalog records"
        );

        Ok(CatalogPage {
            items,
            page: query.pagination.page(),
            page_size: query.pagination.page_size(),
            total,
        })
    }
}

fn catalog_record_from_row(row: CatalogRecordRow) -> AppResult<CatalogRecord> {
    let Value::Object(data) = row.data else {
        return Err(AppError::Internal(format!(
            "catalog record '{}' has non-object data",
            row.id
        )));
    };

    Ok(CatalogRecord::from_storage(
        RecordId::from_uuid(row.id),
        row.entity_logical_name,
        data,
        row.created_at,
        row.updated_at,
        row.deleted_at,
    ))
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .and_then(|database_error| database_error.code())
        .is_some_and(|code| code == "23505")
}
