use sqlx::{Postgres, QueryBuilder};
use storefront_domain::{
    ActiveFilter, CREATED_AT_COLUMN, DeletedFilter, ListQueryDescriptor, NAME_PROPERTY,
    Pagination, SortDirection, UPDATED_AT_COLUMN,
};

use super::*;

impl PostgresCatalogRepository {
    pub(super) async fn count_records_impl(
        &self,
        entity_logical_name: &str,
        query: &ListQueryDescriptor,
    ) -> AppResult<u64> {
        let mut builder: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM catalog_records");
        push_list_predicates(&mut builder, entity_logical_name, query);

        let total: i64 = builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to count {entity_logical_name} records: {error}"
                ))
            })?;

        Ok(u64::try_from(total).unwrap_or_default())
    }

    pub(super) async fn select_page_impl(
        &self,
        entity_logical_name: &str,
        query: &ListQueryDescriptor,
    ) -> AppResult<Vec<CatalogRecordRow>> {
        let (limit, offset) = sql_window(&query.pagination);

        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new(
            "SELECT id, entity_logical_name, data, created_at, updated_at, deleted_at FROM catalog_records",
        );
        push_list_predicates(&mut builder, entity_logical_name, query);

        builder.push(" ORDER BY ");
        for term in &query.order_by {
            let direction = match term.direction {
                SortDirection::Asc => " ASC, ",
                SortDirection::Desc => " DESC, ",
            };
            match term.column.as_str() {
                CREATED_AT_COLUMN => {
                    builder.push("created_at").push(direction);
                }
                UPDATED_AT_COLUMN => {
                    builder.push("updated_at").push(direction);
                }
                column => {
                    // Text sorts case-folded first, then by its exact value.
                    builder
                        .push("(CASE WHEN jsonb_typeof(data -> ")
                        .push_bind(column)
                        .push(") = 'string' THEN lower(data ->> ")
                        .push_bind(column)
                        .push(") END)")
                        .push(direction);
                    builder.push("data -> ").push_bind(column).push(direction);
                }
            }
        }
        builder.push("id ASC");

        builder.push(" LIMIT ");
        builder.push_bind(limit);
        builder.push(" OFFSET ");
        builder.push_bind(offset);

        builder
            .build_query_as::<CatalogRecordRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to list {entity_logical_name} records: {error}"
                ))
            })
    }
}

/// Converts a page window into `LIMIT`/`OFFSET` values.
///
/// Postgres takes `bigint` here; offsets beyond it saturate so far-away
/// pages still run and come back empty.
fn sql_window(pagination: &Pagination) -> (i64, i64) {
    (
        i64::try_from(pagination.limit()).unwrap_or(i64::MAX),
        i64::try_from(pagination.offset()).unwrap_or(i64::MAX),
    )
}

fn push_list_predicates<'args>(
    builder: &mut QueryBuilder<'args, Postgres>,
    entity_logical_name: &'args str,
    query: &ListQueryDescriptor,
) {
    builder.push(" WHERE entity_logical_name = ");
    builder.push_bind(entity_logical_name);

    match query.deleted_filter {
        DeletedFilter::NotDeleted => {
            builder.push(" AND deleted_at IS NULL");
        }
        DeletedFilter::Deleted => {
            builder.push(" AND deleted_at IS NOT NULL");
        }
        DeletedFilter::All => {}
    }

    match query.active_filter {
        ActiveFilter::Active => {
            builder.push(" AND COALESCE((data ->> 'active')::boolean, TRUE) = TRUE");
        }
        ActiveFilter::Inactive => {
            builder.push(" AND COALESCE((data ->> 'active')::boolean, TRUE) = FALSE");
        }
        ActiveFilter::All => {}
    }

    if let Some(pattern) = query.effective_text_pattern() {
        builder.push(" AND data ->> ");
        builder.push_bind(NAME_PROPERTY);
        builder.push(" ILIKE ");
        builder.push_bind(pattern.to_owned());
        builder.push(" ESCAPE '\\'");
    }
}
