use serde::Serialize;
use serde_json::{Map, Number, Value};
use storefront_application::{CatalogPage, CatalogRecord};
use storefront_domain::{ACTIVE_KEY, DELETED_KEY, ORDER_BY_KEY, PAGE_KEY, PAGE_SIZE_KEY};
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Catalog record response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/catalog-record-response.ts"
)]
pub struct CatalogRecordResponse {
    pub id: String,
    pub entity: String,
    #[ts(type = "Record<string, unknown>")]
    pub data: Value,
    pub active: bool,
    pub created_at: String,
    pub updated_at: String,
    pub deleted_at: Option<String>,
}

impl From<CatalogRecord> for CatalogRecordResponse {
    fn from(record: CatalogRecord) -> Self {
        Self {
            id: record.record_id().to_string(),
            entity: record.entity_logical_name().to_owned(),
            active: record.is_active(),
            created_at: record.created_at().to_rfc3339(),
            updated_at: record.updated_at().to_rfc3339(),
            deleted_at: record.deleted_at().map(|deleted_at| deleted_at.to_rfc3339()),
            data: Value::Object(record.data().clone()),
        }
    }
}

/// One page of catalog records.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/catalog-page-response.ts"
)]
pub struct CatalogPageResponse {
    pub items: Vec<CatalogRecordResponse>,
    #[ts(type = "number")]
    pub page: u64,
    #[ts(type = "number")]
    pub page_size: u64,
    #[ts(type = "number")]
    pub total: u64,
}

impl From<CatalogPage> for CatalogPageResponse {
    fn from(page: CatalogPage) -> Self {
        Self {
            items: page
                .items
                .into_iter()
                .map(CatalogRecordResponse::from)
                .collect(),
            page: page.page,
            page_size: page.page_size,
            total: page.total,
        }
    }
}

/// Converts query-string pairs into the untyped list input object.
///
/// `order_by` accepts comma-separated tokens and may repeat. Page values
/// that parse as numbers become numbers and `active`/`deleted` booleans
/// become booleans; every other value stays a string.
pub fn list_query_input(pairs: Vec<(String, String)>) -> Value {
    let mut input = Map::new();
    let mut order_by = Vec::new();
    let mut saw_order_by = false;

    for (key, raw) in pairs {
        if key == ORDER_BY_KEY {
            saw_order_by = true;
            order_by.extend(
                raw.split(',')
                    .map(str::trim)
                    .filter(|token| !token.is_empty())
                    .map(|token| Value::String(token.to_owned())),
            );
            continue;
        }

        let value = match key.as_str() {
            PAGE_KEY | PAGE_SIZE_KEY => numeric_value(raw),
            ACTIVE_KEY | DELETED_KEY => boolean_value(raw),
            _ => Value::String(raw),
        };
        input.insert(key, value);
    }

    if saw_order_by {
        input.insert(ORDER_BY_KEY.to_owned(), Value::Array(order_by));
    }

    Value::Object(input)
}

fn numeric_value(raw: String) -> Value {
    let trimmed = raw.trim();
    if let Ok(integer) = trimmed.parse::<i64>() {
        return Value::Number(integer.into());
    }

    trimmed
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map_or(Value::String(raw), Value::Number)
}

fn boolean_value(raw: String) -> Value {
    match raw.as_str() {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(raw),
    }
}
