use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde_json::Value;
use tracing::info;

use crate::dto::{CatalogPageResponse, CatalogRecordResponse, list_query_input};
use crate::error::ApiResult;
use crate::state::AppState;


pub async fn list_catalog_records_handler(
    State(state): State<AppState>,
    Path(entity_logical_name): Path<String>,
    Query(query): Query<Vec<(String, String)>>,
) -> ApiResult<Json<CatalogPageResponse>> {
    let page = state
        .catalog_service
        .list_records(entity_logical_name.as_str(), &list_query_input(query))
        .await?;

    Ok(Json(CatalogPageResponse::from(page)))
}

pub async fn create_catalog_record_handler(
    State(state): State<AppState>,
    Path(entity_logical_name): Path<String>,
    Json(payload): Json<Value>,
) -> ApiResult<(StatusCode, Json<CatalogRecordResponse>)> {
    let record = state
        .catalog_service
        .create_record(entity_logical_name.as_str(), &payload)
        .await?;

    info!(
        entity_logical_name = %entity_logical_name,
        record_id = %record.record_id(),
        "catalog record created"
    );

    Ok((StatusCode::CREATED, Json(CatalogRecordResponse::from(record))))
}

pub async fn get_catalog_record_handler(
    State(state): State<AppState>,
    Path((entity_logical_name, record_id)): Path<(String, String)>,
) -> ApiResult<Json<CatalogRecordResponse>> {
    let record = state
        .catalog_service
        .get_record(entity_logical_name.as_str(), record_id.as_str())
        .await?;

    Ok(Json(CatalogRecordResponse::from(record)))
}

pub async fn update_catalog_record_handler(
    State(state): State<AppState>,
    Path((entity_logical_name, record_id)): Path<(String, String)>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<CatalogRecordResponse>> {
    let record = state
        .catalog_service
        .update_record(entity_logical_name.as_str(), record_id.as_str(), &payload)
        .await?;

    info!(
        entity_logical_name = %entity_logical_name,
        record_id = %record.record_id(),
        "catalog record updated"
    );

    Ok(Json(CatalogRecordResponse::from(record)))
}

pub async fn delete_catalog_record_handler(
    State(state): State<AppState>,
    Path((entity_logical_name, record_id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    state
        .catalog_service
        .delete_record(entity_logical_name.as_str(), record_id.as_str())
        .await?;

    info!(
        entity_logical_name = %entity_logical_name,
        record_id = %record_id,
        "catalog record deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
