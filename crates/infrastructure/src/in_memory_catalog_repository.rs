use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use storefront_application::{CatalogPage, CatalogRecord, CatalogRepository};
use storefront_core::{AppError, AppResult, RecordId};
use storefront_domain::{
    CREATED_AT_COLUMN, LIKE_ESCAPE, ListQueryDescriptor, NAME_PROPERTY, OrderTerm,
    SINGLE_WILDCARD, SortDirection, UPDATED_AT_COLUMN, WILDCARD,
};
use tokio::sync::RwLock;
use tracing::debug;

#[cfg(test)]
mod tests;

/// In-memory catalog repository implementation.
#[derive(Debug, Default)]
pub struct InMemoryCatalogRepository {
    records: RwLock<HashMap<(String, RecordId), CatalogRecord>>,
}

impl InMemoryCatalogRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalogRepository {
    async fn insert_record(&self, record: CatalogRecord) -> AppResult<()> {
        let key = (record.entity_logical_name().to_owned(), record.record_id());
        let mut records = self.records.write().await;

        if records.contains_key(&key) {
            return Err(AppError::Conflict(format!(
                "{} record '{}' already exists",
                key.0, key.1
            )));
        }

        records.insert(key, record);
        Ok(())
    }

    async fn save_record(&self, record: CatalogRecord) -> AppResult<()> {
        let key = (record.entity_logical_name().to_owned(), record.record_id());
        let mut records = self.records.write().await;

        let Some(stored) = records.get_mut(&key) else {
            return Err(AppError::NotFound(format!(
                "{} record '{}' does not exist",
                key.0, key.1
            )));
        };

        *stored = record;
        Ok(())
    }

    async fn find_record(
        &self,
        entity_logical_name: &str,
        record_id: RecordId,
    ) -> AppResult<Option<CatalogRecord>> {
        Ok(self
            .records
            .read()
            .await
            .get(&(entity_logical_name.to_owned(), record_id))
            .cloned())
    }

    async fn list_records(
        &self,
        entity_logical_name: &str,
        query: &ListQueryDescriptor,
    ) -> AppResult<CatalogPage> {
        let records = self.records.read().await;
        let text_pattern = query
            .effective_text_pattern()
            .map(|pattern| pattern.chars().collect::<Vec<_>>());

        let mut listed: Vec<&CatalogRecord> = records
            .values()
            .filter(|record| record.entity_logical_name() == entity_logical_name)
            .filter(|record| query.deleted_filter.admits(record.is_deleted()))
            .filter(|record| query.active_filter.admits(record.is_active()))
            .filter(|record| {
                text_pattern
                    .as_deref()
                    .is_none_or(|pattern| record_name_matches(record, pattern))
            })
            .collect();

        listed.sort_by(|left, right| {
            query
                .order_by
                .iter()
                .map(|term| compare_for_term(left, right, term))
                .find(|ordering| ordering.is_ne())
                .unwrap_or_else(|| left.record_id().cmp(&right.record_id()))
        });

        let total = u64::try_from(listed.len()).unwrap_or(u64::MAX);
        let offset = usize::try_from(query.pagination.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.pagination.limit()).unwrap_or(usize::MAX);
        let items: Vec<CatalogRecord> = listed
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        debug!(
            entity_logical_name,
            page = query.pagination.page(),
            page_size = query.pagination.page_size(),
            total,
            returned = items.len(),
            "listed in-memory catalog records"
        );

        Ok(CatalogPage {
            items,
            page: query.pagination.page(),
            page_size: query.pagination.page_size(),
            total,
        })
    }
}

fn record_name_matches(record: &CatalogRecord, pattern: &[char]) -> bool {
    let Some(name) = record.data().get(NAME_PROPERTY).and_then(Value::as_str) else {
        return false;
    };
    let name: Vec<char> = name.to_lowercase().chars().collect();

    like_matches(pattern, &name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LikeToken {
    AnyRun,
    AnyOne,
    Literal(char),
}

fn like_tokens(pattern: &[char]) -> Vec<LikeToken> {
    let mut tokens = Vec::with_capacity(pattern.len());
    let mut characters = pattern.iter().copied();
    while let Some(character) = characters.next() {
        tokens.push(match character {
            LIKE_ESCAPE => LikeToken::Literal(characters.next().unwrap_or(LIKE_ESCAPE)),
            WILDCARD => LikeToken::AnyRun,
            SINGLE_WILDCARD => LikeToken::AnyOne,
            other => LikeToken::Literal(other),
        });
    }
    tokens
}

/// `LIKE` matching over lowercased text with `\` as the escape character.
fn like_matches(pattern: &[char], text: &[char]) -> bool {
    // matched[j]: pattern prefix consumed so far matches text[..j]
    let mut matched = vec![false; text.len() + 1];
    matched[0] = true;

    for token in like_tokens(pattern) {
        let mut next = vec![false; text.len() + 1];
        match token {
            LikeToken::AnyRun => {
                let mut reachable = false;
                for (index, slot) in next.iter_mut().enumerate() {
                    reachable |= matched[index];
                    *slot = reachable;
                }
            }
            LikeToken::AnyOne | LikeToken::Literal(_) => {
                for (index, &character) in text.iter().enumerate() {
                    let consumes = match token {
                        LikeToken::Literal(literal) => literal == character,
                        _ => true,
                    };
                    next[index + 1] = matched[index] && consumes;
                }
            }
        }
        matched = next;
    }

    matched[text.len()]
}

fn compare_for_term(left: &CatalogRecord, right: &CatalogRecord, term: &OrderTerm) -> Ordering {
    let ordering = match term.column.as_str() {
        CREATED_AT_COLUMN => left.created_at().cmp(&right.created_at()),
        UPDATED_AT_COLUMN => left.updated_at().cmp(&right.updated_at()),
        column => compare_data_values(left.data().get(column), right.data().get(column)),
    };

    match term.direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

fn compare_data_values(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    let left = left.filter(|value| !value.is_null());
    let right = right.filter(|value| !value.is_null());

    match (left, right) {
        (Some(Value::Number(left)), Some(Value::Number(right))) => left
            .as_f64()
            .zip(right.as_f64())
            .and_then(|(left, right)| left.partial_cmp(&right))
            .unwrap_or(Ordering::Equal),
        (Some(Value::Bool(left)), Some(Value::Bool(right))) => left.cmp(right),
        (Some(Value::String(left)), Some(Value::String(right))) => left
            .to_lowercase()
            .cmp(&right.to_lowercase())
            .then_with(|| left.cmp(right)),
        (Some(_), Some(_)) => Ordering::Equal,
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
