use chrono::{Duration, TimeZone, Utc};
use serde_json::{Map, Value, json};
use storefront_application::{CatalogRecord, CatalogRepository};
use storefront_core::{AppError, RecordId};
use storefront_domain::{ListQueryDescriptor, catalog_definition};

use super::{InMemoryCatalogRepository, like_matches};

fn record(entity: &str, data: Value, minutes: i64) -> CatalogRecord {
    let data: Map<String, Value> = data.as_object().cloned().unwrap_or_default();
    let now = Utc
        .with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_else(|| unreachable!())
        + Duration::minutes(minutes);
    CatalogRecord::new(RecordId::new(), entity, data, now)
}

fn descriptor(entity: &str, raw: Value) -> ListQueryDescriptor {
    let definition = catalog_definition(entity).unwrap_or_else(|_| unreachable!());
    ListQueryDescriptor::build(&raw, definition.order_policy())
}

fn names(page: &storefront_application::CatalogPage) -> Vec<String> {
    page.items
        .iter()
        .filter_map(|record| record.data().get("name").and_then(Value::as_str))
        .map(str::to_owned)
        .collect()
}

async fn seeded() -> InMemoryCatalogRepository {
    let repository = InMemoryCatalogRepository::new();
    let rows = [
        record("brand", json!({"name": "Zenith", "active": true}), 0),
        record("brand", json!({"name": "Acme Tools", "active": true}), 1),
        record("brand", json!({"name": "Blue Acme", "active": false}), 2),
        record("brand", json!({"name": "Corner Shop", "active": true}), 3),
        record("product", json!({"name": "Acme Hammer", "price": 10}), 4),
    ];
    for row in rows {
        assert!(repository.insert_record(row).await.is_ok());
    }
    repository
}

#[test]
fn like_matching_supports_wildcards() {
    let matches = |pattern: &str, text: &str| {
        like_matches(
            &pattern.chars().collect::<Vec<_>>(),
            &text.chars().collect::<Vec<_>>(),
        )
    };

    assert!(matches("%acme%", "blue acme"));
    assert!(matches("%blue%acme%", "blue big acme"));
    assert!(matches("%", ""));
    assert!(matches("a_c", "abc"));
    assert!(!matches("%acme%tools%", "tools acme"));
    assert!(!matches("a_c", "ac"));
    assert!(matches("%a\\_b%", "an a_b item"));
    assert!(!matches("%a\\_b%", "axb"));
    assert!(matches("%50\\%%", "save 50%"));
    assert!(matches("%c:\\\\temp%", "c:\\temp"));
}

#[tokio::test]
async fn literal_underscore_search_does_not_match_any_character() {
    let repository = InMemoryCatalogRepository::new();
    for (minutes, name) in [(0, "Acme_Pro"), (1, "AcmeXPro")] {
        assert!(
            repository
                .insert_record(record("brand", json!({"name": name}), minutes))
                .await
                .is_ok()
        );
    }

    let page = repository
        .list_records("brand", &descriptor("brand", json!({"text_query": "acme_pro"})))
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(names(&page), vec!["Acme_Pro"]);
}

#[tokio::test]
async fn text_columns_sort_case_insensitively() {
    let repository = InMemoryCatalogRepository::new();
    for (minutes, name) in [(0, "cherry"), (1, "Banana"), (2, "apple")] {
        assert!(
            repository
                .insert_record(record("brand", json!({"name": name}), minutes))
                .await
                .is_ok()
        );
    }

    let page = repository
        .list_records("brand", &descriptor("brand", json!({"order_by": ["name_asc"]})))
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(names(&page), vec!["apple", "Banana", "cherry"]);
}

#[tokio::test]
async fn default_listing_shows_active_live_records_in_name_order() {
    let repository = seeded().await;

    let page = repository
        .list_records("brand", &descriptor("brand", json!({})))
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(page.total, 3);
    assert_eq!(page.page, 1);
    assert_eq!(page.page_size, 12);
    assert_eq!(names(&page), vec!["Acme Tools", "Corner Shop", "Zenith"]);
}

#[tokio::test]
async fn text_pattern_matches_name_case_insensitively() {
    let repository = seeded().await;

    let page = repository
        .list_records(
            "brand",
            &descriptor("brand", json!({"text_query": "ACME", "active": "all"})),
        )
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(names(&page), vec!["Acme Tools", "Blue Acme"]);
}

#[tokio::test]
async fn order_terms_and_pagination_are_applied() {
    let repository = seeded().await;

    let page = repository
        .list_records(
            "brand",
            &descriptor(
                "brand",
                json!({"order_by": ["created_at_desc"], "page": 2, "page_size": 2}),
            ),
        )
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(page.total, 3);
    assert_eq!(names(&page), vec!["Zenith"]);
}

#[tokio::test]
async fn deleted_filter_controls_soft_deleted_visibility() {
    let repository = InMemoryCatalogRepository::new();
    let mut gone = record("brand", json!({"name": "Gone", "active": true}), 0);
    let kept = record("brand", json!({"name": "Kept", "active": true}), 1);
    assert!(repository.insert_record(gone.clone()).await.is_ok());
    assert!(repository.insert_record(kept).await.is_ok());

    gone.mark_deleted(Utc::now());
    assert!(repository.save_record(gone).await.is_ok());

    let live = repository
        .list_records("brand", &descriptor("brand", json!({})))
        .await
        .unwrap_or_else(|_| unreachable!());
    let deleted = repository
        .list_records("brand", &descriptor("brand", json!({"deleted": "deleted"})))
        .await
        .unwrap_or_else(|_| unreachable!());
    let everything = repository
        .list_records("brand", &descriptor("brand", json!({"deleted": "all"})))
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(names(&live), vec!["Kept"]);
    assert_eq!(names(&deleted), vec!["Gone"]);
    assert_eq!(everything.total, 2);
}

#[tokio::test]
async fn duplicate_insert_and_missing_save_are_rejected() {
    let repository = InMemoryCatalogRepository::new();
    let row = record("brand", json!({"name": "Acme"}), 0);
    assert!(repository.insert_record(row.clone()).await.is_ok());

    assert!(matches!(
        repository.insert_record(row).await,
        Err(AppError::Conflict(_))
    ));
    assert!(matches!(
        repository
            .save_record(record("brand", json!({"name": "Other"}), 0))
            .await,
        Err(AppError::NotFound(_))
    ));
}
