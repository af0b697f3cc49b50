use proptest::prelude::*;
use serde_json::{Value, json};

use crate::constraint::{FieldConstraint, TextPattern};
use crate::input::FieldValue;
use crate::order_by::{OrderPolicy, SortDirection};
use crate::pagination::{MAX_PAGE_SIZE, MIN_PAGE_SIZE, Pagination};
use crate::text_query::{LIKE_ESCAPE, TEXT_QUERY_MAX_LENGTH, normalize_text_query};
use crate::validator::{ValidationOutcome, ValidationReason};

fn any_constraint() -> impl Strategy<Value = FieldConstraint> {
    (
        0_u8..4,
        any::<bool>(),
        proptest::option::of(0_usize..20),
        proptest::option::of(0_usize..20),
        proptest::option::of(-100.0_f64..100.0),
        any::<bool>(),
    )
        .prop_map(|(kind, optional, min_length, max_length, min, only_int)| {
            let mut constraint = match kind {
                0 => FieldConstraint::text(),
                1 => FieldConstraint::boolean(),
                2 => FieldConstraint::number(),
                _ => FieldConstraint::identifier(),
            };
            if optional {
                constraint = constraint.optional();
            }
            if let Some(value) = min_length {
                constraint = constraint.min_length(value);
            }
            if let Some(value) = max_length {
                constraint = constraint.max_length(value);
            }
            if let Some(value) = min {
                constraint = constraint.min(value);
            }
            if only_int {
                constraint = constraint.integer().pattern(TextPattern::Email);
            }
            constraint
        })
}

proptest! {
    #[test]
    fn null_is_reported_before_any_other_rule(constraint in any_constraint()) {
        prop_assert_eq!(
            constraint.validate(FieldValue::Null),
            ValidationOutcome::Invalid(ValidationReason::Null)
        );
    }

    #[test]
    fn text_length_bounds_are_inclusive(min in 1_usize..30, extra in 0_usize..30) {
        let max = min + extra;
        let constraint = FieldConstraint::text().min_length(min).max_length(max);
        let at_min = json!("x".repeat(min));
        let below_min = json!("x".repeat(min - 1));
        let at_max = json!("x".repeat(max));
        let above_max = json!("x".repeat(max + 1));

        prop_assert!(constraint.validate(FieldValue::Present(&at_min)).is_valid());
        prop_assert!(constraint.validate(FieldValue::Present(&at_max)).is_valid());
        prop_assert_eq!(
            constraint.validate(FieldValue::Present(&below_min)).reason(),
            Some(ValidationReason::TooShort)
        );
        prop_assert_eq!(
            constraint.validate(FieldValue::Present(&above_max)).reason(),
            Some(ValidationReason::TooLong)
        );
    }

    #[test]
    fn pagination_is_always_in_bounds(page in any::<i64>(), page_size in any::<i64>()) {
        let page = json!(page);
        let page_size = json!(page_size);
        let pagination = Pagination::normalize(
            FieldValue::Present(&page),
            FieldValue::Present(&page_size),
        );

        prop_assert!(pagination.page() >= 1);
        prop_assert!((MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&pagination.page_size()));
    }

    #[test]
    fn pagination_normalization_is_idempotent(page in any::<f64>(), page_size in any::<f64>()) {
        let raw_page = serde_json::Number::from_f64(page).map_or(Value::Null, Value::Number);
        let raw_size = serde_json::Number::from_f64(page_size).map_or(Value::Null, Value::Number);
        let first = Pagination::normalize(
            FieldValue::from_lookup(Some(&raw_page)),
            FieldValue::from_lookup(Some(&raw_size)),
        );
        let page = json!(first.page());
        let page_size = json!(first.page_size());
        let second = Pagination::normalize(
            FieldValue::Present(&page),
            FieldValue::Present(&page_size),
        );

        prop_assert_eq!(first, second);
    }

    #[test]
    fn text_patterns_are_bounded_lowercase_and_wrapped(raw in "\\PC{0,300}") {
        let pattern = normalize_text_query(Some(raw.as_str())).unwrap_or_default();

        if raw.trim().is_empty() {
            prop_assert_eq!(pattern, "");
        } else {
            prop_assert!(pattern.starts_with('%') && pattern.ends_with('%'));
            prop_assert!(!pattern.contains(char::is_whitespace));
            prop_assert!(unescaped_length(&pattern) <= TEXT_QUERY_MAX_LENGTH + 2);
        }
    }

    #[test]
    fn accepted_orderings_have_unique_columns(
        picks in proptest::collection::vec((0_usize..3, any::<bool>()), 0..5)
    ) {
        let policy = OrderPolicy::new(
            &["name", "active", "price"],
            &[("name", SortDirection::Asc), ("active", SortDirection::Asc)],
        );
        let columns = ["name", "active", "price"];
        let tokens: Vec<Value> = picks
            .iter()
            .map(|(column, descending)| {
                json!(format!(
                    "{}_{}",
                    columns[*column],
                    if *descending { "desc" } else { "asc" }
                ))
            })
            .collect();
        let raw = Value::Array(tokens);
        let order = policy.normalize(FieldValue::Present(&raw));

        let mut seen = std::collections::HashSet::new();
        prop_assert!(order.iter().all(|term| seen.insert(term.column)));
        prop_assert!(!order.is_empty());
    }
}

fn unescaped_length(pattern: &str) -> usize {
    let mut characters = pattern.chars();
    let mut length = 0;
    while let Some(character) = characters.next() {
        if character == LIKE_ESCAPE {
            characters.next();
        }
        length += 1;
    }
    length
}
