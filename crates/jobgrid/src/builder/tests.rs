use super::*;
use crate::value::SqlValue;

// ==================== partial_update ====================

#[test]
fn update_single_field() {
    const MAP: FieldMap = FieldMap::new(&[("a", "col_a")]);
    let payload = UpdatePayload::new().set("a", "x");

    let set = partial_update(&payload, &MAP).unwrap();
    assert_eq!(set.sql(), r#""col_a"=$1"#);
    assert_eq!(set.values(), &[SqlValue::Text("x".to_string())]);
    assert_eq!(set.next_index(), 2);
}

#[test]
fn update_multi_field_preserves_insertion_order() {
    const MAP: FieldMap = FieldMap::new(&[("a", "col_a"), ("b", "col_b")]);

    let payload = UpdatePayload::new().set("a", "x").set("b", 5);
    let set = partial_update(&payload, &MAP).unwrap();
    assert_eq!(set.sql(), r#""col_a"=$1, "col_b"=$2"#);
    assert_eq!(
        set.values(),
        &[SqlValue::Text("x".to_string()), SqlValue::Int(5)]
    );

    // Swapping payload insertion order swaps clause and value order
    // identically.
    let swapped = UpdatePayload::new().set("b", 5).set("a", "x");
    let set = partial_update(&swapped, &MAP).unwrap();
    assert_eq!(set.sql(), r#""col_b"=$1, "col_a"=$2"#);
    assert_eq!(
        set.values(),
        &[SqlValue::Int(5), SqlValue::Text("x".to_string())]
    );
}

#[test]
fn update_unmapped_field_falls_back_to_own_name() {
    let payload = UpdatePayload::new().set("zzz", 1);
    let set = partial_update(&payload, &FieldMap::EMPTY).unwrap();
    assert_eq!(set.sql(), r#""zzz"=$1"#);
}

#[test]
fn update_empty_payload_fails() {
    let err = partial_update(&UpdatePayload::new(), &FieldMap::EMPTY).unwrap_err();
    assert!(err.is_invalid_input());
}

#[test]
fn update_null_value_is_bound() {
    let payload = UpdatePayload::new().set("logoUrl", SqlValue::Null);
    const MAP: FieldMap = FieldMap::new(&[("logoUrl", "logo_url")]);

    let set = partial_update(&payload, &MAP).unwrap();
    assert_eq!(set.sql(), r#""logo_url"=$1"#);
    assert_eq!(set.values(), &[SqlValue::Null]);
}

#[test]
fn update_quotes_escape_embedded_quote() {
    let payload = UpdatePayload::new().set(r#"wei"rd"#, 1);
    let set = partial_update(&payload, &FieldMap::EMPTY).unwrap();
    assert_eq!(set.sql(), r#""wei""rd"=$1"#);
}

#[test]
fn update_is_idempotent() {
    const MAP: FieldMap = FieldMap::new(&[("numEmployees", "num_employees")]);
    let payload = UpdatePayload::new().set("name", "Acme").set("numEmployees", 7);

    let first = partial_update(&payload, &MAP).unwrap();
    let second = partial_update(&payload, &MAP).unwrap();
    assert_eq!(first.sql(), second.sql());
    assert_eq!(first.values(), second.values());
}

// ==================== UpdatePayload ====================

#[test]
fn payload_set_opt_skips_none() {
    let payload = UpdatePayload::new()
        .set_opt("name", Some("Acme"))
        .set_opt("logoUrl", None::<&str>);
    assert_eq!(payload.len(), 1);
}

#[test]
fn payload_deserialize_preserves_document_order() {
    let payload: UpdatePayload =
        serde_json::from_str(r#"{"zeta": 1, "alpha": "x", "mid": null}"#).unwrap();
    let fields: Vec<&str> = payload.iter().map(|(field, _)| field).collect();
    assert_eq!(fields, ["zeta", "alpha", "mid"]);
    assert_eq!(
        payload.iter().map(|(_, v)| v.clone()).collect::<Vec<_>>(),
        [
            SqlValue::Int(1),
            SqlValue::Text("x".to_string()),
            SqlValue::Null
        ]
    );
}

#[test]
fn payload_deserialize_rejects_non_object() {
    assert!(serde_json::from_str::<UpdatePayload>("[1, 2]").is_err());
    assert!(serde_json::from_str::<UpdatePayload>(r#""x""#).is_err());
}

// ==================== WhereBuilder ====================

#[test]
fn where_empty_emits_nothing() {
    let w = WhereBuilder::new();
    assert!(w.is_empty());
    assert_eq!(w.where_sql(), "");
    assert_eq!(w.values().len(), 0);
}

#[test]
fn where_single_condition() {
    let mut w = WhereBuilder::new();
    w.and_gte("num_employees", 10);
    assert_eq!(w.where_sql(), r#" WHERE "num_employees" >= $1"#);
    assert_eq!(w.values(), &[SqlValue::Int(10)]);
}

#[test]
fn where_conditions_join_with_and() {
    let mut w = WhereBuilder::new();
    w.and_gte("salary", 100).and_contains("title", "eng");
    assert_eq!(
        w.where_sql(),
        r#" WHERE "salary" >= $1 AND "title" ILIKE $2"#
    );
    assert_eq!(
        w.values(),
        &[SqlValue::Int(100), SqlValue::Text("%eng%".to_string())]
    );
}

#[test]
fn where_contains_binds_wildcard_pattern() {
    let mut w = WhereBuilder::new();
    w.and_contains("name", "net");
    // The needle lands in the value list, not the SQL text.
    assert!(!w.build_clause().contains("net"));
    assert_eq!(w.values(), &[SqlValue::Text("%net%".to_string())]);
}

#[test]
fn where_raw_condition_adds_no_value() {
    let mut w = WhereBuilder::new();
    w.and_gte("salary", 100).and_raw(r#""equity" > 0"#);
    assert_eq!(
        w.where_sql(),
        r#" WHERE "salary" >= $1 AND "equity" > 0"#
    );
    assert_eq!(w.values().len(), 1);
}

#[test]
fn where_numbering_skips_raw_conditions() {
    let mut w = WhereBuilder::new();
    w.and_raw(r#""equity" > 0"#).and_lte("salary", 500);
    // The literal clause consumes no placeholder; the next bound value is $1.
    assert_eq!(
        w.where_sql(),
        r#" WHERE "equity" > 0 AND "salary" <= $1"#
    );
}
