use axum::{extract::Query, http::Uri};
use chrono::NaiveDate;
use sea_orm::{DbBackend, EntityTrait, QueryTrait};
use storeshop_api::{entity::Products, filters::ProductFilter};

fn parse(query: &str) -> Result<ProductFilter, String> {
    let uri: Uri = format!("http://localhost/api/products?{query}")
        .parse()
        .expect("valid uri");
    Query::<ProductFilter>::try_from_uri(&uri)
        .map(|Query(filter)| filter)
        .map_err(|err| err.to_string())
}

fn to_sql(filter: &ProductFilter) -> String {
    filter
        .apply(Products::find())
        .build(DbBackend::Postgres)
        .to_string()
}

#[test]
fn parses_lookup_style_keys() {
    let filter = parse("price__gt=10&price__lt=100&date__gt=2024-01-01&date__lt=2024-12-31&active=true&category=3")
        .expect("filter");

    assert_eq!(filter.price_gt, Some(10));
    assert_eq!(filter.price_lt, Some(100));
    assert_eq!(filter.date_gt, NaiveDate::from_ymd_opt(2024, 1, 1));
    assert_eq!(filter.date_lt, NaiveDate::from_ymd_opt(2024, 12, 31));
    assert_eq!(filter.active, Some(true));
    assert_eq!(filter.category, Some(3));
}

#[test]
fn empty_query_selects_everything() {
    let filter = parse("").expect("filter");
    assert!(filter.is_empty());

    let sql = to_sql(&filter);
    assert!(!sql.contains("WHERE"), "unexpected predicate in {sql}");
}

#[test]
fn malformed_values_are_rejected() {
    assert!(parse("price__gt=cheap").is_err());
    assert!(parse("date__lt=31-12-2024").is_err());
    assert!(parse("category=books").is_err());
}

#[test]
fn price_bounds_are_strict_and_conjunctive() {
    let filter = ProductFilter {
        price_gt: Some(10),
        price_lt: Some(100),
        ..Default::default()
    };
    let sql = to_sql(&filter);

    assert!(sql.contains(r#""products"."price" > 10"#), "{sql}");
    assert!(sql.contains(r#""products"."price" < 100"#), "{sql}");
    assert!(sql.contains(" AND "), "{sql}");
    assert!(!sql.contains(">="), "{sql}");
}

#[test]
fn date_bounds_compare_calendar_dates() {
    let filter = ProductFilter {
        date_gt: NaiveDate::from_ymd_opt(2024, 1, 1),
        date_lt: NaiveDate::from_ymd_opt(2024, 2, 1),
        ..Default::default()
    };
    let sql = to_sql(&filter);

    assert!(sql.contains(r#""products"."date" > '2024-01-01'"#), "{sql}");
    assert!(sql.contains(r#""products"."date" < '2024-02-01'"#), "{sql}");
}

#[test]
fn active_and_category_ignore_price_and_date() {
    let filter = parse("active=true&category=3").expect("filter");
    let sql = to_sql(&filter);

    assert!(sql.contains(r#""products"."active" = TRUE"#), "{sql}");
    assert!(sql.contains(r#""products"."category_id" = 3"#), "{sql}");
    assert!(!sql.contains(r#""products"."price" >"#), "{sql}");
    assert!(!sql.contains(r#""products"."date" >"#), "{sql}");
}
