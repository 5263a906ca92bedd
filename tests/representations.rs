use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};
use serde_json::{Value, json};
use storeshop_api::{
    dto::{
        auth::AuthTokens,
        cart::{CartDto, CartItemDto},
        products::{ProductDetail, ProductListItem, ProductRecord},
    },
    entity::{cart_items, carts, categories, product_photos, products, ratings, reviews, users},
    error::AppError,
    jwt::TokenPair,
};

fn user() -> users::Model {
    users::Model {
        id: 1,
        username: "ferris".into(),
        email: "ferris@example.com".into(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into(),
        first_name: "Ferris".into(),
        last_name: "Crab".into(),
        age: Some(9),
        phone_number: Some("+1 555 0100".into()),
        status: "gold".into(),
        is_active: true,
        date_registered: Utc
            .with_ymd_and_hms(2024, 1, 2, 3, 4, 5)
            .unwrap()
            .fixed_offset(),
    }
}

fn product(id: i32, price: i64) -> products::Model {
    products::Model {
        id,
        product_name: format!("Product {id}"),
        description: "Sturdy".into(),
        price,
        product_video: None,
        date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
        active: true,
        owner_id: 1,
        category_id: 3,
    }
}

fn rating(id: i32, product_id: i32, stars: i16) -> ratings::Model {
    ratings::Model {
        id,
        product_id,
        user_id: id + 100,
        stars,
    }
}

fn keys(value: &Value) -> Vec<&str> {
    let mut keys: Vec<&str> = value
        .as_object()
        .expect("object")
        .keys()
        .map(String::as_str)
        .collect();
    keys.sort_unstable();
    keys
}

#[test]
fn token_payload_has_exactly_user_access_refresh() {
    let tokens = TokenPair {
        access: "a.b.c".into(),
        refresh: "d.e.f".into(),
    };
    let value = serde_json::to_value(AuthTokens::new(&user(), tokens)).unwrap();

    assert_eq!(keys(&value), vec!["access", "refresh", "user"]);
    assert_eq!(
        value["user"],
        json!({ "username": "ferris", "email": "ferris@example.com" })
    );
    assert_eq!(value["access"], "a.b.c");
    assert_eq!(value["refresh"], "d.e.f");
}

#[test]
fn list_item_exposes_summary_fields_and_average() {
    let ratings = vec![rating(1, 7, 5), rating(2, 7, 4), rating(3, 7, 3)];
    let value = serde_json::to_value(ProductListItem::new(&product(7, 1999), &ratings)).unwrap();

    assert_eq!(
        keys(&value),
        vec!["active", "average_rating", "date", "id", "price", "product_name"]
    );
    assert_eq!(value["date"], "2024-03-09");
    assert_eq!(value["average_rating"], 4.0);
    assert_eq!(value["price"], 1999);
}

#[test]
fn average_rating_defaults_to_zero() {
    let item = ProductListItem::new(&product(7, 100), &[]);
    assert_eq!(item.average_rating, 0.0);
    assert_eq!(ratings::average_stars(&[rating(1, 7, 2), rating(2, 7, 3)]), 2.5);
}

#[test]
fn detail_nests_related_records_and_formats_dates() {
    let offset = FixedOffset::east_opt(0).unwrap();
    let record = ProductRecord {
        product: product(7, 1500),
        category: categories::Model {
            id: 3,
            category_name: "Kitchen".into(),
        },
        owner: user(),
        photos: vec![product_photos::Model {
            id: 1,
            product_id: 7,
            image: "products/mug.png".into(),
        }],
        ratings: vec![rating(1, 7, 4), rating(2, 7, 5)],
        reviews: vec![reviews::Model {
            id: 4,
            product_id: 7,
            author_id: 1,
            text: "Great mug".into(),
            date: offset.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap(),
        }],
    };

    let value = serde_json::to_value(ProductDetail::from(record)).unwrap();

    assert_eq!(value["date"], "09-03-2024");
    assert_eq!(value["category"], json!({ "category_name": "Kitchen" }));
    assert_eq!(value["product"], json!([{ "image": "products/mug.png" }]));
    assert_eq!(value["owner"], json!({ "first_name": "Ferris", "last_name": "Crab" }));
    assert_eq!(
        value["ratings"][0],
        json!({ "id": 1, "product": 7, "user": 101, "stars": 4 })
    );
    assert_eq!(value["reviews"][0]["date"], "06-05-2024 07:08");
    assert_eq!(value["reviews"][0]["author"], 1);
    assert_eq!(value["average_rating"], 4.5);
    assert_eq!(value["product_video"], Value::Null);
}

#[test]
fn cart_total_is_sum_of_line_totals() {
    let cart = carts::Model {
        id: 11,
        user_id: 1,
        created_at: Utc::now().fixed_offset(),
    };
    let first = product(1, 10);
    let second = product(2, 5);
    let items = vec![
        CartItemDto::new(
            &cart_items::Model {
                id: 1,
                cart_id: 11,
                product_id: 1,
                quantity: 2,
            },
            &first,
            &[],
        )
        .unwrap(),
        CartItemDto::new(
            &cart_items::Model {
                id: 2,
                cart_id: 11,
                product_id: 2,
                quantity: 1,
            },
            &second,
            &[rating(1, 2, 3)],
        )
        .unwrap(),
    ];

    let value = serde_json::to_value(CartDto::new(&cart, items).unwrap()).unwrap();

    assert_eq!(value["total_price"], 25);
    assert_eq!(value["user"], 1);
    assert_eq!(value["items"][0]["get_total_price"], 20);
    assert_eq!(value["items"][1]["get_total_price"], 5);
    assert_eq!(value["items"][1]["product"]["average_rating"], 3.0);
    assert_eq!(
        keys(&value["items"][0]),
        vec!["get_total_price", "id", "product", "quantity"]
    );
}

#[test]
fn empty_cart_totals_zero() {
    let cart = carts::Model {
        id: 1,
        user_id: 2,
        created_at: Utc::now().fixed_offset(),
    };
    let value = serde_json::to_value(CartDto::new(&cart, Vec::new()).unwrap()).unwrap();
    assert_eq!(value["total_price"], 0);
    assert_eq!(value["items"], json!([]));
}

#[test]
fn oversized_line_totals_are_rejected() {
    let cart = carts::Model {
        id: 1,
        user_id: 2,
        created_at: Utc::now().fixed_offset(),
    };
    let pricey = product(1, 10_000_000_000);
    let item = cart_items::Model {
        id: 1,
        cart_id: 1,
        product_id: 1,
        quantity: 1_000_000_000,
    };

    assert_eq!(item.line_total(pricey.price), None);
    assert!(matches!(
        CartItemDto::new(&item, &pricey, &[]),
        Err(AppError::BadRequest(_))
    ));

    let near_max = product(2, i64::MAX / 2 + 1);
    let single = cart_items::Model {
        quantity: 1,
        ..item
    };
    let lines = vec![
        CartItemDto::new(&single, &near_max, &[]).unwrap(),
        CartItemDto::new(&cart_items::Model { id: 2, ..single }, &near_max, &[]).unwrap(),
    ];
    assert!(matches!(
        CartDto::new(&cart, lines),
        Err(AppError::BadRequest(_))
    ));
}

#[test]
fn password_material_never_serialized() {
    let tokens = TokenPair {
        access: "a".into(),
        refresh: "r".into(),
    };
    let payloads = [
        serde_json::to_string(&AuthTokens::new(&user(), tokens)).unwrap(),
        serde_json::to_string(&ProductDetail::from(ProductRecord {
            product: product(1, 1),
            category: categories::Model {
                id: 3,
                category_name: "Books".into(),
            },
            owner: user(),
            photos: Vec::new(),
            ratings: Vec::new(),
            reviews: Vec::new(),
        }))
        .unwrap(),
    ];

    for payload in payloads {
        assert!(!payload.contains("password"), "{payload}");
        assert!(!payload.contains("argon2"), "{payload}");
    }
}
