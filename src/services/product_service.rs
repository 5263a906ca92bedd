use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, ActiveValue::NotSet, sea_query::OnConflict,
};

use crate::{
    audit,
    dto::products::{
        CategoryList, CategoryListItem, ProductDetail, ProductList, ProductListItem,
        ProductRecord, RateProductRequest, RatingDto, ReviewDto, ReviewProductRequest,
    },
    entity::{
        Categories, ProductPhotos, Products, Ratings, Reviews, Users, categories, product_photos,
        products, ratings, reviews,
    },
    error::{AppError, AppResult},
    filters::ProductFilter,
    middleware::auth::AuthUser,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_categories(state: &AppState) -> AppResult<ApiResponse<CategoryList>> {
    let items: Vec<CategoryListItem> = Categories::find()
        .order_by_asc(categories::Column::CategoryName)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(CategoryListItem::from)
        .collect();

    let meta = Meta::total(items.len() as i64);
    Ok(ApiResponse::success("Categories", CategoryList { items }, Some(meta)))
}

pub async fn list_products(
    state: &AppState,
    filter: ProductFilter,
) -> AppResult<ApiResponse<ProductList>> {
    tracing::debug!(?filter, unfiltered = filter.is_empty(), "listing products");

    let products = filter
        .apply(Products::find())
        .order_by_desc(products::Column::Date)
        .order_by_asc(products::Column::Id)
        .all(&state.orm)
        .await?;

    let ids: Vec<i32> = products.iter().map(|p| p.id).collect();
    let ratings = ratings_by_product(&state.orm, ids).await?;

    let items: Vec<ProductListItem> = products
        .iter()
        .map(|p| {
            let product_ratings = ratings.get(&p.id).map(Vec::as_slice).unwrap_or_default();
            ProductListItem::new(p, product_ratings)
        })
        .collect();

    let meta = Meta::total(items.len() as i64);
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn get_product(state: &AppState, id: i32) -> AppResult<ApiResponse<ProductDetail>> {
    let record = load_product_record(&state.orm, id).await?;
    Ok(ApiResponse::success(
        "Product",
        ProductDetail::from(record),
        None,
    ))
}

/// Load a product together with its category, owner, photos, ratings and reviews.
pub async fn load_product_record<C>(db: &C, id: i32) -> AppResult<ProductRecord>
where
    C: ConnectionTrait,
{
    let product = match Products::find_by_id(id).one(db).await? {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };

    let category = product
        .find_related(Categories)
        .one(db)
        .await?
        .ok_or_else(|| dangling(&product, "category"))?;
    let owner = product
        .find_related(Users)
        .one(db)
        .await?
        .ok_or_else(|| dangling(&product, "owner"))?;
    let photos = product
        .find_related(ProductPhotos)
        .order_by_asc(product_photos::Column::Id)
        .all(db)
        .await?;
    let ratings = product
        .find_related(Ratings)
        .order_by_asc(ratings::Column::Id)
        .all(db)
        .await?;
    let reviews = product
        .find_related(Reviews)
        .order_by_desc(reviews::Column::Date)
        .all(db)
        .await?;

    Ok(ProductRecord {
        product,
        category,
        owner,
        photos,
        ratings,
        reviews,
    })
}

/// Ratings of the given products, grouped by product id.
pub async fn ratings_by_product<C>(
    db: &C,
    product_ids: Vec<i32>,
) -> AppResult<HashMap<i32, Vec<ratings::Model>>>
where
    C: ConnectionTrait,
{
    let mut grouped: HashMap<i32, Vec<ratings::Model>> = HashMap::new();
    if product_ids.is_empty() {
        return Ok(grouped);
    }

    let rows = Ratings::find()
        .filter(ratings::Column::ProductId.is_in(product_ids))
        .all(db)
        .await?;
    for rating in rows {
        grouped.entry(rating.product_id).or_default().push(rating);
    }
    Ok(grouped)
}

pub async fn rate_product(
    state: &AppState,
    user: &AuthUser,
    product_id: i32,
    payload: RateProductRequest,
) -> AppResult<ApiResponse<RatingDto>> {
    if !(ratings::MIN_STARS..=ratings::MAX_STARS).contains(&payload.stars) {
        return Err(AppError::BadRequest(format!(
            "stars must be between {} and {}",
            ratings::MIN_STARS,
            ratings::MAX_STARS
        )));
    }
    ensure_product_exists(state, product_id).await?;

    // One rating per (product, user); a repeat or concurrent rating
    // overwrites the stars in a single statement.
    let rating = Ratings::insert(ratings::ActiveModel {
        id: NotSet,
        product_id: Set(product_id),
        user_id: Set(user.user_id),
        stars: Set(payload.stars),
    })
    .on_conflict(
        OnConflict::columns([ratings::Column::ProductId, ratings::Column::UserId])
            .update_column(ratings::Column::Stars)
            .to_owned(),
    )
    .exec_with_returning(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "product_rate",
        "ratings",
        serde_json::json!({ "product_id": product_id, "stars": rating.stars }),
    )
    .await;

    Ok(ApiResponse::success(
        "Rated",
        RatingDto::from(&rating),
        Some(Meta::empty()),
    ))
}

pub async fn review_product(
    state: &AppState,
    user: &AuthUser,
    product_id: i32,
    payload: ReviewProductRequest,
) -> AppResult<ApiResponse<ReviewDto>> {
    let text = payload.text.trim();
    if text.is_empty() {
        return Err(AppError::BadRequest("text may not be blank".into()));
    }
    ensure_product_exists(state, product_id).await?;

    let review = reviews::ActiveModel {
        id: NotSet,
        product_id: Set(product_id),
        author_id: Set(user.user_id),
        text: Set(text.to_string()),
        date: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "product_review",
        "reviews",
        serde_json::json!({ "product_id": product_id, "review_id": review.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Reviewed",
        ReviewDto::from(review),
        Some(Meta::empty()),
    ))
}

async fn ensure_product_exists(state: &AppState, product_id: i32) -> AppResult<()> {
    match Products::find_by_id(product_id).one(&state.orm).await? {
        Some(_) => Ok(()),
        None => Err(AppError::NotFound),
    }
}

fn dangling(product: &products::Model, relation: &str) -> AppError {
    AppError::Internal(anyhow::anyhow!(
        "product {} references a missing {relation}",
        product.id
    ))
}
