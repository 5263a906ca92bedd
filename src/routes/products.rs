use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    dto::products::{
        ProductDetail, ProductList, RateProductRequest, RatingDto, ReviewDto,
        ReviewProductRequest,
    },
    error::AppResult,
    filters::ProductFilter,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products))
        .route("/{id}", get(get_product))
        .route("/{id}/ratings", post(rate_product))
        .route("/{id}/reviews", post(review_product))
}

#[utoipa::path(
    get,
    path = "/api/products",
    params(ProductFilter),
    responses(
        (status = 200, description = "List products matching the filter", body = ApiResponse<ProductList>),
        (status = 400, description = "Malformed filter value")
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = product_service::list_products(&state, filter).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Get product", body = ApiResponse<ProductDetail>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<ProductDetail>>> {
    let resp = product_service::get_product(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/products/{id}/ratings",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body = RateProductRequest,
    responses(
        (status = 201, description = "Rate product", body = ApiResponse<RatingDto>),
        (status = 400, description = "Stars out of range"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn rate_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<RateProductRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<RatingDto>>)> {
    let resp = product_service::rate_product(&state, &user, id, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    post,
    path = "/api/products/{id}/reviews",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body = ReviewProductRequest,
    responses(
        (status = 201, description = "Review product", body = ApiResponse<ReviewDto>),
        (status = 400, description = "Blank review"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn review_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<ReviewProductRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<ReviewDto>>)> {
    let resp = product_service::review_product(&state, &user, id, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
