use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, ActiveValue::NotSet,
};

use validator::Validate;

use crate::{
    audit,
    dto::cart::{AddToCartRequest, CartDto, CartItemDto},
    entity::{CartItems, Carts, Products, cart_items, carts},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    response::{ApiResponse, Meta},
    services::product_service::ratings_by_product,
    state::AppState,
};

/// The caller's cart, created on first use.
pub async fn get_or_create_cart<C>(db: &C, user_id: i32) -> AppResult<carts::Model>
where
    C: ConnectionTrait,
{
    let existing = Carts::find()
        .filter(carts::Column::UserId.eq(user_id))
        .one(db)
        .await?;
    if let Some(cart) = existing {
        return Ok(cart);
    }

    let cart = carts::ActiveModel {
        id: NotSet,
        user_id: Set(user_id),
        created_at: NotSet,
    }
    .insert(db)
    .await?;
    tracing::debug!(user_id, cart_id = cart.id, "cart created");
    Ok(cart)
}

pub async fn get_cart(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<CartDto>> {
    let cart = get_or_create_cart(&state.orm, user.user_id).await?;

    let rows = cart
        .find_related(CartItems)
        .find_also_related(Products)
        .order_by_asc(cart_items::Column::Id)
        .all(&state.orm)
        .await?;

    let product_ids: Vec<i32> = rows.iter().map(|(item, _)| item.product_id).collect();
    let ratings = ratings_by_product(&state.orm, product_ids).await?;

    let mut items = Vec::with_capacity(rows.len());
    for (item, product) in rows {
        let Some(product) = product else {
            tracing::warn!(cart_item_id = item.id, "cart item without product skipped");
            continue;
        };
        let product_ratings = ratings.get(&product.id).map(Vec::as_slice).unwrap_or_default();
        items.push(CartItemDto::new(&item, &product, product_ratings)?);
    }

    let meta = Meta::total(items.len() as i64);
    Ok(ApiResponse::success("OK", CartDto::new(&cart, items)?, Some(meta)))
}

pub async fn add_to_cart(
    state: &AppState,
    user: &AuthUser,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<CartItemDto>> {
    payload.validate()?;

    let product = Products::find_by_id(payload.product_id)
        .one(&state.orm)
        .await?;
    let product = match product {
        Some(p) => p,
        None => return Err(AppError::BadRequest("product not found".to_string())),
    };
    if cart_items::line_total(product.price, payload.quantity).is_none() {
        return Err(AppError::BadRequest("cart total is out of range".to_string()));
    }

    let cart = get_or_create_cart(&state.orm, user.user_id).await?;

    let exist = CartItems::find()
        .filter(cart_items::Column::CartId.eq(cart.id))
        .filter(cart_items::Column::ProductId.eq(product.id))
        .one(&state.orm)
        .await?;

    let cart_item = if let Some(item) = exist {
        let mut active: cart_items::ActiveModel = item.into();
        active.quantity = Set(payload.quantity);
        active.update(&state.orm).await?
    } else {
        cart_items::ActiveModel {
            id: NotSet,
            cart_id: Set(cart.id),
            product_id: Set(product.id),
            quantity: Set(payload.quantity),
        }
        .insert(&state.orm)
        .await?
    };

    audit::record(
        &state.pool,
        Some(user.user_id),
        "cart_update",
        "cart_items",
        serde_json::json!({ "product_id": product.id, "quantity": payload.quantity }),
    )
    .await;

    let ratings = ratings_by_product(&state.orm, vec![product.id]).await?;
    let product_ratings = ratings.get(&product.id).map(Vec::as_slice).unwrap_or_default();

    Ok(ApiResponse::success(
        "OK",
        CartItemDto::new(&cart_item, &product, product_ratings)?,
        Some(Meta::empty()),
    ))
}

pub async fn remove_from_cart(
    state: &AppState,
    user: &AuthUser,
    item_id: i32,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let cart = get_or_create_cart(&state.orm, user.user_id).await?;

    let result = CartItems::delete_many()
        .filter(cart_items::Column::Id.eq(item_id))
        .filter(cart_items::Column::CartId.eq(cart.id))
        .exec(&state.orm)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        Some(user.user_id),
        "cart_remove",
        "cart_items",
        serde_json::json!({ "cart_item_id": item_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Removed from cart",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
