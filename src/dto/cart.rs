use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    dto::products::ProductListItem,
    entity::{cart_items, carts, products, ratings},
    error::{AppError, AppResult},
};

fn total_overflow() -> AppError {
    AppError::BadRequest("cart total is out of range".to_string())
}

/// `product_id` is the write-only product reference; the response embeds the
/// product itself under `product`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddToCartRequest {
    pub product_id: i32,
    #[validate(range(min = 1, message = "quantity must be greater than 0"))]
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartItemDto {
    pub id: i32,
    pub product: ProductListItem,
    pub quantity: i32,
    #[serde(rename = "get_total_price")]
    pub total_price: i64,
}

impl CartItemDto {
    pub fn new(
        item: &cart_items::Model,
        product: &products::Model,
        ratings: &[ratings::Model],
    ) -> AppResult<Self> {
        let total_price = item.line_total(product.price).ok_or_else(total_overflow)?;
        Ok(Self {
            id: item.id,
            product: ProductListItem::new(product, ratings),
            quantity: item.quantity,
            total_price,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartDto {
    pub id: i32,
    pub user: i32,
    pub items: Vec<CartItemDto>,
    pub total_price: i64,
}

impl CartDto {
    pub fn new(cart: &carts::Model, items: Vec<CartItemDto>) -> AppResult<Self> {
        let total_price = items
            .iter()
            .try_fold(0i64, |acc, item| acc.checked_add(item.total_price))
            .ok_or_else(total_overflow)?;
        Ok(Self {
            id: cart.id,
            user: cart.user_id,
            items,
            total_price,
        })
    }
}
