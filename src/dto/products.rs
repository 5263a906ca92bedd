use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    dto::format::{day_month_year, day_month_year_time},
    entity::{categories, product_photos, products, ratings, reviews, users},
};

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryDto {
    pub category_name: String,
}

impl From<&categories::Model> for CategoryDto {
    fn from(model: &categories::Model) -> Self {
        Self {
            category_name: model.category_name.clone(),
        }
    }
}

/// Category as listed by the catalog index; carries the id used by the
/// `category` product filter.
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryListItem {
    pub id: i32,
    pub category_name: String,
}

impl From<categories::Model> for CategoryListItem {
    fn from(model: categories::Model) -> Self {
        Self {
            id: model.id,
            category_name: model.category_name,
        }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct CategoryList {
    #[schema(value_type = Vec<CategoryListItem>)]
    pub items: Vec<CategoryListItem>,
}

/// Owner embedded in a product detail.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserBrief {
    pub first_name: String,
    pub last_name: String,
}

impl From<&users::Model> for UserBrief {
    fn from(model: &users::Model) -> Self {
        Self {
            first_name: model.first_name.clone(),
            last_name: model.last_name.clone(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PhotoDto {
    pub image: String,
}

impl From<product_photos::Model> for PhotoDto {
    fn from(model: product_photos::Model) -> Self {
        Self { image: model.image }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RatingDto {
    pub id: i32,
    pub product: i32,
    pub user: i32,
    pub stars: i16,
}

impl From<&ratings::Model> for RatingDto {
    fn from(model: &ratings::Model) -> Self {
        Self {
            id: model.id,
            product: model.product_id,
            user: model.user_id,
            stars: model.stars,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewDto {
    pub id: i32,
    pub product: i32,
    pub author: i32,
    pub text: String,
    #[serde(with = "day_month_year_time")]
    #[schema(value_type = String, example = "31-12-2024 18:45")]
    pub date: DateTime<FixedOffset>,
}

impl From<reviews::Model> for ReviewDto {
    fn from(model: reviews::Model) -> Self {
        Self {
            id: model.id,
            product: model.product_id,
            author: model.author_id,
            text: model.text,
            date: model.date,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductListItem {
    pub id: i32,
    pub product_name: String,
    pub date: NaiveDate,
    pub price: i64,
    pub active: bool,
    pub average_rating: f64,
}

impl ProductListItem {
    pub fn new(product: &products::Model, ratings: &[ratings::Model]) -> Self {
        Self {
            id: product.id,
            product_name: product.product_name.clone(),
            date: product.date,
            price: product.price,
            active: product.active,
            average_rating: ratings::average_stars(ratings),
        }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<ProductListItem>)]
    pub items: Vec<ProductListItem>,
}

/// A product with every record its detail view embeds.
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub product: products::Model,
    pub category: categories::Model,
    pub owner: users::Model,
    pub photos: Vec<product_photos::Model>,
    pub ratings: Vec<ratings::Model>,
    pub reviews: Vec<reviews::Model>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductDetail {
    pub id: i32,
    pub product_name: String,
    pub category: CategoryDto,
    #[serde(rename = "product")]
    pub photos: Vec<PhotoDto>,
    pub description: String,
    pub price: i64,
    pub product_video: Option<String>,
    #[serde(with = "day_month_year")]
    #[schema(value_type = String, example = "31-12-2024")]
    pub date: NaiveDate,
    pub active: bool,
    pub ratings: Vec<RatingDto>,
    pub reviews: Vec<ReviewDto>,
    pub average_rating: f64,
    pub owner: UserBrief,
}

impl From<ProductRecord> for ProductDetail {
    fn from(record: ProductRecord) -> Self {
        let ProductRecord {
            product,
            category,
            owner,
            photos,
            ratings,
            reviews,
        } = record;

        Self {
            id: product.id,
            product_name: product.product_name,
            category: CategoryDto::from(&category),
            photos: photos.into_iter().map(PhotoDto::from).collect(),
            description: product.description,
            price: product.price,
            product_video: product.product_video,
            date: product.date,
            active: product.active,
            average_rating: ratings::average_stars(&ratings),
            ratings: ratings.iter().map(RatingDto::from).collect(),
            reviews: reviews.into_iter().map(ReviewDto::from).collect(),
            owner: UserBrief::from(&owner),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RateProductRequest {
    pub stars: i16,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReviewProductRequest {
    pub text: String,
}
