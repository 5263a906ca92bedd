use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{AccessToken, AuthTokens, LoginRequest, RefreshRequest, RegisterRequest, TokenUser, UserStatus},
        cart::{AddToCartRequest, CartDto, CartItemDto},
        products::{
            CategoryDto, CategoryList, CategoryListItem, PhotoDto, ProductDetail, ProductList,
            ProductListItem, RateProductRequest, RatingDto, ReviewDto, ReviewProductRequest,
            UserBrief,
        },
    },
    filters::ProductFilter,
    response::{ApiResponse, Meta},
    routes::{auth, cart, categories, health, products},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        auth::refresh,
        categories::list_categories,
        products::list_products,
        products::get_product,
        products::rate_product,
        products::review_product,
        cart::get_cart,
        cart::add_to_cart,
        cart::remove_from_cart
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            RefreshRequest,
            UserStatus,
            TokenUser,
            AuthTokens,
            AccessToken,
            CategoryDto,
            CategoryListItem,
            CategoryList,
            UserBrief,
            PhotoDto,
            RatingDto,
            ReviewDto,
            ProductListItem,
            ProductList,
            ProductDetail,
            RateProductRequest,
            ReviewProductRequest,
            AddToCartRequest,
            CartItemDto,
            CartDto,
            ProductFilter,
            Meta,
            ApiResponse<AuthTokens>,
            ApiResponse<ProductList>,
            ApiResponse<ProductDetail>,
            ApiResponse<CartDto>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Registration, login and token refresh"),
        (name = "Products", description = "Catalog, ratings and reviews"),
        (name = "Cart", description = "Cart endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
