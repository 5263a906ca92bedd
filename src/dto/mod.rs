pub mod auth;
pub mod cart;
pub mod format;
pub mod products;
