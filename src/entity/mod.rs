pub mod audit_logs;
pub mod cart_items;
pub mod carts;
pub mod categories;
pub mod product_photos;
pub mod products;
pub mod ratings;
pub mod reviews;
pub mod users;

pub use audit_logs::Entity as AuditLogs;
pub use cart_items::Entity as CartItems;
pub use carts::Entity as Carts;
pub use categories::Entity as Categories;
pub use product_photos::Entity as ProductPhotos;
pub use products::Entity as Products;
pub use ratings::Entity as Ratings;
pub use reviews::Entity as Reviews;
pub use users::Entity as Users;
