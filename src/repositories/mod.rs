// Repositories module - data access layer

pub mod auth_repository;
pub mod cart_storage;
pub mod order_store;
pub mod product_repository;

pub use auth_repository::{AuthRepository, InMemoryAuthRepository};
pub use cart_storage::{
    cart_to_records, CartRecord, CartStorage, InMemoryCartStorage, JsonFileCartStorage,
    CART_FORMAT_VERSION,
};
pub use order_store::{InMemoryOrderStore, JsonFileOrderStore, OrderStore, ORDERS_FORMAT_VERSION};
pub use product_repository::{InMemoryProductRepository, ProductRepository};
