//! Persistence handle: the [`Store`] trait and its PostgreSQL and in-memory backends.
//!
//! Owned resources (addresses, credit cards) are always addressed by the pair
//! `(user_id, id)`; a row that exists under another owner is not visible.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, PgStore};

use crate::error::StoreError;
use crate::model::{
    Address, CreditCard, NewAddress, NewCreditCard, NewProduct, NewUser, Page, Product, User,
};
use async_trait::async_trait;

#[async_trait]
pub trait Store: Send + Sync {
    /// Round-trip to the backend; used by readiness checks.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Release connections. Called once on shutdown.
    async fn close(&self);

    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;
    async fn get_user(&self, id: i64) -> Result<Option<User>, StoreError>;
    async fn list_users(&self, page: Page) -> Result<Vec<User>, StoreError>;
    /// Returns `false` when no row matched. Fails with [`StoreError::Referenced`]
    /// while addresses or cards still point at the user.
    async fn delete_user(&self, id: i64) -> Result<bool, StoreError>;

    async fn create_product(&self, product: NewProduct) -> Result<Product, StoreError>;
    async fn get_product(&self, id: i64) -> Result<Option<Product>, StoreError>;
    async fn list_products(&self, page: Page) -> Result<Vec<Product>, StoreError>;
    async fn delete_product(&self, id: i64) -> Result<bool, StoreError>;

    /// Fails with [`StoreError::MissingOwner`] when `user_id` names no user.
    async fn create_address(&self, user_id: i64, address: NewAddress) -> Result<Address, StoreError>;
    async fn get_address(&self, user_id: i64, id: i64) -> Result<Option<Address>, StoreError>;
    async fn list_addresses(&self, user_id: i64, page: Page) -> Result<Vec<Address>, StoreError>;
    async fn delete_address(&self, user_id: i64, id: i64) -> Result<bool, StoreError>;

    /// Fails with [`StoreError::MissingOwner`] when `user_id` names no user.
    async fn create_credit_card(&self, user_id: i64, card: NewCreditCard) -> Result<CreditCard, StoreError>;
    async fn get_credit_card(&self, user_id: i64, id: i64) -> Result<Option<CreditCard>, StoreError>;
    async fn list_credit_cards(&self, user_id: i64, page: Page) -> Result<Vec<CreditCard>, StoreError>;
    async fn delete_credit_card(&self, user_id: i64, id: i64) -> Result<bool, StoreError>;
}
