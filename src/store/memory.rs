//! In-memory backend with the same keying, id and foreign-key rules as PostgreSQL.
//! Each write holds the table lock for its whole duration, so it is all-or-nothing.

use super::Store;
use crate::error::StoreError;
use crate::model::{
    Address, CreditCard, NewAddress, NewCreditCard, NewProduct, NewUser, Page, Product, User,
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    products: BTreeMap<i64, Product>,
    addresses: BTreeMap<i64, Address>,
    cards: BTreeMap<i64, CreditCard>,
    user_seq: i64,
    product_seq: i64,
    address_seq: i64,
    card_seq: i64,
}

fn next_id(seq: &mut i64) -> i64 {
    *seq += 1;
    *seq
}

fn page_of<'a, T: Clone + 'a>(rows: impl Iterator<Item = &'a T>, page: Page) -> Vec<T> {
    rows.skip(page.offset() as usize)
        .take(page.limit() as usize)
        .cloned()
        .collect()
}

/// Thread-safe in-memory store. Clones share the same tables.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
    closed: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StoreError::Unavailable("store closed".into()));
        }
        Ok(())
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut t = self.tables.write().await;
        let id = next_id(&mut t.user_seq);
        let row = user.into_row(id);
        t.users.insert(id, row.clone());
        Ok(row)
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>, StoreError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn list_users(&self, page: Page) -> Result<Vec<User>, StoreError> {
        Ok(page_of(self.tables.read().await.users.values(), page))
    }

    async fn delete_user(&self, id: i64) -> Result<bool, StoreError> {
        let mut t = self.tables.write().await;
        if !t.users.contains_key(&id) {
            return Ok(false);
        }
        let referenced = t.addresses.values().any(|a| a.user_id == id)
            || t.cards.values().any(|c| c.user_id == id);
        if referenced {
            return Err(StoreError::Referenced);
        }
        t.users.remove(&id);
        Ok(true)
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, StoreError> {
        let mut t = self.tables.write().await;
        let id = next_id(&mut t.product_seq);
        let row = product.into_row(id);
        t.products.insert(id, row.clone());
        Ok(row)
    }

    async fn get_product(&self, id: i64) -> Result<Option<Product>, StoreError> {
        Ok(self.tables.read().await.products.get(&id).cloned())
    }

    async fn list_products(&self, page: Page) -> Result<Vec<Product>, StoreError> {
        Ok(page_of(self.tables.read().await.products.values(), page))
    }

    async fn delete_product(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.tables.write().await.products.remove(&id).is_some())
    }

    async fn create_address(&self, user_id: i64, address: NewAddress) -> Result<Address, StoreError> {
        let mut t = self.tables.write().await;
        if !t.users.contains_key(&user_id) {
            return Err(StoreError::MissingOwner);
        }
        let id = next_id(&mut t.address_seq);
        let row = address.into_row(id, user_id);
        t.addresses.insert(id, row.clone());
        Ok(row)
    }

    async fn get_address(&self, user_id: i64, id: i64) -> Result<Option<Address>, StoreError> {
        let t = self.tables.read().await;
        Ok(t.addresses.get(&id).filter(|a| a.user_id == user_id).cloned())
    }

    async fn list_addresses(&self, user_id: i64, page: Page) -> Result<Vec<Address>, StoreError> {
        let t = self.tables.read().await;
        Ok(page_of(t.addresses.values().filter(|a| a.user_id == user_id), page))
    }

    async fn delete_address(&self, user_id: i64, id: i64) -> Result<bool, StoreError> {
        let mut t = self.tables.write().await;
        let owned = t.addresses.get(&id).is_some_and(|a| a.user_id == user_id);
        if owned {
            t.addresses.remove(&id);
        }
        Ok(owned)
    }

    async fn create_credit_card(&self, user_id: i64, card: NewCreditCard) -> Result<CreditCard, StoreError> {
        let mut t = self.tables.write().await;
        if !t.users.contains_key(&user_id) {
            return Err(StoreError::MissingOwner);
        }
        let id = next_id(&mut t.card_seq);
        let row = card.into_row(id, user_id);
        t.cards.insert(id, row.clone());
        Ok(row)
    }

    async fn get_credit_card(&self, user_id: i64, id: i64) -> Result<Option<CreditCard>, StoreError> {
        let t = self.tables.read().await;
        Ok(t.cards.get(&id).filter(|c| c.user_id == user_id).cloned())
    }

    async fn list_credit_cards(&self, user_id: i64, page: Page) -> Result<Vec<CreditCard>, StoreError> {
        let t = self.tables.read().await;
        Ok(page_of(t.cards.values().filter(|c| c.user_id == user_id), page))
    }

    async fn delete_credit_card(&self, user_id: i64, id: i64) -> Result<bool, StoreError> {
        let mut t = self.tables.write().await;
        let owned = t.cards.get(&id).is_some_and(|c| c.user_id == user_id);
        if owned {
            t.cards.remove(&id);
        }
        Ok(owned)
    }
}
