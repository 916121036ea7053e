//! Entity schema: stored rows, request payloads and validated inserts.

mod address;
mod credit_card;
mod product;
mod user;

pub use address::{Address, AddressPayload, NewAddress};
pub use credit_card::{CreditCard, CreditCardPayload, NewCreditCard};
pub use product::{NewProduct, Product, ProductPayload};
pub use user::{NewUser, User, UserPayload};

use serde::Deserialize;
use utoipa::IntoParams;

const DEFAULT_LIMIT: u32 = 100;
const MAX_LIMIT: u32 = 1000;

/// Pagination for list endpoints. Rows are returned in id order.
#[derive(Clone, Copy, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Page {
    /// Defaults to 100, capped at 1000.
    pub limit: Option<u32>,
    /// Defaults to 0.
    pub offset: Option<u32>,
}

impl Page {
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT)
    }

    pub fn offset(&self) -> u32 {
        self.offset.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::Page;

    #[test]
    fn page_defaults_and_cap() {
        let page = Page::default();
        assert_eq!((page.limit(), page.offset()), (100, 0));
        let page = Page { limit: Some(5000), offset: Some(3) };
        assert_eq!((page.limit(), page.offset()), (1000, 3));
    }
}
