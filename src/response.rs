//! Response envelopes: `{message, <entity>}` on create, `{<entity>}` on read,
//! `{<entities>, count}` on list.

use crate::model::{Address, CreditCard, Product, User};
use serde::Serialize;
use utoipa::ToSchema;

macro_rules! envelopes {
    ($created:ident, $found:ident, $listed:ident, $entity:ident, $one:ident, $many:ident) => {
        #[derive(Serialize, ToSchema)]
        pub struct $created {
            pub message: String,
            pub $one: $entity,
        }

        impl $created {
            pub fn new(message: &str, $one: $entity) -> Self {
                $created {
                    message: message.to_string(),
                    $one,
                }
            }
        }

        #[derive(Serialize, ToSchema)]
        pub struct $found {
            pub $one: $entity,
        }

        #[derive(Serialize, ToSchema)]
        pub struct $listed {
            pub $many: Vec<$entity>,
            pub count: u64,
        }

        impl From<Vec<$entity>> for $listed {
            fn from($many: Vec<$entity>) -> Self {
                let count = $many.len() as u64;
                $listed { $many, count }
            }
        }
    };
}

envelopes!(UserCreated, UserFound, UserList, User, user, users);
envelopes!(ProductCreated, ProductFound, ProductList, Product, product, products);
envelopes!(AddressCreated, AddressFound, AddressList, Address, address, addresses);
envelopes!(CreditCardCreated, CreditCardFound, CreditCardList, CreditCard, card, cards);
