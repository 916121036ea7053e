//! Entity routes, one group per URL prefix.

use crate::handlers::{address, credit_card, product, user};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn entity_routes(state: AppState) -> Router {
    Router::new()
        .route("/users", get(user::list).post(user::create))
        .route("/users/:user_id", get(user::read).delete(user::delete))
        .route("/products", get(product::list).post(product::create))
        .route("/products/:product_id", get(product::read).delete(product::delete))
        .route("/address/:user_id", get(address::list).post(address::create))
        .route(
            "/address/:user_id/:address_id",
            get(address::read).delete(address::delete),
        )
        .route("/credit_card/:user_id", get(credit_card::list).post(credit_card::create))
        .route(
            "/credit_card/:user_id/:card_id",
            get(credit_card::read).delete(credit_card::delete),
        )
        .with_state(state)
}
