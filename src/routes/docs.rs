//! OpenAPI document for the entity routes and the Swagger UI that browses it.

use crate::error::ErrorBody;
use crate::handlers::{address, credit_card, product, user};
use crate::model::{
    Address, AddressPayload, CreditCard, CreditCardPayload, Product, ProductPayload, User, UserPayload,
};
use crate::response::*;
use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";
pub const SWAGGER_UI_PATH: &str = "/swagger-ui";

#[derive(OpenApi)]
#[openapi(
    info(title = "Cadastro API", description = "Usuários, produtos, endereços e cartões de crédito"),
    paths(
        user::create, user::list, user::read, user::delete,
        product::create, product::list, product::read, product::delete,
        address::create, address::list, address::read, address::delete,
        credit_card::create, credit_card::list, credit_card::read, credit_card::delete
    ),
    components(schemas(
        User, UserPayload, UserCreated, UserFound, UserList,
        Product, ProductPayload, ProductCreated, ProductFound, ProductList,
        Address, AddressPayload, AddressCreated, AddressFound, AddressList,
        CreditCard, CreditCardPayload, CreditCardCreated, CreditCardFound, CreditCardList,
        ErrorBody
    )),
    tags(
        (name = "users", description = "Operações relacionadas a usuários"),
        (name = "products", description = "Operações relacionadas a produtos"),
        (name = "address", description = "Operações relacionadas a endereços do usuário"),
        (name = "credit_card", description = "Operações relacionadas a cartões de crédito do usuário")
    )
)]
pub struct ApiDoc;

/// Serves the JSON document at [`OPENAPI_PATH`] and the UI under [`SWAGGER_UI_PATH`].
pub fn docs_routes() -> Router {
    Router::new().merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_PATH, ApiDoc::openapi()))
}
