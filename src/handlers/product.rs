//! Product handlers.

use crate::error::{AppError, ErrorBody};
use crate::model::{Page, ProductPayload};
use crate::response::{ProductCreated, ProductFound, ProductList};
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};

pub const PRODUCT_CREATED: &str = "Produto criado com sucesso";
pub const PRODUCT_NOT_FOUND: &str = "Produto não encontrado";

#[utoipa::path(
    post,
    path = "/products",
    tag = "products",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Produto criado com sucesso", body = ProductCreated),
        (status = 400, description = "Erro ao criar produto", body = ErrorBody)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    let product = state.store.create_product(payload.validate()?).await?;
    tracing::info!(product_id = product.id, "product created");
    Ok((StatusCode::CREATED, Json(ProductCreated::new(PRODUCT_CREATED, product))))
}

#[utoipa::path(
    get,
    path = "/products",
    tag = "products",
    params(Page),
    responses((status = 200, description = "Sucesso", body = ProductList))
)]
pub async fn list(
    State(state): State<AppState>,
    page: Result<Query<Page>, QueryRejection>,
) -> Result<Json<ProductList>, AppError> {
    let Query(page) = page?;
    Ok(Json(state.store.list_products(page).await?.into()))
}

#[utoipa::path(
    get,
    path = "/products/{product_id}",
    tag = "products",
    params(("product_id" = i64, Path, description = "Id do produto")),
    responses(
        (status = 200, description = "Sucesso", body = ProductFound),
        (status = 404, description = "Produto não encontrado", body = ErrorBody)
    )
)]
pub async fn read(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<ProductFound>, AppError> {
    let Path(product_id) = path?;
    let product = state
        .store
        .get_product(product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(PRODUCT_NOT_FOUND.into()))?;
    Ok(Json(ProductFound { product }))
}

#[utoipa::path(
    delete,
    path = "/products/{product_id}",
    tag = "products",
    params(("product_id" = i64, Path, description = "Id do produto")),
    responses(
        (status = 204, description = "Produto deletado com sucesso"),
        (status = 404, description = "Produto não encontrado", body = ErrorBody)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(product_id) = path?;
    if !state.store.delete_product(product_id).await? {
        return Err(AppError::NotFound(PRODUCT_NOT_FOUND.into()));
    }
    Ok(StatusCode::NO_CONTENT)
}
