//! Address handlers, scoped by owner like credit cards.

use crate::error::{AppError, ErrorBody};
use crate::model::{AddressPayload, Page};
use crate::response::{AddressCreated, AddressFound, AddressList};
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

pub const ADDRESS_CREATED: &str = "Endereço criado com sucesso";
pub const ADDRESS_NOT_FOUND: &str = "Endereço não encontrado";

#[utoipa::path(
    post,
    path = "/address/{user_id}",
    tag = "address",
    params(("user_id" = i64, Path, description = "Dono do endereço")),
    request_body = AddressPayload,
    responses(
        (status = 201, description = "Endereço criado com sucesso", body = AddressCreated),
        (status = 400, description = "Erro ao criar endereço", body = ErrorBody),
        (status = 404, description = "Usuário não encontrado", body = ErrorBody)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<AddressPayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(user_id) = path?;
    let Json(payload) = payload?;
    let address = state.store.create_address(user_id, payload.validate()?).await?;
    tracing::info!(user_id, address_id = address.id, "address created");
    Ok((StatusCode::CREATED, Json(AddressCreated::new(ADDRESS_CREATED, address))))
}

#[utoipa::path(
    get,
    path = "/address/{user_id}",
    tag = "address",
    params(("user_id" = i64, Path, description = "Dono dos endereços"), Page),
    responses((status = 200, description = "Sucesso", body = AddressList))
)]
pub async fn list(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    page: Result<Query<Page>, QueryRejection>,
) -> Result<Json<AddressList>, AppError> {
    let Path(user_id) = path?;
    let Query(page) = page?;
    Ok(Json(state.store.list_addresses(user_id, page).await?.into()))
}

#[utoipa::path(
    get,
    path = "/address/{user_id}/{address_id}",
    tag = "address",
    params(
        ("user_id" = i64, Path, description = "Dono do endereço"),
        ("address_id" = i64, Path, description = "Id do endereço")
    ),
    responses(
        (status = 200, description = "Sucesso", body = AddressFound),
        (status = 404, description = "Endereço não encontrado", body = ErrorBody)
    )
)]
pub async fn read(
    State(state): State<AppState>,
    path: Result<Path<(i64, i64)>, PathRejection>,
) -> Result<Json<AddressFound>, AppError> {
    let Path((user_id, address_id)) = path?;
    let address = state
        .store
        .get_address(user_id, address_id)
        .await?
        .ok_or_else(|| AppError::NotFound(ADDRESS_NOT_FOUND.into()))?;
    Ok(Json(AddressFound { address }))
}

#[utoipa::path(
    delete,
    path = "/address/{user_id}/{address_id}",
    tag = "address",
    params(
        ("user_id" = i64, Path, description = "Dono do endereço"),
        ("address_id" = i64, Path, description = "Id do endereço")
    ),
    responses(
        (status = 204, description = "Endereço deletado com sucesso"),
        (status = 404, description = "Endereço não encontrado", body = ErrorBody)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    path: Result<Path<(i64, i64)>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path((user_id, address_id)) = path?;
    if !state.store.delete_address(user_id, address_id).await? {
        return Err(AppError::NotFound(ADDRESS_NOT_FOUND.into()));
    }
    Ok(StatusCode::NO_CONTENT)
}
