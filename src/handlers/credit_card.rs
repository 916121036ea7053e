//! Credit card handlers. Every card is addressed through its owner: `/credit_card/{user_id}/{card_id}`.

use crate::error::{AppError, ErrorBody};
use crate::model::{CreditCardPayload, Page};
use crate::response::{CreditCardCreated, CreditCardFound, CreditCardList};
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

pub const CARD_CREATED: &str = "Cartão criado com sucesso";
pub const CARD_NOT_FOUND: &str = "Cartão não encontrado";

/// Create a credit card for the given user.
#[utoipa::path(
    post,
    path = "/credit_card/{user_id}",
    tag = "credit_card",
    params(("user_id" = i64, Path, description = "Dono do cartão")),
    request_body = CreditCardPayload,
    responses(
        (status = 201, description = "Cartão criado com sucesso", body = CreditCardCreated),
        (status = 400, description = "Erro ao criar cartão de crédito", body = ErrorBody),
        (status = 404, description = "Usuário não encontrado", body = ErrorBody),
        (status = 500, description = "Erro interno", body = ErrorBody)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CreditCardPayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(user_id) = path?;
    let Json(payload) = payload?;
    let card = payload.validate()?;
    let card = state.store.create_credit_card(user_id, card).await?;
    tracing::info!(user_id, card_id = card.id, "credit card created");
    Ok((StatusCode::CREATED, Json(CreditCardCreated::new(CARD_CREATED, card))))
}

/// List the cards of one user.
#[utoipa::path(
    get,
    path = "/credit_card/{user_id}",
    tag = "credit_card",
    params(("user_id" = i64, Path, description = "Dono dos cartões"), Page),
    responses(
        (status = 200, description = "Sucesso", body = CreditCardList),
        (status = 400, description = "Paginação inválida", body = ErrorBody)
    )
)]
pub async fn list(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    page: Result<Query<Page>, QueryRejection>,
) -> Result<Json<CreditCardList>, AppError> {
    let Path(user_id) = path?;
    let Query(page) = page?;
    let cards = state.store.list_credit_cards(user_id, page).await?;
    Ok(Json(cards.into()))
}

/// Return a card by id and owner.
#[utoipa::path(
    get,
    path = "/credit_card/{user_id}/{card_id}",
    tag = "credit_card",
    params(
        ("user_id" = i64, Path, description = "Dono do cartão"),
        ("card_id" = i64, Path, description = "Id do cartão")
    ),
    responses(
        (status = 200, description = "Sucesso", body = CreditCardFound),
        (status = 404, description = "Cartão não encontrado", body = ErrorBody)
    )
)]
pub async fn read(
    State(state): State<AppState>,
    path: Result<Path<(i64, i64)>, PathRejection>,
) -> Result<Json<CreditCardFound>, AppError> {
    let Path((user_id, card_id)) = path?;
    let card = state
        .store
        .get_credit_card(user_id, card_id)
        .await?
        .ok_or_else(|| AppError::NotFound(CARD_NOT_FOUND.into()))?;
    Ok(Json(CreditCardFound { card }))
}

/// Delete one card of one user.
#[utoipa::path(
    delete,
    path = "/credit_card/{user_id}/{card_id}",
    tag = "credit_card",
    params(
        ("user_id" = i64, Path, description = "Dono do cartão"),
        ("card_id" = i64, Path, description = "Id do cartão")
    ),
    responses(
        (status = 204, description = "Cartão deletado com sucesso"),
        (status = 404, description = "Cartão não encontrado", body = ErrorBody)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    path: Result<Path<(i64, i64)>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path((user_id, card_id)) = path?;
    if !state.store.delete_credit_card(user_id, card_id).await? {
        return Err(AppError::NotFound(CARD_NOT_FOUND.into()));
    }
    tracing::info!(user_id, card_id, "credit card deleted");
    Ok(StatusCode::NO_CONTENT)
}
