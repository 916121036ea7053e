//! User handlers.

use crate::error::{AppError, ErrorBody};
use crate::model::{Page, UserPayload};
use crate::response::{UserCreated, UserFound, UserList};
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

pub const USER_CREATED: &str = "Usuário criado com sucesso";
pub const USER_NOT_FOUND: &str = "Usuário não encontrado";

#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = UserPayload,
    responses(
        (status = 201, description = "Usuário criado com sucesso", body = UserCreated),
        (status = 400, description = "Erro ao criar usuário", body = ErrorBody)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    let user = state.store.create_user(payload.validate()?).await?;
    tracing::info!(user_id = user.id, "user created");
    Ok((StatusCode::CREATED, Json(UserCreated::new(USER_CREATED, user))))
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    params(Page),
    responses((status = 200, description = "Sucesso", body = UserList))
)]
pub async fn list(
    State(state): State<AppState>,
    page: Result<Query<Page>, QueryRejection>,
) -> Result<Json<UserList>, AppError> {
    let Query(page) = page?;
    Ok(Json(state.store.list_users(page).await?.into()))
}

#[utoipa::path(
    get,
    path = "/users/{user_id}",
    tag = "users",
    params(("user_id" = i64, Path, description = "Id do usuário")),
    responses(
        (status = 200, description = "Sucesso", body = UserFound),
        (status = 404, description = "Usuário não encontrado", body = ErrorBody)
    )
)]
pub async fn read(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<UserFound>, AppError> {
    let Path(user_id) = path?;
    let user = state
        .store
        .get_user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.into()))?;
    Ok(Json(UserFound { user }))
}

/// Deleting a user that still owns addresses or cards is a conflict; nothing cascades.
#[utoipa::path(
    delete,
    path = "/users/{user_id}",
    tag = "users",
    params(("user_id" = i64, Path, description = "Id do usuário")),
    responses(
        (status = 204, description = "Usuário deletado com sucesso"),
        (status = 404, description = "Usuário não encontrado", body = ErrorBody),
        (status = 409, description = "Usuário possui registros vinculados", body = ErrorBody)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(user_id) = path?;
    if !state.store.delete_user(user_id).await? {
        return Err(AppError::NotFound(USER_NOT_FOUND.into()));
    }
    tracing::info!(user_id, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}
