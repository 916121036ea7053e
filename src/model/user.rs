use crate::error::AppError;
use crate::service::require_text;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct User {
    pub id: i64,
    pub nome: String,
    pub email: String,
}

/// Body of `POST /users`.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct UserPayload {
    #[schema(example = "Maria Souza")]
    pub nome: String,
    #[schema(example = "maria@example.com")]
    pub email: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewUser {
    pub nome: String,
    pub email: String,
}

impl UserPayload {
    pub fn validate(self) -> Result<NewUser, AppError> {
        require_text("nome", &self.nome)?;
        require_text("email", &self.email)?;
        Ok(NewUser {
            nome: self.nome,
            email: self.email,
        })
    }
}

impl NewUser {
    pub fn into_row(self, id: i64) -> User {
        User {
            id,
            nome: self.nome,
            email: self.email,
        }
    }
}
