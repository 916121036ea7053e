use crate::error::AppError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stored address row. `user_id` references `users.id`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Address {
    pub id: i64,
    pub user_id: i64,
    pub rua: String,
    pub numero: String,
    pub cidade: String,
    pub estado: String,
    pub cep: String,
}

/// Body of `POST /address/{user_id}`.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct AddressPayload {
    #[schema(example = "Rua das Flores")]
    pub rua: String,
    #[schema(example = "100")]
    pub numero: String,
    #[schema(example = "Recife")]
    pub cidade: String,
    #[schema(example = "PE")]
    pub estado: String,
    #[schema(example = "50000-000")]
    pub cep: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewAddress {
    pub rua: String,
    pub numero: String,
    pub cidade: String,
    pub estado: String,
    pub cep: String,
}

impl AddressPayload {
    // Fields are stored verbatim.
    pub fn validate(self) -> Result<NewAddress, AppError> {
        Ok(NewAddress {
            rua: self.rua,
            numero: self.numero,
            cidade: self.cidade,
            estado: self.estado,
            cep: self.cep,
        })
    }
}

impl NewAddress {
    pub fn into_row(self, id: i64, user_id: i64) -> Address {
        Address {
            id,
            user_id,
            rua: self.rua,
            numero: self.numero,
            cidade: self.cidade,
            estado: self.estado,
            cep: self.cep,
        }
    }
}
