use crate::error::AppError;
use crate::service::require_text;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Product {
    pub id: i64,
    pub nome: String,
    pub descricao: Option<String>,
    pub preco: f64,
    pub quantidade: i32,
}

/// Body of `POST /products`.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct ProductPayload {
    #[schema(example = "Teclado")]
    pub nome: String,
    #[serde(default)]
    pub descricao: Option<String>,
    #[schema(example = 199.9)]
    pub preco: f64,
    #[schema(example = 10)]
    pub quantidade: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewProduct {
    pub nome: String,
    pub descricao: Option<String>,
    pub preco: f64,
    pub quantidade: i32,
}

impl ProductPayload {
    pub fn validate(self) -> Result<NewProduct, AppError> {
        require_text("nome", &self.nome)?;
        Ok(NewProduct {
            nome: self.nome,
            descricao: self.descricao,
            preco: self.preco,
            quantidade: self.quantidade,
        })
    }
}

impl NewProduct {
    pub fn into_row(self, id: i64) -> Product {
        Product {
            id,
            nome: self.nome,
            descricao: self.descricao,
            preco: self.preco,
            quantidade: self.quantidade,
        }
    }
}
