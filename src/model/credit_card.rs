use crate::error::AppError;
use crate::service::parse_expiration;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stored credit card row. `user_id` references `users.id`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct CreditCard {
    pub id: i64,
    pub user_id: i64,
    pub numero: String,
    #[serde(rename = "dtExpiracao")]
    pub dt_expiracao: NaiveDate,
    pub cvv: String,
    pub saldo: f64,
}

/// Body of `POST /credit_card/{user_id}`.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct CreditCardPayload {
    /// Card number, stored as given.
    #[schema(example = "4000123456789010")]
    pub numero: String,
    /// Expiration date as `dd/mm/yyyy`.
    #[serde(rename = "dtExpiracao", default)]
    #[schema(example = "11/04/2027")]
    pub dt_expiracao: Option<String>,
    #[schema(example = "123")]
    pub cvv: String,
    /// Initial balance.
    #[schema(example = 5000.0)]
    pub saldo: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewCreditCard {
    pub numero: String,
    pub dt_expiracao: NaiveDate,
    pub cvv: String,
    pub saldo: f64,
}

impl CreditCardPayload {
    pub fn validate(self) -> Result<NewCreditCard, AppError> {
        let dt_expiracao = parse_expiration(self.dt_expiracao.as_deref())?;
        Ok(NewCreditCard {
            numero: self.numero,
            dt_expiracao,
            cvv: self.cvv,
            saldo: self.saldo,
        })
    }
}

impl NewCreditCard {
    pub fn into_row(self, id: i64, user_id: i64) -> CreditCard {
        CreditCard {
            id,
            user_id,
            numero: self.numero,
            dt_expiracao: self.dt_expiracao,
            cvv: self.cvv,
            saldo: self.saldo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_expiration_under_source_key() {
        let card = NewCreditCard {
            numero: "4000123456789010".into(),
            dt_expiracao: NaiveDate::from_ymd_opt(2027, 4, 11).unwrap(),
            cvv: "123".into(),
            saldo: 5000.0,
        }
        .into_row(1, 7);
        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(value["dtExpiracao"], json!("2027-04-11"));
        assert_eq!(value["user_id"], json!(7));
        assert!(value.get("dt_expiracao").is_none());
    }

    #[test]
    fn payload_without_date_is_rejected() {
        let payload: CreditCardPayload = serde_json::from_value(json!({
            "numero": "1", "cvv": "123", "saldo": 10
        }))
        .unwrap();
        assert!(matches!(payload.validate(), Err(AppError::Validation(_))));
    }
}
