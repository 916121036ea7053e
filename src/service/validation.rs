//! Request validation for entity payloads.

use crate::error::AppError;
use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

pub const EXPIRATION_REQUIRED: &str = "Data de expiração é obrigatória.";
pub const EXPIRATION_BAD_FORMAT: &str = "Formato de data inválido. Use dd/mm/yyyy.";

const EXPIRATION_FORMAT: &str = "%d/%m/%Y";

fn expiration_shape() -> &'static Regex {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    SHAPE.get_or_init(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").expect("static pattern"))
}

/// Parse a card expiration date written as `dd/mm/yyyy`.
///
/// Absent or empty input is a "required" failure. Anything that is not exactly
/// two digits, two digits and four digits separated by `/`, or that names a day
/// the calendar does not have, is a format failure.
pub fn parse_expiration(raw: Option<&str>) -> Result<NaiveDate, AppError> {
    let raw = match raw {
        Some(s) if !s.is_empty() => s,
        _ => return Err(AppError::Validation(EXPIRATION_REQUIRED.into())),
    };
    if !expiration_shape().is_match(raw) {
        return Err(AppError::Validation(EXPIRATION_BAD_FORMAT.into()));
    }
    NaiveDate::parse_from_str(raw, EXPIRATION_FORMAT)
        .map_err(|_| AppError::Validation(EXPIRATION_BAD_FORMAT.into()))
}

/// Reject blank text for a field that must carry a value.
pub fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} é obrigatório", field)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(err: AppError) -> String {
        err.to_string()
    }

    #[test]
    fn parses_day_month_year() {
        let date = parse_expiration(Some("11/04/2027")).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2027, 4, 11).unwrap());
    }

    #[test]
    fn missing_or_empty_is_required() {
        assert_eq!(message(parse_expiration(None).unwrap_err()), EXPIRATION_REQUIRED);
        assert_eq!(message(parse_expiration(Some("")).unwrap_err()), EXPIRATION_REQUIRED);
    }

    #[test]
    fn iso_timestamp_is_bad_format() {
        let err = parse_expiration(Some("2027-04-11T03:02:45.999Z")).unwrap_err();
        assert_eq!(message(err), EXPIRATION_BAD_FORMAT);
    }

    #[test]
    fn rejects_other_groupings() {
        for raw in ["1/4/2027", "11/04/27", "11-04-2027", "2027/04/11", " 11/04/2027", "11/04/2027 "] {
            let err = parse_expiration(Some(raw)).unwrap_err();
            assert_eq!(message(err), EXPIRATION_BAD_FORMAT, "input {raw:?}");
        }
    }

    #[test]
    fn rejects_impossible_dates() {
        for raw in ["31/02/2027", "00/01/2027", "15/13/2027"] {
            assert!(parse_expiration(Some(raw)).is_err(), "input {raw:?}");
        }
    }

    #[test]
    fn blank_text_is_rejected() {
        assert!(require_text("nome", "  ").is_err());
        assert!(require_text("nome", "Ana").is_ok());
    }
}
