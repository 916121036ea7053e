//! Payload validation shared by the entity handlers.

mod validation;
pub use validation::{parse_expiration, require_text, EXPIRATION_BAD_FORMAT, EXPIRATION_REQUIRED};
