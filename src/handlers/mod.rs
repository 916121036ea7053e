//! HTTP handlers: request parsing, validation, one store call, response.

pub mod address;
pub mod credit_card;
pub mod product;
pub mod user;
