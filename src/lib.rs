//! Cadastro API: CRUD backend for users, products, addresses and credit cards.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::{AppError, ConfigError, StoreError};
pub use routes::{app, common_routes, docs_routes, entity_routes, ApiDoc};
pub use state::AppState;
pub use store::{ensure_database_exists, MemoryStore, PgStore, Store};
