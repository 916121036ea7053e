//! PostgreSQL backend. Table DDL runs once at startup (create-if-absent, never altered).

use super::Store;
use crate::error::StoreError;
use crate::model::{
    Address, CreditCard, NewAddress, NewCreditCard, NewProduct, NewUser, Page, Product, User,
};
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool, Postgres, Transaction};
use std::str::FromStr;

const TABLES: &[(&str, &str)] = &[
    (
        "users",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id BIGSERIAL PRIMARY KEY,
            nome TEXT NOT NULL,
            email TEXT NOT NULL
        )
        "#,
    ),
    (
        "products",
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id BIGSERIAL PRIMARY KEY,
            nome TEXT NOT NULL,
            descricao TEXT,
            preco DOUBLE PRECISION NOT NULL,
            quantidade INTEGER NOT NULL
        )
        "#,
    ),
    (
        "address",
        r#"
        CREATE TABLE IF NOT EXISTS address (
            id BIGSERIAL PRIMARY KEY,
            user_id BIGINT NOT NULL REFERENCES users (id),
            rua TEXT NOT NULL,
            numero TEXT NOT NULL,
            cidade TEXT NOT NULL,
            estado TEXT NOT NULL,
            cep TEXT NOT NULL
        )
        "#,
    ),
    (
        "credit_card",
        r#"
        CREATE TABLE IF NOT EXISTS credit_card (
            id BIGSERIAL PRIMARY KEY,
            user_id BIGINT NOT NULL REFERENCES users (id),
            numero TEXT NOT NULL,
            dt_expiracao DATE NOT NULL,
            cvv TEXT NOT NULL,
            saldo DOUBLE PRECISION NOT NULL
        )
        "#,
    ),
];

const USER_COLUMNS: &str = "id, nome, email";
const PRODUCT_COLUMNS: &str = "id, nome, descricao, preco, quantidade";
const ADDRESS_COLUMNS: &str = "id, user_id, rua, numero, cidade, estado, cep";
const CARD_COLUMNS: &str = "id, user_id, numero, dt_expiracao, cvv, saldo";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(PgStore { pool })
    }

    /// Create every entity table that does not exist yet, parents before children.
    pub async fn ensure_tables(&self) -> Result<(), StoreError> {
        for (name, ddl) in TABLES {
            tracing::debug!(table = %name, "ensure table");
            sqlx::query(*ddl).execute(&self.pool).await?;
        }
        Ok(())
    }
}

/// Turn a foreign-key violation into `on_fk`; anything else stays a database error.
fn classify(err: sqlx::Error, on_fk: Option<StoreError>) -> StoreError {
    let is_fk = matches!(&err, sqlx::Error::Database(db) if db.is_foreign_key_violation());
    match on_fk {
        Some(mapped) if is_fk => mapped,
        _ => StoreError::Database(err),
    }
}

/// Commit when the statement succeeded, otherwise roll back so nothing from the
/// transaction is observable.
async fn finish<T>(
    tx: Transaction<'_, Postgres>,
    result: Result<T, sqlx::Error>,
    on_fk: Option<StoreError>,
) -> Result<T, StoreError> {
    match result {
        Ok(row) => {
            tx.commit().await?;
            Ok(row)
        }
        Err(err) => {
            if let Err(rollback) = tx.rollback().await {
                tracing::warn!(error = %rollback, "rollback failed");
            }
            Err(classify(err, on_fk))
        }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let sql = format!("INSERT INTO users (nome, email) VALUES ($1, $2) RETURNING {}", USER_COLUMNS);
        tracing::debug!(sql = %sql, "query (tx)");
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query_as::<_, User>(&sql)
            .bind(&user.nome)
            .bind(&user.email)
            .fetch_one(&mut *tx)
            .await;
        finish(tx, result, None).await
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>, StoreError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, User>(&sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn list_users(&self, page: Page) -> Result<Vec<User>, StoreError> {
        let sql = format!("SELECT {} FROM users ORDER BY id LIMIT $1 OFFSET $2", USER_COLUMNS);
        tracing::debug!(sql = %sql, ?page, "query");
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(i64::from(page.limit()))
            .bind(i64::from(page.offset()))
            .fetch_all(&self.pool)
            .await?)
    }

    async fn delete_user(&self, id: i64) -> Result<bool, StoreError> {
        let sql = "DELETE FROM users WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let done = sqlx::query(sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| classify(e, Some(StoreError::Referenced)))?;
        Ok(done.rows_affected() > 0)
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, StoreError> {
        let sql = format!(
            "INSERT INTO products (nome, descricao, preco, quantidade) VALUES ($1, $2, $3, $4) RETURNING {}",
            PRODUCT_COLUMNS
        );
        tracing::debug!(sql = %sql, "query (tx)");
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query_as::<_, Product>(&sql)
            .bind(&product.nome)
            .bind(&product.descricao)
            .bind(product.preco)
            .bind(product.quantidade)
            .fetch_one(&mut *tx)
            .await;
        finish(tx, result, None).await
    }

    async fn get_product(&self, id: i64) -> Result<Option<Product>, StoreError> {
        let sql = format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, Product>(&sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn list_products(&self, page: Page) -> Result<Vec<Product>, StoreError> {
        let sql = format!("SELECT {} FROM products ORDER BY id LIMIT $1 OFFSET $2", PRODUCT_COLUMNS);
        tracing::debug!(sql = %sql, ?page, "query");
        Ok(sqlx::query_as::<_, Product>(&sql)
            .bind(i64::from(page.limit()))
            .bind(i64::from(page.offset()))
            .fetch_all(&self.pool)
            .await?)
    }

    async fn delete_product(&self, id: i64) -> Result<bool, StoreError> {
        let sql = "DELETE FROM products WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let done = sqlx::query(sql).bind(id).execute(&self.pool).await?;
        Ok(done.rows_affected() > 0)
    }

    async fn create_address(&self, user_id: i64, address: NewAddress) -> Result<Address, StoreError> {
        let sql = format!(
            "INSERT INTO address (user_id, rua, numero, cidade, estado, cep) VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            ADDRESS_COLUMNS
        );
        tracing::debug!(sql = %sql, user_id, "query (tx)");
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query_as::<_, Address>(&sql)
            .bind(user_id)
            .bind(&address.rua)
            .bind(&address.numero)
            .bind(&address.cidade)
            .bind(&address.estado)
            .bind(&address.cep)
            .fetch_one(&mut *tx)
            .await;
        finish(tx, result, Some(StoreError::MissingOwner)).await
    }

    async fn get_address(&self, user_id: i64, id: i64) -> Result<Option<Address>, StoreError> {
        let sql = format!("SELECT {} FROM address WHERE id = $1 AND user_id = $2", ADDRESS_COLUMNS);
        tracing::debug!(sql = %sql, user_id, id, "query");
        Ok(sqlx::query_as::<_, Address>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn list_addresses(&self, user_id: i64, page: Page) -> Result<Vec<Address>, StoreError> {
        let sql = format!(
            "SELECT {} FROM address WHERE user_id = $1 ORDER BY id LIMIT $2 OFFSET $3",
            ADDRESS_COLUMNS
        );
        tracing::debug!(sql = %sql, user_id, ?page, "query");
        Ok(sqlx::query_as::<_, Address>(&sql)
            .bind(user_id)
            .bind(i64::from(page.limit()))
            .bind(i64::from(page.offset()))
            .fetch_all(&self.pool)
            .await?)
    }

    async fn delete_address(&self, user_id: i64, id: i64) -> Result<bool, StoreError> {
        let sql = "DELETE FROM address WHERE id = $1 AND user_id = $2";
        tracing::debug!(sql = %sql, user_id, id, "query");
        let done = sqlx::query(sql).bind(id).bind(user_id).execute(&self.pool).await?;
        Ok(done.rows_affected() > 0)
    }

    async fn create_credit_card(&self, user_id: i64, card: NewCreditCard) -> Result<CreditCard, StoreError> {
        let sql = format!(
            "INSERT INTO credit_card (user_id, numero, dt_expiracao, cvv, saldo) VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            CARD_COLUMNS
        );
        tracing::debug!(sql = %sql, user_id, "query (tx)");
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query_as::<_, CreditCard>(&sql)
            .bind(user_id)
            .bind(&card.numero)
            .bind(card.dt_expiracao)
            .bind(&card.cvv)
            .bind(card.saldo)
            .fetch_one(&mut *tx)
            .await;
        finish(tx, result, Some(StoreError::MissingOwner)).await
    }

    async fn get_credit_card(&self, user_id: i64, id: i64) -> Result<Option<CreditCard>, StoreError> {
        let sql = format!("SELECT {} FROM credit_card WHERE id = $1 AND user_id = $2", CARD_COLUMNS);
        tracing::debug!(sql = %sql, user_id, id, "query");
        Ok(sqlx::query_as::<_, CreditCard>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn list_credit_cards(&self, user_id: i64, page: Page) -> Result<Vec<CreditCard>, StoreError> {
        let sql = format!(
            "SELECT {} FROM credit_card WHERE user_id = $1 ORDER BY id LIMIT $2 OFFSET $3",
            CARD_COLUMNS
        );
        tracing::debug!(sql = %sql, user_id, ?page, "query");
        Ok(sqlx::query_as::<_, CreditCard>(&sql)
            .bind(user_id)
            .bind(i64::from(page.limit()))
            .bind(i64::from(page.offset()))
            .fetch_all(&self.pool)
            .await?)
    }

    async fn delete_credit_card(&self, user_id: i64, id: i64) -> Result<bool, StoreError> {
        let sql = "DELETE FROM credit_card WHERE id = $1 AND user_id = $2";
        tracing::debug!(sql = %sql, user_id, id, "query");
        let done = sqlx::query(sql).bind(id).bind(user_id).execute(&self.pool).await?;
        Ok(done.rows_affected() > 0)
    }
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StoreError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url);
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = PgConnectOptions::from_str(&admin_url)
        .map_err(|e| StoreError::Unavailable(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Split `url` into an admin URL on the `postgres` database and the target database
/// name. The name is empty when the URL has no path after its authority.
fn parse_db_name_from_url(url: &str) -> (String, String) {
    let authority_start = url.find("://").map_or(0, |i| i + 3);
    let Some(end) = url[authority_start..]
        .find(|c: char| c == '/' || c == '?')
        .map(|i| authority_start + i)
    else {
        return (format!("{}/postgres", url), String::new());
    };
    let (base, rest) = url.split_at(end);
    let path = rest.strip_prefix('/').unwrap_or("");
    let (db_name, query) = match path.find('?') {
        Some(q) => path.split_at(q),
        None => (path, ""),
    };
    let query = if rest.starts_with('?') { rest } else { query };
    (format!("{}/postgres{}", base, query), db_name.trim().to_string())
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_database_name() {
        let (admin, name) = parse_db_name_from_url("postgres://u:p@db:5432/cadastro?sslmode=disable");
        assert_eq!(admin, "postgres://u:p@db:5432/postgres?sslmode=disable");
        assert_eq!(name, "cadastro");
    }

    #[test]
    fn url_without_path_has_no_database_name() {
        let (admin, name) = parse_db_name_from_url("postgres://localhost");
        assert_eq!(admin, "postgres://localhost/postgres");
        assert_eq!(name, "");

        let (admin, name) = parse_db_name_from_url("postgres://u:p@db:5432?sslmode=require");
        assert_eq!(admin, "postgres://u:p@db:5432/postgres?sslmode=require");
        assert_eq!(name, "");
    }

    #[test]
    fn slash_in_query_is_not_the_path() {
        let (_, name) = parse_db_name_from_url("postgres://db/cadastro?sslrootcert=/etc/ca.pem");
        assert_eq!(name, "cadastro");
    }

    #[test]
    fn non_constraint_failure_stays_a_database_error() {
        let err = classify(sqlx::Error::PoolTimedOut, Some(StoreError::MissingOwner));
        assert!(matches!(err, StoreError::Database(sqlx::Error::PoolTimedOut)));
        let err = classify(sqlx::Error::RowNotFound, None);
        assert!(matches!(err, StoreError::Database(sqlx::Error::RowNotFound)));
    }

    #[test]
    fn quotes_identifiers() {
        assert_eq!(quote_ident("a\"b"), "\"a\"\"b\"");
    }

    #[test]
    fn tables_are_created_parent_first() {
        let names: Vec<&str> = TABLES.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, ["users", "products", "address", "credit_card"]);
    }
}
