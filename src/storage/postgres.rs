//! Postgres storage
//!
//! The schema carries the authoritative uniqueness constraints: a UNIQUE
//! index on `aliases.code` and on `accounts.email`. Constraint violations
//! surface as [`Error::Conflict`] so the service layer can retry.

use std::time::Duration;

use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use crate::accounts::Account;
use crate::aliases::Alias;
use crate::aliases::AliasStatus;

use super::CreateAccountValues;
use super::CreateAliasValues;
use super::Error;
use super::Result;
use super::Storage;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

/// Postgres storage
#[derive(Clone)]
pub struct Postgres {
    /// Pool of connections
    connection_pool: PgPool,
}

/// Database row for an account
#[derive(sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    email: String,
    hashed_password: String,
    created_at: DateTime<Utc>,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            hashed_password: row.hashed_password,
            created_at: row.created_at,
        }
    }
}

/// Database row for an alias
///
/// The lifecycle state is stored as the `active` boolean
#[derive(sqlx::FromRow)]
struct AliasRow {
    id: Uuid,
    owner_id: Uuid,
    code: String,
    target_url: String,
    public_url: String,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<AliasRow> for Alias {
    fn from(row: AliasRow) -> Self {
        Self {
            id: row.id,
            owner_id: row.owner_id,
            code: row.code,
            target_url: row.target_url,
            public_url: row.public_url,
            status: if row.active {
                AliasStatus::Active
            } else {
                AliasStatus::Inactive
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl Postgres {
    /// Create Postgres storage
    ///
    /// Uses the `DATABASE_URL` environment variable
    ///
    /// Migrations will be run
    pub async fn new() -> Self {
        let database_connection_string = std::env::var("DATABASE_URL").expect("Valid DATABASE_URL");

        let connection_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_connection_string)
            .await
            .expect("Valid connection");

        let migration_result = MIGRATOR.run(&connection_pool).await;

        if let Err(err) = migration_result {
            panic!("Migrations could not run: {err}");
        }

        Self { connection_pool }
    }
}

#[async_trait::async_trait]
impl Storage for Postgres {
    async fn create_account(&self, values: &CreateAccountValues<'_>) -> Result<Account> {
        let row = sqlx::query_as::<_, AccountRow>(
            "
            INSERT INTO accounts (id, email, hashed_password, created_at)
            VALUES ($1, $2, $3, NOW())
            RETURNING id, email, hashed_password, created_at
            ",
        )
        .bind(Uuid::new_v4())
        .bind(values.email)
        .bind(values.hashed_password)
        .fetch_one(&self.connection_pool)
        .await
        .map_err(storage_error)?;

        Ok(row.into())
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            "
            SELECT id, email, hashed_password, created_at
            FROM accounts
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(&self.connection_pool)
        .await
        .map_err(storage_error)?;

        Ok(row.map(Account::from))
    }

    async fn alias_code_exists(&self, code: &str) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM aliases WHERE code = $1)",
        )
        .bind(code)
        .fetch_one(&self.connection_pool)
        .await
        .map_err(storage_error)?;

        Ok(exists)
    }

    async fn create_alias(&self, values: &CreateAliasValues<'_>) -> Result<Alias> {
        let row = sqlx::query_as::<_, AliasRow>(
            "
            INSERT INTO aliases (id, owner_id, code, target_url, public_url, active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, TRUE, NOW(), NOW())
            RETURNING id, owner_id, code, target_url, public_url, active, created_at, updated_at
            ",
        )
        .bind(Uuid::new_v4())
        .bind(values.owner_id)
        .bind(values.code)
        .bind(values.target_url)
        .bind(values.public_url)
        .fetch_one(&self.connection_pool)
        .await
        .map_err(storage_error)?;

        Ok(row.into())
    }

    async fn find_active_alias_by_code(&self, code: &str) -> Result<Option<Alias>> {
        let row = sqlx::query_as::<_, AliasRow>(
            "
            SELECT id, owner_id, code, target_url, public_url, active, created_at, updated_at
            FROM aliases
            WHERE code = $1 AND active
            ",
        )
        .bind(code)
        .fetch_optional(&self.connection_pool)
        .await
        .map_err(storage_error)?;

        Ok(row.map(Alias::from))
    }

    async fn find_alias_by_id_and_owner(
        &self,
        id: &Uuid,
        owner_id: &Uuid,
    ) -> Result<Option<Alias>> {
        let row = sqlx::query_as::<_, AliasRow>(
            "
            SELECT id, owner_id, code, target_url, public_url, active, created_at, updated_at
            FROM aliases
            WHERE id = $1 AND owner_id = $2
            ",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.connection_pool)
        .await
        .map_err(storage_error)?;

        Ok(row.map(Alias::from))
    }

    async fn list_aliases_by_owner(&self, owner_id: &Uuid) -> Result<Vec<Alias>> {
        let rows = sqlx::query_as::<_, AliasRow>(
            "
            SELECT id, owner_id, code, target_url, public_url, active, created_at, updated_at
            FROM aliases
            WHERE owner_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(owner_id)
        .fetch_all(&self.connection_pool)
        .await
        .map_err(storage_error)?;

        Ok(rows.into_iter().map(Alias::from).collect())
    }

    async fn deactivate_alias(&self, alias: &Alias) -> Result<Alias> {
        let row = sqlx::query_as::<_, AliasRow>(
            "
            UPDATE aliases
            SET active = FALSE, updated_at = NOW()
            WHERE id = $1
            RETURNING id, owner_id, code, target_url, public_url, active, created_at, updated_at
            ",
        )
        .bind(alias.id)
        .fetch_one(&self.connection_pool)
        .await
        .map_err(storage_error)?;

        Ok(row.into())
    }
}

/// Map a sqlx error onto a storage error
///
/// Unique constraint violations become [`Error::Conflict`], everything else
/// is a connection problem
fn storage_error(err: sqlx::Error) -> Error {
    let is_unique_violation = err
        .as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation());

    if is_unique_violation {
        Error::Conflict(err.to_string())
    } else {
        Error::Connection(err.to_string())
    }
}
