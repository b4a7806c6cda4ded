//! All things related to the storage of accounts and aliases
//!
//! The store is the single authority over the two global uniqueness domains:
//! the alias code namespace and the account email namespace. Both are
//! enforced atomically inside the store, violations surface as
//! [`Error::Conflict`].

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::accounts::Account;
use crate::aliases::Alias;

#[cfg(not(feature = "postgres"))]
use memory::Memory;
#[cfg(feature = "postgres")]
use postgres::Postgres;

#[cfg(not(feature = "postgres"))]
mod memory;
#[cfg(feature = "postgres")]
mod postgres;

/// Setup the storage
#[cfg(not(feature = "postgres"))]
#[allow(clippy::unused_async)]
pub async fn setup() -> Memory {
    Memory::new()
}

/// Setup the storage
#[cfg(feature = "postgres")]
pub async fn setup() -> Postgres {
    Postgres::new().await
}

/// Storage errors
#[derive(Debug, Error)]
pub enum Error {
    /// A connection error with the storage
    #[error("Connection error: {0}")]
    Connection(String),

    /// A uniqueness constraint was violated
    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Result type for all storage interactions
pub type Result<T> = core::result::Result<T, Error>;

/// Values to create an Account
pub struct CreateAccountValues<'a> {
    /// Login credential, must be unique
    pub email: &'a str,

    /// Argon2 hash of the password
    pub hashed_password: &'a str,
}

/// Values to create an Alias
pub struct CreateAliasValues<'a> {
    /// The account creating the alias
    pub owner_id: &'a Uuid,

    /// Candidate short code, must be unique
    pub code: &'a str,

    /// The URL the alias redirects to
    pub target_url: &'a str,

    /// Public short link
    pub public_url: &'a str,
}

/// Storage with all supported operations
#[async_trait]
pub trait Storage: Clone + Send + Sync + 'static {
    /// Create a single account
    ///
    /// Fails with [`Error::Conflict`] when the email is already registered
    async fn create_account(&self, values: &CreateAccountValues<'_>) -> Result<Account>;

    /// Find a single account by its email
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>>;

    /// Is a code already taken by any alias, active or not?
    async fn alias_code_exists(&self, code: &str) -> Result<bool>;

    /// Create an alias with its id and timestamps assigned
    ///
    /// Fails with [`Error::Conflict`] when the code is already taken; the
    /// check and the insert happen atomically, concurrent creations of the
    /// same code can not both succeed
    async fn create_alias(&self, values: &CreateAliasValues<'_>) -> Result<Alias>;

    /// Find an active alias by its code
    ///
    /// Owner-agnostic on purpose, redirects are public; inactive aliases are
    /// not returned
    async fn find_active_alias_by_code(&self, code: &str) -> Result<Option<Alias>>;

    /// Find an alias by its ID, scoped to an owner
    async fn find_alias_by_id_and_owner(&self, id: &Uuid, owner_id: &Uuid)
    -> Result<Option<Alias>>;

    /// Find all aliases of an owner, newest-created first
    async fn list_aliases_by_owner(&self, owner_id: &Uuid) -> Result<Vec<Alias>>;

    /// Move an alias to the inactive state and refresh its `updated_at`
    async fn deactivate_alias(&self, alias: &Alias) -> Result<Alias>;
}
