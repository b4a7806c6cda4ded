//! The alias lifecycle engine
//!
//! Owns all business invariants: target URL validation, unique code
//! generation under collision risk, activation state, ownership isolation
//! and redirect resolution. The HTTP layer only translates.

use thiserror::Error;
use url::Url;
use uuid::Uuid;

use crate::aliases::Alias;
use crate::codes;
use crate::storage;
use crate::storage::CreateAliasValues;
use crate::storage::Storage;

/// Hard ceiling on code generation rounds for a single creation
///
/// With 62^7 possible codes this is effectively unreachable; hitting it
/// means the alphabet/length is under-provisioned for the current load.
const MAX_GENERATION_ATTEMPTS: usize = 10;

/// Longest accepted target URL
const MAX_TARGET_URL_LENGTH: usize = 2048;

/// Service errors
#[derive(Debug, Error)]
pub enum Error {
    /// The target URL does not qualify for shortening
    #[error("{0}")]
    InvalidTarget(String),

    /// No unique code could be generated within the attempt ceiling
    #[error("Unable to generate unique short code after {0} attempts")]
    CodeSpaceExhausted(usize),

    /// No alias for the given code or (id, owner) pair
    ///
    /// Deliberately covers both "does not exist" and "owned by someone
    /// else", existence must not leak across accounts
    #[error("Short URL not found")]
    NotFound,

    /// The storage failed
    #[error(transparent)]
    Storage(#[from] storage::Error),
}

/// Result type for all service interactions
pub type Result<T> = core::result::Result<T, Error>;

/// Orchestrates the alias lifecycle on top of a [`Storage`]
#[derive(Clone)]
pub struct AliasService<S> {
    /// The store holding accounts and aliases
    storage: S,

    /// Base URL public short links are composed from
    base_url: String,
}

impl<S: Storage> AliasService<S> {
    /// Create a new service on top of a store
    pub fn new(storage: S, base_url: String) -> Self {
        Self { storage, base_url }
    }

    /// Create an alias for a target URL, owned by the given account
    ///
    /// The target is validated first, then codes are generated until one is
    /// free. Two concurrent creations can both pass the existence pre-check
    /// with the same candidate; the store rejects the loser with a conflict,
    /// which counts as a failed attempt and triggers another round.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidTarget`] when the URL is unparsable, longer than
    ///   2048 characters, not http/https, or has no host
    /// - [`Error::CodeSpaceExhausted`] after 10 fruitless attempts
    pub async fn create_alias(&self, owner_id: &Uuid, target_url: &str) -> Result<Alias> {
        validate_target_url(target_url)?;

        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let code = codes::generate(codes::DEFAULT_LENGTH);

            if self.storage.alias_code_exists(&code).await? {
                continue;
            }

            let values = CreateAliasValues {
                owner_id,
                code: &code,
                target_url,
                public_url: &format!("{}/r/{code}", self.base_url),
            };

            match self.storage.create_alias(&values).await {
                Ok(alias) => return Ok(alias),
                // lost the race for this code, try another one
                Err(storage::Error::Conflict(_)) => continue,
                Err(err) => return Err(err.into()),
            }
        }

        Err(Error::CodeSpaceExhausted(MAX_GENERATION_ATTEMPTS))
    }

    /// All aliases of an owner, newest-created first
    pub async fn list_aliases(&self, owner_id: &Uuid) -> Result<Vec<Alias>> {
        Ok(self.storage.list_aliases_by_owner(owner_id).await?)
    }

    /// Deactivate an alias, scoped to its owner
    ///
    /// Idempotent: deactivating an already inactive alias succeeds without
    /// touching the record
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when no alias with this ID is owned by the given
    /// account, whether it exists for someone else or not at all
    pub async fn deactivate(&self, alias_id: &Uuid, owner_id: &Uuid) -> Result<Alias> {
        let alias = self
            .storage
            .find_alias_by_id_and_owner(alias_id, owner_id)
            .await?
            .ok_or(Error::NotFound)?;

        if !alias.is_active() {
            return Ok(alias);
        }

        Ok(self.storage.deactivate_alias(&alias).await?)
    }

    /// Resolve a code to its alias for a redirect
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] for unknown and inactive codes alike
    pub async fn resolve(&self, code: &str) -> Result<Alias> {
        self.storage
            .find_active_alias_by_code(code)
            .await?
            .ok_or(Error::NotFound)
    }
}

/// Check that a target URL qualifies for shortening
///
/// The raw string is stored as-is when it qualifies; parsing is only used
/// for validation
fn validate_target_url(target_url: &str) -> Result<()> {
    if target_url.len() > MAX_TARGET_URL_LENGTH {
        return Err(Error::InvalidTarget(format!(
            "URL must not be longer than {MAX_TARGET_URL_LENGTH} characters"
        )));
    }

    let url = Url::parse(target_url)
        .map_err(|_| Error::InvalidTarget("Invalid URL format".to_string()))?;

    // `Url` lowercases the scheme while parsing
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::InvalidTarget(
            "URL must use http or https scheme".to_string(),
        ));
    }

    if !url.host_str().is_some_and(|host| !host.is_empty()) {
        return Err(Error::InvalidTarget(
            "URL must include a valid host".to_string(),
        ));
    }

    Ok(())
}
