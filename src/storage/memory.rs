//! Memory storage
//!
//! Will be destroyed on system shutdown

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::accounts::Account;
use crate::aliases::Alias;
use crate::aliases::AliasStatus;

use super::CreateAccountValues;
use super::CreateAliasValues;
use super::Error;
use super::Result;
use super::Storage;

/// An in-memory storage
///
/// Will be destroyed on system shutdown
#[derive(Clone, Debug)]
pub struct Memory {
    /// All accounts in storage
    accounts: Arc<Mutex<HashMap<Uuid, Account>>>,

    /// All aliases in storage
    aliases: Arc<Mutex<HashMap<Uuid, Alias>>>,
}

impl Memory {
    /// Create a new empty Memory storage
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(Mutex::new(HashMap::new())),
            aliases: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait::async_trait]
impl Storage for Memory {
    async fn create_account(&self, values: &CreateAccountValues<'_>) -> Result<Account> {
        // uniqueness check and insert under a single lock
        let mut accounts = self.accounts.lock().await;

        if accounts
            .values()
            .any(|account| account.email == values.email)
        {
            return Err(Error::Conflict(format!(
                r#"email "{}" is already registered"#,
                values.email
            )));
        }

        let account = Account {
            id: Uuid::new_v4(),
            email: values.email.to_string(),
            hashed_password: values.hashed_password.to_string(),
            created_at: Utc::now(),
        };

        accounts.insert(account.id, account.clone());

        Ok(account)
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>> {
        Ok(self
            .accounts
            .lock()
            .await
            .values()
            .find(|account| account.email == email)
            .cloned())
    }

    async fn alias_code_exists(&self, code: &str) -> Result<bool> {
        Ok(self
            .aliases
            .lock()
            .await
            .values()
            .any(|alias| alias.code == code))
    }

    async fn create_alias(&self, values: &CreateAliasValues<'_>) -> Result<Alias> {
        // uniqueness check and insert under a single lock
        let mut aliases = self.aliases.lock().await;

        if aliases.values().any(|alias| alias.code == values.code) {
            return Err(Error::Conflict(format!(
                r#"code "{}" is already taken"#,
                values.code
            )));
        }

        let now = Utc::now();
        let alias = Alias {
            id: Uuid::new_v4(),
            owner_id: *values.owner_id,
            code: values.code.to_string(),
            target_url: values.target_url.to_string(),
            public_url: values.public_url.to_string(),
            status: AliasStatus::Active,
            created_at: now,
            updated_at: now,
        };

        aliases.insert(alias.id, alias.clone());

        Ok(alias)
    }

    async fn find_active_alias_by_code(&self, code: &str) -> Result<Option<Alias>> {
        Ok(self
            .aliases
            .lock()
            .await
            .values()
            .find(|alias| alias.code == code && alias.is_active())
            .cloned())
    }

    async fn find_alias_by_id_and_owner(
        &self,
        id: &Uuid,
        owner_id: &Uuid,
    ) -> Result<Option<Alias>> {
        Ok(self
            .aliases
            .lock()
            .await
            .get(id)
            .filter(|alias| &alias.owner_id == owner_id)
            .cloned())
    }

    async fn list_aliases_by_owner(&self, owner_id: &Uuid) -> Result<Vec<Alias>> {
        let mut aliases = self
            .aliases
            .lock()
            .await
            .values()
            .filter(|alias| &alias.owner_id == owner_id)
            .cloned()
            .collect::<Vec<Alias>>();

        aliases.sort_by(|left, right| right.created_at.cmp(&left.created_at));

        Ok(aliases)
    }

    async fn deactivate_alias(&self, alias: &Alias) -> Result<Alias> {
        Ok(self
            .aliases
            .lock()
            .await
            .get_mut(&alias.id)
            .map(|alias| {
                alias.status = AliasStatus::Inactive;
                alias.updated_at = Utc::now();

                alias.clone()
            })
            .expect("HashMap is the source of the alias"))
    }
}
