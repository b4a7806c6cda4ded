//! Aliases
//!
//! The central entity: a short code mapping to a target URL, owned by a
//! single account

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

/// Lifecycle state of an alias
///
/// An alias starts out `Active` and is moved to `Inactive` at most once;
/// inactive aliases no longer resolve but keep their code reserved forever.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AliasStatus {
    /// Resolvable for redirects
    Active,

    /// Deactivated, no longer resolvable
    Inactive,
}

impl AliasStatus {
    /// Does this state resolve for redirects?
    pub fn is_active(self) -> bool {
        matches!(self, AliasStatus::Active)
    }
}

/// A short alias for a long URL
#[derive(Clone, Debug)]
pub struct Alias {
    /// Alias ID
    pub id: Uuid,

    /// The ID of the account that created it
    pub owner_id: Uuid,

    /// The short code, unique across all aliases ever created
    pub code: String,

    /// The URL the alias redirects to, as given by the creator
    pub target_url: String,

    /// Public short link, composed from the base URL and the code
    pub public_url: String,

    /// Lifecycle state
    pub status: AliasStatus,

    /// Creation date
    pub created_at: DateTime<Utc>,

    /// Last updated at, only refreshed by deactivation
    pub updated_at: DateTime<Utc>,
}

impl Alias {
    /// Does the alias resolve for redirects?
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_is_active() {
        assert!(AliasStatus::Active.is_active());
        assert!(!AliasStatus::Inactive.is_active());
    }
}
