//! Accounts
//!
//! The identity that owns aliases; registered and authenticated through the
//! API, identified in requests by a bearer token

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

/// A registered account
#[derive(Clone, Debug)]
pub struct Account {
    /// Account ID
    pub id: Uuid,

    /// Login credential, unique across all accounts
    pub email: String,

    /// Argon2 hash of the password
    pub hashed_password: String,

    /// Creation date
    pub created_at: DateTime<Utc>,
}
