//! User storage trait.
//!
//! Defines the interface for identity persistence. Implementations are
//! provided by storage backends; an in-memory one lives in
//! [`crate::storage::memory`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::AuthResult;

/// Role allowed to create and delete catalog entries.
pub const ROLE_OWNER: &str = "Owner";

/// Reserved read-only role. Created and assignable, but reads are
/// currently open to everyone, so nothing is gated on it yet.
pub const ROLE_VIEWER: &str = "Viewer";

/// An identity in the authentication system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, assigned by the store at creation.
    pub id: Uuid,

    /// Email address, unique case-insensitively.
    pub email: String,

    /// Name shown to other users and embedded in tokens.
    pub display_name: String,

    /// Argon2id PHC-format password hash.
    ///
    /// Never expose this field through an API response.
    pub password_hash: String,

    /// Assigned role names.
    #[serde(default)]
    pub roles: Vec<String>,

    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl User {
    /// True if the user carries the given role.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// Fields for a new identity. The caller hashes the password before
/// constructing this; plaintext never reaches the store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
}

/// The credential store behind the token issuer.
///
/// Implementations must be thread-safe (`Send + Sync`).
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Creates a new identity.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` if the email is already registered.
    async fn create_user(&self, new_user: NewUser) -> AuthResult<User>;

    /// Looks up an identity by email, case-insensitively.
    ///
    /// Returns `None` if no such identity exists.
    async fn find_by_email(&self, email: &str) -> AuthResult<Option<User>>;

    /// Ensures a role exists. Idempotent.
    async fn ensure_role(&self, role: &str) -> AuthResult<()>;

    /// Assigns a role to an identity. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the user or role does not exist.
    async fn assign_role(&self, user_id: Uuid, role: &str) -> AuthResult<()>;

    /// Number of stored identities.
    async fn count_users(&self) -> AuthResult<usize>;
}
