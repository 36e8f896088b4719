use uuid::Uuid;

use crate::storage::user::ROLE_OWNER;
use crate::token::jwt::AccessTokenClaims;

/// The validated identity attached to a request.
///
/// Built only from verified token claims; handlers receiving one may
/// assume signature and expiry already checked out.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub subject: Uuid,
    pub email: String,
    pub display_name: String,
    pub roles: Vec<String>,
}

impl AuthContext {
    /// True if the caller carries the given role.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// True if the caller may create and delete catalog entries.
    pub fn is_owner(&self) -> bool {
        self.has_role(ROLE_OWNER)
    }
}

impl From<AccessTokenClaims> for AuthContext {
    fn from(claims: AccessTokenClaims) -> Self {
        Self {
            subject: claims.sub,
            email: claims.email,
            display_name: claims.name,
            roles: claims.roles,
        }
    }
}
