//! Startup seeding.
//!
//! Ensures the role set exists and creates a configured admin identity
//! when the user store is empty. Idempotent: running it against an
//! already-seeded store changes nothing.

use std::sync::Arc;

use showcase_auth::{AuthError, NewUser, ROLE_OWNER, ROLE_VIEWER, UserStore, password};

use crate::config::BootstrapConfig;

/// What seeding actually did, for startup logging.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedStats {
    pub admin_created: bool,
}

/// Ensures roles and, on an empty store, the initial admin.
pub async fn seed_identities(
    users: &Arc<dyn UserStore>,
    config: &BootstrapConfig,
) -> Result<SeedStats, AuthError> {
    users.ensure_role(ROLE_OWNER).await?;
    users.ensure_role(ROLE_VIEWER).await?;

    let mut stats = SeedStats::default();
    if !config.enabled {
        return Ok(stats);
    }

    if users.count_users().await? == 0 {
        let password_hash = password::hash_password(&config.admin_password)
            .map_err(|e| AuthError::internal(format!("password hashing failed: {e}")))?;

        let admin = users
            .create_user(NewUser {
                email: config.admin_email.clone(),
                display_name: config.admin_display_name.clone(),
                password_hash,
            })
            .await?;
        users.assign_role(admin.id, ROLE_OWNER).await?;

        tracing::info!(email = %config.admin_email, "seeded initial admin user");
        stats.admin_created = true;
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use showcase_auth::InMemoryUserStore;

    fn store() -> Arc<dyn UserStore> {
        Arc::new(InMemoryUserStore::new())
    }

    #[tokio::test]
    async fn seeds_admin_into_empty_store() {
        let users = store();
        let stats = seed_identities(&users, &BootstrapConfig::default())
            .await
            .unwrap();

        assert!(stats.admin_created);
        let admin = users
            .find_by_email("admin@example.com")
            .await
            .unwrap()
            .unwrap();
        assert!(admin.has_role(ROLE_OWNER));
    }

    #[tokio::test]
    async fn seeding_twice_is_idempotent() {
        let users = store();
        let cfg = BootstrapConfig::default();

        let first = seed_identities(&users, &cfg).await.unwrap();
        let second = seed_identities(&users, &cfg).await.unwrap();

        assert!(first.admin_created);
        assert!(!second.admin_created);
        assert_eq!(users.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn disabled_bootstrap_still_ensures_roles() {
        let users = store();
        let cfg = BootstrapConfig {
            enabled: false,
            ..BootstrapConfig::default()
        };

        let stats = seed_identities(&users, &cfg).await.unwrap();
        assert!(!stats.admin_created);
        assert_eq!(users.count_users().await.unwrap(), 0);

        // Roles exist, so assignment to a later user succeeds.
        let user = users
            .create_user(NewUser {
                email: "ada@example.com".to_string(),
                display_name: "Ada".to_string(),
                password_hash: "$argon2id$stub".to_string(),
            })
            .await
            .unwrap();
        assert!(users.assign_role(user.id, ROLE_VIEWER).await.is_ok());
    }
}
