use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Authentication configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared HMAC signing key for access tokens.
    #[serde(default = "default_signing_key")]
    pub signing_key: String,

    /// Access-token validity window in seconds.
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,

    /// Clock-skew allowance when validating token expiry, in seconds.
    #[serde(default = "default_leeway_secs")]
    pub leeway_secs: u64,
}

fn default_signing_key() -> String {
    // Development fallback; deployments override via config or
    // SHOWCASE__AUTH__SIGNING_KEY.
    "dev_secret_key_please_change".to_string()
}

fn default_token_ttl_secs() -> u64 {
    7200
}

fn default_leeway_secs() -> u64 {
    120
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            signing_key: default_signing_key(),
            token_ttl_secs: default_token_ttl_secs(),
            leeway_secs: default_leeway_secs(),
        }
    }
}

impl AuthConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.signing_key.is_empty() {
            return Err("auth.signing_key must not be empty".into());
        }
        if self.token_ttl_secs == 0 {
            return Err("auth.token_ttl_secs must be > 0".into());
        }
        Ok(())
    }

    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs)
    }
}
