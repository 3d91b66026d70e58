use std::env;
use url::Url;

use crate::constants::SANDBOX_ADDRESS;

/// Secrets shorter than this are accepted, but logged as weak.
const MIN_SECRET_LEN: usize = 8;

/// Connection settings shared by every call a client makes.
#[derive(Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Base URL of the gateway API, without the operation path
    pub address: String,
    /// Merchant identifier sent in `X-Merchant`
    pub merchant: String,
    /// Shared signing key, appended to every signature input
    pub secret: String,
}

impl std::fmt::Debug for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Configuration")
            .field("address", &self.address)
            .field("merchant", &self.merchant)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl Configuration {
    pub fn new(
        address: impl Into<String>,
        merchant: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            merchant: merchant.into(),
            secret: secret.into(),
        }
    }

    /// Configuration pointing at the gateway sandbox.
    pub fn sandbox(merchant: impl Into<String>, secret: impl Into<String>) -> Self {
        Self::new(SANDBOX_ADDRESS, merchant, secret)
    }

    /// Read `YIGIM_ADDRESS`, `YIGIM_MERCHANT` and `YIGIM_SECRET` from the
    /// process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable source.
    ///
    /// Empty values are treated as missing. The address falls back to the
    /// sandbox and must parse as an absolute URL.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|s| !s.is_empty());

        // Optional: gateway address
        let address = var("YIGIM_ADDRESS").unwrap_or_else(|| SANDBOX_ADDRESS.to_string());
        Url::parse(&address).map_err(|e| ConfigError::InvalidUrl(format!("{address}: {e}")))?;

        // Required: merchant and secret
        let merchant =
            var("YIGIM_MERCHANT").ok_or(ConfigError::MissingRequired("YIGIM_MERCHANT"))?;
        let secret = var("YIGIM_SECRET").ok_or(ConfigError::MissingRequired("YIGIM_SECRET"))?;

        if secret.len() < MIN_SECRET_LEN {
            tracing::warn!(
                "YIGIM_SECRET is only {} bytes long; verify the full merchant key was copied",
                secret.len()
            );
        }

        Ok(Self {
            address,
            merchant,
            secret,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingRequired(&'static str),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}
