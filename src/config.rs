//! Credential and token configuration

use crate::generator::TokenGenerator;
use crate::types::{env as env_vars, hosts, jwt};
use crate::{CdpAuthError, Result};
use std::env;
use url::Url;

/// Configuration for token generation
#[derive(Clone)]
pub struct CdpConfig {
    /// API key id (the `kid` header and `sub` claim)
    pub api_key_id: String,
    /// API key secret: PEM EC key or base64 Ed25519 key
    pub api_key_secret: String,
    /// Base64 DER wallet secret
    pub wallet_secret: Option<String>,
    /// Base URL of the platform API
    pub base_path: String,
    /// Bearer token lifetime in seconds
    pub expires_in: Option<i64>,
    /// Audience claim values
    pub audience: Vec<String>,
}

impl std::fmt::Debug for CdpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CdpConfig")
            .field("api_key_id", &self.api_key_id)
            .field("api_key_secret", &"<redacted>")
            .field("wallet_secret", &self.wallet_secret.as_ref().map(|_| "<redacted>"))
            .field("base_path", &self.base_path)
            .field("expires_in", &self.expires_in)
            .field("audience", &self.audience)
            .finish()
    }
}

impl CdpConfig {
    /// Create a new config with explicit credentials
    pub fn new(api_key_id: impl Into<String>, api_key_secret: impl Into<String>) -> Self {
        Self {
            api_key_id: api_key_id.into(),
            api_key_secret: api_key_secret.into(),
            wallet_secret: None,
            base_path: hosts::DEFAULT_BASE_PATH.to_string(),
            expires_in: None,
            audience: Vec::new(),
        }
    }

    /// Load the config from `CDP_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load the config from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let api_key_id = non_empty(env_vars::API_KEY_ID).ok_or_else(|| {
            CdpAuthError::config(format!("Missing credentials: {} must be set", env_vars::API_KEY_ID))
        })?;
        let api_key_secret = non_empty(env_vars::API_KEY_SECRET).ok_or_else(|| {
            CdpAuthError::config(format!(
                "Missing credentials: {} must be set",
                env_vars::API_KEY_SECRET
            ))
        })?;

        let mut config = Self::new(api_key_id, api_key_secret);

        if let Some(wallet_secret) = non_empty(env_vars::WALLET_SECRET) {
            config = config.with_wallet_secret(wallet_secret);
        }
        if let Some(base_path) = non_empty(env_vars::BASE_PATH) {
            config = config.with_base_path(base_path);
        }
        if let Some(expires_in) = non_empty(env_vars::EXPIRES_IN) {
            let seconds = expires_in.trim().parse::<i64>().map_err(|e| {
                CdpAuthError::config(format!(
                    "{} must be an integer number of seconds: {}",
                    env_vars::EXPIRES_IN,
                    e
                ))
            })?;
            config = config.with_expires_in(seconds);
        }
        if let Some(audience) = non_empty(env_vars::AUDIENCE) {
            config = config.with_audience(
                audience
                    .split(',')
                    .map(str::trim)
                    .filter(|value| !value.is_empty())
                    .map(String::from)
                    .collect(),
            );
        }

        config.validate()?;
        Ok(config)
    }

    /// Set the wallet secret
    pub fn with_wallet_secret(mut self, wallet_secret: impl Into<String>) -> Self {
        self.wallet_secret = Some(wallet_secret.into());
        self
    }

    /// Set the base URL of the platform API
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// Set the bearer token lifetime
    pub fn with_expires_in(mut self, expires_in: i64) -> Self {
        self.expires_in = Some(expires_in);
        self
    }

    /// Set the audience claim
    pub fn with_audience(mut self, audience: Vec<String>) -> Self {
        self.audience = audience;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_key_id.trim().is_empty() {
            return Err(CdpAuthError::config("API key id cannot be empty"));
        }

        if self.api_key_secret.trim().is_empty() {
            return Err(CdpAuthError::config("API key secret cannot be empty"));
        }

        self.host()?;

        Ok(())
    }

    /// Host (with port, if any) of the base path
    pub fn host(&self) -> Result<String> {
        let url = Url::parse(&self.base_path).map_err(|e| {
            CdpAuthError::config(format!("invalid base path '{}': {}", self.base_path, e))
        })?;
        let host = url.host_str().ok_or_else(|| {
            CdpAuthError::config(format!("base path '{}' has no host", self.base_path))
        })?;

        Ok(match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        })
    }

    /// Effective bearer token lifetime; unset or non-positive means the default
    pub fn effective_expires_in(&self) -> i64 {
        match self.expires_in {
            Some(seconds) if seconds > 0 => seconds,
            _ => jwt::DEFAULT_EXPIRES_IN,
        }
    }

    /// Build a token generator from this config
    pub fn into_generator(self) -> Result<TokenGenerator> {
        self.validate()?;
        let expires_in = self.effective_expires_in();
        let host = self.host()?;

        let mut generator = TokenGenerator::new(self.api_key_id, self.api_key_secret)?
            .with_default_host(host)
            .with_expires_in(expires_in)
            .with_audience(self.audience);
        if let Some(wallet_secret) = self.wallet_secret {
            generator = generator.with_wallet_secret(wallet_secret);
        }

        tracing::debug!(
            api_key_id = generator.api_key_id(),
            host = generator.default_host(),
            expires_in,
            wallet_auth = generator.has_wallet_secret(),
            "Configured token generator"
        );

        Ok(generator)
    }
}
