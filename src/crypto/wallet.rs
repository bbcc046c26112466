//! Wallet-auth JWT generation
//!
//! Wallet tokens authorize state-changing wallet operations. They are always ES256,
//! always carry a single `uris` entry, and bind the request body through `reqHash`.

use super::canonical::hash_request;
use super::entropy::{random_uuid, Clock, OsSecureRandom, SecureRandom, SystemClock};
use super::jwt::encode_compact;
use super::keys::{parse_wallet_secret, KeyMaterial};
use crate::error::TokenKind;
use crate::types::{algorithms, format_uri, jwt, JwtHeader, RequestBody, WalletClaims};
use crate::{CdpAuthError, Result};

/// Options for wallet-auth JWT generation
#[derive(Clone)]
pub struct WalletJwtOptions {
    pub wallet_secret: String,
    pub request_method: String,
    pub request_host: String,
    pub request_path: String,
    pub request_data: RequestBody,
}

impl std::fmt::Debug for WalletJwtOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletJwtOptions")
            .field("wallet_secret", &"<redacted>")
            .field("request_method", &self.request_method)
            .field("request_host", &self.request_host)
            .field("request_path", &self.request_path)
            .field("request_data", &self.request_data)
            .finish()
    }
}

impl WalletJwtOptions {
    pub fn new(
        wallet_secret: impl Into<String>,
        request_method: impl Into<String>,
        request_host: impl Into<String>,
        request_path: impl Into<String>,
    ) -> Self {
        Self {
            wallet_secret: wallet_secret.into(),
            request_method: request_method.into(),
            request_host: request_host.into(),
            request_path: request_path.into(),
            request_data: RequestBody::new(),
        }
    }

    /// Set the request body bound by `reqHash`
    pub fn with_request_data(mut self, request_data: RequestBody) -> Self {
        self.request_data = request_data;
        self
    }
}

/// Generate a wallet-auth JWT
pub fn generate_wallet_jwt(options: &WalletJwtOptions) -> Result<String> {
    generate_wallet_jwt_with(options, &SystemClock, &OsSecureRandom)
}

/// Generate a wallet-auth JWT with explicit time and randomness sources
pub fn generate_wallet_jwt_with(
    options: &WalletJwtOptions,
    clock: &dyn Clock,
    rng: &dyn SecureRandom,
) -> Result<String> {
    let key = parse_wallet_secret(&options.wallet_secret)?;
    sign_wallet_token(
        &key,
        &options.request_method,
        &options.request_host,
        &options.request_path,
        Some(&options.request_data),
        clock,
        rng,
    )
}

/// Build a wallet-auth JWT from a base64 DER wallet secret
pub fn build_wallet_token(
    wallet_secret: &str,
    method: &str,
    host: &str,
    path: &str,
    body: Option<&RequestBody>,
) -> Result<String> {
    let key = parse_wallet_secret(wallet_secret)?;
    sign_wallet_token(&key, method, host, path, body, &SystemClock, &OsSecureRandom)
}

/// Sign a wallet-auth JWT with an already parsed wallet key
pub fn sign_wallet_token(
    key: &KeyMaterial,
    method: &str,
    host: &str,
    path: &str,
    body: Option<&RequestBody>,
    clock: &dyn Clock,
    rng: &dyn SecureRandom,
) -> Result<String> {
    if !key.is_ec() {
        return Err(CdpAuthError::InvalidWalletSecretFormat(
            "wallet secret must be an EC P-256 key".to_string(),
        ));
    }
    if method.is_empty() || host.is_empty() || path.is_empty() {
        return Err(CdpAuthError::invalid_request(
            "request method, host and path are required for wallet auth tokens",
        ));
    }

    let req_hash = match body {
        Some(body) => hash_request(body)?,
        None => None,
    };

    let now = clock.now();
    let claims = WalletClaims {
        uris: vec![format_uri(method, host, path)],
        iat: now,
        nbf: now,
        jti: random_uuid(rng)?.to_string(),
        req_hash,
    };

    let header = JwtHeader {
        alg: algorithms::ES256.to_string(),
        kid: None,
        typ: jwt::TYPE.to_string(),
        nonce: None,
    };

    let token = encode_compact(&header, &claims, key, TokenKind::Wallet)?;

    tracing::debug!(
        method,
        path,
        req_hash = claims.req_hash.is_some(),
        "Generated wallet auth token"
    );

    Ok(token)
}
