//! JWT utilities for API key authentication
//!
//! Bearer tokens are compact JWS strings signed with the API key. The algorithm follows
//! from the key kind: ES256 for P-256 keys, EdDSA for Ed25519 keys. Every token carries a
//! fresh 16-byte `nonce` header so identical requests never produce identical tokens.

use super::entropy::{random_hex, Clock, OsSecureRandom, SecureRandom, SystemClock};
use super::keys::{parse_key, KeyMaterial};
use crate::error::TokenKind;
use crate::types::{jwt, BearerClaims, JwtHeader, JwtRequestContext};
use crate::{CdpAuthError, Result};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::Serialize;

/// JWT options for API key authentication
#[derive(Clone)]
pub struct JwtOptions {
    pub key_id: String,
    pub key_secret: String,
    pub request: JwtRequestContext,
    /// Lifetime in seconds; unset or non-positive means [`jwt::DEFAULT_EXPIRES_IN`]
    pub expires_in: Option<i64>,
    pub audience: Vec<String>,
}

impl std::fmt::Debug for JwtOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtOptions")
            .field("key_id", &self.key_id)
            .field("key_secret", &"<redacted>")
            .field("request", &self.request)
            .field("expires_in", &self.expires_in)
            .field("audience", &self.audience)
            .finish()
    }
}

impl JwtOptions {
    /// Create options for a websocket token; add a request with [`JwtOptions::with_request`]
    pub fn new(key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret: key_secret.into(),
            request: JwtRequestContext::websocket(),
            expires_in: None,
            audience: Vec::new(),
        }
    }

    /// Set the REST request the token authorizes
    pub fn with_request(
        mut self,
        method: impl Into<String>,
        host: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        self.request = JwtRequestContext::rest(method, host, path);
        self
    }

    /// Set the request context directly
    pub fn with_request_context(mut self, request: JwtRequestContext) -> Self {
        self.request = request;
        self
    }

    /// Set the token lifetime in seconds
    pub fn with_expires_in(mut self, expires_in: i64) -> Self {
        self.expires_in = Some(expires_in);
        self
    }

    /// Set the audience claim
    pub fn with_audience(mut self, audience: Vec<String>) -> Self {
        self.audience = audience;
        self
    }

    /// Lifetime actually applied
    pub fn effective_expires_in(&self) -> i64 {
        effective_expires_in(self.expires_in)
    }
}

fn effective_expires_in(expires_in: Option<i64>) -> i64 {
    match expires_in {
        Some(seconds) if seconds > 0 => seconds,
        _ => jwt::DEFAULT_EXPIRES_IN,
    }
}

/// Generate a bearer JWT for API key authentication
pub fn generate_jwt(options: &JwtOptions) -> Result<String> {
    generate_jwt_with(options, &SystemClock, &OsSecureRandom)
}

/// Generate a bearer JWT with explicit time and randomness sources
pub fn generate_jwt_with(
    options: &JwtOptions,
    clock: &dyn Clock,
    rng: &dyn SecureRandom,
) -> Result<String> {
    if options.key_id.trim().is_empty() {
        return Err(CdpAuthError::MissingKeyId);
    }
    if options.key_secret.trim().is_empty() {
        return Err(CdpAuthError::MissingKeySecret);
    }
    options.request.uri()?;

    let key = parse_key(&options.key_secret)?;

    BearerTokenBuilder::new(&options.key_id, &key)
        .request(&options.request)
        .expires_in(options.expires_in)
        .audience(&options.audience)
        .clock(clock)
        .random(rng)
        .build()
}

/// Build a bearer JWT from an already parsed key, using the system clock and CSPRNG
pub fn build_bearer_token(
    key_id: &str,
    key: &KeyMaterial,
    context: &JwtRequestContext,
    expires_in: Option<i64>,
    audience: &[String],
) -> Result<String> {
    BearerTokenBuilder::new(key_id, key)
        .request(context)
        .expires_in(expires_in)
        .audience(audience)
        .build()
}

/// Step-by-step bearer token construction
pub struct BearerTokenBuilder<'a> {
    key_id: &'a str,
    key: &'a KeyMaterial,
    context: Option<&'a JwtRequestContext>,
    expires_in: Option<i64>,
    audience: &'a [String],
    clock: &'a dyn Clock,
    rng: &'a dyn SecureRandom,
}

impl<'a> BearerTokenBuilder<'a> {
    /// Start a websocket token for `key_id`
    pub fn new(key_id: &'a str, key: &'a KeyMaterial) -> Self {
        Self {
            key_id,
            key,
            context: None,
            expires_in: None,
            audience: &[],
            clock: &SystemClock,
            rng: &OsSecureRandom,
        }
    }

    pub fn request(mut self, context: &'a JwtRequestContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn expires_in(mut self, expires_in: Option<i64>) -> Self {
        self.expires_in = expires_in;
        self
    }

    pub fn audience(mut self, audience: &'a [String]) -> Self {
        self.audience = audience;
        self
    }

    pub fn clock(mut self, clock: &'a dyn Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn random(mut self, rng: &'a dyn SecureRandom) -> Self {
        self.rng = rng;
        self
    }

    /// Validate, assemble claims, sign and serialize
    pub fn build(&self) -> Result<String> {
        if self.key_id.trim().is_empty() {
            return Err(CdpAuthError::MissingKeyId);
        }
        let uri = match self.context {
            Some(context) => context.uri()?,
            None => None,
        };

        let now = self.clock.now();
        let expires_in = effective_expires_in(self.expires_in);
        let exp = now.checked_add(expires_in).ok_or_else(|| {
            CdpAuthError::invalid_request(format!(
                "token lifetime of {} seconds overflows the expiry timestamp",
                expires_in
            ))
        })?;
        let has_uri = uri.is_some();

        let claims = BearerClaims {
            sub: self.key_id.to_string(),
            iss: jwt::ISSUER.to_string(),
            nbf: now,
            iat: now,
            exp,
            aud: (!self.audience.is_empty()).then(|| self.audience.to_vec()),
            uris: uri.map(|uri| vec![uri]),
        };

        let header = JwtHeader {
            alg: self.key.algorithm_name().to_string(),
            kid: Some(self.key_id.to_string()),
            typ: jwt::TYPE.to_string(),
            nonce: Some(random_hex(self.rng, jwt::NONCE_BYTES)?),
        };

        let token = encode_compact(&header, &claims, self.key, TokenKind::Bearer)?;

        tracing::debug!(
            key_id = %self.key_id,
            algorithm = self.key.algorithm_name(),
            websocket = !has_uri,
            expires_in,
            "Generated bearer token"
        );

        Ok(token)
    }
}

/// Serialize header and claims and sign them into `header.payload.signature`
pub(crate) fn encode_compact<C: Serialize>(
    header: &JwtHeader,
    claims: &C,
    key: &KeyMaterial,
    token: TokenKind,
) -> Result<String> {
    let header_segment = URL_SAFE_NO_PAD.encode(serde_json::to_vec(header)?);
    let claims_segment = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims)?);
    let signing_input = format!("{}.{}", header_segment, claims_segment);

    let encoding_key = key.encoding_key(token)?;
    let signature =
        jsonwebtoken::crypto::sign(signing_input.as_bytes(), &encoding_key, key.algorithm())
            .map_err(|e| CdpAuthError::signing(token, key.algorithm_name(), e))?;

    Ok(format!("{}.{}", signing_input, signature))
}

/// Create an authorization header value for a REST request
pub fn create_auth_header(
    api_key_id: &str,
    api_key_secret: &str,
    request_method: &str,
    request_host: &str,
    request_path: &str,
) -> Result<String> {
    let options = JwtOptions::new(api_key_id, api_key_secret).with_request(
        request_method,
        request_host,
        request_path,
    );

    let token = generate_jwt(&options)?;
    Ok(format!("Bearer {}", token))
}
