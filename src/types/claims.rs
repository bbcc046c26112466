//! Wire structures for JWT headers and claim sets

use serde::{Deserialize, Serialize};

/// JOSE header shared by bearer and wallet tokens
///
/// `kid` and `nonce` are only set on bearer tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtHeader {
    pub alg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
    pub typ: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
}

/// Claims of the API-key bearer token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BearerClaims {
    pub sub: String,
    pub iss: String,
    pub nbf: i64,
    pub iat: i64,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<Vec<String>>,
    /// Absent for websocket tokens; never serialized as `null` or `[]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uris: Option<Vec<String>>,
}

/// Claims of the wallet-auth token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletClaims {
    pub uris: Vec<String>,
    pub iat: i64,
    pub nbf: i64,
    pub jti: String,
    #[serde(
        rename = "reqHash",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub req_hash: Option<String>,
}
