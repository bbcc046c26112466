//! Common constants for tokens, hosts and headers

/// JWT claim and header constants
pub mod jwt {
    /// Issuer claim carried by every bearer token
    pub const ISSUER: &str = "cdp";
    /// Default bearer token lifetime in seconds
    pub const DEFAULT_EXPIRES_IN: i64 = 120;
    /// `typ` header value
    pub const TYPE: &str = "JWT";
    /// Number of random bytes in a bearer nonce (hex-encoded to 32 chars)
    pub const NONCE_BYTES: usize = 16;
}

/// Signing algorithm identifiers as they appear in the `alg` header
pub mod algorithms {
    /// ECDSA over P-256 with SHA-256
    pub const ES256: &str = "ES256";
    /// Ed25519
    pub const EDDSA: &str = "EdDSA";
}

/// API hosts
pub mod hosts {
    /// Default request host used in the `uris` claim
    pub const DEFAULT_HOST: &str = "api.cdp.coinbase.com";
    /// Default base path of the platform API
    pub const DEFAULT_BASE_PATH: &str = "https://api.cdp.coinbase.com/platform";
}

/// HTTP header names attached by the consuming HTTP layer
pub mod headers {
    /// Bearer token header
    pub const AUTHORIZATION: &str = "Authorization";
    /// Wallet-auth token header
    pub const WALLET_AUTH: &str = "X-Wallet-Auth";
    /// SDK correlation header
    pub const CORRELATION_CONTEXT: &str = "Correlation-Context";
}

/// HTTP methods accepted in a request description
pub mod methods {
    pub const GET: &str = "GET";
    pub const POST: &str = "POST";
    pub const PUT: &str = "PUT";
    pub const DELETE: &str = "DELETE";
    pub const PATCH: &str = "PATCH";

    /// Check if a method (already upper-cased) is supported
    pub fn is_supported(method: &str) -> bool {
        matches!(method, GET | POST | PUT | DELETE | PATCH)
    }

    /// Get all supported methods
    pub fn all_supported() -> Vec<&'static str> {
        vec![GET, POST, PUT, DELETE, PATCH]
    }
}

/// Environment variables read by [`crate::config::CdpConfig::from_env`]
pub mod env {
    pub const API_KEY_ID: &str = "CDP_API_KEY_ID";
    pub const API_KEY_SECRET: &str = "CDP_API_KEY_SECRET";
    pub const WALLET_SECRET: &str = "CDP_WALLET_SECRET";
    pub const BASE_PATH: &str = "CDP_BASE_PATH";
    pub const EXPIRES_IN: &str = "CDP_JWT_EXPIRES_IN";
    pub const AUDIENCE: &str = "CDP_JWT_AUDIENCE";
}
