//! Error types for token generation

use std::fmt;
use thiserror::Error;

/// Which token a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// API-key bearer token
    Bearer,
    /// Wallet-auth token
    Wallet,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Bearer => f.write_str("bearer"),
            TokenKind::Wallet => f.write_str("wallet auth"),
        }
    }
}

/// Coarse classification of a [`CdpAuthError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller input is missing or inconsistent; raised before any cryptographic work
    Validation,
    /// Key material could not be recognised
    KeyFormat,
    /// The signing backend failed
    Signing,
    /// A wallet token was requested without a wallet secret configured
    WalletSecretRequired,
    /// Environment or configuration problem
    Config,
}

/// Main error type for token generation
#[derive(Error, Debug)]
pub enum CdpAuthError {
    /// API key id is empty
    #[error("key name is required")]
    MissingKeyId,

    /// API key secret is empty
    #[error("private key is required")]
    MissingKeySecret,

    /// Some but not all of method, host and path were supplied
    #[error(
        "either all request details (method, host, path) must be provided, or all must be empty for JWTs intended for websocket connections"
    )]
    InconsistentRequestContext,

    /// Wallet secret is empty
    #[error("wallet secret is not defined")]
    UndefinedWalletSecret,

    /// Request description is malformed
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Neither the PEM EC nor the base64 Ed25519 strategy recognised the key
    #[error("invalid key format - must be either PEM EC key or base64 Ed25519 key")]
    InvalidKeyFormat,

    /// Wallet secret is not a base64 DER PKCS#8 P-256 key
    #[error("could not create the EC key from wallet secret: {0}")]
    InvalidWalletSecretFormat(String),

    /// Signing backend failure
    #[error("failed to sign {token} token with {algorithm}: {message}")]
    Signing {
        token: TokenKind,
        algorithm: &'static str,
        message: String,
    },

    /// Wallet token requested but no wallet secret configured
    #[error(
        "wallet secret is required when a wallet auth token is requested; set CDP_WALLET_SECRET or pass a wallet secret"
    )]
    WalletSecretRequired,

    /// Claim or header serialization failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Secure random source failed
    #[error("failed to generate nonce: {0}")]
    Entropy(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl CdpAuthError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        CdpAuthError::Config(message.into())
    }

    /// Create an invalid-request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        CdpAuthError::InvalidRequest(message.into())
    }

    /// Wrap a signing backend failure with the token and algorithm it concerned
    pub fn signing(token: TokenKind, algorithm: &'static str, message: impl fmt::Display) -> Self {
        CdpAuthError::Signing {
            token,
            algorithm,
            message: message.to_string(),
        }
    }

    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CdpAuthError::MissingKeyId
            | CdpAuthError::MissingKeySecret
            | CdpAuthError::InconsistentRequestContext
            | CdpAuthError::UndefinedWalletSecret
            | CdpAuthError::InvalidRequest(_) => ErrorKind::Validation,
            CdpAuthError::InvalidKeyFormat | CdpAuthError::InvalidWalletSecretFormat(_) => {
                ErrorKind::KeyFormat
            }
            CdpAuthError::Signing { .. }
            | CdpAuthError::Serialization(_)
            | CdpAuthError::Entropy(_) => ErrorKind::Signing,
            CdpAuthError::WalletSecretRequired => ErrorKind::WalletSecretRequired,
            CdpAuthError::Config(_) => ErrorKind::Config,
        }
    }

    /// Check if the error is a caller-input validation failure
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    /// Check if the error is a key-format failure
    pub fn is_key_format(&self) -> bool {
        self.kind() == ErrorKind::KeyFormat
    }
}

/// Result type alias for token generation
pub type Result<T> = std::result::Result<T, CdpAuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(CdpAuthError::MissingKeyId.kind(), ErrorKind::Validation);
        assert_eq!(
            CdpAuthError::InconsistentRequestContext.kind(),
            ErrorKind::Validation
        );
        assert_eq!(CdpAuthError::InvalidKeyFormat.kind(), ErrorKind::KeyFormat);
        assert_eq!(
            CdpAuthError::InvalidWalletSecretFormat("bad".into()).kind(),
            ErrorKind::KeyFormat
        );
        assert_eq!(
            CdpAuthError::WalletSecretRequired.kind(),
            ErrorKind::WalletSecretRequired
        );
        assert_eq!(CdpAuthError::config("x").kind(), ErrorKind::Config);
    }

    #[test]
    fn test_wallet_secret_required_is_not_key_format() {
        let err = CdpAuthError::WalletSecretRequired;
        assert!(!err.is_key_format());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_signing_error_message_names_token_and_algorithm() {
        let err = CdpAuthError::signing(TokenKind::Wallet, "ES256", "backend exploded");
        let message = err.to_string();
        assert!(message.contains("wallet auth"));
        assert!(message.contains("ES256"));
        assert!(message.contains("backend exploded"));
        assert_eq!(err.kind(), ErrorKind::Signing);
    }

    #[test]
    fn test_messages_name_the_condition() {
        assert_eq!(CdpAuthError::MissingKeyId.to_string(), "key name is required");
        assert!(CdpAuthError::InconsistentRequestContext
            .to_string()
            .contains("either all request details"));
    }
}
