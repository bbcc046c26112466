//! # CDP request authentication
//!
//! Signed request-authentication tokens for the Coinbase Developer Platform API.
//!
//! ## Features
//!
//! - **Bearer tokens**: ES256 or EdDSA JWTs signed with an API key, bound to one request
//!   through the `uris` claim, or unbound for websocket connections
//! - **Wallet-auth tokens**: ES256 JWTs signed with a wallet secret that bind the request
//!   body through a canonical SHA-256 `reqHash`
//! - **Deterministic hashing**: request bodies are canonicalized (sorted keys, big numbers
//!   as decimal strings, never-provided fields dropped) so every client hashes alike
//! - **Injectable time and randomness** for reproducible tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cdp_auth::{CdpConfig, TokenProvider, TokenRequest};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads CDP_API_KEY_ID, CDP_API_KEY_SECRET and CDP_WALLET_SECRET
//!     let generator = CdpConfig::from_env()?.into_generator()?;
//!
//!     let request = TokenRequest::for_url(
//!         "POST",
//!         "https://api.cdp.coinbase.com/platform/v2/evm/accounts",
//!         None,
//!     )?;
//!
//!     let tokens = generator.generate_tokens(&request)?;
//!     for (name, value) in tokens.to_header_map()?.iter() {
//!         println!("{}: {:?}", name, value);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **`types`**: Request context, request body model, claim sets and constants
//! - **`crypto`**: Key parsing, canonical hashing and the two token builders
//! - **`generator`**: Token orchestration and the wallet-auth routing policy
//! - **`config`**: Credentials from code or `CDP_*` environment variables
//! - **`error`**: Error taxonomy

pub mod config;
pub mod crypto;
pub mod error;
pub mod generator;
pub mod types;

// Re-exports for convenience
pub use config::CdpConfig;
pub use crypto::jwt::{generate_jwt, JwtOptions};
pub use crypto::wallet::{generate_wallet_jwt, WalletJwtOptions};
pub use error::{CdpAuthError, ErrorKind, Result, TokenKind};
pub use generator::{TokenGenerator, TokenProvider, TokenRequest, TokenResponse};
pub use types::{BodyValue, Field, JwtRequestContext, RequestBody};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
