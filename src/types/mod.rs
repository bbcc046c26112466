//! Core types for token generation
//!
//! This module defines the data structures shared by the token builders: the request
//! description a bearer token authorizes, the request body model hashed into wallet
//! tokens, and the exact header and claim sets that go on the wire.
//!
//! # Architecture
//!
//! The types module is organized as follows:
//! - [`request`] - Request context and the tri-state request body model
//! - [`claims`] - JOSE header and claim sets for bearer and wallet tokens
//! - [`constants`] - Protocol constants (issuer, expiry, hosts, header names)
//!
//! # Examples
//!
//! ## Describing a REST request
//!
//! ```
//! use cdp_auth::types::JwtRequestContext;
//!
//! # fn example() -> cdp_auth::Result<()> {
//! let context = JwtRequestContext::rest("GET", "api.cdp.coinbase.com", "/platform/v2/evm/accounts");
//! assert_eq!(
//!     context.uri()?,
//!     Some("GET api.cdp.coinbase.com/platform/v2/evm/accounts".to_string())
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Building a request body
//!
//! ```
//! use cdp_auth::types::RequestBody;
//!
//! let body = RequestBody::new()
//!     .field("name", "my-account")
//!     .null("accountPolicy")
//!     .missing("idempotencyKey");
//!
//! assert!(body.has_meaningful_entries());
//! ```

pub mod claims;
pub mod constants;
pub mod request;

pub use claims::{BearerClaims, JwtHeader, WalletClaims};
pub use constants::*;
pub use request::{format_uri, BigNumber, BodyValue, Field, JwtRequestContext, RequestBody};
