//! CDP token generator
//!
//! Prints the authentication headers for one API request, using credentials from the
//! `CDP_API_KEY_ID`, `CDP_API_KEY_SECRET` and (optionally) `CDP_WALLET_SECRET`
//! environment variables.
//!
//! ```text
//! cdp-token <METHOD> <URL> [BODY_JSON]
//! cdp-token --websocket
//! ```

use cdp_auth::types::headers;
use cdp_auth::{CdpConfig, RequestBody, TokenRequest};
use std::env;
use std::process;

fn usage() -> ! {
    eprintln!("Usage:");
    eprintln!("   cdp-token <METHOD> <URL> [BODY_JSON]");
    eprintln!("   cdp-token --websocket");
    eprintln!("\nEnvironment variables:");
    eprintln!("   CDP_API_KEY_ID - API key id (required)");
    eprintln!("   CDP_API_KEY_SECRET - PEM EC or base64 Ed25519 API key secret (required)");
    eprintln!("   CDP_WALLET_SECRET - base64 DER wallet secret (for write operations)");
    eprintln!("   CDP_JWT_EXPIRES_IN - bearer token lifetime in seconds (default: 120)");
    eprintln!("   CDP_JWT_AUDIENCE - comma-separated audience values");
    process::exit(2);
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let generator = CdpConfig::from_env()?.into_generator()?;

    match args.as_slice() {
        [flag] if flag == "--websocket" => {
            let token = generator.generate_websocket_token()?;
            println!("{}: Bearer {}", headers::AUTHORIZATION, token);
        }
        [method, url] | [method, url, _] => {
            let body = match args.get(2) {
                Some(raw) => Some(RequestBody::from_json(serde_json::from_str(raw)?)?),
                None => None,
            };

            let mut request = TokenRequest::for_url(method, url, body)?;
            if request.include_wallet_auth_token && !generator.has_wallet_secret() {
                tracing::warn!(
                    method = %request.method,
                    path = %request.path,
                    "Request needs a wallet auth token but CDP_WALLET_SECRET is not set"
                );
                request = request.with_wallet_auth(false);
            }

            for (name, value) in generator.header_pairs(&request)? {
                println!("{}: {}", name, value);
            }
        }
        _ => usage(),
    }

    Ok(())
}
