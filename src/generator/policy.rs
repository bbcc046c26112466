//! Wallet-auth routing policy and request headers

use crate::types::methods;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

/// SDK version reported in the correlation header
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Path fragments whose write operations need an `X-Wallet-Auth` token
pub const WALLET_AUTH_PATHS: [&str; 3] = [
    "/accounts",
    "/spend-permissions",
    "/user-operations/prepare-and-send",
];

/// Check whether a request must carry a wallet-auth token
///
/// True for POST, PUT and DELETE on account, spend-permission and
/// prepare-and-send user-operation endpoints. Method comparison ignores case.
pub fn requires_wallet_auth(method: &str, path: &str) -> bool {
    let method = method.to_ascii_uppercase();
    let is_write = matches!(
        method.as_str(),
        methods::POST | methods::PUT | methods::DELETE
    );

    is_write && WALLET_AUTH_PATHS.iter().any(|fragment| path.contains(fragment))
}

/// Build the `Correlation-Context` header value
pub fn correlation_context(source: &str, source_version: &str) -> String {
    let data = [
        ("sdk_version", SDK_VERSION),
        ("sdk_language", "rust"),
        ("source", source),
        ("source_version", source_version),
    ];

    let pairs: Vec<String> = data
        .iter()
        .map(|(key, value)| format!("{}={}", key, utf8_percent_encode(value, NON_ALPHANUMERIC)))
        .collect();

    pairs.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_operations_on_wallet_paths() {
        assert!(requires_wallet_auth("POST", "/platform/v2/evm/accounts"));
        assert!(requires_wallet_auth("put", "/platform/v2/evm/accounts/0xabc"));
        assert!(requires_wallet_auth(
            "DELETE",
            "/platform/v2/evm/spend-permissions/revoke"
        ));
        assert!(requires_wallet_auth(
            "POST",
            "/platform/v2/evm/smart-accounts/0x1/user-operations/prepare-and-send"
        ));
    }

    #[test]
    fn test_reads_and_other_paths_do_not_require_wallet_auth() {
        assert!(!requires_wallet_auth("GET", "/platform/v2/evm/accounts"));
        assert!(!requires_wallet_auth("PATCH", "/platform/v2/evm/accounts"));
        assert!(!requires_wallet_auth("POST", "/platform/v2/evm/token-balances"));
        assert!(!requires_wallet_auth(
            "POST",
            "/platform/v2/evm/smart-accounts/0x1/user-operations"
        ));
    }

    #[test]
    fn test_correlation_context_is_percent_encoded() {
        let header = correlation_context("my app", "1.0.0");
        assert!(header.starts_with(&format!("sdk_version={}", utf8_percent_encode(SDK_VERSION, NON_ALPHANUMERIC))));
        assert!(header.contains("sdk_language=rust"));
        assert!(header.contains("source=my%20app"));
        assert!(header.contains("source_version=1%2E0%2E0"));
        assert_eq!(header.split(',').count(), 4);
    }
}
