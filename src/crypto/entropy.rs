//! Clock and randomness sources
//!
//! Token builders never read ambient time or randomness directly; they take a [`Clock`]
//! and a [`SecureRandom`] so tests can pin timestamps and nonces.

use crate::{CdpAuthError, Result};
use rand::rngs::OsRng;
use rand::RngCore;
use uuid::{Builder, Uuid};

/// Source of the current Unix time in seconds
pub trait Clock: Send + Sync {
    fn now(&self) -> i64;
}

/// Cryptographically secure byte source
pub trait SecureRandom: Send + Sync {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<()>;
}

/// Wall clock backed by `chrono`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Clock frozen at a fixed instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.0
    }
}

/// Operating system CSPRNG
#[derive(Debug, Clone, Copy, Default)]
pub struct OsSecureRandom;

impl SecureRandom for OsSecureRandom {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<()> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| CdpAuthError::Entropy(e.to_string()))
    }
}

/// Generate `len` random bytes, hex-encoded
pub fn random_hex(rng: &dyn SecureRandom, len: usize) -> Result<String> {
    let mut bytes = vec![0u8; len];
    rng.fill_bytes(&mut bytes)?;
    Ok(hex::encode(bytes))
}

/// Generate a random (version 4) UUID
pub fn random_uuid(rng: &dyn SecureRandom) -> Result<Uuid> {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes)?;
    Ok(Builder::from_random_bytes(bytes).into_uuid())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ZeroRandom;

    impl SecureRandom for ZeroRandom {
        fn fill_bytes(&self, dest: &mut [u8]) -> Result<()> {
            dest.fill(0);
            Ok(())
        }
    }

    #[test]
    fn test_random_hex_length() {
        let nonce = random_hex(&OsSecureRandom, 16).unwrap();
        assert_eq!(nonce.len(), 32);
        assert!(nonce.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_random_hex_differs_between_calls() {
        let first = random_hex(&OsSecureRandom, 16).unwrap();
        let second = random_hex(&OsSecureRandom, 16).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_random_uuid_is_version_4() {
        let id = random_uuid(&ZeroRandom).unwrap();
        assert_eq!(id.get_version_num(), 4);
        assert_eq!(id.to_string(), "00000000-0000-4000-8000-000000000000");
    }

    #[test]
    fn test_fixed_clock() {
        assert_eq!(FixedClock(1_700_000_000).now(), 1_700_000_000);
        assert!(SystemClock.now() > 1_600_000_000);
    }
}
