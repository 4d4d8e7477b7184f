//! Cryptographic primitives: hash, HMAC, a KDF, a symmetric cipher, and
//! an OS CSPRNG.
//!
//! Exposed as a trait (`CryptoProvider`) rather than free functions so
//! `Edx`/`Emm` schemes can be constructed with a test double instead of
//! a hardcoded cipher suite.

mod primitives;

pub use primitives::DefaultCryptoProvider;

use crate::error::ArcaError;

/// 64-byte digest/HMAC output length (SHA-512).
pub const DIGEST_LEN: usize = 64;

pub trait CryptoProvider: Send + Sync {
    /// SHA-512 of `data`.
    fn hash(&self, data: &[u8]) -> [u8; DIGEST_LEN];

    /// HMAC-SHA-512 of `data` under `key`.
    fn hmac(&self, key: &[u8], data: &[u8]) -> [u8; DIGEST_LEN];

    /// HKDF-SHA-512 with no salt, `info = purpose`, output length equal
    /// to `key.len()`.
    fn kdf(&self, key: &[u8], purpose: &[u8]) -> Vec<u8>;

    /// PKCS#7-padded AES-CBC with a fresh random 16-byte IV prepended.
    /// `key` must be 16, 24, or 32 bytes.
    fn encrypt(&self, key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, ArcaError>;

    /// Inverse of `encrypt`. Fails with `ArcaError::Crypto` (never
    /// revealing whether padding, the key, or the length was wrong) if
    /// `ciphertext` is too short, malformed, or was not encrypted under
    /// `key`.
    fn decrypt(&self, key: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, ArcaError>;

    /// `n` bytes from the OS CSPRNG.
    fn rand(&self, n: usize) -> Result<Vec<u8>, ArcaError>;
}
