//! Structured encryption: turns a plaintext dictionary or
//! multimap into an encrypted, server-held store supporting token-based
//! lookup. `Edx`/`RevealingEdx` cover the key→value case; `Emm`/
//! `RevealingEmm` cover key→list.
//!
//! Non-revealing schemes split resolution into `query` (label lookup,
//! returns an opaque ciphertext) and `resolve` (decrypt under the base
//! key). Revealing schemes fold the two together because the
//! value-encryption key is derived from the per-lookup token rather
//! than from a fixed base sub-key.

mod emm;
mod revealing;
mod simple;
mod store;

pub use emm::{PiBaseEmm, PiBaseRevealingEmm};
pub use revealing::SimpleRevealingEdx;
pub use simple::SimpleEdx;
pub use store::{deserialize_store, serialize_store, EncryptedStore};

use std::collections::HashMap;

use zeroize::Zeroizing;

use crate::error::ArcaError;
use crate::parallel::ParallelMap;

/// Default length (in bytes) of each HMAC/encryption sub-key; the base
/// key for the non-revealing schemes is `2 * DEFAULT_SUB_KEY_LEN`.
pub const DEFAULT_SUB_KEY_LEN: usize = 16;

/// Encrypted dictionary: `K -> V` with decryption split from lookup.
pub trait Edx<K, V> {
    /// The base key a caller must hold and eventually drop; wrapped in
    /// `Zeroizing` so it is wiped from memory when it goes out of scope.
    fn generate_key(&self) -> Result<Zeroizing<Vec<u8>>, ArcaError>;

    fn encrypt<P: ParallelMap>(
        &self,
        key: &[u8],
        dict: &HashMap<K, V>,
        parallel: &P,
    ) -> Result<Vec<u8>, ArcaError>;

    fn load_eds(&self, blob: &[u8]) -> Result<EncryptedStore, ArcaError>;

    fn token(&self, key: &[u8], k: &K) -> Result<Vec<u8>, ArcaError>;

    /// Returns the stored ciphertext for `token`, or `None` if no such
    /// label exists (a normal, non-fatal outcome for EDX lookups).
    fn query(&self, token: &[u8], store: &EncryptedStore) -> Option<Vec<u8>>;

    fn resolve(&self, key: &[u8], ciphertext: &[u8]) -> Result<V, ArcaError>;
}

/// Encrypted dictionary whose lookup and decryption are a single step:
/// the value-encryption key is derived from the token itself.
pub trait RevealingEdx<K, V> {
    fn generate_key(&self) -> Result<Zeroizing<Vec<u8>>, ArcaError>;

    fn encrypt<P: ParallelMap>(
        &self,
        key: &[u8],
        dict: &HashMap<K, V>,
        parallel: &P,
    ) -> Result<Vec<u8>, ArcaError>;

    fn load_eds(&self, blob: &[u8]) -> Result<EncryptedStore, ArcaError>;

    fn token(&self, key: &[u8], k: &K) -> Result<Vec<u8>, ArcaError>;

    /// Looks up and decrypts in-line; `Ok(None)` if no label exists.
    fn query(&self, token: &[u8], store: &EncryptedStore) -> Result<Option<V>, ArcaError>;
}

/// Encrypted multimap: `K -> list<V>`.
pub trait Emm<K, V> {
    fn generate_key(&self) -> Result<Zeroizing<Vec<u8>>, ArcaError>;

    fn encrypt<P: ParallelMap>(
        &self,
        key: &[u8],
        dict: &HashMap<K, Vec<V>>,
        parallel: &P,
    ) -> Result<Vec<u8>, ArcaError>;

    fn load_eds(&self, blob: &[u8]) -> Result<EncryptedStore, ArcaError>;

    fn token(&self, key: &[u8], k: &K) -> Result<Vec<u8>, ArcaError>;

    /// Walks `i = 0, 1, ...` until a label is absent, returning every
    /// ciphertext found along the way.
    fn query(&self, token: &[u8], store: &EncryptedStore) -> Vec<Vec<u8>>;

    fn resolve(&self, key: &[u8], ciphertext: &[u8]) -> Result<V, ArcaError>;
}

/// Revealing multimap: lookup and decryption are a single step.
pub trait RevealingEmm<K, V> {
    fn generate_key(&self) -> Result<Zeroizing<Vec<u8>>, ArcaError>;

    fn encrypt<P: ParallelMap>(
        &self,
        key: &[u8],
        dict: &HashMap<K, Vec<V>>,
        parallel: &P,
    ) -> Result<Vec<u8>, ArcaError>;

    fn load_eds(&self, blob: &[u8]) -> Result<EncryptedStore, ArcaError>;

    fn token(&self, key: &[u8], k: &K) -> Result<Vec<u8>, ArcaError>;

    fn query(&self, token: &[u8], store: &EncryptedStore) -> Result<Vec<V>, ArcaError>;
}

/// `hash(prefix ++ i)` for the `i`-th element of an `Emm` entry's list.
fn index_label(crypto: &impl crate::crypto::CryptoProvider, prefix: &[u8], index: u64) -> Vec<u8> {
    let mut buf = Vec::with_capacity(prefix.len() + 8);
    buf.extend_from_slice(prefix);
    buf.extend_from_slice(&index.to_le_bytes());
    crypto.hash(&buf).to_vec()
}
