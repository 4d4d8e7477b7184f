use std::collections::HashMap;
use std::hash::Hash;

use zeroize::Zeroizing;

use super::{deserialize_store, serialize_store, EncryptedStore, RevealingEdx, DEFAULT_SUB_KEY_LEN};
use crate::crypto::CryptoProvider;
use crate::error::ArcaError;
use crate::parallel::ParallelMap;
use crate::serialize::Serializer;

/// Revealing `EDX[K,V]`: `τ = kdf(key, save(k))`, `label = kdf(τ,
/// "hmac")`, `value-key = kdf(τ, "value")`. Lookup and decryption are
/// a single step; the base key has length `L` (no sub-key split).
pub struct SimpleRevealingEdx<C, SK, SV> {
    crypto: C,
    key_serializer: SK,
    value_serializer: SV,
    key_len: usize,
}

impl<C, SK, SV> SimpleRevealingEdx<C, SK, SV> {
    pub fn new(crypto: C, key_serializer: SK, value_serializer: SV) -> Self {
        Self::with_key_len(crypto, key_serializer, value_serializer, DEFAULT_SUB_KEY_LEN)
    }

    pub fn with_key_len(crypto: C, key_serializer: SK, value_serializer: SV, key_len: usize) -> Self {
        Self { crypto, key_serializer, value_serializer, key_len }
    }
}

impl<K, V, C, SK, SV> RevealingEdx<K, V> for SimpleRevealingEdx<C, SK, SV>
where
    K: Eq + Hash + Clone + Send,
    V: Clone + Send,
    C: CryptoProvider + Sync,
    SK: Serializer<K> + Sync,
    SV: Serializer<V> + Sync,
{
    fn generate_key(&self) -> Result<Zeroizing<Vec<u8>>, ArcaError> {
        Ok(Zeroizing::new(self.crypto.rand(self.key_len)?))
    }

    fn encrypt<P: ParallelMap>(
        &self,
        key: &[u8],
        dict: &HashMap<K, V>,
        parallel: &P,
    ) -> Result<Vec<u8>, ArcaError> {
        let pairs: Vec<(K, V)> = dict.iter().map(|(k, v)| (k.clone(), v.clone())).collect();

        let entries: Vec<Result<(Vec<u8>, Vec<u8>), ArcaError>> = parallel.map(pairs, |(k, v)| {
            let tau = self.crypto.kdf(key, &self.key_serializer.save(&k));
            let label = self.crypto.kdf(&tau, b"hmac");
            let value_key = self.crypto.kdf(&tau, b"value");
            let ct = self.crypto.encrypt(&value_key, &self.value_serializer.save(&v))?;
            Ok((label, ct))
        });

        let mut store = EncryptedStore::new();
        for entry in entries {
            let (label, ct) = entry?;
            store.insert(label, ct);
        }
        Ok(serialize_store(&store))
    }

    fn load_eds(&self, blob: &[u8]) -> Result<EncryptedStore, ArcaError> {
        deserialize_store(blob)
    }

    fn token(&self, key: &[u8], k: &K) -> Result<Vec<u8>, ArcaError> {
        Ok(self.crypto.kdf(key, &self.key_serializer.save(k)))
    }

    fn query(&self, token: &[u8], store: &EncryptedStore) -> Result<Option<V>, ArcaError> {
        let label = self.crypto.kdf(token, b"hmac");
        let Some(ct) = store.get(&label) else {
            return Ok(None);
        };
        let value_key = self.crypto.kdf(token, b"value");
        let pt = self.crypto.decrypt(&value_key, ct)?;
        Ok(Some(self.value_serializer.load(&pt)))
    }
}
