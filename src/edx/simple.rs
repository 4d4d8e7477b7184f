use std::collections::HashMap;
use std::hash::Hash;

use zeroize::Zeroizing;

use super::{deserialize_store, serialize_store, EncryptedStore, Edx, DEFAULT_SUB_KEY_LEN};
use crate::crypto::CryptoProvider;
use crate::error::ArcaError;
use crate::parallel::ParallelMap;
use crate::serialize::Serializer;

/// Non-revealing `EDX[K,V]`: `label = hmac(Kh, save(k))`, `ct =
/// enc(Ke, save(v))`. The base key has length `2L`; the first `L`
/// bytes are the HMAC sub-key, the next `L` the encryption sub-key.
pub struct SimpleEdx<C, SK, SV> {
    crypto: C,
    key_serializer: SK,
    value_serializer: SV,
    sub_key_len: usize,
}

impl<C, SK, SV> SimpleEdx<C, SK, SV> {
    pub fn new(crypto: C, key_serializer: SK, value_serializer: SV) -> Self {
        Self::with_sub_key_len(crypto, key_serializer, value_serializer, DEFAULT_SUB_KEY_LEN)
    }

    pub fn with_sub_key_len(crypto: C, key_serializer: SK, value_serializer: SV, sub_key_len: usize) -> Self {
        Self { crypto, key_serializer, value_serializer, sub_key_len }
    }

    fn split_key<'k>(&self, key: &'k [u8]) -> Result<(&'k [u8], &'k [u8]), ArcaError> {
        if key.len() != 2 * self.sub_key_len {
            return Err(ArcaError::Parameter(format!(
                "SimpleEdx key must be {} bytes, got {}",
                2 * self.sub_key_len,
                key.len()
            )));
        }
        Ok(key.split_at(self.sub_key_len))
    }
}

impl<K, V, C, SK, SV> Edx<K, V> for SimpleEdx<C, SK, SV>
where
    K: Eq + Hash + Clone + Send,
    V: Clone + Send,
    C: CryptoProvider + Sync,
    SK: Serializer<K> + Sync,
    SV: Serializer<V> + Sync,
{
    fn generate_key(&self) -> Result<Zeroizing<Vec<u8>>, ArcaError> {
        Ok(Zeroizing::new(self.crypto.rand(2 * self.sub_key_len)?))
    }

    fn encrypt<P: ParallelMap>(
        &self,
        key: &[u8],
        dict: &HashMap<K, V>,
        parallel: &P,
    ) -> Result<Vec<u8>, ArcaError> {
        let (hmac_key, enc_key) = self.split_key(key)?;
        let pairs: Vec<(K, V)> = dict.iter().map(|(k, v)| (k.clone(), v.clone())).collect();

        let entries: Vec<Result<(Vec<u8>, Vec<u8>), ArcaError>> = parallel.map(pairs, |(k, v)| {
            let label = self.crypto.hmac(hmac_key, &self.key_serializer.save(&k)).to_vec();
            let ct = self.crypto.encrypt(enc_key, &self.value_serializer.save(&v))?;
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
        let (hmac_key, _) = self.split_key(key)?;
        Ok(self.crypto.hmac(hmac_key, &self.key_serializer.save(k)).to_vec())
    }

    fn query(&self, token: &[u8], store: &EncryptedStore) -> Option<Vec<u8>> {
        store.get(token).cloned()
    }

    fn resolve(&self, key: &[u8], ciphertext: &[u8]) -> Result<V, ArcaError> {
        let (_, enc_key) = self.split_key(key)?;
        let pt = self.crypto.decrypt(enc_key, ciphertext)?;
        Ok(self.value_serializer.load(&pt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::DefaultCryptoProvider;
    use crate::parallel::SerialMap;
    use crate::serialize::Int32Serializer;

    fn edx() -> SimpleEdx<DefaultCryptoProvider, Int32Serializer, Int32Serializer> {
        SimpleEdx::new(DefaultCryptoProvider, Int32Serializer, Int32Serializer)
    }

    #[test]
    fn round_trips_every_entry() {
        let edx = edx();
        let key = edx.generate_key().unwrap();
        let mut dict = HashMap::new();
        dict.insert(1, 100);
        dict.insert(2, 200);
        dict.insert(3, 300);

        let blob = edx.encrypt(&key, &dict, &SerialMap).unwrap();
        let store = edx.load_eds(&blob).unwrap();

        for (k, v) in &dict {
            let token = edx.token(&key, k).unwrap();
            let ct = edx.query(&token, &store).unwrap();
            assert_eq!(edx.resolve(&key, &ct).unwrap(), *v);
        }
    }

    #[test]
    fn missing_key_queries_to_none() {
        let edx = edx();
        let key = edx.generate_key().unwrap();
        let dict: HashMap<i32, i32> = HashMap::from([(1, 100)]);
        let blob = edx.encrypt(&key, &dict, &SerialMap).unwrap();
        let store = edx.load_eds(&blob).unwrap();

        let token = edx.token(&key, &99).unwrap();
        assert!(edx.query(&token, &store).is_none());
    }

    #[test]
    fn token_is_deterministic() {
        let edx = edx();
        let key = edx.generate_key().unwrap();
        assert_eq!(edx.token(&key, &7).unwrap(), edx.token(&key, &7).unwrap());
    }

    #[test]
    fn wrong_key_fails_resolve() {
        let edx = edx();
        let key = edx.generate_key().unwrap();
        let other_key = edx.generate_key().unwrap();
        let dict: HashMap<i32, i32> = HashMap::from([(1, 100)]);
        let blob = edx.encrypt(&key, &dict, &SerialMap).unwrap();
        let store = edx.load_eds(&blob).unwrap();
        let token = edx.token(&key, &1).unwrap();
        let ct = edx.query(&token, &store).unwrap();
        assert!(edx.resolve(&other_key, &ct).is_err());
    }
}
