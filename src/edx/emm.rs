use std::collections::HashMap;
use std::hash::Hash;

use zeroize::Zeroizing;

use super::{deserialize_store, index_label, serialize_store, EncryptedStore, Emm, RevealingEmm, DEFAULT_SUB_KEY_LEN};
use crate::crypto::CryptoProvider;
use crate::error::ArcaError;
use crate::parallel::ParallelMap;
use crate::serialize::Serializer;

/// Non-revealing `EMM[K,V]`: `τ = hmac(Kh, save(k))`, and for index `i`
/// in the entry's list, `label_i = hash(τ ++ i), ct_i = enc(Ke,
/// save(list[i]))`. Query walks `i = 0, 1, ...` until a label is
/// absent.
pub struct PiBaseEmm<C, SK, SV> {
    crypto: C,
    key_serializer: SK,
    value_serializer: SV,
    sub_key_len: usize,
}

impl<C, SK, SV> PiBaseEmm<C, SK, SV> {
    pub fn new(crypto: C, key_serializer: SK, value_serializer: SV) -> Self {
        Self::with_sub_key_len(crypto, key_serializer, value_serializer, DEFAULT_SUB_KEY_LEN)
    }

    pub fn with_sub_key_len(crypto: C, key_serializer: SK, value_serializer: SV, sub_key_len: usize) -> Self {
        Self { crypto, key_serializer, value_serializer, sub_key_len }
    }

    fn split_key<'k>(&self, key: &'k [u8]) -> Result<(&'k [u8], &'k [u8]), ArcaError> {
        if key.len() != 2 * self.sub_key_len {
            return Err(ArcaError::Parameter(format!(
                "PiBaseEmm key must be {} bytes, got {}",
                2 * self.sub_key_len,
                key.len()
            )));
        }
        Ok(key.split_at(self.sub_key_len))
    }
}

impl<K, V, C, SK, SV> Emm<K, V> for PiBaseEmm<C, SK, SV>
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
        dict: &HashMap<K, Vec<V>>,
        parallel: &P,
    ) -> Result<Vec<u8>, ArcaError> {
        let (hmac_key, enc_key) = self.split_key(key)?;
        let entries: Vec<(K, Vec<V>)> = dict.iter().map(|(k, v)| (k.clone(), v.clone())).collect();

        let per_key: Vec<Result<Vec<(Vec<u8>, Vec<u8>)>, ArcaError>> = parallel.map(entries, |(k, list)| {
            let tau = self.crypto.hmac(hmac_key, &self.key_serializer.save(&k)).to_vec();
            list.iter()
                .enumerate()
                .map(|(i, v)| {
                    let label = index_label(&self.crypto, &tau, i as u64);
                    let ct = self.crypto.encrypt(enc_key, &self.value_serializer.save(v))?;
                    Ok((label, ct))
                })
                .collect()
        });

        let mut store = EncryptedStore::new();
        for group in per_key {
            for (label, ct) in group? {
                store.insert(label, ct);
            }
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

    fn query(&self, token: &[u8], store: &EncryptedStore) -> Vec<Vec<u8>> {
        let mut out = Vec::new();
        let mut i = 0u64;
        loop {
            let label = index_label(&self.crypto, token, i);
            match store.get(&label) {
                Some(ct) => out.push(ct.clone()),
                None => break,
            }
            i += 1;
        }
        out
    }

    fn resolve(&self, key: &[u8], ciphertext: &[u8]) -> Result<V, ArcaError> {
        let (_, enc_key) = self.split_key(key)?;
        let pt = self.crypto.decrypt(enc_key, ciphertext)?;
        Ok(self.value_serializer.load(&pt))
    }
}

/// Revealing `EMM[K,V]`: `τ = kdf(key, save(k))`, value-key =
/// `kdf(τ, "value")`, `label_i = hash(τ ++ i)`. Query walks the index
/// and decrypts in-line.
pub struct PiBaseRevealingEmm<C, SK, SV> {
    crypto: C,
    key_serializer: SK,
    value_serializer: SV,
    key_len: usize,
}

impl<C, SK, SV> PiBaseRevealingEmm<C, SK, SV> {
    pub fn new(crypto: C, key_serializer: SK, value_serializer: SV) -> Self {
        Self::with_key_len(crypto, key_serializer, value_serializer, DEFAULT_SUB_KEY_LEN)
    }

    pub fn with_key_len(crypto: C, key_serializer: SK, value_serializer: SV, key_len: usize) -> Self {
        Self { crypto, key_serializer, value_serializer, key_len }
    }
}

impl<K, V, C, SK, SV> RevealingEmm<K, V> for PiBaseRevealingEmm<C, SK, SV>
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
        dict: &HashMap<K, Vec<V>>,
        parallel: &P,
    ) -> Result<Vec<u8>, ArcaError> {
        let entries: Vec<(K, Vec<V>)> = dict.iter().map(|(k, v)| (k.clone(), v.clone())).collect();

        let per_key: Vec<Result<Vec<(Vec<u8>, Vec<u8>)>, ArcaError>> = parallel.map(entries, |(k, list)| {
            let tau = self.crypto.kdf(key, &self.key_serializer.save(&k));
            let value_key = self.crypto.kdf(&tau, b"value");
            list.iter()
                .enumerate()
                .map(|(i, v)| {
                    let label = index_label(&self.crypto, &tau, i as u64);
                    let ct = self.crypto.encrypt(&value_key, &self.value_serializer.save(v))?;
                    Ok((label, ct))
                })
                .collect()
        });

        let mut store = EncryptedStore::new();
        for group in per_key {
            for (label, ct) in group? {
                store.insert(label, ct);
            }
        }
        Ok(serialize_store(&store))
    }

    fn load_eds(&self, blob: &[u8]) -> Result<EncryptedStore, ArcaError> {
        deserialize_store(blob)
    }

    fn token(&self, key: &[u8], k: &K) -> Result<Vec<u8>, ArcaError> {
        Ok(self.crypto.kdf(key, &self.key_serializer.save(k)))
    }

    fn query(&self, token: &[u8], store: &EncryptedStore) -> Result<Vec<V>, ArcaError> {
        let value_key = self.crypto.kdf(token, b"value");
        let mut out = Vec::new();
        let mut i = 0u64;
        loop {
            let label = index_label(&self.crypto, token, i);
            let Some(ct) = store.get(&label) else { break };
            let pt = self.crypto.decrypt(&value_key, ct)?;
            out.push(self.value_serializer.load(&pt));
            i += 1;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::DefaultCryptoProvider;
    use crate::parallel::SerialMap;
    use crate::serialize::Int32Serializer;

    #[test]
    fn non_revealing_round_trips_duplicates() {
        let emm = PiBaseEmm::new(DefaultCryptoProvider, Int32Serializer, Int32Serializer);
        let key = emm.generate_key().unwrap();
        let dict: HashMap<i32, Vec<i32>> = HashMap::from([(1, vec![10, 10, 20])]);
        let blob = emm.encrypt(&key, &dict, &SerialMap).unwrap();
        let store = emm.load_eds(&blob).unwrap();

        let token = emm.token(&key, &1).unwrap();
        let cts = emm.query(&token, &store);
        assert_eq!(cts.len(), 3);
        let values: Vec<i32> = cts.iter().map(|ct| emm.resolve(&key, ct).unwrap()).collect();
        assert_eq!(values, vec![10, 10, 20]);
    }

    #[test]
    fn non_revealing_query_on_absent_key_is_empty() {
        let emm = PiBaseEmm::new(DefaultCryptoProvider, Int32Serializer, Int32Serializer);
        let key = emm.generate_key().unwrap();
        let dict: HashMap<i32, Vec<i32>> = HashMap::from([(1, vec![10])]);
        let blob = emm.encrypt(&key, &dict, &SerialMap).unwrap();
        let store = emm.load_eds(&blob).unwrap();
        let token = emm.token(&key, &404).unwrap();
        assert!(emm.query(&token, &store).is_empty());
    }

    #[test]
    fn revealing_round_trips_duplicates() {
        let emm = PiBaseRevealingEmm::new(DefaultCryptoProvider, Int32Serializer, Int32Serializer);
        let key = emm.generate_key().unwrap();
        let dict: HashMap<i32, Vec<i32>> = HashMap::from([(5, vec![1, 1, 2, 3])]);
        let blob = emm.encrypt(&key, &dict, &SerialMap).unwrap();
        let store = emm.load_eds(&blob).unwrap();
        let token = emm.token(&key, &5).unwrap();
        assert_eq!(emm.query(&token, &store).unwrap(), vec![1, 1, 2, 3]);
    }
}
