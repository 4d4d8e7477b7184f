use std::collections::HashMap;

use crate::error::ArcaError;

/// The server-side view of an encrypted dictionary or multimap: opaque
/// labels to opaque ciphertexts. Label length varies by scheme (64
/// bytes for HMAC-derived labels, key-length bytes for KDF-derived
/// ones), so labels are `Vec<u8>` rather than a fixed-size type.
pub type EncryptedStore = HashMap<Vec<u8>, Vec<u8>>;

/// Self-describing `label -> ciphertext` blob: a run of
/// `(u32 label_len, label, u32 ct_len, ct)` records. No cross-version
/// compatibility is promised.
pub fn serialize_store(store: &EncryptedStore) -> Vec<u8> {
    let mut out = Vec::new();
    for (label, ct) in store {
        out.extend_from_slice(&(label.len() as u32).to_le_bytes());
        out.extend_from_slice(label);
        out.extend_from_slice(&(ct.len() as u32).to_le_bytes());
        out.extend_from_slice(ct);
    }
    out
}

pub fn deserialize_store(blob: &[u8]) -> Result<EncryptedStore, ArcaError> {
    let mut store = EncryptedStore::new();
    let mut offset = 0usize;

    while offset < blob.len() {
        let label_len = read_u32(blob, &mut offset)? as usize;
        let label = read_bytes(blob, &mut offset, label_len)?;
        let ct_len = read_u32(blob, &mut offset)? as usize;
        let ct = read_bytes(blob, &mut offset, ct_len)?;
        store.insert(label, ct);
    }

    Ok(store)
}

fn read_u32(blob: &[u8], offset: &mut usize) -> Result<u32, ArcaError> {
    let bytes = blob
        .get(*offset..*offset + 4)
        .ok_or_else(|| ArcaError::DataModel("truncated store blob".into()))?;
    *offset += 4;
    Ok(u32::from_le_bytes(bytes.try_into().unwrap()))
}

fn read_bytes(blob: &[u8], offset: &mut usize, len: usize) -> Result<Vec<u8>, ArcaError> {
    let bytes = blob
        .get(*offset..*offset + len)
        .ok_or_else(|| ArcaError::DataModel("truncated store blob".into()))?;
    *offset += len;
    Ok(bytes.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_an_empty_and_a_populated_store() {
        assert_eq!(deserialize_store(&serialize_store(&EncryptedStore::new())).unwrap(), EncryptedStore::new());

        let mut store = EncryptedStore::new();
        store.insert(vec![1, 2, 3], vec![9, 9]);
        store.insert(vec![4; 64], vec![]);
        let blob = serialize_store(&store);
        assert_eq!(deserialize_store(&blob).unwrap(), store);
    }

    #[test]
    fn rejects_truncated_blobs() {
        assert!(deserialize_store(&[1, 2, 3]).is_err());
    }
}
