use super::Serializer;

/// Struct-style packer for `(i64, i64)` auxiliary keys, e.g. `(power,
/// index)` in the sparse/AS-table schemes.
#[derive(Debug, Default, Clone, Copy)]
pub struct Tuple2Serializer;

impl Serializer<(i64, i64)> for Tuple2Serializer {
    fn save(&self, value: &(i64, i64)) -> Vec<u8> {
        let mut out = Vec::with_capacity(16);
        out.extend_from_slice(&value.0.to_le_bytes());
        out.extend_from_slice(&value.1.to_le_bytes());
        out
    }

    fn load(&self, blob: &[u8]) -> (i64, i64) {
        let a = i64::from_le_bytes(blob[0..8].try_into().unwrap());
        let b = i64::from_le_bytes(blob[8..16].try_into().unwrap());
        (a, b)
    }
}

/// Struct-style packer for the tagged `(table_id, i64, i64)` auxiliary
/// keys used by the linear-EMT scheme, where the first element
/// distinguishes which of its three sub-tables a lookup targets.
#[derive(Debug, Default, Clone, Copy)]
pub struct Tuple3Serializer;

impl Serializer<(u8, i64, i64)> for Tuple3Serializer {
    fn save(&self, value: &(u8, i64, i64)) -> Vec<u8> {
        let mut out = Vec::with_capacity(17);
        out.push(value.0);
        out.extend_from_slice(&value.1.to_le_bytes());
        out.extend_from_slice(&value.2.to_le_bytes());
        out
    }

    fn load(&self, blob: &[u8]) -> (u8, i64, i64) {
        let tag = blob[0];
        let a = i64::from_le_bytes(blob[1..9].try_into().unwrap());
        let b = i64::from_le_bytes(blob[9..17].try_into().unwrap());
        (tag, a, b)
    }
}
