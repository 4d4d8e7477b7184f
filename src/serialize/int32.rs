use super::Serializer;

/// Fixed-width little-endian `i32` encoding.
#[derive(Debug, Default, Clone, Copy)]
pub struct Int32Serializer;

impl Serializer<i32> for Int32Serializer {
    fn save(&self, value: &i32) -> Vec<u8> {
        value.to_le_bytes().to_vec()
    }

    fn load(&self, blob: &[u8]) -> i32 {
        let bytes: [u8; 4] = blob.try_into().expect("Int32Serializer::load expects 4 bytes");
        i32::from_le_bytes(bytes)
    }
}

/// Fixed-width little-endian `i64` encoding, for scheme auxiliary keys
/// and values that range over `Domain`'s full `i64` space (e.g. the
/// sum-prefix key, which is a bare domain point).
#[derive(Debug, Default, Clone, Copy)]
pub struct Int64Serializer;

impl Serializer<i64> for Int64Serializer {
    fn save(&self, value: &i64) -> Vec<u8> {
        value.to_le_bytes().to_vec()
    }

    fn load(&self, blob: &[u8]) -> i64 {
        let bytes: [u8; 8] = blob.try_into().expect("Int64Serializer::load expects 8 bytes");
        i64::from_le_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int32_round_trips() {
        let s = Int32Serializer;
        for v in [-1, 0, 1, i32::MIN, i32::MAX] {
            assert_eq!(s.load(&s.save(&v)), v);
        }
    }

    #[test]
    fn int64_round_trips() {
        let s = Int64Serializer;
        for v in [-1, 0, 1, i64::MIN, i64::MAX] {
            assert_eq!(s.load(&s.save(&v)), v);
        }
    }
}
