use super::Serializer;

/// Self-describing encoding of every shape a scheme's plaintext DS ever
/// stores as a value: a bare integer (sum-prefix, the minimum schemes),
/// an (element, count) pair (the mode scheme), or a list of integers
/// (the median scheme's per-(level, j) medians).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DsValue {
    Int(i64),
    Pair(i64, i64),
    IntVec(Vec<i64>),
}

impl From<i64> for DsValue {
    fn from(v: i64) -> Self {
        DsValue::Int(v)
    }
}

impl From<(i64, i64)> for DsValue {
    fn from(v: (i64, i64)) -> Self {
        DsValue::Pair(v.0, v.1)
    }
}

impl From<Vec<i64>> for DsValue {
    fn from(v: Vec<i64>) -> Self {
        DsValue::IntVec(v)
    }
}

impl DsValue {
    pub fn as_int(&self) -> i64 {
        match self {
            DsValue::Int(v) => *v,
            other => panic!("expected DsValue::Int, got {other:?}"),
        }
    }

    pub fn as_pair(&self) -> (i64, i64) {
        match self {
            DsValue::Pair(a, b) => (*a, *b),
            other => panic!("expected DsValue::Pair, got {other:?}"),
        }
    }

    pub fn as_int_vec(&self) -> &[i64] {
        match self {
            DsValue::IntVec(v) => v,
            other => panic!("expected DsValue::IntVec, got {other:?}"),
        }
    }
}

const TAG_INT: u8 = 0;
const TAG_PAIR: u8 = 1;
const TAG_INT_VEC: u8 = 2;

/// Tag-prefixed binary encoding of `DsValue`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DsValueSerializer;

impl Serializer<DsValue> for DsValueSerializer {
    fn save(&self, value: &DsValue) -> Vec<u8> {
        match value {
            DsValue::Int(v) => {
                let mut out = Vec::with_capacity(9);
                out.push(TAG_INT);
                out.extend_from_slice(&v.to_le_bytes());
                out
            }
            DsValue::Pair(a, b) => {
                let mut out = Vec::with_capacity(17);
                out.push(TAG_PAIR);
                out.extend_from_slice(&a.to_le_bytes());
                out.extend_from_slice(&b.to_le_bytes());
                out
            }
            DsValue::IntVec(items) => {
                let mut out = Vec::with_capacity(1 + 8 + items.len() * 8);
                out.push(TAG_INT_VEC);
                out.extend_from_slice(&(items.len() as u64).to_le_bytes());
                for item in items {
                    out.extend_from_slice(&item.to_le_bytes());
                }
                out
            }
        }
    }

    fn load(&self, blob: &[u8]) -> DsValue {
        match blob[0] {
            TAG_INT => DsValue::Int(i64::from_le_bytes(blob[1..9].try_into().unwrap())),
            TAG_PAIR => DsValue::Pair(
                i64::from_le_bytes(blob[1..9].try_into().unwrap()),
                i64::from_le_bytes(blob[9..17].try_into().unwrap()),
            ),
            TAG_INT_VEC => {
                let len = u64::from_le_bytes(blob[1..9].try_into().unwrap()) as usize;
                let mut items = Vec::with_capacity(len);
                let mut offset = 9;
                for _ in 0..len {
                    items.push(i64::from_le_bytes(blob[offset..offset + 8].try_into().unwrap()));
                    offset += 8;
                }
                DsValue::IntVec(items)
            }
            tag => panic!("unknown DsValue tag: {tag}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_variant() {
        let s = DsValueSerializer;
        for v in [
            DsValue::Int(-7),
            DsValue::Pair(3, 9),
            DsValue::IntVec(vec![1, 1, 2, 3, 5, 8]),
            DsValue::IntVec(vec![]),
        ] {
            assert_eq!(s.load(&s.save(&v)), v);
        }
    }
}
