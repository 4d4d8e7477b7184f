//! Serialisers: inject typed values into byte strings and
//! back. Round-trip is only guaranteed on the values the schemes
//! actually produce, not on arbitrary `T`.

mod ds_value;
mod int32;
mod tuple;

pub use ds_value::{DsValue, DsValueSerializer};
pub use int32::{Int32Serializer, Int64Serializer};
pub use tuple::{Tuple2Serializer, Tuple3Serializer};

pub trait Serializer<T> {
    fn save(&self, value: &T) -> Vec<u8>;
    fn load(&self, blob: &[u8]) -> T;
}
