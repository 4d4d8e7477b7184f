//! Aggregate range queries over structured encryption.
//!
//! `Table` -> `Domain` + values. `RangeQuery` -> one `[start, end)` ask
//! against a domain. A `RangeAggregateScheme` builds a
//! small plaintext dictionary and a bounded-lookup query/resolve
//! protocol for one aggregate (sum, minimum, mode, or median). An `Edx`
//! or `Emm` turns that dictionary into a token-addressed
//! encrypted store. `Arq` binds the two: `setup` runs the
//! scheme then encrypts; `query` tokenises the scheme's auxiliary keys,
//! fetches and decrypts each one, and feeds the responses back to the
//! scheme's resolver.
//!
//! ## Quick Start
//!
//! ```rust
//! use arca::{Arq, DefaultCryptoProvider, DsValueSerializer, Int64Serializer};
//! use arca::{RangeQuery, SerialMap, SimpleEdx, SumPrefix, Table};
//!
//! let table = Table::make_from_list([1, 2, 3, 4, 5]);
//! let edx = SimpleEdx::new(DefaultCryptoProvider, Int64Serializer, DsValueSerializer);
//! let arq = Arq::new(edx, SumPrefix);
//!
//! let key = arq.generate_key().unwrap();
//! let blob = arq.setup(&key, &table, &SerialMap).unwrap();
//! let store = arq.load_eds(&blob).unwrap();
//!
//! let rq = RangeQuery::new(&table.domain(), 1, 4).unwrap();
//! let sum = arq.query(&key, table.domain(), rq, &store).unwrap();
//! assert_eq!(sum.as_i64(), 9);
//! ```
//!
//! ## What's NOT Provided
//!
//! - A wire protocol or server — callers own transport and storage
//! - Dynamic updates to a table already set up
//! - A CLI

#![forbid(unsafe_code)]
#![doc(html_root_url = "https://docs.rs/arca/0.1.0")]

pub mod arq;
pub mod crypto;
pub mod domain;
pub mod edx;
pub mod error;
pub mod math;
pub mod parallel;
pub mod range_query;
pub mod schemes;
pub mod serialize;
pub mod table;

pub use arq::Arq;
pub use crypto::{CryptoProvider, DefaultCryptoProvider};
pub use domain::Domain;
pub use edx::{
    deserialize_store, serialize_store, Edx, Emm, EncryptedStore, PiBaseEmm, PiBaseRevealingEmm,
    RevealingEdx, RevealingEmm, SimpleEdx, SimpleRevealingEdx,
};
pub use error::ArcaError;
pub use parallel::{ParallelMap, SerialMap};
pub use range_query::RangeQuery;
pub use schemes::{
    MedianAlphaApprox, MedianAlphaApproxQuerier, MinimumAsTable, MinimumAsTableQuerier,
    MinimumLinearEmt, MinimumLinearEmtQuerier, MinimumSparseTable, MinimumSparseTableQuerier,
    ModeAsTable, ModeAsTableQuerier, Number, RangeAggregateQuerier, RangeAggregateScheme,
    ResolveResult, SumPrefix, SumPrefixQuerier,
};
pub use serialize::{
    DsValue, DsValueSerializer, Int32Serializer, Int64Serializer, Serializer, Tuple2Serializer,
    Tuple3Serializer,
};
pub use table::Table;

#[cfg(feature = "parallel")]
pub use parallel::RayonMap;
