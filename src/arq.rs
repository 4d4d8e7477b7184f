//! The ARQ composer: binds an EDX scheme and a
//! plaintext aggregate scheme into one `generate_key` / `setup` /
//! `load_eds` / `query` surface.

use std::collections::HashMap;
use std::hash::Hash;
use std::marker::PhantomData;

use tracing::{debug, instrument};
use zeroize::Zeroizing;

use crate::domain::Domain;
use crate::edx::{Edx, EncryptedStore};
use crate::error::ArcaError;
use crate::parallel::ParallelMap;
use crate::range_query::RangeQuery;
use crate::schemes::{Number, RangeAggregateQuerier, RangeAggregateScheme, ResolveResult};
use crate::table::Table;

/// `ARQ(EDX, scheme)`: setup runs the scheme's `S` then `EDX.encrypt`;
/// query runs the scheme's `Q`, tokenises each auxiliary key, fetches
/// and decrypts, and invokes `R` — looping if `R` asks for more keys.
pub struct Arq<E, S, K, V> {
    edx: E,
    scheme: S,
    _marker: PhantomData<fn() -> (K, V)>,
}

impl<E, S, K, V> Arq<E, S, K, V>
where
    K: Eq + Hash + Clone + Send,
    V: Clone + Send,
    E: Edx<K, V>,
    S: RangeAggregateScheme<HashMap<K, V>, K, V>,
{
    pub fn new(edx: E, scheme: S) -> Self {
        Self { edx, scheme, _marker: PhantomData }
    }

    pub fn generate_key(&self) -> Result<Zeroizing<Vec<u8>>, ArcaError> {
        self.edx.generate_key()
    }

    #[instrument(skip_all, fields(records = table.number_of_records()))]
    pub fn setup<P: ParallelMap>(&self, key: &[u8], table: &Table, parallel: &P) -> Result<Vec<u8>, ArcaError> {
        let ds = self.scheme.setup(table);
        debug!(ds_entries = ds.len(), "built plaintext DS");
        self.edx.encrypt(key, &ds, parallel)
    }

    pub fn load_eds(&self, blob: &[u8]) -> Result<EncryptedStore, ArcaError> {
        self.edx.load_eds(blob)
    }

    #[instrument(skip_all, fields(start = rq.start, end = rq.end))]
    pub fn query(&self, key: &[u8], domain: Domain, rq: RangeQuery, store: &EncryptedStore) -> Result<Number, ArcaError> {
        let querier = self.scheme.generate_querier(domain, rq)?;
        let mut aux_keys = querier.query();

        loop {
            debug!(aux_keys = aux_keys.len(), "fetching auxiliary keys");
            let mut responses = Vec::with_capacity(aux_keys.len());
            for k in &aux_keys {
                let token = self.edx.token(key, k)?;
                let ciphertext = self
                    .edx
                    .query(&token, store)
                    .ok_or_else(|| ArcaError::DataModel("auxiliary key missing from encrypted store".into()))?;
                responses.push(self.edx.resolve(key, &ciphertext)?);
            }

            match querier.resolve(responses)? {
                ResolveResult::Done(aggregate) => return Ok(aggregate),
                ResolveResult::Continue(more) => aux_keys = more,
            }
        }
    }
}
