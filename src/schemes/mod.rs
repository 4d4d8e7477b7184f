//! Plaintext range-aggregate schemes: for minimum, mode,
//! median, and sum, a setup `S` that produces a dictionary keyed by
//! small tuples, a querier `Q` that emits a bounded set of auxiliary
//! keys, and a resolver `R` that combines the responses.

mod common;
mod median_alpha_approx;
mod minimum_as_table;
mod minimum_linear_emt;
mod minimum_sparse_table;
mod mode_as_table;
mod sum_prefix;

pub use median_alpha_approx::{MedianAlphaApprox, MedianAlphaApproxQuerier};
pub use minimum_as_table::{MinimumAsTable, MinimumAsTableQuerier};
pub use minimum_linear_emt::{MinimumLinearEmt, MinimumLinearEmtQuerier};
pub use minimum_sparse_table::{MinimumSparseTable, MinimumSparseTableQuerier};
pub use mode_as_table::{ModeAsTable, ModeAsTableQuerier};
pub use sum_prefix::{SumPrefix, SumPrefixQuerier};

use crate::domain::Domain;
use crate::error::ArcaError;
use crate::range_query::RangeQuery;
use crate::table::Table;

/// The numeric kinds a resolver can produce. Every scheme in this
/// crate resolves to an exact integer, but the type stays a sum so the
/// ARQ composer's callers always see `Number` regardless of which
/// scheme they queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Number {
    Int(i64),
}

impl Number {
    pub fn as_i64(&self) -> i64 {
        match self {
            Number::Int(v) => *v,
        }
    }
}

/// What a querier's resolve step produced: either the final aggregate,
/// or a further batch of auxiliary keys to fetch and resolve again.
/// None of the six schemes in this crate use `Continue` — every Q
/// computes its full key set up front — but the shape is kept generic
/// so the ARQ composer (4.F) does not need to special-case schemes
/// that might.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveResult<K> {
    Done(Number),
    Continue(Vec<K>),
}

/// `(S, Q)` half of a scheme: builds the plaintext DS and mints
/// ephemeral queriers bound to one `RangeQuery`.
pub trait RangeAggregateScheme<DS, K, V> {
    type Querier: RangeAggregateQuerier<K, V>;

    fn setup(&self, table: &Table) -> DS;

    fn generate_querier(&self, domain: Domain, rq: RangeQuery) -> Result<Self::Querier, ArcaError>;
}

/// `R` half of a scheme, bound to one `RangeQuery`.
pub trait RangeAggregateQuerier<K, V> {
    /// The auxiliary keys to fetch from the DS, in the order responses
    /// must be passed back to `resolve`.
    fn query(&self) -> Vec<K>;

    fn resolve(&self, responses: Vec<V>) -> Result<ResolveResult<K>, ArcaError>;
}
