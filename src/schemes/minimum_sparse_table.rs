use std::collections::HashMap;

use super::common::{per_point_values, point_minimum, sliding_window_minimum_left_hanging};
use super::{Number, RangeAggregateQuerier, RangeAggregateScheme, ResolveResult};
use crate::domain::Domain;
use crate::error::ArcaError;
use crate::math::log2_floor;
use crate::range_query::RangeQuery;
use crate::serialize::DsValue;
use crate::table::Table;

/// Range minimum via a sparse table (BFPSS05): for every power `p` and
/// every domain point `i`, the minimum of the left-hanging window
/// `[i - 2^p + 1, i]`, keyed by `(p, i)`. O(n log n) space, at most 2
/// lookups per query.
#[derive(Debug, Default, Clone, Copy)]
pub struct MinimumSparseTable;

impl RangeAggregateScheme<HashMap<(i64, i64), DsValue>, (i64, i64), DsValue> for MinimumSparseTable {
    type Querier = MinimumSparseTableQuerier;

    fn setup(&self, table: &Table) -> HashMap<(i64, i64), DsValue> {
        let domain = table.domain();
        let values = per_point_values(table, domain, |slice| point_minimum(slice));
        let max_power = log2_floor(domain.size().max(1));

        let mut ds = HashMap::new();
        for p in 0..=max_power {
            let window = 1i64 << p;
            let minima = sliding_window_minimum_left_hanging(&values, window);
            for (i, min) in minima.into_iter().enumerate() {
                ds.insert((p, domain.start + i as i64), DsValue::Int(min));
            }
        }
        ds
    }

    fn generate_querier(&self, _domain: Domain, rq: RangeQuery) -> Result<Self::Querier, ArcaError> {
        Ok(MinimumSparseTableQuerier { rq })
    }
}

pub struct MinimumSparseTableQuerier {
    rq: RangeQuery,
}

impl MinimumSparseTableQuerier {
    /// Computes the `(power, index)` pair used by both the standalone
    /// sparse-table scheme and the linear-EMT scheme's per-block
    /// sparse-table sub-structure.
    pub(crate) fn keys_for(start: i64, end: i64) -> Vec<(i64, i64)> {
        let p = log2_floor(end - start);
        let w = 1i64 << p;
        let lower = start + w - 1;
        let upper = end - 1;
        if lower == upper {
            vec![(p, lower)]
        } else {
            vec![(p, lower), (p, upper)]
        }
    }
}

impl RangeAggregateQuerier<(i64, i64), DsValue> for MinimumSparseTableQuerier {
    fn query(&self) -> Vec<(i64, i64)> {
        Self::keys_for(self.rq.start, self.rq.end)
    }

    fn resolve(&self, responses: Vec<DsValue>) -> Result<ResolveResult<(i64, i64)>, ArcaError> {
        let min = responses.iter().map(DsValue::as_int).min().ok_or(ArcaError::EmptyResponse)?;
        Ok(ResolveResult::Done(Number::Int(min)))
    }
}
