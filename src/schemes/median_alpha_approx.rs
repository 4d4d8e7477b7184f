use std::collections::HashMap;

use super::common::{ceil_div, exact_median};
use super::{Number, RangeAggregateQuerier, RangeAggregateScheme, ResolveResult};
use crate::domain::Domain;
use crate::error::ArcaError;
use crate::math::log2_ceil;
use crate::range_query::RangeQuery;
use crate::serialize::DsValue;
use crate::table::Table;

/// α-approximate range median ([BKMT05]): for each `level ∈ [1, K]`
/// (`block = 2^(K-level)`), each block `j`, and each `p ∈ [1, P]`
/// (`P = ceil(2(1+α)/(1-α))`), the exact median of the block's first
/// `p` sub-blocks is precomputed and stored as a length-`P` list under
/// `(level, j)`. A query picks one `(level, j)` entry and one index
/// into its list.
///
/// Storage cost (`O(n P log n)` entries of size `P`) grows without
/// bound as `α -> 1`; this is documented rather than capped, per the
/// scheme's standing design note.
#[derive(Debug, Clone, Copy)]
pub struct MedianAlphaApprox {
    alpha: f64,
}

impl MedianAlphaApprox {
    pub fn new(alpha: f64) -> Result<Self, ArcaError> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(ArcaError::Parameter("alpha must be in (0, 1)".into()));
        }
        Ok(Self { alpha })
    }

    fn medians_per_entry(&self) -> i64 {
        ((2.0 * (1.0 + self.alpha) / (1.0 - self.alpha)).ceil()) as i64
    }
}

type Ds = HashMap<(i64, i64), DsValue>;

impl RangeAggregateScheme<Ds, (i64, i64), DsValue> for MedianAlphaApprox {
    type Querier = MedianAlphaApproxQuerier;

    fn setup(&self, table: &Table) -> Ds {
        let domain = table.domain();
        let n = domain.size();
        let k = log2_ceil(n.max(1)).max(1);
        let p_total = self.medians_per_entry();

        let mut ds = HashMap::new();
        for level in 1..=k {
            let block = 1i64 << (k - level);
            let num_blocks = ceil_div(n, block);
            for j in 1..=num_blocks {
                let mut medians = Vec::with_capacity(p_total as usize);
                for pp in 1..=p_total {
                    let left = ((j - 1) * block).min(n - 1);
                    let right = (((j - 1) * block + pp * block).min(n)).max(left);
                    let median = if left < right {
                        let rq = RangeQuery::new(&domain, domain.start + left, domain.start + right)
                            .expect("derived block bounds stay within the domain");
                        exact_median(&table.filter_range(&rq))
                    } else {
                        0
                    };
                    medians.push(median);
                }
                ds.insert((level, j), DsValue::IntVec(medians));
            }
        }
        ds
    }

    fn generate_querier(&self, domain: Domain, rq: RangeQuery) -> Result<Self::Querier, ArcaError> {
        let n = domain.size();
        let k = log2_ceil(n.max(1)).max(1);
        let p_total = self.medians_per_entry();

        let m = 2 * (2.0 * self.alpha / (1.0 - self.alpha)).ceil() as i64;
        let l = k - crate::math::log2_floor(rq.length()) + 1;
        let off = crate::math::log2_floor((m + 2).max(1)) - 2;
        let level = (l + off).clamp(1, k);
        let bs = 1i64 << (k - level);

        let rel_start = rq.start - domain.start;
        let rel_end = rq.end - domain.start;
        let sbi = ceil_div(rel_start, bs) + 1;
        let ebi = rel_end / bs;
        let idx = (ebi - sbi).clamp(0, p_total - 1);

        Ok(MedianAlphaApproxQuerier { level, sbi, idx })
    }
}

pub struct MedianAlphaApproxQuerier {
    level: i64,
    sbi: i64,
    idx: i64,
}

impl RangeAggregateQuerier<(i64, i64), DsValue> for MedianAlphaApproxQuerier {
    fn query(&self) -> Vec<(i64, i64)> {
        vec![(self.level, self.sbi)]
    }

    fn resolve(&self, responses: Vec<DsValue>) -> Result<ResolveResult<(i64, i64)>, ArcaError> {
        let medians = responses.first().ok_or(ArcaError::EmptyResponse)?.as_int_vec();
        let idx = (self.idx as usize).min(medians.len().saturating_sub(1));
        Ok(ResolveResult::Done(Number::Int(medians[idx])))
    }
}
