use std::collections::HashMap;

use super::common::{exact_mode, fold_running_mode, per_point_values};
use super::minimum_as_table::MinimumAsTableQuerier;
use super::{Number, RangeAggregateQuerier, RangeAggregateScheme, ResolveResult};
use crate::domain::Domain;
use crate::error::ArcaError;
use crate::math::log2_ceil;
use crate::range_query::RangeQuery;
use crate::serialize::DsValue;
use crate::table::Table;

/// Approximate range mode via a [BKMT05] AS-style table: windowed
/// exactly like [`MinimumAsTable`](super::MinimumAsTable), but the
/// value stored per `(p, i)` is a running `(mode, count)` pair kept by
/// an online Boyer-Moore majority counter over the per-point exact
/// modes, folded outward from each segment's split point. Resolving
/// picks the response with the larger count, giving a ½-approximate
/// mode.
///
/// TODO: the per-point disambiguator here is the exact point-mode, not
/// a count — a known inexact source inherited unchanged from the
/// original design; the ½-approximate-mode predicate still holds.
#[derive(Debug, Default, Clone, Copy)]
pub struct ModeAsTable;

impl RangeAggregateScheme<HashMap<(i64, i64), DsValue>, (i64, i64), DsValue> for ModeAsTable {
    type Querier = ModeAsTableQuerier;

    fn setup(&self, table: &Table) -> HashMap<(i64, i64), DsValue> {
        let domain = table.domain();
        let values = per_point_values(table, domain, exact_mode);
        let n = values.len() as i64;
        let max_power = log2_ceil(n.max(1));

        let mut ds = HashMap::new();
        for p in 0..=max_power {
            build_level(&values, p, domain, &mut ds);
        }
        ds
    }

    fn generate_querier(&self, _domain: Domain, rq: RangeQuery) -> Result<Self::Querier, ArcaError> {
        Ok(ModeAsTableQuerier { rq })
    }
}

fn build_level(values: &[i64], p: i64, domain: Domain, ds: &mut HashMap<(i64, i64), DsValue>) {
    let n = values.len() as i64;
    let block_size = 1i64 << p;
    let half = block_size >> 1;
    let mut block_start = 0i64;

    while block_start < n {
        let block_end = (block_start + block_size).min(n);
        let mid = (block_start + half).min(block_end);

        let mut running = None;
        for i in (block_start..mid).rev() {
            running = Some(fold_running_mode(running, values[i as usize]));
            let (mode, count) = running.unwrap();
            ds.insert((p, domain.start + i), DsValue::Pair(mode, count));
        }

        let mut running = None;
        for i in mid..block_end {
            running = Some(fold_running_mode(running, values[i as usize]));
            let (mode, count) = running.unwrap();
            ds.insert((p, domain.start + i), DsValue::Pair(mode, count));
        }

        block_start += block_size;
    }
}

pub struct ModeAsTableQuerier {
    rq: RangeQuery,
}

impl RangeAggregateQuerier<(i64, i64), DsValue> for ModeAsTableQuerier {
    fn query(&self) -> Vec<(i64, i64)> {
        let (p, s, e) = MinimumAsTableQuerier::keys_for(self.rq.start, self.rq.end);
        if s == e {
            vec![(p, s)]
        } else {
            vec![(p, s), (p, e)]
        }
    }

    fn resolve(&self, responses: Vec<DsValue>) -> Result<ResolveResult<(i64, i64)>, ArcaError> {
        let (mode, _) = responses
            .iter()
            .map(DsValue::as_pair)
            .max_by_key(|(_, count)| *count)
            .ok_or(ArcaError::EmptyResponse)?;
        Ok(ResolveResult::Done(Number::Int(mode)))
    }
}
