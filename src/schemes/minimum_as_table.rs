use std::collections::HashMap;

use super::common::{per_point_values, point_minimum};
use super::{Number, RangeAggregateQuerier, RangeAggregateScheme, ResolveResult};
use crate::domain::Domain;
use crate::error::ArcaError;
use crate::math::{bit_length, log2_ceil};
use crate::range_query::RangeQuery;
use crate::serialize::DsValue;
use crate::table::Table;

/// Range minimum via an [AS87] interval table: for every power `p` in
/// `[0, K]`, the domain is partitioned into segments of size `2^p`,
/// each split at its midpoint with the running minimum precomputed
/// outward from the split in both directions. Any `[s, e]` pair shares
/// a segment's halves at the power where they first diverge — exactly
/// 2 lookups per query, with smaller constants than the sliding-window
/// sparse table.
#[derive(Debug, Default, Clone, Copy)]
pub struct MinimumAsTable;

impl RangeAggregateScheme<HashMap<(i64, i64), DsValue>, (i64, i64), DsValue> for MinimumAsTable {
    type Querier = MinimumAsTableQuerier;

    fn setup(&self, table: &Table) -> HashMap<(i64, i64), DsValue> {
        let domain = table.domain();
        let values = per_point_values(table, domain, |slice| point_minimum(slice));
        let n = values.len() as i64;
        let max_power = log2_ceil(n.max(1));

        let mut ds = HashMap::new();
        for p in 0..=max_power {
            build_level(&values, p, domain, &mut ds);
        }
        ds
    }

    fn generate_querier(&self, _domain: Domain, rq: RangeQuery) -> Result<Self::Querier, ArcaError> {
        Ok(MinimumAsTableQuerier { rq })
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

        let mut running = i64::MAX;
        for i in (block_start..mid).rev() {
            running = running.min(values[i as usize]);
            ds.insert((p, domain.start + i), DsValue::Int(running));
        }

        let mut running = i64::MAX;
        for i in mid..block_end {
            running = running.min(values[i as usize]);
            ds.insert((p, domain.start + i), DsValue::Int(running));
        }

        block_start += block_size;
    }
}

pub struct MinimumAsTableQuerier {
    rq: RangeQuery,
}

impl MinimumAsTableQuerier {
    /// Shared with the mode AS-table scheme, which windows identically
    /// and only differs in the value stored and the resolver.
    pub(crate) fn keys_for(start: i64, end: i64) -> (i64, i64, i64) {
        let s = start;
        let e = end - 1;
        let p = bit_length(s ^ e) as i64;
        (p, s, e)
    }
}

impl RangeAggregateQuerier<(i64, i64), DsValue> for MinimumAsTableQuerier {
    fn query(&self) -> Vec<(i64, i64)> {
        let (p, s, e) = Self::keys_for(self.rq.start, self.rq.end);
        if s == e {
            vec![(p, s)]
        } else {
            vec![(p, s), (p, e)]
        }
    }

    fn resolve(&self, responses: Vec<DsValue>) -> Result<ResolveResult<(i64, i64)>, ArcaError> {
        let min = responses.iter().map(DsValue::as_int).min().ok_or(ArcaError::EmptyResponse)?;
        Ok(ResolveResult::Done(Number::Int(min)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimum_as_table_matches_a_known_scenario() {
        let table = Table::make_from_list([5, 3, 8, 1, 9, 2, 7]);
        let scheme = MinimumAsTable;
        let ds = scheme.setup(&table);
        let rq = RangeQuery::new(&table.domain(), 2, 5).unwrap();
        let querier = scheme.generate_querier(table.domain(), rq).unwrap();

        let responses: Vec<DsValue> = querier.query().iter().map(|k| ds[k].clone()).collect();
        assert_eq!(querier.resolve(responses).unwrap(), ResolveResult::Done(Number::Int(1)));
    }

    #[test]
    fn every_query_key_exists_and_matches_the_brute_force_minimum() {
        let table = Table::make_from_list([5, 3, 8, 1, 9, 2, 7, 4, 6, 0]);
        let scheme = MinimumAsTable;
        let ds = scheme.setup(&table);
        let domain = table.domain();

        for rq in RangeQuery::enumerate_all(&domain) {
            let querier = scheme.generate_querier(domain, rq).unwrap();
            let keys = querier.query();
            assert!(keys.len() <= 2);
            let responses: Vec<DsValue> = keys.iter().map(|k| ds[k].clone()).collect();
            let expected = table.filter_range(&rq).into_iter().min().unwrap();
            assert_eq!(querier.resolve(responses).unwrap(), ResolveResult::Done(Number::Int(expected)));
        }
    }
}
