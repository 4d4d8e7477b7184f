use std::collections::HashMap;

use super::common::{per_point_values, point_minimum, sliding_window_minimum_left_hanging};
use super::{Number, RangeAggregateQuerier, RangeAggregateScheme, ResolveResult};
use crate::domain::Domain;
use crate::error::ArcaError;
use crate::math::log2_ceil;
use crate::range_query::RangeQuery;
use crate::serialize::DsValue;
use crate::table::Table;

const LOOKUP_LEFT: u8 = 0;
const LOOKUP_RIGHT: u8 = 1;
const SPARSE_TABLE: u8 = 2;

/// Range minimum via a linear-space blocked table (EMT22). The domain
/// is split into blocks of size `b = max(ceil(log2 n), 1)`; each point
/// gets a prefix-min and a suffix-min within its own block
/// (`LOOKUP_LEFT`/`LOOKUP_RIGHT`), and a sparse table is built over the
/// vector of per-block minimums (`SPARSE_TABLE`) to answer the
/// between-blocks portion of a query. O(n) space, 2-4 lookups.
#[derive(Debug, Clone, Copy)]
pub struct MinimumLinearEmt {
    block_size: i64,
}

impl MinimumLinearEmt {
    pub fn new(table: &Table) -> Self {
        let n = table.domain().size();
        Self { block_size: log2_ceil(n.max(1)).max(1) }
    }
}

type Ds = HashMap<(u8, i64, i64), DsValue>;

impl RangeAggregateScheme<Ds, (u8, i64, i64), DsValue> for MinimumLinearEmt {
    type Querier = MinimumLinearEmtQuerier;

    fn setup(&self, table: &Table) -> Ds {
        let domain = table.domain();
        let values = per_point_values(table, domain, |slice| point_minimum(slice));
        let n = values.len() as i64;
        let b = self.block_size;
        let mut ds = HashMap::new();

        let mut block_minima = Vec::new();
        let mut block_start = 0i64;
        while block_start < n {
            let block_end = (block_start + b).min(n);

            let mut running = i64::MAX;
            for i in block_start..block_end {
                running = running.min(values[i as usize]);
                ds.insert((LOOKUP_LEFT, domain.start + i, 0), DsValue::Int(running));
            }
            let block_min = running;

            let mut running = i64::MAX;
            for i in (block_start..block_end).rev() {
                running = running.min(values[i as usize]);
                ds.insert((LOOKUP_RIGHT, domain.start + i, 0), DsValue::Int(running));
            }

            block_minima.push(block_min);
            block_start += b;
        }

        let max_power = crate::math::log2_floor(block_minima.len().max(1) as i64);
        for p in 0..=max_power {
            let minima = sliding_window_minimum_left_hanging(&block_minima, 1i64 << p);
            for (j, min) in minima.into_iter().enumerate() {
                ds.insert((SPARSE_TABLE, p, j as i64), DsValue::Int(min));
            }
        }

        ds
    }

    fn generate_querier(&self, domain: Domain, rq: RangeQuery) -> Result<Self::Querier, ArcaError> {
        if rq.length() < self.block_size {
            return Err(ArcaError::PreconditionViolation(format!(
                "query length {} is smaller than the linear-EMT block size {}",
                rq.length(),
                self.block_size
            )));
        }
        Ok(MinimumLinearEmtQuerier { domain, rq, block_size: self.block_size })
    }
}

pub struct MinimumLinearEmtQuerier {
    domain: Domain,
    rq: RangeQuery,
    block_size: i64,
}

impl RangeAggregateQuerier<(u8, i64, i64), DsValue> for MinimumLinearEmtQuerier {
    fn query(&self) -> Vec<(u8, i64, i64)> {
        let b = self.block_size;
        let mut keys = vec![(LOOKUP_RIGHT, self.rq.start, 0), (LOOKUP_LEFT, self.rq.end - 1, 0)];

        let rel_start = self.rq.start - self.domain.start;
        let rel_end = self.rq.end - self.domain.start;
        let bs = rel_start.div_euclid(b);
        let be = rel_end.div_euclid(b);

        if be - bs > 1 {
            for (p, j) in super::minimum_sparse_table::MinimumSparseTableQuerier::keys_for(bs + 1, be) {
                keys.push((SPARSE_TABLE, p, j));
            }
        }

        keys
    }

    fn resolve(&self, responses: Vec<DsValue>) -> Result<ResolveResult<(u8, i64, i64)>, ArcaError> {
        let min = responses.iter().map(DsValue::as_int).min().ok_or(ArcaError::EmptyResponse)?;
        Ok(ResolveResult::Done(Number::Int(min)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimum_linear_emt_matches_a_known_scenario() {
        let values: Vec<i64> = (0..32).map(|i| (i * 37 + 11) % 97).collect();
        let table = Table::make_from_list(values.clone());
        let scheme = MinimumLinearEmt::new(&table);
        let ds = scheme.setup(&table);
        let rq = RangeQuery::new(&table.domain(), 3, 14).unwrap();
        let querier = scheme.generate_querier(table.domain(), rq).unwrap();

        let responses: Vec<DsValue> = querier.query().iter().map(|k| ds[k].clone()).collect();
        let expected = values[3..14].iter().copied().min().unwrap();
        assert_eq!(querier.resolve(responses).unwrap(), ResolveResult::Done(Number::Int(expected)));
    }

    #[test]
    fn rejects_queries_shorter_than_the_block_size() {
        let table = Table::make_from_list((0..32).collect::<Vec<i64>>());
        let scheme = MinimumLinearEmt::new(&table);
        let rq = RangeQuery::new(&table.domain(), 0, 1).unwrap();
        assert!(scheme.generate_querier(table.domain(), rq).is_err());
    }

    #[test]
    fn matches_brute_force_minimum_across_many_ranges() {
        let values: Vec<i64> = (0..40).map(|i| (i * 13 + 7) % 53).collect();
        let table = Table::make_from_list(values.clone());
        let scheme = MinimumLinearEmt::new(&table);
        let ds = scheme.setup(&table);
        let domain = table.domain();

        for rq in RangeQuery::enumerate_all(&domain) {
            if rq.length() < scheme.block_size {
                continue;
            }
            let querier = scheme.generate_querier(domain, rq).unwrap();
            let responses: Vec<DsValue> = querier.query().iter().map(|k| ds[k].clone()).collect();
            let expected = values[rq.start as usize..rq.end as usize].iter().copied().min().unwrap();
            assert_eq!(querier.resolve(responses).unwrap(), ResolveResult::Done(Number::Int(expected)));
        }
    }
}
