use std::collections::HashMap;

use super::{Number, RangeAggregateQuerier, RangeAggregateScheme, ResolveResult};
use crate::domain::Domain;
use crate::error::ArcaError;
use crate::range_query::RangeQuery;
use crate::serialize::DsValue;
use crate::table::Table;

/// Exact prefix-sum table: `P[i] = sum(Table[start..=i])`, keyed by the
/// raw domain point. A query needs one or two lookups.
#[derive(Debug, Default, Clone, Copy)]
pub struct SumPrefix;

impl RangeAggregateScheme<HashMap<i64, DsValue>, i64, DsValue> for SumPrefix {
    type Querier = SumPrefixQuerier;

    fn setup(&self, table: &Table) -> HashMap<i64, DsValue> {
        let domain = table.domain();
        let mut ds = HashMap::new();
        let mut running = 0i64;
        for point in domain.start..domain.end {
            running += table.filter(point).iter().sum::<i64>();
            ds.insert(point, DsValue::Int(running));
        }
        ds
    }

    fn generate_querier(&self, domain: Domain, rq: RangeQuery) -> Result<Self::Querier, ArcaError> {
        Ok(SumPrefixQuerier { domain, rq })
    }
}

pub struct SumPrefixQuerier {
    domain: Domain,
    rq: RangeQuery,
}

impl RangeAggregateQuerier<i64, DsValue> for SumPrefixQuerier {
    fn query(&self) -> Vec<i64> {
        let mut keys = Vec::with_capacity(2);
        if self.rq.start - 1 >= self.domain.start {
            keys.push(self.rq.start - 1);
        }
        keys.push(self.rq.end - 1);
        keys
    }

    fn resolve(&self, responses: Vec<DsValue>) -> Result<ResolveResult<i64>, ArcaError> {
        let result = match responses.as_slice() {
            [lower, upper] => upper.as_int() - lower.as_int(),
            [only] => only.as_int(),
            [] => return Err(ArcaError::EmptyResponse),
            _ => return Err(ArcaError::EmptyResponse),
        };
        Ok(ResolveResult::Done(Number::Int(result)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_prefix_matches_a_known_scenario() {
        let table = Table::make_from_list([1, 2, 3, 4, 5]);
        let scheme = SumPrefix;
        let ds = scheme.setup(&table);
        let rq = RangeQuery::new(&table.domain(), 1, 4).unwrap();
        let querier = scheme.generate_querier(table.domain(), rq).unwrap();

        let responses: Vec<DsValue> = querier.query().into_iter().map(|k| ds[&k].clone()).collect();
        let result = querier.resolve(responses).unwrap();
        assert_eq!(result, ResolveResult::Done(Number::Int(9)));
    }

    #[test]
    fn single_lookup_at_the_domain_start() {
        let table = Table::make_from_list([1, 2, 3, 4, 5]);
        let scheme = SumPrefix;
        let ds = scheme.setup(&table);
        let rq = RangeQuery::new(&table.domain(), 0, 3).unwrap();
        let querier = scheme.generate_querier(table.domain(), rq).unwrap();

        assert_eq!(querier.query(), vec![2]);
        let responses: Vec<DsValue> = querier.query().into_iter().map(|k| ds[&k].clone()).collect();
        assert_eq!(querier.resolve(responses).unwrap(), ResolveResult::Done(Number::Int(6)));
    }
}
