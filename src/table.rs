//! A multiset-valued mapping from domain points to record values.

use std::collections::HashMap;

use crate::domain::Domain;
use crate::range_query::RangeQuery;

/// Maps each domain point to the (unordered, duplicate-preserving) list
/// of record values present at that point. Points with no records are
/// legal and simply absent from `entries`.
#[derive(Debug, Clone)]
pub struct Table {
    entries: HashMap<i64, Vec<i64>>,
    domain: Domain,
}

impl Table {
    /// Builds a `Table` from `(domain_point, value)` pairs. The domain is
    /// `[min point, max point + 1)`.
    ///
    /// Panics if `records` is empty — a `Table` always has at least one
    /// record to derive a domain from.
    pub fn make(records: impl IntoIterator<Item = (i64, i64)>) -> Self {
        let mut entries: HashMap<i64, Vec<i64>> = HashMap::new();
        let mut min_point = i64::MAX;
        let mut max_point = i64::MIN;

        for (point, value) in records {
            min_point = min_point.min(point);
            max_point = max_point.max(point);
            entries.entry(point).or_default().push(value);
        }

        assert!(min_point <= max_point, "Table::make requires at least one record");

        Self {
            entries,
            domain: Domain {
                start: min_point,
                end: max_point + 1,
            },
        }
    }

    /// Builds a `Table` from a plain list, treating it as `enumerate(list)`.
    pub fn make_from_list(values: impl IntoIterator<Item = i64>) -> Self {
        Self::make(values.into_iter().enumerate().map(|(i, v)| (i as i64, v)))
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn number_of_filled_domain_points(&self) -> usize {
        self.entries.len()
    }

    pub fn number_of_records(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// The multiset of values at `domain_value`, empty if absent.
    pub fn filter(&self, domain_value: i64) -> &[i64] {
        self.entries.get(&domain_value).map_or(&[], Vec::as_slice)
    }

    /// The concatenation of `filter` over `[range_query.start, range_query.end)`.
    pub fn filter_range(&self, range_query: &RangeQuery) -> Vec<i64> {
        (range_query.start..range_query.end)
            .flat_map(|point| self.filter(point).iter().copied())
            .collect()
    }

    /// One integer per domain point (in `[domain.start, domain.end)` order),
    /// applying `disambiguator` to the multiset present at that point.
    /// Used by schemes that need a single representative value per point
    /// (e.g. the sparse-table family, keyed by per-point minimum).
    pub fn iterate_over_unique_domain_points<'a>(
        &'a self,
        mut disambiguator: impl FnMut(&[i64]) -> i64 + 'a,
    ) -> impl Iterator<Item = i64> + 'a {
        (self.domain.start..self.domain.end).map(move |point| disambiguator(self.filter(point)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_derives_domain_from_min_and_max_point() {
        let t = Table::make([(2, 10), (5, 20), (2, 30)]);
        assert_eq!(t.domain(), Domain { start: 2, end: 6 });
        assert_eq!(t.filter(2), &[10, 30]);
        assert_eq!(t.filter(4), &[] as &[i64]);
    }

    #[test]
    fn make_from_list_enumerates() {
        let t = Table::make_from_list([1, 2, 3, 4, 5]);
        assert_eq!(t.domain(), Domain { start: 0, end: 5 });
        assert_eq!(t.filter(3), &[4]);
    }

    #[test]
    fn filter_range_concatenates_in_point_order() {
        let t = Table::make_from_list([1, 2, 3, 4, 5]);
        let rq = RangeQuery::new(&t.domain(), 1, 4).unwrap();
        assert_eq!(t.filter_range(&rq), vec![2, 3, 4]);
    }

    #[test]
    fn iterate_over_unique_domain_points_fills_gaps() {
        let t = Table::make([(0, 5), (2, 1)]);
        let points: Vec<i64> = t
            .iterate_over_unique_domain_points(|lst| lst.first().copied().unwrap_or(0))
            .collect();
        assert_eq!(points, vec![5, 0, 1]);
    }
}
