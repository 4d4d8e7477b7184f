//! The sub-interval a caller actually asks an aggregate for.

use rand_core::RngCore;

use crate::domain::Domain;
use crate::error::ArcaError;

/// `[start, end)` — the queried sub-interval. Always validated against a
/// `Domain` at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeQuery {
    pub start: i64,
    pub end: i64,
}

impl RangeQuery {
    pub fn new(domain: &Domain, start: i64, end: i64) -> Result<Self, ArcaError> {
        if start >= end {
            return Err(ArcaError::Parameter("query start must be < end".into()));
        }
        if !domain.contains_range(start, end) {
            return Err(ArcaError::Parameter("query is not contained in domain".into()));
        }
        Ok(Self { start, end })
    }

    /// `end - start`.
    pub fn length(&self) -> i64 {
        self.end - self.start
    }

    /// Every `RangeQuery` over `domain`, in increasing `(start, end)`
    /// order. Intended for exhaustive testing over small domains, not
    /// for production query planning.
    pub fn enumerate_all(domain: &Domain) -> impl Iterator<Item = RangeQuery> + '_ {
        (domain.start..domain.end).flat_map(move |start| {
            ((start + 1)..=domain.end).map(move |end| RangeQuery { start, end })
        })
    }

    /// Samples `num_samples_per_bucket` queries per percentile bucket of
    /// query length (buckets of width `bucket_size` percent of the
    /// domain size), returning `(percentile, query)` pairs. Used by
    /// benchmarks and property tests to exercise a representative spread
    /// of query shapes without enumerating every possible range.
    pub fn enumerate_samples_from_buckets(
        domain: &Domain,
        bucket_size: i64,
        num_samples_per_bucket: usize,
        rng: &mut impl RngCore,
    ) -> Vec<(i64, RangeQuery)> {
        let number_of_buckets = (100 + bucket_size - 1) / bucket_size;
        let mut out = Vec::new();

        for bucket in 0..number_of_buckets {
            let percentile = (bucket + 1) * bucket_size;
            let bucket_length = (percentile * domain.size()) / 100;
            if bucket_length < 1 {
                continue;
            }
            let start_upper_bound = (domain.end - bucket_length - 1).max(domain.start);

            for _ in 0..num_samples_per_bucket {
                let span = (start_upper_bound - domain.start + 1).max(1) as u64;
                let start = domain.start + (rng.next_u64() % span) as i64;
                let end = (start + bucket_length).min(domain.end);
                out.push((percentile, RangeQuery { start, end }));
            }
        }

        out
    }
}
