use std::hint::black_box;

use arca::{
    Arq, DefaultCryptoProvider, DsValueSerializer, Int64Serializer, MinimumAsTable, RangeQuery,
    SerialMap, SimpleEdx, SumPrefix, Table, Tuple2Serializer,
};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const TABLE_SIZES: &[usize] = &[256, 2_048, 16_384];

fn make_table(size: usize) -> Table {
    let values: Vec<i64> = (0..size as i64).map(|i| (i * 37 + 11) % 997).collect();
    Table::make_from_list(values)
}

fn bench_setup(c: &mut Criterion) {
    let _ = tracing_subscriber::fmt::try_init();
    let mut group = c.benchmark_group("setup");

    for &size in TABLE_SIZES {
        let table = make_table(size);
        group.throughput(Throughput::Elements(size as u64));

        let sum_edx = SimpleEdx::new(DefaultCryptoProvider, Int64Serializer, DsValueSerializer);
        let sum_arq = Arq::new(sum_edx, SumPrefix);
        let sum_key = sum_arq.generate_key().unwrap();
        group.bench_with_input(BenchmarkId::new("sum_prefix", size), &table, |b, table| {
            b.iter(|| black_box(sum_arq.setup(&sum_key, table, &SerialMap).unwrap()));
        });

        let min_edx = SimpleEdx::new(DefaultCryptoProvider, Tuple2Serializer, DsValueSerializer);
        let min_arq = Arq::new(min_edx, MinimumAsTable);
        let min_key = min_arq.generate_key().unwrap();
        group.bench_with_input(BenchmarkId::new("minimum_as_table", size), &table, |b, table| {
            b.iter(|| black_box(min_arq.setup(&min_key, table, &SerialMap).unwrap()));
        });
    }

    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");

    for &size in TABLE_SIZES {
        let table = make_table(size);
        let domain = table.domain();
        let rq = RangeQuery::new(&domain, domain.start + size as i64 / 10, domain.end - size as i64 / 10).unwrap();
        group.throughput(Throughput::Elements(size as u64));

        let sum_edx = SimpleEdx::new(DefaultCryptoProvider, Int64Serializer, DsValueSerializer);
        let sum_arq = Arq::new(sum_edx, SumPrefix);
        let sum_key = sum_arq.generate_key().unwrap();
        let sum_blob = sum_arq.setup(&sum_key, &table, &SerialMap).unwrap();
        let sum_store = sum_arq.load_eds(&sum_blob).unwrap();
        group.bench_with_input(BenchmarkId::new("sum_prefix", size), &rq, |b, rq| {
            b.iter(|| black_box(sum_arq.query(&sum_key, domain, *rq, &sum_store).unwrap()));
        });

        let min_edx = SimpleEdx::new(DefaultCryptoProvider, Tuple2Serializer, DsValueSerializer);
        let min_arq = Arq::new(min_edx, MinimumAsTable);
        let min_key = min_arq.generate_key().unwrap();
        let min_blob = min_arq.setup(&min_key, &table, &SerialMap).unwrap();
        let min_store = min_arq.load_eds(&min_blob).unwrap();
        group.bench_with_input(BenchmarkId::new("minimum_as_table", size), &rq, |b, rq| {
            b.iter(|| black_box(min_arq.query(&min_key, domain, *rq, &min_store).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_setup, bench_query);
criterion_main!(benches);
