//! Known-answer tests: the design notes' concrete scenarios, fixed
//! inputs and fixed expected outputs, run end to end through `Arq`.

use arca::{
    Arq, DefaultCryptoProvider, DsValueSerializer, Int64Serializer, MedianAlphaApprox,
    MinimumAsTable, MinimumLinearEmt, MinimumSparseTable, ModeAsTable, Number, RangeQuery,
    SerialMap, SimpleEdx, SumPrefix, Table, Tuple2Serializer, Tuple3Serializer,
};

#[test]
fn sum_prefix_scenario() {
    let table = Table::make_from_list([1, 2, 3, 4, 5]);
    let edx = SimpleEdx::new(DefaultCryptoProvider, Int64Serializer, DsValueSerializer);
    let arq = Arq::new(edx, SumPrefix);

    let key = arq.generate_key().unwrap();
    let blob = arq.setup(&key, &table, &SerialMap).unwrap();
    let store = arq.load_eds(&blob).unwrap();

    let rq = RangeQuery::new(&table.domain(), 1, 4).unwrap();
    let result = arq.query(&key, table.domain(), rq, &store).unwrap();
    assert_eq!(result, Number::Int(9));
}

#[test]
fn minimum_sparse_table_scenario() {
    let table = Table::make_from_list([5, 3, 8, 1, 9, 2, 7]);
    let edx = SimpleEdx::new(DefaultCryptoProvider, Tuple2Serializer, DsValueSerializer);
    let arq = Arq::new(edx, MinimumSparseTable);

    let key = arq.generate_key().unwrap();
    let blob = arq.setup(&key, &table, &SerialMap).unwrap();
    let store = arq.load_eds(&blob).unwrap();

    let rq = RangeQuery::new(&table.domain(), 2, 5).unwrap();
    let result = arq.query(&key, table.domain(), rq, &store).unwrap();
    assert_eq!(result, Number::Int(1));
}

#[test]
fn minimum_as_table_scenario() {
    let table = Table::make_from_list([5, 3, 8, 1, 9, 2, 7]);
    let edx = SimpleEdx::new(DefaultCryptoProvider, Tuple2Serializer, DsValueSerializer);
    let arq = Arq::new(edx, MinimumAsTable);

    let key = arq.generate_key().unwrap();
    let blob = arq.setup(&key, &table, &SerialMap).unwrap();
    let store = arq.load_eds(&blob).unwrap();

    let rq = RangeQuery::new(&table.domain(), 2, 5).unwrap();
    let result = arq.query(&key, table.domain(), rq, &store).unwrap();
    assert_eq!(result, Number::Int(1));
}

#[test]
fn minimum_linear_emt_scenario() {
    let values: Vec<i64> = (0..32).map(|i| (i * 37 + 11) % 97).collect();
    let table = Table::make_from_list(values.clone());
    let edx = SimpleEdx::new(DefaultCryptoProvider, Tuple3Serializer, DsValueSerializer);
    let arq = Arq::new(edx, MinimumLinearEmt::new(&table));

    let key = arq.generate_key().unwrap();
    let blob = arq.setup(&key, &table, &SerialMap).unwrap();
    let store = arq.load_eds(&blob).unwrap();

    let rq = RangeQuery::new(&table.domain(), 3, 14).unwrap();
    let expected = values[3..14].iter().copied().min().unwrap();
    let result = arq.query(&key, table.domain(), rq, &store).unwrap();
    assert_eq!(result, Number::Int(expected));
}

#[test]
fn mode_as_table_scenario() {
    let table = Table::make_from_list([0, 1, 1, 1, 2, 2]);
    let edx = SimpleEdx::new(DefaultCryptoProvider, Tuple2Serializer, DsValueSerializer);
    let arq = Arq::new(edx, ModeAsTable);

    let key = arq.generate_key().unwrap();
    let blob = arq.setup(&key, &table, &SerialMap).unwrap();
    let store = arq.load_eds(&blob).unwrap();

    let rq = RangeQuery::new(&table.domain(), 0, 6).unwrap();
    let result = arq.query(&key, table.domain(), rq, &store).unwrap();
    let Number::Int(mode) = result;
    assert!(table.filter_range(&rq).iter().filter(|&&v| v == mode).count() * 2 >= 3);
}

#[test]
fn median_alpha_approx_scenario() {
    let table = Table::make_from_list([0, 1, 2, 3, 4, 5, 6, 7]);
    let edx = SimpleEdx::new(DefaultCryptoProvider, Tuple2Serializer, DsValueSerializer);
    let arq = Arq::new(edx, MedianAlphaApprox::new(0.5).unwrap());

    let key = arq.generate_key().unwrap();
    let blob = arq.setup(&key, &table, &SerialMap).unwrap();
    let store = arq.load_eds(&blob).unwrap();

    let rq = RangeQuery::new(&table.domain(), 0, 7).unwrap();
    let result = arq.query(&key, table.domain(), rq, &store).unwrap();
    let Number::Int(median) = result;
    assert!((1..=6).contains(&median));
}
