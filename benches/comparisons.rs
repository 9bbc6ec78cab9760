#[macro_use]
extern crate criterion;

use criterion::{black_box, Criterion};
use deed::prelude::*;

fn deed_i64_encode(c: &mut Criterion) {
    c.bench_function("deed i64 encode", |b| {
        let v = Value::from(1_000_000i64);
        b.iter(|| encode_full(black_box(&v)))
    });
}

fn deed_i64_write(c: &mut Criterion) {
    c.bench_function("deed i64 write", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(128);
            out.write_i64(black_box(1_000_000)).unwrap();
            out
        })
    });
}

fn json_i64_encode(c: &mut Criterion) {
    c.bench_function("JSON i64 encode", |b| {
        b.iter(|| serde_json::to_string(&black_box(1_000_000i64)))
    });
}

fn deed_i64_decode(c: &mut Criterion) {
    c.bench_function("deed i64 decode", |b| {
        let buf = encode_full(&Value::from(1_000_000i64)).unwrap();
        b.iter(|| decode_full(black_box(&buf)))
    });
}

fn json_i64_decode(c: &mut Criterion) {
    c.bench_function("JSON i64 decode", |b| {
        let s = serde_json::to_string(&1_000_000i64).unwrap();
        b.iter(|| serde_json::from_str::<i64>(black_box(&s)))
    });
}

fn deed_bytes_encode(c: &mut Criterion) {
    c.bench_function("deed bytes encode", |b| {
        let s: Vec<u8> = (0..10_000).map(|x| x as u8).collect();
        let v = Value::from(Bytes::from(s));
        b.iter(|| encode_full(black_box(&v)))
    });
}

fn json_bytes_encode(c: &mut Criterion) {
    c.bench_function("JSON bytes encode", |b| {
        let s: Vec<u8> = (0..10_000).map(|x| x as u8).collect();
        b.iter(|| serde_json::to_string(&black_box(&s)))
    });
}

fn deed_map_encode(c: &mut Criterion) {
    c.bench_function("deed string map encode", |b| {
        let m: VecMap<Value, Value> = (0..100)
            .map(|i| (Value::from(format!("k{}", i)), Value::from(format!("v{}", i))))
            .collect();
        let v = Value::Map(m);
        b.iter(|| encode_full(black_box(&v)))
    });
}

fn json_map_encode(c: &mut Criterion) {
    c.bench_function("JSON string map encode", |b| {
        let m: serde_json::Map<String, serde_json::Value> = (0..100)
            .map(|i| (format!("k{}", i), serde_json::Value::from(format!("v{}", i))))
            .collect();
        b.iter(|| serde_json::to_string(black_box(&m)))
    });
}

criterion_group!(
    benches,
    deed_i64_encode,
    deed_i64_write,
    json_i64_encode,
    deed_i64_decode,
    json_i64_decode,
    deed_bytes_encode,
    json_bytes_encode,
    deed_map_encode,
    json_map_encode,
);

criterion_main!(benches);
