//! Criterion benchmarks for the handle bridge: unbox, lock, call,
//! translate.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use dyngraph_ffi::bridge;

fn bench_value_round_trip(c: &mut Criterion) {
    let signal = bridge::create_signal("bench-value", "double").unwrap();
    c.bench_function("bridge_set_get_value", |b| {
        b.iter(|| {
            bridge::set_signal_value(signal, black_box("1.25")).unwrap();
            black_box(bridge::signal_value(signal).unwrap());
        });
    });
}

fn bench_recompute(c: &mut Criterion) {
    let gain = bridge::create_entity("Gain", "bench-gain").unwrap();
    let sout = bridge::entity_signal(gain, "sout").unwrap();
    let mut t = 0;
    c.bench_function("bridge_recompute_gain", |b| {
        b.iter(|| {
            t += 1;
            black_box(bridge::recompute(sout, t).unwrap());
        });
    });
}

fn bench_failed_plug(c: &mut Criterion) {
    let d = bridge::create_signal("bench-d", "double").unwrap();
    let i = bridge::create_signal("bench-i", "int").unwrap();
    c.bench_function("bridge_plug_rejected", |b| {
        b.iter(|| black_box(bridge::plug(d, i).unwrap_err()));
    });
}

criterion_group!(benches, bench_value_round_trip, bench_recompute, bench_failed_plug);
criterion_main!(benches);
