use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use linecfg::{decode, encode, from_str, record, to_string, LineMap};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Serialize, Deserialize, Default, Clone)]
#[serde(default)]
struct Service {
    host: String,
    port: u16,
    #[serde(with = "linecfg::duration")]
    timeout: Duration,
    ratio: f64,
    debug: bool,
}

record!(Service {
    host,
    port,
    timeout as "connect_timeout",
    ratio,
    debug,
});

fn service() -> Service {
    Service {
        host: "db.internal".to_string(),
        port: 5432,
        timeout: Duration::from_millis(1500),
        ratio: 0.75,
        debug: true,
    }
}

fn benchmark_encode(c: &mut Criterion) {
    let service = service();

    c.bench_function("encode_record", |b| b.iter(|| encode(black_box(&service))));
}

fn benchmark_decode(c: &mut Criterion) {
    let line = encode(&service());

    c.bench_function("decode_record", |b| {
        b.iter(|| {
            let mut service = Service::default();
            decode(black_box(&line), &mut service).map(|_| service)
        })
    });

    let folded = "HOST=db.internal Port=5432 Timeout=1.5s RATIO=0.75 Debug=";
    c.bench_function("decode_record_case_insensitive", |b| {
        b.iter(|| {
            let mut service = Service::default();
            decode(black_box(folded), &mut service).map(|_| service)
        })
    });
}

fn benchmark_serde(c: &mut Criterion) {
    let service = service();
    let line = to_string(&service).unwrap();

    c.bench_function("serialize_struct", |b| {
        b.iter(|| to_string(black_box(&service)))
    });

    c.bench_function("deserialize_struct", |b| {
        b.iter(|| from_str::<Service>(black_box(&line)))
    });
}

fn benchmark_line_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_map");

    for size in [4, 16, 64].iter() {
        let line = (0..*size)
            .map(|i| format!("key{}=value{}", i, i))
            .collect::<Vec<_>>()
            .join(" ");

        group.bench_with_input(BenchmarkId::from_parameter(size), &line, |b, line| {
            b.iter(|| LineMap::parse(black_box(line)))
        });
    }
    group.finish();
}

fn benchmark_duration(c: &mut Criterion) {
    let mut group = c.benchmark_group("duration");

    group.bench_function("parse", |b| {
        b.iter(|| linecfg::duration::parse(black_box("1h2m3.5s")))
    });

    group.bench_function("format", |b| {
        b.iter(|| linecfg::duration::format(black_box(Duration::new(3723, 500_000_000))))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_encode,
    benchmark_decode,
    benchmark_serde,
    benchmark_line_map,
    benchmark_duration
);
criterion_main!(benches);
