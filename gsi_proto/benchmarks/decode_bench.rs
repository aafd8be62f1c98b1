use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gsi_proto::decode_snapshot;

const IN_MATCH: &str = include_str!("../../integration_tests/tests/fixtures/in_match.json");
const MENU: &str = include_str!("../../integration_tests/tests/fixtures/menu.json");

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for (name, payload) in [("in_match", IN_MATCH), ("menu", MENU)] {
        group.throughput(Throughput::Bytes(payload.len() as u64));
        group.bench_with_input(BenchmarkId::new("payload", name), payload, |b, payload| {
            b.iter(|| decode_snapshot(payload.as_bytes()).expect("fixture decodes"))
        });
    }

    group.finish();
}

criterion_group!(decode_benches, bench_decode);
criterion_main!(decode_benches);
