use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use vbyte64::{compress, compress_framed, compressed_size, decompress, decompress_framed, Clz, Ladder, WidthStrategy};

/// Sorted IDs with small gaps, the case delta mode is built for
fn sorted_values(count: u64) -> Vec<u64> {
    (0..count).map(|i| 1_760_000_000 + i * 7 + (i % 5)).collect()
}

/// Values cycling through every width class
fn mixed_values(count: u64) -> Vec<u64> {
    (0..count).map(|i| (i.wrapping_mul(0x9E37_79B9_7F4A_7C15)) >> ((i % 8) * 8)).collect()
}

fn bench_width(c: &mut Criterion) {
    let values = mixed_values(10_000);
    let mut group = c.benchmark_group("width");
    group.throughput(Throughput::Elements(values.len() as u64));
    group.bench_function("clz", |b| {
        b.iter(|| values.iter().map(|&v| u32::from(Clz::width(black_box(v)))).sum::<u32>())
    });
    group.bench_function("ladder", |b| {
        b.iter(|| values.iter().map(|&v| u32::from(Ladder::width(black_box(v)))).sum::<u32>())
    });
    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for count in [100u64, 10_000, 1_000_000] {
        let values = sorted_values(count);
        group.throughput(Throughput::Elements(count));
        group.bench_with_input(BenchmarkId::new("plain", count), &values, |b, v| {
            b.iter(|| black_box(compress(black_box(v), false).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("delta", count), &values, |b, v| {
            b.iter(|| black_box(compress(black_box(v), true).unwrap()))
        });
    }
    group.finish();
}

fn bench_estimate(c: &mut Criterion) {
    let values = sorted_values(1_000_000);
    let mut group = c.benchmark_group("estimate");
    group.throughput(Throughput::Elements(values.len() as u64));
    group.bench_function("delta_1000000", |b| b.iter(|| black_box(compressed_size(black_box(&values), true))));
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let values = sorted_values(1_000_000);
    let plain = compress(&values, false).unwrap();
    let framed = compress_framed(&values, true).unwrap();

    let mut group = c.benchmark_group("decode");
    group.throughput(Throughput::Elements(values.len() as u64));
    group.bench_function("plain_1000000", |b| {
        b.iter(|| black_box(decompress(black_box(plain.as_bytes()), values.len(), false).unwrap()))
    });
    group.bench_function("delta_framed_1000000", |b| {
        b.iter(|| black_box(decompress_framed(black_box(framed.as_bytes()), true).unwrap()))
    });
    group.finish();
}

fn bench_file(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bench.vb64");
    let values = sorted_values(100_000);

    let mut group = c.benchmark_group("file");
    group.throughput(Throughput::Elements(values.len() as u64));
    group.sample_size(20);
    group.bench_function("roundtrip_100000", |b| {
        b.iter(|| {
            vbyte64::compress_to_file(black_box(&values), true, &path).unwrap();
            black_box(vbyte64::decompress_from_file(&path, true).unwrap())
        })
    });
    group.finish();
}

criterion_group!(benches, bench_width, bench_estimate, bench_encode, bench_decode, bench_file);
criterion_main!(benches);
