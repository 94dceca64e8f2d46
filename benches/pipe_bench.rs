//! Benchmarks for slotpipe.
//!
//! Run with:
//!     cargo bench

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use slotpipe::{PipeConfig, Pipeline};

/// Deterministic per-chunk payload.
fn fill_chunk(buf: &mut [u8], seed: usize) {
    for (i, byte) in buf.iter_mut().enumerate() {
        *byte = ((i * 7 + seed * 13) % 251) as u8;
    }
}

/// Fixed compute cost per chunk, standing in for a processing stage.
fn busy_work(data: &[u8], rounds: usize) -> u64 {
    let mut acc = 0u64;
    for _ in 0..rounds {
        for &byte in data {
            acc = acc.wrapping_mul(31).wrapping_add(byte as u64);
        }
    }
    acc
}

fn bench_overlap(c: &mut Criterion) {
    let mut group = c.benchmark_group("overlap");
    let chunk = 64 * 1024;
    let chunks = 16usize;
    let rounds = 2;

    group.throughput(Throughput::Bytes((chunk * chunks) as u64));

    // Both stages on one thread: costs add up.
    group.bench_function("serial", |b| {
        b.iter(|| {
            let mut buf = vec![0u8; chunk];
            let mut acc = 0u64;
            for i in 0..chunks {
                fill_chunk(&mut buf, i);
                acc ^= busy_work(&buf, rounds);
                acc ^= busy_work(black_box(&buf), rounds);
            }
            black_box(acc)
        });
    });

    // Same two costs overlapped across the ring.
    for slot_count in [1, 2, 4] {
        let config = PipeConfig::new(slot_count, chunk).unwrap();
        group.bench_function(format!("pipelined_{}_slots", slot_count), |b| {
            b.iter(|| {
                let mut remaining = chunks;
                let mut acc = 0u64;
                Pipeline::new(config)
                    .run::<_, _, ()>(
                        move |buf| {
                            if remaining == 0 {
                                return Ok(0);
                            }
                            remaining -= 1;
                            fill_chunk(buf, remaining);
                            black_box(busy_work(buf, rounds));
                            Ok(buf.len())
                        },
                        |data| {
                            acc ^= busy_work(data, rounds);
                            Ok(())
                        },
                    )
                    .unwrap();
                black_box(acc)
            });
        });
    }

    group.finish();
}

fn bench_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("throughput");
    let size = 4 * 1024 * 1024;
    let data: Vec<u8> = (0..size).map(|i| (i * 7 + 13) as u8).collect();

    group.throughput(Throughput::Bytes(size as u64));

    // Pure copy cost without a second thread, as the baseline.
    group.bench_function("io_copy_serial", |b| {
        b.iter(|| {
            let mut reader = std::io::Cursor::new(black_box(&data));
            let mut writer = Vec::with_capacity(size);
            std::io::copy(&mut reader, &mut writer).unwrap();
            black_box(writer.len())
        });
    });

    group.bench_function("io_copy_pipelined", |b| {
        b.iter(|| {
            let mut reader = std::io::Cursor::new(black_box(&data));
            let mut writer = Vec::with_capacity(size);
            slotpipe::io::copy(&mut reader, &mut writer, PipeConfig::default()).unwrap();
            black_box(writer.len())
        });
    });

    group.finish();
}

fn bench_capacities(c: &mut Criterion) {
    let mut group = c.benchmark_group("capacities");
    let size = 1024 * 1024;
    let data: Vec<u8> = (0..size).map(|i| (i * 7 + 13) as u8).collect();

    group.throughput(Throughput::Bytes(size as u64));

    for capacity in [4 * 1024, 64 * 1024, 256 * 1024] {
        let config = PipeConfig::default().with_slot_capacity(capacity);
        group.bench_with_input(
            format!("copy_{}kb_slots", capacity / 1024),
            &config,
            |b, config| {
                b.iter(|| {
                    let mut reader = std::io::Cursor::new(black_box(&data));
                    let mut writer = Vec::with_capacity(size);
                    slotpipe::io::copy(&mut reader, &mut writer, *config).unwrap();
                    black_box(writer.len())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_overlap, bench_throughput, bench_capacities);
criterion_main!(benches);
