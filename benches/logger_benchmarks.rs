//! Criterion benchmarks for flog

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use flog::core::CallerResolver;
use flog::prelude::*;
use flog::{format_template, prepare};
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn quiet_logger(dir: &TempDir) -> Logger {
    Logger::builder()
        .log_folder(dir.path())
        .console(false)
        .build()
        .expect("Failed to create logger")
}

// ============================================================================
// Formatting Benchmarks
// ============================================================================

fn bench_formatting(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatting");
    group.throughput(Throughput::Elements(1));

    group.bench_function("join", |b| {
        b.iter(|| prepare(&args![black_box("request"), black_box(42), black_box(true)]));
    });

    group.bench_function("printf", |b| {
        b.iter(|| prepare(&args![black_box("%s took %.2fms"), black_box("GET"), black_box(1.25)]));
    });

    group.bench_function("template", |b| {
        b.iter(|| {
            format_template(
                black_box("!1 took !2ms for !3"),
                "!",
                &args!["GET", 1.25, "/index"],
            )
        });
    });

    group.finish();
}

// ============================================================================
// Caller Resolution Benchmarks
// ============================================================================

fn bench_caller_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("caller_resolution");
    group.throughput(Throughput::Elements(1));

    let resolver = CallerResolver::new();
    group.bench_function("cached", |b| {
        b.iter(|| black_box(resolver.resolve(0)));
    });

    group.finish();
}

// ============================================================================
// Logging Performance Benchmarks
// ============================================================================

fn bench_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("logging");
    group.throughput(Throughput::Elements(1));

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = quiet_logger(&temp_dir);

    group.bench_function("info", |b| {
        b.iter(|| logger.info(&args![black_box("Info message")]));
    });

    group.bench_function("error_with_args", |b| {
        b.iter(|| logger.error(&args!["Error code:", black_box(500)]));
    });

    group.bench_function("templated", |b| {
        b.iter(|| logger.warnf("retry !1 of !2", &args![black_box(1), 3]));
    });

    group.bench_function("silent", |b| {
        b.iter(|| logger.sdebug(&args![black_box("Debug message")]));
    });

    group.finish();
    logger.cleanup().expect("Failed to clean up");
}

// ============================================================================
// Concurrent Logging Benchmarks
// ============================================================================

fn bench_concurrent_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_logging");

    for threads in [2usize, 4, 8] {
        let per_thread = 100;
        group.throughput(Throughput::Elements((threads * per_thread) as u64));

        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let logger = Arc::new(quiet_logger(&temp_dir));

        group.bench_function(format!("{}_threads", threads), |b| {
            b.iter(|| {
                let handles: Vec<_> = (0..threads)
                    .map(|t| {
                        let logger = Arc::clone(&logger);
                        thread::spawn(move || {
                            for i in 0..per_thread {
                                logger.info(&args!["thread", t, "message", i]);
                            }
                        })
                    })
                    .collect();
                for handle in handles {
                    handle.join().unwrap();
                }
            });
        });

        logger.cleanup().expect("Failed to clean up");
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_formatting,
    bench_caller_resolution,
    bench_logging,
    bench_concurrent_logging
);
criterion_main!(benches);
