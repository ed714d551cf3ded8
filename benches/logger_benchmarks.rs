//! Criterion benchmarks for rust_logger_facade

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_logger_facade::prelude::*;
use std::time::Duration;

struct Order {
    id: i64,
    sku: &'static str,
    total: f64,
}

impl ObjectMarshaler for Order {
    fn marshal_log_object(&self, enc: &mut ObjectEncoder) {
        enc.add_int64("id", self.id);
        enc.add_string("sku", self.sku);
        enc.add_float64("total", self.total);
    }
}

fn sample_fields() -> Vec<Field> {
    vec![
        Field::string("user", "ana"),
        Field::int64("status", 200),
        Field::float64("load", 0.75),
        Field::bool("cached", true),
        Field::duration("elapsed", Duration::from_micros(1530)),
        Field::object(
            "order",
            &Order {
                id: 42,
                sku: "A-100",
                total: 19.99,
            },
        ),
    ]
}

fn buffer_logger(encoding: Encoding) -> (Logger, SharedBuffer) {
    let buffer = SharedBuffer::new();
    let config = match encoding {
        Encoding::Json => LoggerConfig::production(),
        Encoding::Console => LoggerConfig::development().with_colors(false),
    };
    let logger = config
        .with_stacktrace_level(None)
        .with_buffer(buffer.clone())
        .build()
        .expect("preset builds");
    (logger, buffer)
}

// ============================================================================
// Field Construction Benchmarks
// ============================================================================

fn bench_field_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_construction");
    group.throughput(Throughput::Elements(1));

    group.bench_function("string", |b| {
        b.iter(|| black_box(Field::string(black_box("key"), black_box("value"))));
    });

    group.bench_function("int64", |b| {
        b.iter(|| black_box(Field::int64(black_box("key"), black_box(i64::MAX))));
    });

    group.bench_function("error", |b| {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "connection reset");
        b.iter(|| black_box(Field::error(black_box(&err))));
    });

    group.bench_function("any", |b| {
        let tags = vec!["alpha", "beta", "gamma"];
        b.iter(|| black_box(Field::any(black_box("tags"), black_box(&tags))));
    });

    group.finish();
}

// ============================================================================
// Encoding Benchmarks
// ============================================================================

fn bench_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("encoding");
    group.throughput(Throughput::Elements(1));

    let entry = LogEntry::new(LogLevel::Info, "request served")
        .with_location("src/server.rs", 88)
        .with_fields(sample_fields());

    let json = Encoder::json(EncoderConfig::production());
    group.bench_function("json", |b| {
        b.iter(|| black_box(json.encode(black_box(&entry))));
    });

    let console = Encoder::console(EncoderConfig::development().with_colors(false));
    group.bench_function("console", |b| {
        b.iter(|| black_box(console.encode(black_box(&entry))));
    });

    group.finish();
}

// ============================================================================
// Logging Performance Benchmarks
// ============================================================================

fn bench_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("logging");
    group.throughput(Throughput::Elements(1));
    let fields = sample_fields();

    let (json_logger, json_buffer) = buffer_logger(Encoding::Json);
    group.bench_function("json_with_fields", |b| {
        b.iter(|| {
            json_logger.info_with(black_box("request served"), black_box(&fields));
            json_buffer.clear();
        });
    });

    let (console_logger, console_buffer) = buffer_logger(Encoding::Console);
    group.bench_function("console_with_fields", |b| {
        b.iter(|| {
            console_logger.info_with(black_box("request served"), black_box(&fields));
            console_buffer.clear();
        });
    });

    let nop = new_nop();
    group.bench_function("nop_with_fields", |b| {
        b.iter(|| nop.info_with(black_box("request served"), black_box(&fields)));
    });

    group.finish();
}

// ============================================================================
// Level Filtering Benchmarks
// ============================================================================

fn bench_level_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_filtering");
    group.throughput(Throughput::Elements(1));

    let (logger, _buffer) = buffer_logger(Encoding::Json);
    let sugar = logger.sugar();

    group.bench_function("filtered_debug", |b| {
        b.iter(|| sugar.debug(black_box("filtered out")));
    });

    group.bench_function("filtered_debugf", |b| {
        b.iter(|| sugar.debugf(format_args!("filtered {}", black_box(42))));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_field_construction,
    bench_encoding,
    bench_logging,
    bench_level_filtering
);
criterion_main!(benches);
