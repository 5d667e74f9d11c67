use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use json_core::{analyze, lexer::Lexer, parser::Parser};

const TINY_JSON: &str = r#"{"value": 42}"#;

const SMALL_JSON: &str = r#"{
    "name": "test",
    "version": 1.0,
    "enabled": true,
    "tags": ["a", "b", "c"]
}"#;

const MEDIUM_JSON: &str = r#"{
    "servers": [
        {"host": "server1.com", "port": 8080, "ssl": true, "retries": 5},
        {"host": "server2.com", "port": 8081, "ssl": true, "retries": 5},
        {"host": "server3.com", "port": 8082, "ssl": false, "retries": 3}
    ],
    "limits": {"max_connections": 1000, "timeout_seconds": 30.5, "backoff": 1.5e-2},
    "owner": null,
    "motd": "Welcome é\t\"friend\"\n"
}"#;

fn generate_array(size: usize) -> String {
    let mut json = String::from("{\n    \"items\": [\n");
    for i in 0..size {
        if i > 0 {
            json.push_str(",\n");
        }
        json.push_str(&format!(
            "        {{\"id\": {}, \"name\": \"Item {}\", \"value\": {}.25, \"active\": {}}}",
            i,
            i,
            i * 100,
            i % 2 == 0
        ));
    }
    json.push_str("\n    ]\n}");
    json
}

fn generate_nested(depth: usize) -> String {
    let mut json = "[".repeat(depth);
    json.push_str("{\"leaf\": true}");
    json.push_str(&"]".repeat(depth));
    json
}

// === Lexer ===

fn bench_lexer_tiny(c: &mut Criterion) {
    c.bench_function("lexer_tiny", |b| {
        b.iter(|| {
            let mut lexer = Lexer::new(black_box(TINY_JSON));
            lexer.lex()
        })
    });
}

fn bench_lexer_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_by_size");

    for (name, source) in [("tiny", TINY_JSON), ("small", SMALL_JSON), ("medium", MEDIUM_JSON)] {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), source, |b, src| {
            b.iter(|| {
                let mut lexer = Lexer::new(black_box(src));
                lexer.lex()
            })
        });
    }

    group.finish();
}

// === Parser ===

fn bench_parser_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_by_size");

    for (name, source) in [("tiny", TINY_JSON), ("small", SMALL_JSON), ("medium", MEDIUM_JSON)] {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), source, |b, src| {
            b.iter(|| {
                let mut parser = Parser::new(black_box(src)).unwrap();
                parser.parse_document()
            })
        });
    }

    group.finish();
}

fn bench_parser_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_array_scaling");

    for size in [10, 100, 1000, 10000] {
        let source = generate_array(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &source, |b, src| {
            b.iter(|| {
                let mut parser = Parser::new(black_box(src)).unwrap();
                parser.parse_document()
            })
        });
    }

    group.finish();
}

fn bench_parser_nesting(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_nesting");

    for depth in [8, 64, 256] {
        let source = generate_nested(depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &source, |b, src| {
            b.iter(|| {
                let mut parser = Parser::new(black_box(src)).unwrap();
                parser.parse_document()
            })
        });
    }

    group.finish();
}

// === End to end ===

fn bench_e2e_with_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("e2e_with_json_serialization");

    for (name, source) in [("tiny", TINY_JSON), ("small", SMALL_JSON), ("medium", MEDIUM_JSON)] {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), source, |b, src| {
            b.iter(|| {
                let result = analyze(black_box(src), "benchmark.json").unwrap();
                result.to_json()
            })
        });
    }

    group.finish();
}

fn bench_error_path(c: &mut Criterion) {
    let mut source = generate_array(1000);
    source.truncate(source.len() - 4);
    source.push_str(",]}");

    c.bench_function("error_trailing_comma_1000", |b| {
        b.iter(|| analyze(black_box(&source), "broken.json").is_err())
    });
}

criterion_group!(lexer_benches, bench_lexer_tiny, bench_lexer_sizes);

criterion_group!(
    parser_benches,
    bench_parser_sizes,
    bench_parser_scaling,
    bench_parser_nesting
);

criterion_group!(e2e_benches, bench_e2e_with_serialization, bench_error_path);

criterion_main!(lexer_benches, parser_benches, e2e_benches);
